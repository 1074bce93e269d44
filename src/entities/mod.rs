pub mod prelude;

pub mod shows;
pub mod watch_history;
