pub use super::shows::Entity as Shows;
pub use super::watch_history::Entity as WatchHistory;
