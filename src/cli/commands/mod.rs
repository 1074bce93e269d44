mod add;
mod caught_up;
mod list;
mod remove;
mod watched;

pub use add::{AddArgs, cmd_add_show};
pub use caught_up::cmd_caught_up;
pub use list::cmd_list_shows;
pub use remove::cmd_remove_show;
pub use watched::cmd_watched;

use crate::domain::ShowId;

/// Parses a user-typed show id, printing a hint when it is not a positive integer.
fn parse_show_id(id_str: &str) -> Option<ShowId> {
    match id_str.trim().parse::<i32>() {
        Ok(id) if id > 0 => Some(ShowId::new(id)),
        _ => {
            println!("Invalid show ID: {id_str}");
            println!("Use 'whatson list' to see show IDs.");
            None
        }
    }
}
