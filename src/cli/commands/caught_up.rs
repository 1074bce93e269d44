use super::parse_show_id;
use crate::services::{ShowError, ShowService};

pub async fn cmd_caught_up(service: &dyn ShowService, id_str: &str) -> anyhow::Result<()> {
    let Some(id) = parse_show_id(id_str) else {
        return Ok(());
    };

    match service.mark_caught_up(id).await {
        Ok(show) => {
            println!("✓ {} is caught up at {}", show.title, show.current_episode);
            Ok(())
        }
        Err(ShowError::NotFound(_)) => {
            println!("Show with ID {id} not found.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
