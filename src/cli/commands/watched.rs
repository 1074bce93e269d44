use super::parse_show_id;
use crate::domain::EpisodeMarker;
use crate::services::{ShowError, ShowService};

pub async fn cmd_watched(
    service: &dyn ShowService,
    id_str: &str,
    episode: EpisodeMarker,
) -> anyhow::Result<()> {
    let Some(id) = parse_show_id(id_str) else {
        return Ok(());
    };

    match service.mark_watched(id, episode).await {
        Ok(show) => {
            println!("✓ Watched {} of {}", episode, show.title);
            println!(
                "  Latest available: {} - {}",
                show.latest_available_episode,
                show.status.label()
            );
            Ok(())
        }
        Err(ShowError::NotFound(_)) => {
            println!("Show with ID {id} not found.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
