//! List shows command handler

use crate::api::ShowDto;
use crate::domain::ShowSort;
use crate::services::ShowService;
use crate::services::show_service::partition_by_status;

pub async fn cmd_list_shows(service: &dyn ShowService, sort: &str) -> anyhow::Result<()> {
    let sort: ShowSort = sort.parse().map_err(anyhow::Error::msg)?;
    let shows = service.list_shows(sort).await?;

    if shows.is_empty() {
        println!("No shows tracked yet.");
        println!();
        println!("Add one with: whatson add \"Show Title\" --current S1E1 --latest S1E3");
        return Ok(());
    }

    println!("Tracked Shows ({} total)", shows.len());
    println!("{:-<70}", "");

    if sort == ShowSort::Priority {
        let (ready, catching_up) = partition_by_status(shows);
        print_group("Ready to Watch", &ready);
        print_group("Catching Up", &catching_up);
    } else {
        for show in &shows {
            print_show(show);
        }
    }

    Ok(())
}

fn print_group(heading: &str, shows: &[ShowDto]) {
    println!();
    println!("{heading} ({})", shows.len());
    for show in shows {
        print_show(show);
    }
}

fn print_show(show: &ShowDto) {
    let service = show.service.as_deref().unwrap_or("-");
    let air_day = show.air_day.map_or("-", |d| d.as_str());

    println!(
        "[{}] {}  {} / {}  ({})",
        show.id,
        show.title,
        show.current_episode,
        show.latest_available_episode,
        show.status.label()
    );
    println!(
        "     Service: {} | Airs: {} | Priority: {}",
        service, air_day, show.priority
    );
    if let Some(notes) = &show.notes {
        println!("     Notes: {notes}");
    }
}
