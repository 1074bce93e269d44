use super::parse_show_id;
use crate::services::{ShowError, ShowService};

pub async fn cmd_remove_show(
    service: &dyn ShowService,
    id_str: &str,
    skip_confirm: bool,
) -> anyhow::Result<()> {
    let Some(id) = parse_show_id(id_str) else {
        return Ok(());
    };

    let show = match service.get_show(id).await {
        Ok(show) => show,
        Err(ShowError::NotFound(_)) => {
            println!("Show with ID {id} not found.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if !skip_confirm {
        println!("Remove '{}' (ID: {}) and its watch history?", show.title, show.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    service.delete_show(id).await?;
    println!("✓ Removed: {}", show.title);

    Ok(())
}
