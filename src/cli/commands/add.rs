use crate::domain::{AirDay, EpisodeMarker, Priority};
use crate::models::NewShow;
use crate::services::ShowService;

pub struct AddArgs {
    pub title: String,
    pub current: EpisodeMarker,
    pub latest: Option<EpisodeMarker>,
    pub service: Option<String>,
    pub air_day: Option<AirDay>,
    pub priority: Option<i64>,
    pub notes: Option<String>,
}

impl AddArgs {
    fn into_new_show(self) -> anyhow::Result<NewShow> {
        let priority = self
            .priority
            .map(Priority::new)
            .transpose()
            .map_err(anyhow::Error::msg)?;

        let mut new_show = NewShow::new(self.title, self.current, self.latest.unwrap_or(self.current));
        new_show.service = self.service;
        new_show.air_day = self.air_day;
        new_show.priority = priority;
        new_show.notes = self.notes;
        Ok(new_show)
    }
}

pub async fn cmd_add_show(service: &dyn ShowService, args: AddArgs) -> anyhow::Result<()> {
    let show = service.create_show(args.into_new_show()?).await?;

    println!("✓ Added: {} (ID: {})", show.title, show.id);
    println!(
        "  At {} of {} - {}",
        show.current_episode,
        show.latest_available_episode,
        show.status.label()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_defaults_to_current() {
        let current = EpisodeMarker::new(2, 4).unwrap();
        let new_show = AddArgs {
            title: "Foo".to_string(),
            current,
            latest: None,
            service: None,
            air_day: None,
            priority: Some(1),
            notes: None,
        }
        .into_new_show()
        .unwrap();

        assert_eq!(new_show.latest_available_episode, current);
        assert_eq!(new_show.priority, Some(Priority::new(1).unwrap()));
    }

    #[test]
    fn out_of_range_priority_is_rejected() {
        let args = AddArgs {
            title: "Foo".to_string(),
            current: EpisodeMarker::default(),
            latest: None,
            service: None,
            air_day: None,
            priority: Some(7),
            notes: None,
        };
        assert!(args.into_new_show().is_err());
    }
}
