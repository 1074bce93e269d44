//! Command-line interface for What's On.

mod commands;

use clap::{Parser, Subcommand};

use crate::domain::{AirDay, EpisodeMarker};

/// What's On - keep track of where you are in every show
#[derive(Parser)]
#[command(name = "whatson")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// List tracked shows
    #[command(alias = "ls", alias = "l")]
    List {
        /// Sort order: created, priority (grouped by status), title or updated
        #[arg(long, default_value = "created")]
        sort: String,
    },

    /// Start tracking a show
    #[command(alias = "a")]
    Add {
        /// Show title
        #[arg(required = true)]
        title: Vec<String>,
        /// Last watched episode, e.g. S1E3
        #[arg(long, default_value = "S1E0")]
        current: EpisodeMarker,
        /// Latest available episode (defaults to --current)
        #[arg(long)]
        latest: Option<EpisodeMarker>,
        /// Streaming service
        #[arg(long)]
        service: Option<String>,
        /// Day new episodes air
        #[arg(long)]
        air_day: Option<AirDay>,
        /// Priority from 1 (highest) to 3 (lowest)
        #[arg(long)]
        priority: Option<i64>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Stop tracking a show
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Show ID to remove
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Mark a show as caught up with the latest episode
    #[command(alias = "done")]
    CaughtUp {
        /// Show ID
        id: String,
    },

    /// Record an episode as watched
    #[command(alias = "w")]
    Watched {
        /// Show ID
        id: String,
        /// Episode, e.g. S2E4
        episode: EpisodeMarker,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["whatson"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn add_parses_markers_and_air_day() {
        let cli = Cli::try_parse_from([
            "whatson", "add", "The", "Bear", "--current", "S3E1", "--latest", "s03e10",
            "--air-day", "wednesday",
        ])
        .unwrap();

        let Some(Commands::Add {
            title,
            current,
            latest,
            air_day,
            ..
        }) = cli.command
        else {
            panic!("expected add command");
        };
        assert_eq!(title.join(" "), "The Bear");
        assert_eq!(current, EpisodeMarker::new(3, 1).unwrap());
        assert_eq!(latest, Some(EpisodeMarker::new(3, 10).unwrap()));
        assert_eq!(air_day, Some(AirDay::Wednesday));
    }

    #[test]
    fn list_defaults_to_creation_order() {
        let cli = Cli::try_parse_from(["whatson", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { ref sort }) if sort == "created"));

        let cli = Cli::try_parse_from(["whatson", "ls", "--sort", "priority"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { ref sort }) if sort == "priority"));
    }

    #[test]
    fn add_rejects_bad_marker() {
        assert!(Cli::try_parse_from(["whatson", "add", "X", "--current", "E3"]).is_err());
    }

    #[test]
    fn watched_takes_id_and_episode() {
        let cli = Cli::try_parse_from(["whatson", "watched", "4", "S1E2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Watched { ref id, .. }) if id == "4"));
    }
}
