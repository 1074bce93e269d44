//! Server-rendered dashboard.
//!
//! The page is plain HTML with one form per action, so it works without
//! any client-side script.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::{Html, Redirect},
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::warn;

use super::validation::validate_show_id;
use super::{ApiError, AppState, ShowDto};
use crate::domain::{ShowId, ShowSort, ShowStatus};
use crate::services::ShowError;
use crate::services::show_service::partition_by_status;

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let title = state.config().read().await.dashboard.title.clone();
    let shows = state.show_service().list_shows(ShowSort::Created).await?;

    Ok(Html(render_dashboard(&title, shows)))
}

pub async fn mark_caught_up(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Redirect, ApiError> {
    let Some(show_id) = parse_action_id(path) else {
        return Ok(Redirect::to("/"));
    };
    let result = state.show_service().mark_caught_up(show_id).await.map(|_| ());
    redirect_home(show_id.value(), result)
}

pub async fn next_episode(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Redirect, ApiError> {
    let Some(show_id) = parse_action_id(path) else {
        return Ok(Redirect::to("/"));
    };
    let result = state.show_service().next_episode(show_id).await.map(|_| ());
    redirect_home(show_id.value(), result)
}

fn parse_action_id(path: Result<Path<i32>, PathRejection>) -> Option<ShowId> {
    match path {
        Ok(Path(id)) => validate_show_id(id)
            .inspect_err(|_| warn!(show_id = id, "Dashboard action with invalid show ID"))
            .ok(),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Dashboard action with unparseable show ID");
            None
        }
    }
}

/// Form posts always land back on the dashboard unless storage failed.
fn redirect_home(id: i32, result: Result<(), ShowError>) -> Result<Redirect, ApiError> {
    match result {
        Ok(()) => {}
        Err(ShowError::NotFound(_)) => warn!(show_id = id, "Dashboard action on unknown show"),
        Err(ShowError::Validation(msg)) => warn!(show_id = id, "Dashboard action rejected: {}", msg),
        Err(err @ ShowError::Database(_)) => return Err(err.into()),
    }
    Ok(Redirect::to("/"))
}

#[must_use]
pub fn render_dashboard(title: &str, shows: Vec<ShowDto>) -> String {
    let (ready, catching_up) = partition_by_status(shows);
    let title = encode_text(title);

    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n<body>\n<header><h1>{title}</h1></header>\n<main>\n"
    );

    render_section(&mut html, ShowStatus::ReadyToWatch, &ready);
    render_section(&mut html, ShowStatus::CatchingUp, &catching_up);

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_section(html: &mut String, status: ShowStatus, shows: &[ShowDto]) {
    let _ = write!(
        html,
        "<section class=\"group {}\">\n<h2>{} <span class=\"count\">{}</span></h2>\n",
        status.as_str(),
        status.label(),
        shows.len()
    );

    if shows.is_empty() {
        html.push_str("<p class=\"empty\">Nothing here.</p>\n");
    }

    for show in shows {
        render_card(html, show);
    }

    html.push_str("</section>\n");
}

fn render_card(html: &mut String, show: &ShowDto) {
    let id = show.id.value();

    let _ = write!(
        html,
        "<article class=\"card priority-{}\" data-id=\"{id}\">\n<h3>{}</h3>\n",
        show.priority,
        encode_text(&show.title)
    );

    let mut meta = Vec::new();
    if let Some(service) = &show.service {
        meta.push(encode_text(service).into_owned());
    }
    if let Some(day) = show.air_day {
        meta.push(day.as_str().to_string());
    }
    if !meta.is_empty() {
        let _ = writeln!(html, "<p class=\"meta\">{}</p>", meta.join(" &middot; "));
    }

    let _ = writeln!(
        html,
        "<p class=\"progress\">Watched <strong>{}</strong> of <strong>{}</strong></p>",
        show.current_episode, show.latest_available_episode
    );

    if let Some(notes) = &show.notes {
        let _ = writeln!(html, "<p class=\"notes\">{}</p>", encode_text(notes));
    }

    let label = encode_double_quoted_attribute(&show.title);
    let _ = write!(
        html,
        "<div class=\"actions\">\n\
         <form method=\"post\" action=\"/next-episode/{id}\">\
         <button type=\"submit\" aria-label=\"Next episode of {label}\">+1 Episode</button></form>\n\
         <form method=\"post\" action=\"/mark-caught-up/{id}\">\
         <button type=\"submit\" aria-label=\"Mark {label} caught up\">Caught Up</button></form>\n\
         </div>\n</article>\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirDay, EpisodeMarker, Priority};
    use chrono::Utc;

    fn dto(id: i32, title: &str, cur: u32, latest: u32) -> ShowDto {
        let current_episode = EpisodeMarker::new(1, cur).unwrap();
        let latest_available_episode = EpisodeMarker::new(1, latest).unwrap();
        ShowDto {
            id: ShowId::new(id),
            title: title.to_string(),
            service: None,
            current_episode,
            latest_available_episode,
            status: crate::domain::classify(current_episode, latest_available_episode),
            air_day: None,
            priority: Priority::default(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn groups_shows_under_their_status() {
        let html = render_dashboard(
            "What's On",
            vec![dto(1, "Behind Show", 1, 4), dto(2, "Done Show", 4, 4)],
        );

        let ready_at = html.find("Ready to Watch").unwrap();
        let catching_at = html.find("Catching Up").unwrap();
        let done_at = html.find("Done Show").unwrap();
        let behind_at = html.find("Behind Show").unwrap();

        assert!(ready_at < done_at && done_at < catching_at);
        assert!(catching_at < behind_at);
        assert!(html.contains("action=\"/mark-caught-up/1\""));
        assert!(html.contains("action=\"/next-episode/2\""));
        assert!(html.contains("Watched <strong>S01E01</strong> of <strong>S01E04</strong>"));
    }

    #[test]
    fn escapes_user_text() {
        let mut show = dto(7, "<script>alert(1)</script>", 1, 2);
        show.notes = Some("Tom & Jerry".to_string());
        show.service = Some("\"Max\"".to_string());
        show.air_day = Some(AirDay::Weekend);

        let html = render_dashboard("<b>Mine</b>", vec![show]);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("&lt;b&gt;Mine&lt;/b&gt;"));
        assert!(html.contains("Weekend"));
    }

    #[test]
    fn empty_groups_render_placeholder() {
        let html = render_dashboard("What's On", Vec::new());
        assert_eq!(html.matches("Nothing here.").count(), 2);
    }
}
