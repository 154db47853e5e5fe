//! Markup fragments for every region of the race page.
//!
//! All functions here are pure: data in, HTML string out. Each fragment
//! replaces a whole region, so nothing here assumes what was there before.

use crate::protocol::{RacePosition, Racer, Track};
use html_escape::encode_text;
use std::fmt::Write;

const YOU_SUFFIX: &str = " (you)";

fn selected_class(id: u32, selected: Option<u32>) -> &'static str {
    if selected == Some(id) {
        " selected"
    } else {
        ""
    }
}

pub fn render_track_list(tracks: &[Track], selected: Option<u32>) -> String {
    if tracks.is_empty() {
        return "<h4>Loading Tracks...</h4>".to_string();
    }

    let mut items = String::new();
    for track in tracks {
        let _ = write!(
            items,
            r#"<li class="card track{}" id="track-{}" data-id="{}"><h3>{}</h3></li>"#,
            selected_class(track.id, selected),
            track.id,
            track.id,
            encode_text(&track.name),
        );
    }
    format!(r#"<ul id="track-cards">{items}</ul>"#)
}

pub fn render_racer_list(racers: &[Racer], selected: Option<u32>) -> String {
    if racers.is_empty() {
        return "<h4>Loading Racers...</h4>".to_string();
    }

    let mut items = String::new();
    for racer in racers {
        let _ = write!(
            items,
            r#"<li class="card podracer{}" id="racer-{}" data-id="{}"><h3>{}</h3><p>{}</p><p>{}</p><p>{}</p></li>"#,
            selected_class(racer.id, selected),
            racer.id,
            racer.id,
            encode_text(&racer.driver_name),
            racer.top_speed,
            racer.acceleration,
            racer.handling,
        );
    }
    format!(r#"<ul id="racer-cards">{items}</ul>"#)
}

pub fn render_countdown(seconds_remaining: u32) -> String {
    format!(r#"<h2>Race Starts In...</h2><p id="big-numbers">{seconds_remaining}</p>"#)
}

pub fn render_race_start_view(track: &Track, countdown_from: u32) -> String {
    format!(
        concat!(
            r#"<header><h1>Race: {}</h1></header>"#,
            r#"<main id="two-columns">"#,
            r#"<section id="leaderBoard">{}</section>"#,
            r#"<section id="accelerate"><h2>Directions</h2>"#,
            r#"<p>Click the button as fast as you can to make your racer go faster!</p>"#,
            r#"<button id="gas-peddle">Click Me To Win!</button></section>"#,
            r#"</main><footer></footer>"#,
        ),
        encode_text(&track.name),
        render_countdown(countdown_from),
    )
}

fn leaderboard_rows(positions: &[RacePosition], player_id: Option<u32>) -> String {
    let mut rows = String::new();
    for (rank, position) in positions.iter().enumerate() {
        let suffix = if Some(position.id) == player_id {
            YOU_SUFFIX
        } else {
            ""
        };
        let _ = write!(
            rows,
            r#"<tr data-id="{}"><td><h3>{} - {}{}</h3></td></tr>"#,
            position.id,
            rank + 1,
            encode_text(&position.driver_name),
            suffix,
        );
    }
    format!(r#"<main><h3>The Leaderboard</h3><section id="leaderBoard">{rows}</section></main>"#)
}

/// Live leaderboard, furthest segment first. Racers on the same segment keep
/// the order the service sent them in.
pub fn render_race_progress(positions: &[RacePosition], player_id: Option<u32>) -> String {
    let mut ordered = positions.to_vec();
    ordered.sort_by(|a, b| b.segment.cmp(&a.segment));
    leaderboard_rows(&ordered, player_id)
}

/// Final standings by finishing position. Racers without one go last.
pub fn render_results_view(positions: &[RacePosition], player_id: Option<u32>) -> String {
    let mut ordered = positions.to_vec();
    ordered.sort_by_key(|p| p.final_position.unwrap_or(u32::MAX));
    format!(
        r#"<header><h1>The Race Results</h1></header><main>{}<a href="/race">Start a new race</a></main>"#,
        leaderboard_rows(&ordered, player_id),
    )
}

pub fn render_notice(message: &str) -> String {
    format!(r#"<p class="notice">{}</p>"#, encode_text(message))
}

pub fn render_error_view(message: &str) -> String {
    format!(
        r#"<header><h1>Something went wrong</h1></header><main><p class="error">{}</p><a href="/race">Start a new race</a></main>"#,
        encode_text(message),
    )
}
