use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Error, Result,
    types::{Chart, MatchRecord, MatchTableRow, RawEntry, Report},
};

/// Case-insensitive substring match of `artist` against the credited
/// artists of an entry.
pub fn entry_matches(artist: &str, entry: &RawEntry) -> bool {
    let needle = artist.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    entry
        .artists
        .iter()
        .any(|credited| credited.to_lowercase().contains(&needle))
}

/// Collects the placements of `artist` in a chart.
///
/// Positions are 1-based over every slot of the listing, malformed slots
/// included, because that is where the track sits for a listener.
pub fn match_chart(artist: &str, chart: &Chart) -> Vec<MatchRecord> {
    let total = chart.entries.len();
    chart
        .entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let entry = entry.as_ref()?;
            entry_matches(artist, entry).then(|| MatchRecord {
                track: entry.title.clone(),
                source: chart.name.clone(),
                position: format_position(i + 1, total),
                date: entry.added_at,
            })
        })
        .collect()
}

pub fn format_position(position: usize, total: usize) -> String {
    format!("{position}/{total}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%y").to_string()
}

/// Decodes one listing item; the caller skips it when this fails.
pub fn decode_record<T: DeserializeOwned>(item: &Value) -> Result<T> {
    serde_json::from_value(item.clone()).map_err(|e| Error::MalformedRecord(e.to_string()))
}

/// Extracts the calendar date of an RFC 3339 timestamp such as Spotify's
/// `added_at`.
pub fn parse_added_at(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
        .or_else(|| NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok())
}

pub fn report_subject(artist: &str, today: NaiveDate) -> String {
    format!("Store Turn: {} - {}", artist, format_date(today))
}

pub fn error_subject(artist: &str, today: NaiveDate) -> String {
    format!("Store Turn Error: {} - {}", artist, format_date(today))
}

/// Renders the report the way it is mailed:
///
/// ```text
///
/// Artist
///  - Track: Playlist | 2/50 (01/05/24)
/// ```
pub fn render_report_body(report: &Report) -> String {
    let mut body = String::new();
    for (artist, records) in &report.groups {
        body.push_str(&format!("\n{artist}\n"));
        for record in records {
            body.push_str(&format!(
                " - {}: {} | {}",
                record.track, record.source, record.position
            ));
            if let Some(date) = record.date {
                body.push_str(&format!(" ({})", format_date(date)));
            }
            body.push('\n');
        }
    }
    body
}

pub fn report_table_rows(report: &Report) -> Vec<MatchTableRow> {
    report
        .groups
        .iter()
        .flat_map(|(artist, records)| {
            records.iter().map(move |r| MatchTableRow {
                artist: artist.clone(),
                track: r.track.clone(),
                source: r.source.clone(),
                position: r.position.clone(),
                date: r.date.map(format_date).unwrap_or_default(),
            })
        })
        .collect()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
