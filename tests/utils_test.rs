use chrono::NaiveDate;
use serde_json::json;
use storeturn::{
    Error,
    charts::parse_chart,
    types::{Chart, MatchRecord, Page, RawEntry, Report},
    utils::*,
};

// Helper function to create a well-formed entry
fn entry(title: &str, artists: &[&str]) -> Option<RawEntry> {
    Some(RawEntry {
        title: title.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        added_at: None,
    })
}

fn page(total: Option<i64>, limit: i64, offset: i64, next: bool) -> Page {
    let next = next.then_some("https://next");
    serde_json::from_value(json!({
        "items": [],
        "total": total,
        "limit": limit,
        "offset": offset,
        "next": next,
    }))
    .unwrap()
}

#[test]
fn test_entry_matches_is_case_insensitive_substring() {
    let e = entry("Song", &["Foo Fighters", "Someone"]).unwrap();

    assert!(entry_matches("foo", &e));
    assert!(entry_matches("FIGHTERS", &e));
    assert!(entry_matches("  someone ", &e));
    assert!(!entry_matches("Bar", &e));
}

#[test]
fn test_empty_artist_matches_nothing() {
    let e = entry("Song", &["Foo"]).unwrap();

    assert!(!entry_matches("", &e));
    assert!(!entry_matches("   ", &e));
}

#[test]
fn test_match_chart_positions_count_malformed_slots() {
    let chart = Chart {
        name: "Hits".to_string(),
        entries: vec![
            entry("One", &["A"]),
            None,
            entry("Three", &["Foo"]),
            entry("Four", &["B"]),
            entry("Five", &["foo feat. C"]),
        ],
    };

    let found = match_chart("Foo", &chart);

    let positions: Vec<&str> = found.iter().map(|m| m.position.as_str()).collect();
    assert_eq!(positions, vec!["3/5", "5/5"]);
    assert!(found.iter().all(|m| m.source == "Hits"));
}

#[test]
fn test_match_chart_on_empty_chart() {
    let chart = Chart {
        name: "Empty".to_string(),
        entries: Vec::new(),
    };

    assert!(match_chart("Foo", &chart).is_empty());
}

#[test]
fn test_decode_record_reports_malformed_items() {
    #[derive(serde::Deserialize, Debug)]
    #[allow(dead_code)]
    struct Item {
        id: String,
    }

    assert!(decode_record::<Item>(&json!({ "id": "x" })).is_ok());
    assert!(matches!(
        decode_record::<Item>(&json!(null)),
        Err(Error::MalformedRecord(_))
    ));
}

#[test]
fn test_parse_added_at() {
    let expected = NaiveDate::from_ymd_opt(2024, 1, 5);

    assert_eq!(parse_added_at("2024-01-05T10:00:00Z"), expected);
    assert_eq!(parse_added_at("2024-01-05"), expected);
    assert_eq!(parse_added_at("yesterday"), None);
    assert_eq!(parse_added_at(""), None);
}

#[test]
fn test_page_has_more_uses_total_offset_and_limit() {
    assert!(page(Some(3), 2, 0, true).has_more(0));
    assert!(!page(Some(3), 2, 2, true).has_more(2));
    assert!(!page(Some(4), 2, 2, true).has_more(2));
    assert!(!page(Some(10), 2, 0, false).has_more(0));
    assert!(page(None, 2, 0, true).has_more(0));
}

#[test]
fn test_render_report_body() {
    let mut report = Report::default();
    report.add(
        "Foo",
        vec![
            MatchRecord {
                track: "Song".to_string(),
                source: "Hits".to_string(),
                position: "2/50".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 5),
            },
            MatchRecord {
                track: "Other".to_string(),
                source: "New Music Daily".to_string(),
                position: "7/100".to_string(),
                date: None,
            },
        ],
    );

    assert_eq!(
        render_report_body(&report),
        "\nFoo\n - Song: Hits | 2/50 (01/05/24)\n - Other: New Music Daily | 7/100\n"
    );
    assert_eq!(report.count(), 2);
}

#[test]
fn test_report_table_rows() {
    let mut report = Report::default();
    report.add(
        "Foo",
        vec![MatchRecord {
            track: "Song".to_string(),
            source: "Hits".to_string(),
            position: "1/1".to_string(),
            date: None,
        }],
    );

    let rows = report_table_rows(&report);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].artist, "Foo");
    assert_eq!(rows[0].date, "");
}

#[test]
fn test_subjects() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    assert_eq!(report_subject("Foo", day), "Store Turn: Foo - 03/09/24");
    assert_eq!(error_subject("Foo", day), "Store Turn Error: Foo - 03/09/24");
}

#[test]
fn test_parse_chart_keeps_malformed_slots() {
    let content = r#"{
        "name": "New Music Daily",
        "entries": [
            { "title": "One", "artist": "Foo" },
            { "title": "Two" },
            { "title": "Three", "artists": ["A", "Foo"], "added_at": "2024-01-05" },
            42
        ]
    }"#;

    let chart = parse_chart(content, "fallback").unwrap();

    assert_eq!(chart.name, "New Music Daily");
    assert_eq!(chart.entries.len(), 4);
    assert!(chart.entries[1].is_none());
    assert!(chart.entries[3].is_none());
    let found = match_chart("foo", &chart);
    let positions: Vec<&str> = found.iter().map(|m| m.position.as_str()).collect();
    assert_eq!(positions, vec!["1/4", "3/4"]);
    assert_eq!(found[1].date, NaiveDate::from_ymd_opt(2024, 1, 5));
}

#[test]
fn test_parse_chart_falls_back_to_file_name() {
    let chart = parse_chart(r#"{ "entries": [] }"#, "best-new-songs").unwrap();
    assert_eq!(chart.name, "best-new-songs");

    assert!(matches!(
        parse_chart("<html>", "best-new-songs"),
        Err(Error::Decode { .. })
    ));
}

#[test]
fn test_parse_chart_accepts_timestamped_added_at() {
    let content = r#"{ "entries": [
        { "title": "Song", "artist": "Foo", "added_at": "2024-01-05T10:00:00Z" },
        { "title": "Other", "artist": "Foo", "added_at": "last week" }
    ]}"#;

    let chart = parse_chart(content, "hits").unwrap();
    let found = match_chart("Foo", &chart);

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].date, NaiveDate::from_ymd_opt(2024, 1, 5));
    assert_eq!(found[1].date, None);
}
