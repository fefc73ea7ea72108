//! Chart dumps delivered by external scrapers.
//!
//! Charts that only exist as rendered pages (New Music Daily, the "Best New
//! Songs" rooms, album rooms) are scraped outside this crate and handed over
//! as JSON:
//!
//! ```json
//! {
//!   "name": "New Music Daily",
//!   "entries": [
//!     { "title": "Song", "artist": "Artist" },
//!     { "title": "Other", "artists": ["A", "B"], "added_at": "2024-01-05" }
//!   ]
//! }
//! ```
//!
//! `added_at` may be a plain date or an RFC 3339 timestamp. The file path is
//! the playlist id. An entry without a title or without any artist is kept as
//! a malformed slot.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Error, Result,
    management::ChartSource,
    types::{Chart, PlaylistRef, RawEntry},
    utils,
};

#[derive(Debug, Deserialize)]
struct ChartFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    entries: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ChartFileEntry {
    title: String,
    #[serde(default)]
    artists: Vec<String>,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    added_at: Option<String>,
}

impl ChartFileEntry {
    fn into_raw(self) -> Option<RawEntry> {
        let mut artists = self.artists;
        artists.extend(self.artist);
        artists.retain(|a| !a.trim().is_empty());
        if artists.is_empty() || self.title.trim().is_empty() {
            return None;
        }
        Some(RawEntry {
            title: self.title,
            artists,
            added_at: self.added_at.as_deref().and_then(utils::parse_added_at),
        })
    }
}

/// Parses a chart dump. `fallback_name` is used when the dump has no name.
pub fn parse_chart(content: &str, fallback_name: &str) -> Result<Chart> {
    let file: ChartFile = serde_json::from_str(content).map_err(|source| Error::Decode {
        url: fallback_name.to_string(),
        source,
    })?;

    Ok(Chart {
        name: file
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string()),
        entries: file
            .entries
            .iter()
            .map(|item| {
                utils::decode_record::<ChartFileEntry>(item)
                    .ok()
                    .and_then(ChartFileEntry::into_raw)
            })
            .collect(),
    })
}

pub async fn load_chart(path: impl AsRef<Path>) -> Result<Chart> {
    let path = path.as_ref();
    let content = async_fs::read_to_string(path).await?;
    let fallback = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_chart(&content, &fallback)
}

/// Reads chart dumps from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileChartSource;

impl ChartSource for FileChartSource {
    async fn fetch_chart(&mut self, playlist: &PlaylistRef) -> Result<Chart> {
        load_chart(&playlist.id).await
    }
}

pub fn chart_refs(paths: &[String]) -> Vec<PlaylistRef> {
    paths
        .iter()
        .map(|path| PlaylistRef {
            id: path.clone(),
            name: path.clone(),
        })
        .collect()
}
