use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A bearer credential together with its validity window.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub id: String,
    pub name: String,
}

/// One placement of the artist in a scanned listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub track: String,
    pub source: String,
    /// `"i/N"`, 1-based.
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// A single row of a listing, regardless of where the listing came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub title: String,
    pub artists: Vec<String>,
    #[serde(default)]
    pub added_at: Option<NaiveDate>,
}

/// A fetched listing. `None` entries occupied a slot but were malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub name: String,
    pub entries: Vec<Option<RawEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genres {
    #[serde(default, alias = "s")]
    pub spotify: Vec<String>,
    #[serde(default, alias = "am")]
    pub apple: Vec<String>,
}

/// Input of one artist search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub artist: String,
    #[serde(default)]
    pub genres: Genres,
    /// Chart dumps produced by an external scraper.
    #[serde(default)]
    pub charts: Vec<String>,
}

impl Job {
    pub fn for_artist(artist: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            genres: Genres::default(),
            charts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genres.spotify.is_empty() && self.genres.apple.is_empty() && self.charts.is_empty()
    }
}

/// Matches grouped by artist name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub groups: BTreeMap<String, Vec<MatchRecord>>,
}

impl Report {
    pub fn add(&mut self, artist: &str, records: Vec<MatchRecord>) -> &mut Self {
        self.groups
            .entry(artist.to_string())
            .or_default()
            .extend(records);
        self
    }

    pub fn count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[derive(Tabled)]
pub struct MatchTableRow {
    pub artist: String,
    pub track: String,
    pub source: String,
    pub position: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientCredentialsResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPlaylistsResponse {
    pub playlists: Page,
}

/// A Spotify paging object whose items are decoded one by one.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylistItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylistTrack {
    #[serde(default)]
    pub added_at: Option<String>,
    pub track: SpotifyTrack,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    #[serde(default)]
    pub album: Option<SpotifyAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplePlaylistResponse {
    pub data: Vec<ApplePlaylist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplePlaylist {
    pub attributes: ApplePlaylistAttributes,
    #[serde(default)]
    pub relationships: Option<ApplePlaylistRelationships>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplePlaylistAttributes {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplePlaylistRelationships {
    pub tracks: AppleTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppleTracks {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppleTrack {
    pub attributes: AppleTrackAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleTrackAttributes {
    pub name: String,
    pub artist_name: String,
}

impl Page {
    /// Whether another page should be requested after this one.
    ///
    /// `consumed` is the number of items seen before this page and stands in
    /// for `offset` when the server omits it.
    pub fn has_more(&self, consumed: i64) -> bool {
        if self.next.is_none() {
            return false;
        }
        match self.total {
            Some(total) => {
                let offset = self.offset.unwrap_or(consumed);
                let limit = self.limit.unwrap_or(self.items.len() as i64);
                total - (offset + limit) > 0
            }
            None => true,
        }
    }
}
