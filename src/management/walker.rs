use std::collections::HashSet;

use tokio::time::sleep;

use crate::{
    Error, Result,
    config::ScanConfig,
    info,
    types::{Chart, MatchRecord, PlaylistRef},
    utils, warning,
};

/// Anything that can turn a playlist reference into a listing.
///
/// The Spotify and Apple Music clients fetch listings over HTTP, chart dumps
/// are read from disk. Matching only ever sees the resulting [`Chart`].
#[allow(async_fn_in_trait)]
pub trait ChartSource {
    async fn fetch_chart(&mut self, playlist: &PlaylistRef) -> Result<Chart>;
}

/// Scans a set of playlists for an artist.
///
/// The set of playlist names already scanned lives as long as the walker,
/// so one walker used for several categories never fetches the same
/// playlist name twice.
pub struct CatalogWalker<S> {
    source: S,
    playlists: Vec<PlaylistRef>,
    checked: HashSet<String>,
    scan: ScanConfig,
}

impl<S: ChartSource> CatalogWalker<S> {
    pub fn new(source: S, scan: ScanConfig) -> Self {
        Self {
            source,
            playlists: Vec::new(),
            checked: HashSet::new(),
            scan,
        }
    }

    /// Replaces the playlists the next scan will look at.
    pub fn set_playlists(&mut self, playlists: Vec<PlaylistRef>) -> &mut Self {
        self.playlists = playlists;
        self
    }

    pub fn playlists(&self) -> &[PlaylistRef] {
        &self.playlists
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.checked.contains(name)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Fetches every playlist not scanned yet and collects the placements of
    /// `artist`.
    ///
    /// A connection failure pauses for the configured delay and resumes the
    /// scan; playlists fetched before the failure are not fetched again and
    /// their matches are kept. Other failures abort the scan.
    pub async fn find_artist_in_playlists(&mut self, artist: &str) -> Result<Vec<MatchRecord>> {
        if self.playlists.is_empty() {
            return Err(Error::NoPlaylists);
        }

        let mut matches = Vec::new();
        let mut restarts = 0;

        loop {
            match self.scan_unchecked(artist, &mut matches).await {
                Ok(()) => return Ok(matches),
                Err(e) if e.is_connection() && restarts < self.scan.max_restarts => {
                    restarts += 1;
                    warning!(
                        "Connection error occurred: {}. Retrying in {:?}...",
                        e,
                        self.scan.restart_delay
                    );
                    sleep(self.scan.restart_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn scan_unchecked(
        &mut self,
        artist: &str,
        matches: &mut Vec<MatchRecord>,
    ) -> Result<()> {
        let pb = utils::spinner("Scanning playlists...");

        for playlist in &self.playlists {
            if self.checked.contains(&playlist.name) {
                continue;
            }

            pb.set_message(format!("Scanning {}", playlist.name));
            let chart = match self.source.fetch_chart(playlist).await {
                Ok(chart) => chart,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            };
            self.checked.insert(playlist.name.clone());

            let found = utils::match_chart(artist, &chart);
            if !found.is_empty() {
                pb.suspend(|| info!("Found {} in playlist {}", artist, chart.name));
            }
            matches.extend(found);
        }

        pb.finish_and_clear();
        Ok(())
    }
}
