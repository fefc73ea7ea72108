use crate::{
    Result,
    apple::auth::DeveloperTokenIssuer,
    config::{AppleConfig, HttpConfig},
    management::{ChartSource, RequestClient, RetryPolicy, TokenManager, build_http_client},
    types::{ApplePlaylistResponse, AppleTrack, Chart, PlaylistRef, RawEntry},
    utils, warning,
};

pub struct AppleMusicClient {
    requests: RequestClient<DeveloperTokenIssuer>,
    storefront: String,
}

impl AppleMusicClient {
    pub fn new(config: &AppleConfig, http: &HttpConfig) -> Result<Self> {
        let issuer = DeveloperTokenIssuer::new(
            &config.team_id,
            &config.key_id,
            &config.private_key,
            config.session_length,
        );
        Ok(Self {
            requests: RequestClient::new(
                build_http_client(http)?,
                &config.api_url,
                TokenManager::new(issuer),
                RetryPolicy::from(http),
            ),
            storefront: config.storefront.clone(),
        })
    }

    /// Fetches a catalog playlist with its tracks.
    ///
    /// A response without playlist data yields an empty chart named after
    /// the id; tracks without a name or artist become `None` slots.
    pub async fn playlist(&mut self, playlist_id: &str) -> Result<Chart> {
        let url = format!("catalog/{}/playlists/{}", self.storefront, playlist_id);
        let response: ApplePlaylistResponse = self.requests.get_json(&url, &[]).await?;

        let Some(playlist) = response.data.into_iter().next() else {
            warning!("Playlist {} came back without data, skipping", playlist_id);
            return Ok(Chart {
                name: playlist_id.to_string(),
                entries: Vec::new(),
            });
        };

        let entries = playlist
            .relationships
            .map(|r| r.tracks.data)
            .unwrap_or_default()
            .iter()
            .map(|item| {
                utils::decode_record::<AppleTrack>(item)
                    .ok()
                    .map(|track| RawEntry {
                        title: track.attributes.name,
                        artists: vec![track.attributes.artist_name],
                        added_at: None,
                    })
            })
            .collect();

        Ok(Chart {
            name: playlist.attributes.name,
            entries,
        })
    }

    pub async fn get_valid_token(&mut self) -> Result<String> {
        self.requests.tokens().get_valid_token().await
    }
}

impl ChartSource for AppleMusicClient {
    async fn fetch_chart(&mut self, playlist: &PlaylistRef) -> Result<Chart> {
        self.playlist(&playlist.id).await
    }
}

/// Apple playlist ids are known before their names are, so the id doubles
/// as the name the walker uses to skip playlists it has already scanned.
pub fn playlist_refs(ids: &[String]) -> Vec<PlaylistRef> {
    ids.iter()
        .map(|id| PlaylistRef {
            id: id.clone(),
            name: id.clone(),
        })
        .collect()
}
