use crate::{
    Result,
    config::{HttpConfig, SpotifyConfig},
    management::{
        CatalogWalker, ChartSource, RequestClient, RetryPolicy, TokenManager, build_http_client,
    },
    spotify::auth::ClientCredentialsIssuer,
    types::{
        CategoryPlaylistsResponse, Chart, Page, PlaylistRef, RawEntry, SpotifyPlaylistItem,
        SpotifyPlaylistTrack,
    },
    utils,
};

/// Largest page the browse endpoints hand out.
const PAGE_LIMIT: &str = "50";

pub struct SpotifyClient {
    requests: RequestClient<ClientCredentialsIssuer>,
}

impl SpotifyClient {
    pub fn new(config: &SpotifyConfig, http: &HttpConfig) -> Result<Self> {
        let client = build_http_client(http)?;
        let issuer = ClientCredentialsIssuer::new(
            client.clone(),
            &config.token_url,
            &config.client_id,
            &config.client_secret,
        );
        Ok(Self {
            requests: RequestClient::new(
                client,
                &config.api_url,
                TokenManager::new(issuer),
                RetryPolicy::from(http),
            ),
        })
    }

    /// Walks every page of a browse category and returns its playlists.
    ///
    /// Items that are `null` or lack an id or name are skipped and do not
    /// count toward the result.
    pub async fn category_playlists(
        &mut self,
        category_id: &str,
        country: &str,
    ) -> Result<Vec<PlaylistRef>> {
        let mut url = format!("browse/categories/{category_id}/playlists");
        let first_page = [("country", country), ("offset", "0"), ("limit", PAGE_LIMIT)];
        let mut params: &[(&str, &str)] = &first_page;

        let mut playlists = Vec::new();
        let mut consumed: i64 = 0;

        loop {
            let response: CategoryPlaylistsResponse = self.requests.get_json(&url, params).await?;
            let page = response.playlists;

            playlists.extend(
                page.items
                    .iter()
                    .filter_map(|item| utils::decode_record::<SpotifyPlaylistItem>(item).ok())
                    .map(|p| PlaylistRef {
                        id: p.id,
                        name: p.name,
                    }),
            );

            if !page.has_more(consumed) {
                break;
            }
            consumed += page.items.len() as i64;
            match next_url(&page) {
                Some(next) => {
                    url = next;
                    params = &[];
                }
                None => break,
            }
        }

        Ok(playlists)
    }

    /// Fetches every track slot of a playlist, following `next` pages.
    ///
    /// A slot whose track is missing or incomplete becomes `None`.
    pub async fn playlist_entries(&mut self, playlist_id: &str) -> Result<Vec<Option<RawEntry>>> {
        let mut url = format!("playlists/{playlist_id}/tracks");
        let mut entries = Vec::new();
        let mut consumed: i64 = 0;

        loop {
            let page: Page = self.requests.get_json(&url, &[]).await?;

            entries.extend(page.items.iter().map(|item| {
                utils::decode_record::<SpotifyPlaylistTrack>(item)
                    .ok()
                    .map(raw_entry)
            }));

            if !page.has_more(consumed) {
                break;
            }
            consumed += page.items.len() as i64;
            match next_url(&page) {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(entries)
    }

    pub async fn get_valid_token(&mut self) -> Result<String> {
        self.requests.tokens().get_valid_token().await
    }
}

fn next_url(page: &Page) -> Option<String> {
    page.next.clone().filter(|next| !next.is_empty())
}

/// Credited artists are the track artists followed by any album artist not
/// already listed.
fn raw_entry(item: SpotifyPlaylistTrack) -> RawEntry {
    let mut artists: Vec<String> = item.track.artists.into_iter().map(|a| a.name).collect();
    if let Some(album) = item.track.album {
        for artist in album.artists {
            if !artists.contains(&artist.name) {
                artists.push(artist.name);
            }
        }
    }

    RawEntry {
        title: item.track.name,
        artists,
        added_at: item.added_at.as_deref().and_then(utils::parse_added_at),
    }
}

impl ChartSource for SpotifyClient {
    async fn fetch_chart(&mut self, playlist: &PlaylistRef) -> Result<Chart> {
        Ok(Chart {
            name: playlist.name.clone(),
            entries: self.playlist_entries(&playlist.id).await?,
        })
    }
}

impl CatalogWalker<SpotifyClient> {
    /// Replaces the walker's playlists with those of a browse category.
    pub async fn find_playlists_for_category(
        &mut self,
        category_id: &str,
        country: &str,
    ) -> Result<Vec<PlaylistRef>> {
        let playlists = self
            .source_mut()
            .category_playlists(category_id, country)
            .await?;
        self.set_playlists(playlists.clone());
        Ok(playlists)
    }
}
