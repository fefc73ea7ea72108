use crate::{
    Result,
    apple::AppleMusicClient,
    config::Config,
    info,
    spotify::SpotifyClient,
    success, warning,
};

/// Issues a token for every configured service.
///
/// Returns `false` when a service is configured but its credentials are
/// rejected, or when no service is configured at all.
pub async fn auth(config: &Config) -> bool {
    let mut ok = true;

    match &config.spotify {
        Some(spotify) => {
            info!("Requesting Spotify access token...");
            let result: Result<String> = match SpotifyClient::new(spotify, &config.http) {
                Ok(mut client) => client.get_valid_token().await,
                Err(e) => Err(e),
            };
            match result {
                Ok(_) => success!("Spotify credentials accepted."),
                Err(e) => {
                    warning!("Spotify authentication failed: {}", e);
                    ok = false;
                }
            }
        }
        None => info!("Spotify is not configured, skipping."),
    }

    match &config.apple {
        Some(apple) => {
            info!("Signing Apple Music developer token...");
            let result: Result<String> = match AppleMusicClient::new(apple, &config.http) {
                Ok(mut client) => client.get_valid_token().await,
                Err(e) => Err(e),
            };
            match result {
                Ok(_) => success!("Apple Music developer token signed."),
                Err(e) => {
                    warning!("Apple Music authentication failed: {}", e);
                    ok = false;
                }
            }
        }
        None => info!("Apple Music is not configured, skipping."),
    }

    if config.spotify.is_none() && config.apple.is_none() {
        warning!(
            "No service configured. Set the Spotify or Apple Music variables in {}",
            crate::config::env_path().display()
        );
        ok = false;
    }

    ok
}
