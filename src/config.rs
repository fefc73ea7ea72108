//! Configuration management for Store Turn.
//!
//! Configuration is read once per process: [`load_env`] merges a `.env` file
//! from the local data directory into the environment, then
//! [`Config::from_env`] turns the environment into an explicit [`Config`]
//! that is passed to every client constructor. Nothing reads the
//! environment after that.
//!
//! The lookup is abstracted behind a closure so that tests can build a
//! configuration from a plain map.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{Error, Result};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_APPLE_API_URL: &str = "https://api.music.apple.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at `{data_local_dir}/storeturn/.env`:
/// - Linux: `~/.local/share/storeturn/.env`
/// - macOS: `~/Library/Application Support/storeturn/.env`
/// - Windows: `%LOCALAPPDATA%/storeturn/.env`
///
/// Variables already present in the environment win over the file. A missing
/// file is not an error; a file that exists but cannot be parsed is.
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Configuration(format!(
            "cannot load {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("storeturn/.env");
    path
}

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify: Option<SpotifyConfig>,
    pub apple: Option<AppleConfig>,
    pub http: HttpConfig,
    pub scan: ScanConfig,
    pub notify: NotifyConfig,
}

/// Client-credentials identity for the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub country: String,
}

/// Signing identity for Apple Music developer tokens.
#[derive(Debug, Clone)]
pub struct AppleConfig {
    pub team_id: String,
    pub key_id: String,
    pub private_key: String,
    pub api_url: String,
    pub storefront: String,
    pub session_length: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,
    /// Delay unit; the k-th retry sleeps `k * retry_delay`.
    pub retry_delay: Duration,
    /// Upper bound for a single retry sleep.
    pub max_retry_delay: Duration,
    pub timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            retry_delay: Duration::from_secs(1),
            max_retry_delay: Duration::from_secs(30),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Pause before restarting a playlist scan after a connection failure.
    pub restart_delay: Duration,
    pub max_restarts: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            restart_delay: Duration::from_secs(30),
            max_restarts: 5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotifyConfig {
    pub sender: Option<String>,
    pub recipients: Vec<String>,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// A service section is present only when all of its identity variables
    /// are set; a partially configured service is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let spotify = match (get("SPOTIFY_CLIENT_ID"), get("SPOTIFY_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(SpotifyConfig {
                client_id,
                client_secret,
                api_url: get("SPOTIFY_API_URL")
                    .unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
                token_url: get("SPOTIFY_API_TOKEN_URL")
                    .unwrap_or_else(|| DEFAULT_SPOTIFY_TOKEN_URL.to_string()),
                country: get("SPOTIFY_COUNTRY").unwrap_or_else(|| "US".to_string()),
            }),
            (None, None) => None,
            _ => {
                return Err(Error::Configuration(
                    "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set together".to_string(),
                ));
            }
        };

        let apple = match (
            get("APPLE_TEAM_ID"),
            get("APPLE_KEY_ID"),
            get("APPLE_PRIVATE_KEY"),
        ) {
            (Some(team_id), Some(key_id), Some(private_key)) => Some(AppleConfig {
                team_id,
                key_id,
                private_key,
                api_url: get("APPLE_API_URL").unwrap_or_else(|| DEFAULT_APPLE_API_URL.to_string()),
                storefront: get("APPLE_STOREFRONT").unwrap_or_else(|| "us".to_string()),
                session_length: Duration::from_secs(
                    parse_or(&get, "APPLE_SESSION_HOURS", 12u64)?
                        .checked_mul(3600)
                        .ok_or_else(|| {
                            Error::Configuration("APPLE_SESSION_HOURS is too large".to_string())
                        })?,
                ),
            }),
            (None, None, None) => None,
            _ => {
                return Err(Error::Configuration(
                    "APPLE_TEAM_ID, APPLE_KEY_ID and APPLE_PRIVATE_KEY must be set together"
                        .to_string(),
                ));
            }
        };

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            max_retries: parse_or(&get, "STORETURN_MAX_RETRIES", defaults.max_retries)?,
            retry_delay: Duration::from_millis(parse_or(
                &get,
                "STORETURN_RETRY_DELAY_MS",
                defaults.retry_delay.as_millis() as u64,
            )?),
            max_retry_delay: Duration::from_millis(parse_or(
                &get,
                "STORETURN_MAX_RETRY_DELAY_MS",
                defaults.max_retry_delay.as_millis() as u64,
            )?),
            timeout: match get("STORETURN_REQUEST_TIMEOUT_SECS") {
                Some(_) => Some(Duration::from_secs(parse_or(
                    &get,
                    "STORETURN_REQUEST_TIMEOUT_SECS",
                    0u64,
                )?)),
                None => None,
            },
        };

        let defaults = ScanConfig::default();
        let scan = ScanConfig {
            restart_delay: Duration::from_secs(parse_or(
                &get,
                "STORETURN_SCAN_RESTART_DELAY_SECS",
                defaults.restart_delay.as_secs(),
            )?),
            max_restarts: parse_or(&get, "STORETURN_SCAN_MAX_RESTARTS", defaults.max_restarts)?,
        };

        let notify = NotifyConfig {
            sender: get("STORETURN_NOTIFY_SENDER"),
            recipients: get("STORETURN_NOTIFY_RECIPIENTS")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Self {
            spotify,
            apple,
            http,
            scan,
            notify,
        })
    }
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Configuration(format!("{key}={raw:?} is invalid: {e}"))),
        None => Ok(default),
    }
}
