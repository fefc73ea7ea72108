use thiserror::Error;

/// Every way a store turn can fail.
///
/// `MalformedRecord` never reaches the job boundary: walkers recover from it
/// by skipping the single entry. All other kinds are fatal for the job.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request to {url} failed after {attempts} attempt(s): {message}")]
    TransientRequest {
        url: String,
        status: Option<u16>,
        attempts: u32,
        message: String,
    },

    #[error("Request to {url} was rejected with status {status} after {attempts} attempt(s)")]
    PermanentRequest {
        url: String,
        status: u16,
        attempts: u32,
    },

    #[error("There are no playlists to search")]
    NoPlaylists,

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status attached to a request failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::TransientRequest { status, .. } => *status,
            Error::PermanentRequest { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Number of attempts a request failure used up.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Error::TransientRequest { attempts, .. } | Error::PermanentRequest { attempts, .. } => {
                Some(*attempts)
            }
            _ => None,
        }
    }

    /// True for transport-level failures (connection refused, reset, timeout)
    /// that survived the request client's own retries.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::TransientRequest { status: None, .. })
    }
}
