use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;

use crate::{
    Error, Result,
    config::HttpConfig,
    management::{CredentialIssuer, TokenManager},
    warning,
};

/// Bounded linear backoff: the k-th retry waits `k * delay_unit`, never more
/// than `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay_unit: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.delay_unit.saturating_mul(retry).min(self.max_delay)
    }
}

impl From<&HttpConfig> for RetryPolicy {
    fn from(config: &HttpConfig) -> Self {
        RetryPolicy {
            max_retries: config.max_retries,
            delay_unit: config.retry_delay,
            max_delay: config.max_retry_delay,
        }
    }
}

pub fn build_http_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| Error::Configuration(format!("cannot build HTTP client: {e}")))
}

enum Failure {
    Transient {
        status: Option<u16>,
        message: String,
    },
    Permanent {
        status: u16,
    },
    Decode(serde_json::Error),
}

/// Authenticated JSON client for one service.
///
/// Every attempt asks the token manager for a valid token first, so a token
/// that expires while retries are in flight is replaced before the next
/// attempt.
pub struct RequestClient<I> {
    http: Client,
    root: String,
    tokens: TokenManager<I>,
    policy: RetryPolicy,
}

impl<I: CredentialIssuer> RequestClient<I> {
    pub fn new(
        http: Client,
        root: impl Into<String>,
        tokens: TokenManager<I>,
        policy: RetryPolicy,
    ) -> Self {
        RequestClient {
            http,
            root: root.into(),
            tokens,
            policy,
        }
    }

    pub async fn get(&mut self, url: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.request(Method::GET, url, params).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &mut self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let value = self.get(url, params).await?;
        serde_json::from_value(value).map_err(|source| Error::Decode {
            url: self.resolve(url),
            source,
        })
    }

    /// Executes one call, retrying 429, 5xx and transport failures.
    ///
    /// With a budget of `N` retries at most `N + 1` attempts are made. Any
    /// other non-success status fails on the spot.
    pub async fn request(
        &mut self,
        method: Method,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let url = self.resolve(url);
        let mut retries_left = self.policy.max_retries;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let token = self.tokens.get_valid_token().await?;

            match self.call(method.clone(), &url, params, &token).await {
                Ok(body) => return Ok(body),
                Err(Failure::Permanent { status }) => {
                    return Err(Error::PermanentRequest {
                        url,
                        status,
                        attempts,
                    });
                }
                Err(Failure::Decode(source)) => return Err(Error::Decode { url, source }),
                Err(Failure::Transient { status, message }) => {
                    if retries_left == 0 {
                        return Err(Error::TransientRequest {
                            url,
                            status,
                            attempts,
                            message,
                        });
                    }
                    retries_left -= 1;

                    let delay = self.policy.delay_for(attempts);
                    warning!(
                        "{} failed ({}), retrying in {:?} ({} retries left)",
                        url,
                        message,
                        delay,
                        retries_left
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    async fn call(
        &self,
        method: Method,
        url: &str,
        params: &[(&str, &str)],
        token: &str,
    ) -> std::result::Result<Value, Failure> {
        let response = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(|e| Failure::Transient {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(Failure::Transient {
                status: Some(status.as_u16()),
                message: format!("status {status}"),
            });
        }
        if !status.is_success() {
            return Err(Failure::Permanent {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| Failure::Transient {
            status: None,
            message: e.to_string(),
        })?;
        serde_json::from_str(&body).map_err(Failure::Decode)
    }

    /// Relative paths hang off the service root; absolute URLs such as
    /// paging cursors are used unchanged.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        format!(
            "{}/{}",
            self.root.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }

    pub fn tokens(&mut self) -> &mut TokenManager<I> {
        &mut self.tokens
    }
}
