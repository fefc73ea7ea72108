use chrono::{TimeDelta, Utc};
use reqwest::Client;

use crate::{
    Error, Result,
    management::CredentialIssuer,
    types::{ClientCredentialsResponse, Credential},
};

/// Client-credentials exchange against the Spotify accounts service.
///
/// Posts `grant_type=client_credentials` with HTTP Basic authentication
/// built from the client id and secret. The resulting token only grants
/// access to public catalog data, which is all a playlist scan needs.
///
/// An unreachable token endpoint is reported as a connection failure so a
/// scan can restart; a rejection or unreadable answer is an
/// [`Error::Authentication`].
pub struct ClientCredentialsIssuer {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentialsIssuer {
    pub fn new(
        http: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl CredentialIssuer for ClientCredentialsIssuer {
    async fn issue(&self) -> Result<Credential> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::TransientRequest {
                url: self.token_url.clone(),
                status: None,
                attempts: 1,
                message: format!("token request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Authentication(format!(
                "could not authenticate client, token endpoint answered {status}"
            )));
        }

        let body: ClientCredentialsResponse = response
            .json()
            .await
            .map_err(|e| Error::Authentication(format!("unreadable token response: {e}")))?;

        let issued_at = Utc::now();
        let expires_at = TimeDelta::try_seconds(body.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                Error::Authentication(format!("token lifetime {} is out of range", body.expires_in))
            })?;

        Ok(Credential {
            token: body.access_token,
            issued_at,
            expires_at,
        })
    }
}
