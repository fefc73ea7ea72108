use chrono::{Duration, Utc};

use crate::{Error, Result, types::Credential};

/// Seconds before expiry at which a held credential is already replaced.
///
/// Short-lived credentials get at most half their lifetime as leeway, so
/// they are still used before being replaced.
pub const REFRESH_LEEWAY_SECS: i64 = 240;

/// Produces a fresh bearer credential.
///
/// Spotify exchanges client credentials at its accounts service, Apple Music
/// signs a developer token locally. Either way a rejected issuance is an
/// [`Error::Authentication`].
#[allow(async_fn_in_trait)]
pub trait CredentialIssuer {
    async fn issue(&self) -> Result<Credential>;
}

pub struct TokenManager<I> {
    issuer: I,
    credential: Option<Credential>,
}

impl<I: CredentialIssuer> TokenManager<I> {
    pub fn new(issuer: I) -> Self {
        TokenManager {
            issuer,
            credential: None,
        }
    }

    pub fn with_credential(issuer: I, credential: Credential) -> Self {
        TokenManager {
            issuer,
            credential: Some(credential),
        }
    }

    /// Returns a token that is valid right now, issuing a new one first when
    /// nothing is held or the held one is about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        if let Some(credential) = &self.credential {
            if !self.is_expired(credential) {
                return Ok(credential.token.clone());
            }
        }

        let credential = self.issuer.issue().await?;
        if credential.is_expired_at(Utc::now()) {
            return Err(Error::Authentication(format!(
                "issued credential already expired at {}",
                credential.expires_at
            )));
        }

        let token = credential.token.clone();
        self.credential = Some(credential);
        Ok(token)
    }

    fn is_expired(&self, credential: &Credential) -> bool {
        let lifetime = credential.expires_at - credential.issued_at;
        let leeway = (lifetime / 2)
            .min(Duration::seconds(REFRESH_LEEWAY_SECS))
            .max(Duration::zero());
        credential.is_expired_at(Utc::now() + leeway)
    }

    pub fn current_credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
