//! Reqwest-backed identity provider calling an OpenID Connect userinfo
//! endpoint with the sign-in token as bearer credential.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{IdentityClaims, IdentityToken};

const USER_AGENT: &str = "dispatch-board/0.1";

/// Subset of the standard userinfo claims used for sign-in.
#[derive(Debug, Default, Deserialize)]
struct UserInfoDto {
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl From<UserInfoDto> for IdentityClaims {
    fn from(value: UserInfoDto) -> Self {
        Self {
            email: value.email,
            name: value.name,
            image: value.picture,
        }
    }
}

pub struct UserInfoIdentityProvider {
    client: Client,
    endpoint: Url,
}

impl UserInfoIdentityProvider {
    /// Request timeout used by the server binary.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IdentityProvider for UserInfoIdentityProvider {
    async fn verify(&self, token: &IdentityToken) -> Result<IdentityClaims, IdentityProviderError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(token.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| IdentityProviderError::unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| IdentityProviderError::unavailable(err.to_string()))?;
        parse_claims(body.as_ref())
    }
}

fn map_status(status: StatusCode) -> IdentityProviderError {
    let message = format!("status {}", status.as_u16());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => IdentityProviderError::rejected(message),
        _ => IdentityProviderError::unavailable(message),
    }
}

fn parse_claims(body: &[u8]) -> Result<IdentityClaims, IdentityProviderError> {
    serde_json::from_slice::<UserInfoDto>(body)
        .map(IdentityClaims::from)
        .map_err(|err| IdentityProviderError::unavailable(format!("invalid userinfo payload: {err}")))
}
