//! Port for the external identity provider that vouches for sign-in tokens.

use async_trait::async_trait;

use crate::domain::{IdentityClaims, IdentityToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised while verifying a token.
    pub enum IdentityProviderError {
        /// The provider refused the token.
        Rejected { message: String } => "identity token rejected: {message}",
        /// The provider could not be reached or answered unexpectedly.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a bearer token for the claims it carries.
    async fn verify(&self, token: &IdentityToken) -> Result<IdentityClaims, IdentityProviderError>;
}

/// Offline provider for development and tests.
///
/// Accepts tokens of the form `fixture:<email>` and vouches for that address
/// with no profile fields. Everything else is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    const PREFIX: &'static str = "fixture:";
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn verify(&self, token: &IdentityToken) -> Result<IdentityClaims, IdentityProviderError> {
        match token.expose().strip_prefix(Self::PREFIX) {
            Some(email) if !email.is_empty() => Ok(IdentityClaims {
                email: Some(email.to_owned()),
                ..IdentityClaims::default()
            }),
            _ => Err(IdentityProviderError::rejected("unknown fixture token")),
        }
    }
}
