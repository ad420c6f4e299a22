//! Driving port for signing operators in.
//!
//! Inbound adapters hand over the raw identity token; the port decides
//! whether it maps to an allow-listed operator account.

use async_trait::async_trait;

use crate::domain::{Error, IdentityToken, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignInCommand: Send + Sync {
    /// Verify `token` and return the (possibly new) account.
    ///
    /// Rejected tokens yield `unauthorized`; addresses outside the
    /// allow-list yield `forbidden`.
    async fn sign_in(&self, token: IdentityToken) -> Result<User, Error>;
}
