//! Port for operator accounts.

use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
    }
}

/// Profile fields refreshed on every sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileUpsert {
    /// Id used only when the account does not exist yet.
    pub new_id: UserId,
    pub email: Email,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create the account keyed by email, or refresh its name and image.
    ///
    /// New accounts get the `Operator` role. Existing roles are never
    /// changed and absent profile fields leave stored values in place.
    async fn upsert_by_email(&self, profile: &UserProfileUpsert)
    -> Result<User, UserRepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}
