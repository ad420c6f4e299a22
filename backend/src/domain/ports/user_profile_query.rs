//! Driving port for reading the signed-in operator's profile.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Profile for `user_id`. A missing account yields `unauthorized`.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}
