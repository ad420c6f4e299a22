//! Sign-in and session profile service.
//!
//! Trust flows from the identity provider: a verified token yields an email,
//! the allow-list decides admission, and the account is upserted so the
//! session can carry its id and role.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, SignInCommand, UserProfileQuery, UserProfileUpsert,
    UserRepository, UserRepositoryError,
};
use crate::domain::{AllowList, Email, Error, IdentityToken, User, UserId};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Service implementing [`SignInCommand`] and [`UserProfileQuery`].
pub struct SignInService<U, I> {
    users: Arc<U>,
    identity: Arc<I>,
    allow_list: Arc<AllowList>,
}

impl<U, I> Clone for SignInService<U, I> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            identity: Arc::clone(&self.identity),
            allow_list: Arc::clone(&self.allow_list),
        }
    }
}

impl<U, I> SignInService<U, I>
where
    U: UserRepository,
    I: IdentityProvider,
{
    pub fn new(users: Arc<U>, identity: Arc<I>, allow_list: AllowList) -> Self {
        if allow_list.is_empty() {
            warn!("sign-in allow-list is empty; every sign-in will be refused");
        }
        Self {
            users,
            identity,
            allow_list: Arc::new(allow_list),
        }
    }
}

#[async_trait]
impl<U, I> SignInCommand for SignInService<U, I>
where
    U: UserRepository,
    I: IdentityProvider,
{
    async fn sign_in(&self, token: IdentityToken) -> Result<User, Error> {
        let claims = self.identity.verify(&token).await.map_err(|err| match err {
            IdentityProviderError::Rejected { message } => {
                info!(reason = %message, "identity token rejected");
                Error::unauthorized("identity token rejected")
            }
            IdentityProviderError::Unavailable { message } => {
                Error::internal(format!("identity provider unavailable: {message}"))
            }
        })?;

        let email = claims
            .email
            .as_deref()
            .and_then(|raw| Email::new(raw).ok())
            .ok_or_else(|| Error::forbidden("identity carries no usable email address"))?;
        if !self.allow_list.permits(&email) {
            warn!(%email, "sign-in refused: address not on allow-list");
            return Err(Error::forbidden("email address is not permitted to sign in"));
        }

        let profile = UserProfileUpsert {
            new_id: UserId::random(),
            email,
            name: claims.name,
            image: claims.image,
        };
        let user = self
            .users
            .upsert_by_email(&profile)
            .await
            .map_err(|err| {
                error!(error = %err, email = %profile.email, "user upsert failed during sign-in");
                map_repository_error(err)
            })?;

        info!(user_id = %user.id, role = %user.role, "operator signed in");
        Ok(user)
    }
}

#[async_trait]
impl<U, I> UserProfileQuery for SignInService<U, I>
where
    U: UserRepository,
    I: IdentityProvider,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }
}

#[cfg(test)]
#[path = "sign_in_service_tests.rs"]
mod tests;
