//! Session helpers and the access gate.
//!
//! Handlers never touch the Actix session directly. Sign-in stores the
//! operator's id and role through [`SessionContext`]; every protected handler
//! takes an [`Authenticated`] extractor as its first argument, so a missing or
//! tampered session yields `401` before the request body is read.

use std::future::{Ready, ready};

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use tracing::warn;

use crate::domain::{Actor, Error, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the signed-in actor and rotate the session id.
    pub fn persist_actor(&self, actor: &Actor) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, actor.user_id.to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, actor.role.as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Resolve the actor stored in the session, if any.
    ///
    /// Undecodable values are treated as an absent session.
    pub fn actor(&self) -> Result<Option<Actor>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(raw_role)) = (read(USER_ID_KEY)?, read(ROLE_KEY)?) else {
            return Ok(None);
        };

        match (UserId::new(&raw_id), raw_role.parse::<Role>()) {
            (Ok(user_id), Ok(role)) => Ok(Some(Actor::new(user_id, role))),
            _ => {
                warn!("ignoring undecodable actor in session cookie");
                Ok(None)
            }
        }
    }

    /// Require a signed-in actor or return `401 Unauthorized`.
    pub fn require_actor(&self) -> Result<Actor, Error> {
        self.actor()?
            .ok_or_else(|| Error::unauthorized("sign-in required"))
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::new(req.get_session())))
    }
}

/// Access gate: resolves the calling actor or rejects with `401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated(pub Actor);

impl Authenticated {
    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            SessionContext::new(req.get_session())
                .require_actor()
                .map(Self),
        )
    }
}
