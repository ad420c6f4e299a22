//! Driving port for reading the duty roster.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{DutyRosterEntry, Error, RosterWeek};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DutyRosterQuery: Send + Sync {
    /// Entries in roster order.
    ///
    /// With `week_of` set, only the Monday-to-Sunday week containing it.
    async fn list(&self, week_of: Option<DateTime<Utc>>) -> Result<Vec<DutyRosterEntry>, Error>;

    /// Seven-day grid for the week containing `reference`, or the current
    /// week when absent.
    async fn week(&self, reference: Option<DateTime<Utc>>) -> Result<RosterWeek, Error>;

    async fn get(&self, id: Uuid) -> Result<DutyRosterEntry, Error>;
}
