//! Port for duty roster persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{DutyRosterCriteria, DutyRosterDraft, DutyRosterEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by duty roster repository adapters.
    pub enum DutyRosterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "duty roster repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "duty roster repository query failed: {message}",
    }
}

/// Row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDutyRosterEntry {
    pub id: Uuid,
    pub draft: DutyRosterDraft,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Storage for roster entries. Reads resolve the creator summary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DutyRosterRepository: Send + Sync {
    async fn insert(
        &self,
        entry: &NewDutyRosterEntry,
    ) -> Result<DutyRosterEntry, DutyRosterRepositoryError>;

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<DutyRosterEntry>, DutyRosterRepositoryError>;

    /// Entries matching `criteria`, oldest insertion first.
    async fn list(
        &self,
        criteria: &DutyRosterCriteria,
    ) -> Result<Vec<DutyRosterEntry>, DutyRosterRepositoryError>;

    /// Overwrite the mutable columns. `None` when the row is gone.
    async fn update(
        &self,
        entry: &DutyRosterEntry,
    ) -> Result<Option<DutyRosterEntry>, DutyRosterRepositoryError>;

    async fn delete(&self, id: &Uuid) -> Result<bool, DutyRosterRepositoryError>;
}
