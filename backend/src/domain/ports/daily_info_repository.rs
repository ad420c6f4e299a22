//! Port for daily info persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{DailyInfo, DailyInfoCriteria, DailyInfoDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by daily info repository adapters.
    pub enum DailyInfoRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "daily info repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "daily info repository query failed: {message}",
    }
}

/// Row to insert. Identity and timestamps are assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDailyInfo {
    pub id: Uuid,
    pub draft: DailyInfoDraft,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Storage for notices. Reads resolve the creator summary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailyInfoRepository: Send + Sync {
    /// Insert a notice and return it as stored.
    async fn insert(&self, record: &NewDailyInfo) -> Result<DailyInfo, DailyInfoRepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<DailyInfo>, DailyInfoRepositoryError>;

    /// Notices matching `criteria`, oldest insertion first.
    async fn list(
        &self,
        criteria: &DailyInfoCriteria,
    ) -> Result<Vec<DailyInfo>, DailyInfoRepositoryError>;

    /// Overwrite the mutable columns of an existing notice.
    ///
    /// Returns `None` when the row no longer exists.
    async fn update(
        &self,
        record: &DailyInfo,
    ) -> Result<Option<DailyInfo>, DailyInfoRepositoryError>;

    /// Remove a notice. Returns whether a row was deleted.
    async fn delete(&self, id: &Uuid) -> Result<bool, DailyInfoRepositoryError>;
}
