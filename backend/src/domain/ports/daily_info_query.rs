//! Driving port for reading daily info notices.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{DailyInfo, DailyInfoFilter, Error};

/// Notice paired with its window evaluated at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyInfoView {
    pub info: DailyInfo,
    pub is_active: bool,
}

impl DailyInfoView {
    /// Evaluate `info` against `now`.
    #[must_use]
    pub fn at(info: DailyInfo, now: DateTime<Utc>) -> Self {
        let is_active = info.is_active_at(now);
        Self { info, is_active }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailyInfoQuery: Send + Sync {
    /// Notices matching `filter` in listing order.
    async fn list(&self, filter: DailyInfoFilter) -> Result<Vec<DailyInfoView>, Error>;

    /// One notice, or `not_found`.
    async fn get(&self, id: Uuid) -> Result<DailyInfoView, Error>;
}
