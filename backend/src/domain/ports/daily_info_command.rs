//! Driving port for daily info mutations.
//!
//! Every mutation is attributed to an [`Actor`] and leaves an audit entry
//! once it has committed.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, DailyInfoDraft, DailyInfoPatch, Error};

use super::DailyInfoView;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailyInfoCommand: Send + Sync {
    async fn create(&self, actor: &Actor, draft: DailyInfoDraft) -> Result<DailyInfoView, Error>;

    /// Apply `patch` to an existing notice. Unknown ids yield `not_found`.
    async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: DailyInfoPatch,
    ) -> Result<DailyInfoView, Error>;

    async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), Error>;
}
