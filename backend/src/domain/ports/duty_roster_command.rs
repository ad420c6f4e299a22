//! Driving port for duty roster mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, DutyRosterDraft, DutyRosterEntry, DutyRosterPatch, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DutyRosterCommand: Send + Sync {
    async fn create(&self, actor: &Actor, draft: DutyRosterDraft)
    -> Result<DutyRosterEntry, Error>;

    async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: DutyRosterPatch,
    ) -> Result<DutyRosterEntry, Error>;

    async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), Error>;
}
