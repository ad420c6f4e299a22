//! Duty roster domain service.
//!
//! Same mutation flow as the notice service: fetch prior state, write, then
//! audit. Uniqueness of `(day, shift)` is not enforced here or in storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::audit::{roster_created_snapshot, roster_deleted_snapshot, update_changes};
use crate::domain::ports::{
    AuditLogRepository, DutyRosterCommand, DutyRosterQuery, DutyRosterRepository,
    DutyRosterRepositoryError, NewDutyRosterEntry,
};
use crate::domain::{
    Actor, AuditAction, AuditRecorder, DutyRosterCriteria, DutyRosterDraft, DutyRosterEntry,
    DutyRosterPatch, EntityType, Error, RosterWeek, sort_roster, week_bounds,
};

fn map_repository_error(error: DutyRosterRepositoryError) -> Error {
    match error {
        DutyRosterRepositoryError::Connection { message } => {
            Error::internal(format!("duty roster repository unavailable: {message}"))
        }
        DutyRosterRepositoryError::Query { message } => {
            Error::internal(format!("duty roster repository error: {message}"))
        }
    }
}

fn not_found(id: Uuid) -> Error {
    Error::not_found(format!("duty roster entry {id} not found"))
}

/// Roster service implementing [`DutyRosterCommand`] and [`DutyRosterQuery`].
pub struct DutyRosterService<R, A> {
    repo: Arc<R>,
    audit: AuditRecorder<A>,
    clock: Arc<dyn Clock>,
}

impl<R, A> Clone for DutyRosterService<R, A> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            audit: self.audit.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, A> DutyRosterService<R, A>
where
    R: DutyRosterRepository,
    A: AuditLogRepository,
{
    pub fn new(repo: Arc<R>, audit_repo: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        let audit = AuditRecorder::new(audit_repo, Arc::clone(&clock));
        Self { repo, audit, clock }
    }

    async fn fetch(&self, id: Uuid) -> Result<DutyRosterEntry, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn load(&self, criteria: DutyRosterCriteria) -> Result<Vec<DutyRosterEntry>, Error> {
        let mut entries = self
            .repo
            .list(&criteria)
            .await
            .map_err(map_repository_error)?;
        sort_roster(&mut entries);
        Ok(entries)
    }
}

#[async_trait]
impl<R, A> DutyRosterCommand for DutyRosterService<R, A>
where
    R: DutyRosterRepository,
    A: AuditLogRepository,
{
    async fn create(
        &self,
        actor: &Actor,
        draft: DutyRosterDraft,
    ) -> Result<DutyRosterEntry, Error> {
        let entry = NewDutyRosterEntry {
            id: Uuid::new_v4(),
            draft,
            created_by: actor.user_id,
            created_at: self.clock.utc(),
        };
        let stored = self
            .repo
            .insert(&entry)
            .await
            .map_err(map_repository_error)?;

        info!(roster_entry_id = %stored.id, user_id = %actor.user_id, "duty roster entry created");
        self.audit
            .record(
                actor,
                AuditAction::Create,
                EntityType::DutyRoster,
                stored.id,
                Some(roster_created_snapshot(&stored)),
            )
            .await;
        Ok(stored)
    }

    async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: DutyRosterPatch,
    ) -> Result<DutyRosterEntry, Error> {
        let prior = self.fetch(id).await?;
        let candidate = prior.apply(patch, self.clock.utc());
        let stored = self
            .repo
            .update(&candidate)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;

        info!(roster_entry_id = %id, user_id = %actor.user_id, "duty roster entry updated");
        self.audit
            .record(
                actor,
                AuditAction::Update,
                EntityType::DutyRoster,
                id,
                Some(update_changes(&prior, &stored)),
            )
            .await;
        Ok(stored)
    }

    async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), Error> {
        let prior = self.fetch(id).await?;
        if !self
            .repo
            .delete(&id)
            .await
            .map_err(map_repository_error)?
        {
            return Err(not_found(id));
        }

        info!(roster_entry_id = %id, user_id = %actor.user_id, "duty roster entry deleted");
        self.audit
            .record(
                actor,
                AuditAction::Delete,
                EntityType::DutyRoster,
                id,
                Some(roster_deleted_snapshot(&prior)),
            )
            .await;
        Ok(())
    }
}

#[async_trait]
impl<R, A> DutyRosterQuery for DutyRosterService<R, A>
where
    R: DutyRosterRepository,
    A: AuditLogRepository,
{
    async fn list(&self, week_of: Option<DateTime<Utc>>) -> Result<Vec<DutyRosterEntry>, Error> {
        self.load(DutyRosterCriteria {
            week: week_of.map(week_bounds),
        })
        .await
    }

    async fn week(&self, reference: Option<DateTime<Utc>>) -> Result<RosterWeek, Error> {
        let bounds = week_bounds(reference.unwrap_or_else(|| self.clock.utc()));
        let entries = self
            .load(DutyRosterCriteria {
                week: Some(bounds),
            })
            .await?;
        Ok(RosterWeek::build(bounds, &entries))
    }

    async fn get(&self, id: Uuid) -> Result<DutyRosterEntry, Error> {
        self.fetch(id).await
    }
}

#[cfg(test)]
#[path = "duty_roster_service_tests.rs"]
mod tests;
