//! Daily info domain service.
//!
//! Implements the notice driving ports over a [`DailyInfoRepository`].
//! Mutations fetch prior state first, write, then append an audit entry.
//! There is no concurrency token, so two concurrent updates of one notice
//! can race and the audited `old` value may miss the other writer.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::audit::{daily_info_snapshot, update_changes};
use crate::domain::ports::{
    AuditLogRepository, DailyInfoCommand, DailyInfoQuery, DailyInfoRepository,
    DailyInfoRepositoryError, DailyInfoView, NewDailyInfo,
};
use crate::domain::{
    Actor, AuditAction, AuditRecorder, DailyInfo, DailyInfoCriteria, DailyInfoDraft,
    DailyInfoFilter, DailyInfoPatch, EntityType, Error, sort_for_listing,
};

fn map_repository_error(error: DailyInfoRepositoryError) -> Error {
    match error {
        DailyInfoRepositoryError::Connection { message } => {
            Error::internal(format!("daily info repository unavailable: {message}"))
        }
        DailyInfoRepositoryError::Query { message } => {
            Error::internal(format!("daily info repository error: {message}"))
        }
    }
}

fn not_found(id: Uuid) -> Error {
    Error::not_found(format!("daily info {id} not found"))
}

/// Notice service implementing [`DailyInfoCommand`] and [`DailyInfoQuery`].
pub struct DailyInfoService<R, A> {
    repo: Arc<R>,
    audit: AuditRecorder<A>,
    clock: Arc<dyn Clock>,
}

impl<R, A> Clone for DailyInfoService<R, A> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            audit: self.audit.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, A> DailyInfoService<R, A>
where
    R: DailyInfoRepository,
    A: AuditLogRepository,
{
    /// Create a service writing audit entries to `audit_repo`.
    pub fn new(repo: Arc<R>, audit_repo: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        let audit = AuditRecorder::new(audit_repo, Arc::clone(&clock));
        Self { repo, audit, clock }
    }

    async fn fetch(&self, id: Uuid) -> Result<DailyInfo, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<R, A> DailyInfoCommand for DailyInfoService<R, A>
where
    R: DailyInfoRepository,
    A: AuditLogRepository,
{
    async fn create(&self, actor: &Actor, draft: DailyInfoDraft) -> Result<DailyInfoView, Error> {
        let now = self.clock.utc();
        let record = NewDailyInfo {
            id: Uuid::new_v4(),
            draft,
            created_by: actor.user_id,
            created_at: now,
        };
        let stored = self
            .repo
            .insert(&record)
            .await
            .map_err(map_repository_error)?;

        info!(daily_info_id = %stored.id, user_id = %actor.user_id, "daily info created");
        self.audit
            .record(
                actor,
                AuditAction::Create,
                EntityType::DailyInfo,
                stored.id,
                Some(daily_info_snapshot(&stored)),
            )
            .await;
        Ok(DailyInfoView::at(stored, now))
    }

    async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: DailyInfoPatch,
    ) -> Result<DailyInfoView, Error> {
        let prior = self.fetch(id).await?;
        let now = self.clock.utc();
        let candidate = prior.apply(patch, now);
        let stored = self
            .repo
            .update(&candidate)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;

        info!(daily_info_id = %id, user_id = %actor.user_id, "daily info updated");
        self.audit
            .record(
                actor,
                AuditAction::Update,
                EntityType::DailyInfo,
                id,
                Some(update_changes(&prior, &stored)),
            )
            .await;
        Ok(DailyInfoView::at(stored, now))
    }

    async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), Error> {
        let prior = self.fetch(id).await?;
        let removed = self
            .repo
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(not_found(id));
        }

        info!(daily_info_id = %id, user_id = %actor.user_id, "daily info deleted");
        self.audit
            .record(
                actor,
                AuditAction::Delete,
                EntityType::DailyInfo,
                id,
                Some(daily_info_snapshot(&prior)),
            )
            .await;
        Ok(())
    }
}

#[async_trait]
impl<R, A> DailyInfoQuery for DailyInfoService<R, A>
where
    R: DailyInfoRepository,
    A: AuditLogRepository,
{
    async fn list(&self, filter: DailyInfoFilter) -> Result<Vec<DailyInfoView>, Error> {
        let now = self.clock.utc();
        let criteria = DailyInfoCriteria {
            category: filter.category,
            active_at: filter.active_only.then_some(now),
        };
        let mut records = self
            .repo
            .list(&criteria)
            .await
            .map_err(map_repository_error)?;
        sort_for_listing(&mut records);
        Ok(records
            .into_iter()
            .map(|record| DailyInfoView::at(record, now))
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<DailyInfoView, Error> {
        let record = self.fetch(id).await?;
        Ok(DailyInfoView::at(record, self.clock.utc()))
    }
}

#[cfg(test)]
#[path = "daily_info_service_tests.rs"]
mod tests;
