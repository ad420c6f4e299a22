//! Append-only audit trail of entity mutations.
//!
//! Recording is best effort: [`AuditRecorder::record`] returns `()` and only
//! logs persistence failures, so a mutation that already committed is never
//! reported as failed because its audit entry was lost.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;
use uuid::Uuid;

use super::ports::AuditLogRepository;
use super::text::InvalidChoiceError;
use super::{Actor, DailyInfo, DutyRosterEntry, UserId};

/// Kind of mutation recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    const NAMES: &'static [&'static str] = &["CREATE", "UPDATE", "DELETE"];

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = InvalidChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            other => Err(InvalidChoiceError::new(other, Self::NAMES)),
        }
    }
}

/// Kind of entity a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    DailyInfo,
    DutyRoster,
    User,
    Bonfire,
}

impl EntityType {
    const NAMES: &'static [&'static str] = &["DAILY_INFO", "DUTY_ROSTER", "USER", "BONFIRE"];

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyInfo => "DAILY_INFO",
            Self::DutyRoster => "DUTY_ROSTER",
            Self::User => "USER",
            Self::Bonfire => "BONFIRE",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = InvalidChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY_INFO" => Ok(Self::DailyInfo),
            "DUTY_ROSTER" => Ok(Self::DutyRoster),
            "USER" => Ok(Self::User),
            "BONFIRE" => Ok(Self::Bonfire),
            other => Err(InvalidChoiceError::new(other, Self::NAMES)),
        }
    }
}

/// One audit record.
///
/// `entity_id` is not a foreign key; the entity may since have been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub action: AuditAction,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub changes: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// CREATE/DELETE snapshot for a notice.
#[must_use]
pub fn daily_info_snapshot(record: &DailyInfo) -> Value {
    json!({
        "title": record.title,
        "category": record.category,
    })
}

/// CREATE snapshot for a roster entry.
#[must_use]
pub fn roster_created_snapshot(entry: &DutyRosterEntry) -> Value {
    json!({
        "operatorName": entry.operator_name,
        "shift": entry.shift,
        "date": entry.date,
    })
}

/// DELETE snapshot for a roster entry.
#[must_use]
pub fn roster_deleted_snapshot(entry: &DutyRosterEntry) -> Value {
    json!({
        "operatorName": entry.operator_name,
        "shift": entry.shift,
    })
}

/// UPDATE payload carrying both full records.
#[must_use]
pub fn update_changes<T: Serialize>(old: &T, new: &T) -> Value {
    json!({ "old": old, "new": new })
}

/// Best-effort audit writer shared by the entity services.
pub struct AuditRecorder<A> {
    repo: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<A> Clone for AuditRecorder<A> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A> AuditRecorder<A>
where
    A: AuditLogRepository,
{
    /// Create a recorder over an audit log repository.
    pub fn new(repo: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Append one entry. Must be called after the mutation has committed.
    pub async fn record(
        &self,
        actor: &Actor,
        action: AuditAction,
        entity_type: EntityType,
        entity_id: Uuid,
        changes: Option<Value>,
    ) {
        let entry = AuditEntry {
            id: Uuid::new_v4(),
            user_id: actor.user_id,
            action,
            entity_type,
            entity_id: entity_id.to_string(),
            changes,
            created_at: self.clock.utc(),
        };

        if let Err(err) = self.repo.append(&entry).await {
            error!(
                error = %err,
                %action,
                %entity_type,
                %entity_id,
                user_id = %actor.user_id,
                "failed to record audit entry"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::domain::ports::{AuditLogRepositoryError, MockAuditLogRepository};
    use chrono::{Local, TimeZone};
    use rstest::rstest;

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid fixture time")
    }

    #[rstest]
    #[tokio::test]
    async fn record_appends_stamped_entry() {
        let actor = Actor::new(UserId::random(), Role::Operator);
        let entity_id = Uuid::new_v4();
        let mut repo = MockAuditLogRepository::new();
        repo.expect_append()
            .withf(move |entry| {
                entry.user_id == actor.user_id
                    && entry.action == AuditAction::Delete
                    && entry.entity_type == EntityType::DutyRoster
                    && entry.entity_id == entity_id.to_string()
                    && entry.created_at == now()
                    && entry.changes == Some(json!({ "operatorName": "Ola" }))
            })
            .times(1)
            .return_once(|_| Ok(()));

        let recorder = AuditRecorder::new(Arc::new(repo), Arc::new(FixtureClock(now())));
        recorder
            .record(
                &actor,
                AuditAction::Delete,
                EntityType::DutyRoster,
                entity_id,
                Some(json!({ "operatorName": "Ola" })),
            )
            .await;
    }

    #[rstest]
    #[tokio::test]
    async fn record_swallows_repository_failures() {
        let mut repo = MockAuditLogRepository::new();
        repo.expect_append()
            .times(1)
            .return_once(|_| Err(AuditLogRepositoryError::connection("pool exhausted")));

        let recorder = AuditRecorder::new(Arc::new(repo), Arc::new(FixtureClock(now())));
        recorder
            .record(
                &Actor::new(UserId::random(), Role::Admin),
                AuditAction::Create,
                EntityType::DailyInfo,
                Uuid::new_v4(),
                None,
            )
            .await;
    }

    #[rstest]
    fn enum_names_round_trip() {
        for action in [AuditAction::Create, AuditAction::Update, AuditAction::Delete] {
            assert_eq!(action.as_str().parse::<AuditAction>(), Ok(action));
        }
        for kind in [
            EntityType::DailyInfo,
            EntityType::DutyRoster,
            EntityType::User,
            EntityType::Bonfire,
        ] {
            assert_eq!(kind.as_str().parse::<EntityType>(), Ok(kind));
        }
    }

    #[rstest]
    fn update_payload_nests_old_and_new() {
        let payload = update_changes(&json!({ "priority": "HIGH" }), &json!({ "priority": "LOW" }));
        assert_eq!(payload["old"]["priority"], "HIGH");
        assert_eq!(payload["new"]["priority"], "LOW");
    }
}
