//! Tests for the duty roster service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{MockAuditLogRepository, MockDutyRosterRepository};
use crate::domain::test_fixtures::{FixtureClock, at, roster_entry, text};
use crate::domain::{ErrorCode, Role, Shift, UserId};

#[fixture]
fn actor() -> Actor {
    Actor::new(UserId::random(), Role::Operator)
}

fn service(
    repo: MockDutyRosterRepository,
    audit: MockAuditLogRepository,
) -> DutyRosterService<MockDutyRosterRepository, MockAuditLogRepository> {
    DutyRosterService::new(
        Arc::new(repo),
        Arc::new(audit),
        Arc::new(FixtureClock(at(2024, 3, 6, 10))),
    )
}

fn audit_never() -> MockAuditLogRepository {
    let mut audit = MockAuditLogRepository::new();
    audit.expect_append().times(0);
    audit
}

fn entry(id: u128, date: DateTime<Utc>, shift: Shift) -> DutyRosterEntry {
    DutyRosterEntry {
        id: Uuid::from_u128(id),
        date,
        shift,
        ..roster_entry()
    }
}

#[rstest]
#[tokio::test]
async fn create_audits_name_shift_and_date(actor: Actor) {
    let mut repo = MockDutyRosterRepository::new();
    repo.expect_insert()
        .times(1)
        .returning(|new| Ok(DutyRosterEntry { id: new.id, ..roster_entry() }));
    let mut audit = MockAuditLogRepository::new();
    audit
        .expect_append()
        .withf(|record| {
            record.action == AuditAction::Create
                && record.entity_type == EntityType::DutyRoster
                && record.changes
                    == Some(json!({
                        "operatorName": "Ola Nordmann",
                        "shift": "DAY",
                        "date": "2024-03-04T00:00:00Z",
                    }))
        })
        .times(1)
        .return_once(|_| Ok(()));

    let draft = DutyRosterDraft {
        date: at(2024, 3, 4, 0),
        operator_name: text("Ola Nordmann"),
        shift: Shift::Day,
        notes: None,
    };
    let stored = service(repo, audit)
        .create(&actor, draft)
        .await
        .expect("create succeeds");

    assert_eq!(stored.operator_name.as_str(), "Ola Nordmann");
}

#[rstest]
#[tokio::test]
async fn list_without_week_is_unrestricted_and_sorted() {
    let mut repo = MockDutyRosterRepository::new();
    repo.expect_list()
        .withf(|criteria| criteria.week.is_none())
        .times(1)
        .returning(|_| {
            Ok(vec![
                entry(1, at(2024, 3, 5, 0), Shift::Day),
                entry(2, at(2024, 3, 4, 0), Shift::Night),
                entry(3, at(2024, 3, 4, 0), Shift::Day),
            ])
        });

    let listed = service(repo, audit_never())
        .list(None)
        .await
        .expect("list succeeds");

    let ids: Vec<u128> = listed.iter().map(|e| e.id.as_u128()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[rstest]
#[tokio::test]
async fn list_scopes_to_week_containing_reference() {
    let mut repo = MockDutyRosterRepository::new();
    repo.expect_list()
        .withf(|criteria| criteria.week == Some(week_bounds(at(2024, 3, 4, 0))))
        .times(1)
        .returning(|_| Ok(Vec::new()));

    service(repo, audit_never())
        .list(Some(at(2024, 3, 9, 18)))
        .await
        .expect("list succeeds");
}

#[rstest]
#[tokio::test]
async fn week_defaults_to_clock_week() {
    let mut repo = MockDutyRosterRepository::new();
    repo.expect_list()
        .times(1)
        .returning(|_| Ok(vec![entry(1, at(2024, 3, 4, 0), Shift::Day)]));

    let week = service(repo, audit_never())
        .week(None)
        .await
        .expect("week succeeds");

    assert_eq!(week.bounds.start, at(2024, 3, 4, 0));
    let monday = week.days.first().expect("seven days");
    let day_cell = monday.shifts.first().expect("three shifts");
    assert_eq!(day_cell.shift, Shift::Day);
    assert_eq!(day_cell.entry.as_ref().map(|e| e.id.as_u128()), Some(1));
}

#[rstest]
#[tokio::test]
async fn update_can_clear_notes(actor: Actor) {
    let mut repo = MockDutyRosterRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| {
        Ok(Some(DutyRosterEntry {
            notes: Some("bytter med Kari".to_owned()),
            ..roster_entry()
        }))
    });
    repo.expect_update()
        .times(1)
        .returning(|candidate| Ok(Some(candidate.clone())));
    let mut audit = MockAuditLogRepository::new();
    audit
        .expect_append()
        .withf(|record| {
            let changes = record.changes.clone().unwrap_or_default();
            changes["old"]["notes"] == "bytter med Kari" && changes["new"]["notes"].is_null()
        })
        .times(1)
        .return_once(|_| Ok(()));

    let patch = DutyRosterPatch {
        notes: Some(None),
        ..DutyRosterPatch::default()
    };
    let updated = service(repo, audit)
        .update(&actor, roster_entry().id, patch)
        .await
        .expect("update succeeds");

    assert_eq!(updated.notes, None);
    assert_eq!(updated.operator_name.as_str(), "Ola Nordmann");
}

#[rstest]
#[tokio::test]
async fn delete_audits_name_and_shift(actor: Actor) {
    let mut repo = MockDutyRosterRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(roster_entry())));
    repo.expect_delete().times(1).return_once(|_| Ok(true));
    let mut audit = MockAuditLogRepository::new();
    audit
        .expect_append()
        .withf(|record| {
            record.action == AuditAction::Delete
                && record.changes == Some(json!({ "operatorName": "Ola Nordmann", "shift": "DAY" }))
        })
        .times(1)
        .return_once(|_| Ok(()));

    service(repo, audit)
        .delete(&actor, roster_entry().id)
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_of_unknown_id_is_not_found_without_audit(actor: Actor) {
    let mut repo = MockDutyRosterRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_delete().times(0);

    let err = service(repo, audit_never())
        .delete(&actor, Uuid::new_v4())
        .await
        .expect_err("unknown id");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
