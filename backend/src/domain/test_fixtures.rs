//! Shared builders for domain unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::{
    Category, DailyInfo, DutyRosterEntry, Email, NonEmptyText, Priority, Shift, UserId,
    UserSummary,
};

/// Clock frozen at a single instant.
pub(crate) struct FixtureClock(pub DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid fixture time")
}

pub(crate) fn text(value: &str) -> NonEmptyText {
    NonEmptyText::new(value).expect("non-empty fixture text")
}

pub(crate) fn creator() -> UserSummary {
    UserSummary {
        id: UserId::from_uuid(Uuid::from_u128(0xA11CE)),
        name: Some("Kari Nordmann".to_owned()),
        email: Email::new("kari@example.com").expect("valid email"),
    }
}

pub(crate) fn notice() -> DailyInfo {
    DailyInfo {
        id: Uuid::from_u128(0xD1),
        title: text("E39 stengt"),
        description: text("Stengt ved Hjelset grunnet ras"),
        category: Category::RoadClosure,
        priority: Priority::High,
        valid_from: at(2024, 1, 1, 0),
        valid_until: None,
        created_by: creator(),
        created_at: at(2024, 1, 1, 0),
        updated_at: at(2024, 1, 1, 0),
    }
}

pub(crate) fn roster_entry() -> DutyRosterEntry {
    DutyRosterEntry {
        id: Uuid::from_u128(0xE1),
        date: at(2024, 3, 4, 0),
        operator_name: text("Ola Nordmann"),
        shift: Shift::Day,
        notes: None,
        created_by: creator(),
        created_at: at(2024, 3, 1, 0),
        updated_at: at(2024, 3, 1, 0),
    }
}
