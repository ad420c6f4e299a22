//! Duty roster: which operator covers which shift on which day.
//!
//! The store does not enforce one entry per `(day, shift)`. When duplicates
//! exist, [`find_entry`] picks the first one in listing order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text::{InvalidChoiceError, NonEmptyText};
use super::week::WeekBounds;
use super::UserSummary;

/// Shift of the day. Ordering is the display order `Day < Evening < Night`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    Day,
    Evening,
    Night,
}

impl Shift {
    /// All shifts in display order.
    pub const ALL: [Self; 3] = [Self::Day, Self::Evening, Self::Night];

    /// Wire and storage names in display order.
    pub const NAMES: &'static [&'static str] = &["DAY", "EVENING", "NIGHT"];

    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Evening => "EVENING",
            Self::Night => "NIGHT",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = InvalidChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAY" => Ok(Self::Day),
            "EVENING" => Ok(Self::Evening),
            "NIGHT" => Ok(Self::Night),
            other => Err(InvalidChoiceError::new(other, Self::NAMES)),
        }
    }
}

/// Stored roster entry with its creator resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyRosterEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub operator_name: NonEmptyText,
    pub shift: Shift,
    pub notes: Option<String>,
    pub created_by: UserSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DutyRosterEntry {
    /// Apply a partial update, leaving omitted fields untouched.
    #[must_use]
    pub fn apply(&self, patch: DutyRosterPatch, updated_at: DateTime<Utc>) -> Self {
        let DutyRosterPatch {
            date,
            operator_name,
            shift,
            notes,
        } = patch;
        Self {
            id: self.id,
            date: date.unwrap_or(self.date),
            operator_name: operator_name.unwrap_or_else(|| self.operator_name.clone()),
            shift: shift.unwrap_or(self.shift),
            notes: notes.unwrap_or_else(|| self.notes.clone()),
            created_by: self.created_by.clone(),
            created_at: self.created_at,
            updated_at,
        }
    }
}

/// Validated input for creating a roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyRosterDraft {
    pub date: DateTime<Utc>,
    pub operator_name: NonEmptyText,
    pub shift: Shift,
    pub notes: Option<String>,
}

/// Partial update. `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DutyRosterPatch {
    pub date: Option<DateTime<Utc>>,
    pub operator_name: Option<NonEmptyText>,
    pub shift: Option<Shift>,
    pub notes: Option<Option<String>>,
}

/// Repository filter. `week: None` returns every entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutyRosterCriteria {
    pub week: Option<WeekBounds>,
}

impl DutyRosterCriteria {
    /// Whether `entry` satisfies the criteria.
    #[must_use]
    pub fn matches(&self, entry: &DutyRosterEntry) -> bool {
        self.week.is_none_or(|week| week.contains(entry.date))
    }
}

/// Listing order: date ascending, then shift display order.
#[must_use]
pub fn roster_order(a: &DutyRosterEntry, b: &DutyRosterEntry) -> Ordering {
    a.date.cmp(&b.date).then_with(|| a.shift.cmp(&b.shift))
}

/// Sort entries into listing order. Ties keep their incoming order.
pub fn sort_roster(entries: &mut [DutyRosterEntry]) {
    entries.sort_by(roster_order);
}

/// First entry on calendar `day` (UTC, time of day ignored) for `shift`.
#[must_use]
pub fn find_entry(
    entries: &[DutyRosterEntry],
    day: NaiveDate,
    shift: Shift,
) -> Option<&DutyRosterEntry> {
    entries
        .iter()
        .find(|entry| entry.date.date_naive() == day && entry.shift == shift)
}

/// One cell of the week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterCell {
    pub shift: Shift,
    pub entry: Option<DutyRosterEntry>,
}

/// One day row of the week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterDay {
    pub date: NaiveDate,
    pub shifts: Vec<RosterCell>,
}

/// Week grid: seven days, each with one cell per shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterWeek {
    pub bounds: WeekBounds,
    pub days: Vec<RosterDay>,
}

impl RosterWeek {
    /// Lay `entries` (already in listing order) out over `bounds`.
    #[must_use]
    pub fn build(bounds: WeekBounds, entries: &[DutyRosterEntry]) -> Self {
        let days = bounds
            .days()
            .into_iter()
            .map(|date| RosterDay {
                date,
                shifts: Shift::ALL
                    .into_iter()
                    .map(|shift| RosterCell {
                        shift,
                        entry: find_entry(entries, date, shift).cloned(),
                    })
                    .collect(),
            })
            .collect();
        Self { bounds, days }
    }
}
