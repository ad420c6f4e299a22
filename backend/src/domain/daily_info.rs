//! Daily info notices: time-bounded operational announcements.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text::{InvalidChoiceError, NonEmptyText};
use super::time_window::is_active;
use super::UserSummary;

/// Notice category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    RoadClosure,
    SmokeTest,
    GasFlaring,
    Other,
}

impl Category {
    /// Wire and storage names, in declaration order.
    pub const NAMES: &'static [&'static str] =
        &["ROAD_CLOSURE", "SMOKE_TEST", "GAS_FLARING", "OTHER"];

    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoadClosure => "ROAD_CLOSURE",
            Self::SmokeTest => "SMOKE_TEST",
            Self::GasFlaring => "GAS_FLARING",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROAD_CLOSURE" => Ok(Self::RoadClosure),
            "SMOKE_TEST" => Ok(Self::SmokeTest),
            "GAS_FLARING" => Ok(Self::GasFlaring),
            "OTHER" => Ok(Self::Other),
            other => Err(InvalidChoiceError::new(other, Self::NAMES)),
        }
    }
}

/// Notice priority. Ordering is `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Wire and storage names, lowest first.
    pub const NAMES: &'static [&'static str] = &["LOW", "MEDIUM", "HIGH"];

    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = InvalidChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(InvalidChoiceError::new(other, Self::NAMES)),
        }
    }
}

/// Stored notice with its creator resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyInfo {
    pub id: Uuid,
    pub title: NonEmptyText,
    pub description: NonEmptyText,
    pub category: Category,
    pub priority: Priority,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_by: UserSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyInfo {
    /// Whether the notice is current at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        is_active(now, self.valid_from, self.valid_until)
    }

    /// Apply a partial update, leaving omitted fields untouched.
    #[must_use]
    pub fn apply(&self, patch: DailyInfoPatch, updated_at: DateTime<Utc>) -> Self {
        let DailyInfoPatch {
            title,
            description,
            category,
            priority,
            valid_from,
            valid_until,
        } = patch;
        Self {
            id: self.id,
            title: title.unwrap_or_else(|| self.title.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
            category: category.unwrap_or(self.category),
            priority: priority.unwrap_or(self.priority),
            valid_from: valid_from.unwrap_or(self.valid_from),
            valid_until: valid_until.unwrap_or(self.valid_until),
            created_by: self.created_by.clone(),
            created_at: self.created_at,
            updated_at,
        }
    }
}

/// Validated input for creating a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyInfoDraft {
    pub title: NonEmptyText,
    pub description: NonEmptyText,
    pub category: Category,
    pub priority: Priority,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
}

/// Partial update. `valid_until: Some(None)` clears the end of the window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyInfoPatch {
    pub title: Option<NonEmptyText>,
    pub description: Option<NonEmptyText>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<Option<DateTime<Utc>>>,
}

/// Caller-facing list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyInfoFilter {
    /// `None` means every category.
    pub category: Option<Category>,
    /// Restrict to notices active at request time.
    pub active_only: bool,
}

/// Filter handed to repositories, with the active instant fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyInfoCriteria {
    pub category: Option<Category>,
    pub active_at: Option<DateTime<Utc>>,
}

impl DailyInfoCriteria {
    /// Whether `record` satisfies the criteria.
    ///
    /// In-process stores use this directly; SQL stores must agree with it.
    #[must_use]
    pub fn matches(&self, record: &DailyInfo) -> bool {
        let category_ok = self
            .category
            .is_none_or(|category| record.category == category);
        let active_ok = self
            .active_at
            .is_none_or(|now| record.is_active_at(now));
        category_ok && active_ok
    }
}

/// Listing order: priority descending, then `valid_from` descending.
#[must_use]
pub fn listing_order(a: &DailyInfo, b: &DailyInfo) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.valid_from.cmp(&a.valid_from))
}

/// Sort notices into listing order. Ties keep their incoming order.
pub fn sort_for_listing(records: &mut [DailyInfo]) {
    records.sort_by(listing_order);
}
