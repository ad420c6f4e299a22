//! Roster week resolution.
//!
//! Weeks start on Monday and are computed in UTC.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Inclusive week range used to scope roster queries.
///
/// `start` is Monday 00:00 and `end` is the last representable instant of the
/// following Sunday, so range queries use `date <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekBounds {
    /// Whether `instant` falls inside the week.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// The seven calendar days of this week.
    #[must_use]
    pub fn days(&self) -> Vec<NaiveDate> {
        enumerate_days(self.start, self.end)
    }
}

/// Resolve the Monday-to-Sunday week containing `reference`.
///
/// # Examples
/// ```
/// use chrono::{Datelike, TimeZone, Utc, Weekday};
/// use dispatch_board::domain::week_bounds;
///
/// let thursday = Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap();
/// let week = week_bounds(thursday);
/// assert_eq!(week.start.weekday(), Weekday::Mon);
/// assert_eq!(week.end.weekday(), Weekday::Sun);
/// assert_eq!(week.start.day(), 4);
/// ```
#[must_use]
pub fn week_bounds(reference: DateTime<Utc>) -> WeekBounds {
    let offset = u64::from(reference.weekday().num_days_from_monday());
    let date = reference.date_naive();
    let monday = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(7) - Duration::microseconds(1);
    WeekBounds { start, end }
}

/// Calendar days from `start` to `end`, inclusive and ascending.
#[must_use]
pub fn enumerate_days(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<NaiveDate> {
    let last = end.date_naive();
    start
        .date_naive()
        .iter_days()
        .take_while(|day| *day <= last)
        .collect()
}
