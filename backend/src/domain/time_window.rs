//! Validity-window evaluation for notices.

use chrono::{DateTime, Utc};

/// Whether a window `[valid_from, valid_until]` covers `now`.
///
/// Both bounds are inclusive and an absent `valid_until` leaves the window
/// open-ended. Repository filters must express exactly this predicate.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use dispatch_board::domain::is_active;
///
/// let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// assert!(is_active(now, from, None));
/// assert!(!is_active(now, from, Some(from)));
/// ```
#[must_use]
pub fn is_active(
    now: DateTime<Utc>,
    valid_from: DateTime<Utc>,
    valid_until: Option<DateTime<Utc>>,
) -> bool {
    valid_from <= now && valid_until.is_none_or(|until| until >= now)
}
