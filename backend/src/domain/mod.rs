//! Domain primitives, evaluators, and services.
//!
//! Purpose: define the dispatch board's entities (notices, roster entries,
//! audit records, operator accounts) and the use-cases that mutate them.
//! Adapters reach the domain only through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - DailyInfo, DutyRosterEntry, AuditEntry, User: stored records.
//! - is_active / week_bounds: pure date evaluators shared by every layer.
//! - DailyInfoService, DutyRosterService, SignInService: driving-port
//!   implementations.

pub mod audit;
pub mod auth;
pub mod daily_info;
mod daily_info_service;
pub mod duty_roster;
mod duty_roster_service;
pub mod error;
pub mod ports;
mod sign_in_service;
pub mod text;
pub mod time_window;
pub mod trace_id;
pub mod user;
pub mod week;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::audit::{AuditAction, AuditEntry, AuditRecorder, EntityType};
pub use self::auth::{Actor, AllowList, EmptyTokenError, IdentityClaims, IdentityToken};
pub use self::daily_info::{
    Category, DailyInfo, DailyInfoCriteria, DailyInfoDraft, DailyInfoFilter, DailyInfoPatch,
    Priority, listing_order, sort_for_listing,
};
pub use self::daily_info_service::DailyInfoService;
pub use self::duty_roster::{
    DutyRosterCriteria, DutyRosterDraft, DutyRosterEntry, DutyRosterPatch, RosterCell, RosterDay,
    RosterWeek, Shift, find_entry, roster_order, sort_roster,
};
pub use self::duty_roster_service::DutyRosterService;
pub use self::error::{Error, ErrorCode};
pub use self::sign_in_service::SignInService;
pub use self::text::{EmptyTextError, InvalidChoiceError, NonEmptyText};
pub use self::time_window::is_active;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, Role, User, UserId, UserSummary, UserValidationError};
pub use self::week::{WeekBounds, enumerate_days, week_bounds};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use dispatch_board::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("no such notice"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
