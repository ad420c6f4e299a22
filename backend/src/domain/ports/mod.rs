//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`]) expose typed errors so
//! adapters map their failures into predictable variants. Driving ports
//! (`*Command`, `*Query`) return the API [`Error`](crate::domain::Error)
//! directly.

mod macros;

pub(crate) use macros::define_port_error;

mod audit_log_repository;
mod daily_info_command;
mod daily_info_query;
mod daily_info_repository;
mod duty_roster_command;
mod duty_roster_query;
mod duty_roster_repository;
mod identity_provider;
mod sign_in_command;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use audit_log_repository::MockAuditLogRepository;
pub use audit_log_repository::{AuditLogRepository, AuditLogRepositoryError};
#[cfg(test)]
pub use daily_info_command::MockDailyInfoCommand;
pub use daily_info_command::DailyInfoCommand;
#[cfg(test)]
pub use daily_info_query::MockDailyInfoQuery;
pub use daily_info_query::{DailyInfoQuery, DailyInfoView};
#[cfg(test)]
pub use daily_info_repository::MockDailyInfoRepository;
pub use daily_info_repository::{DailyInfoRepository, DailyInfoRepositoryError, NewDailyInfo};
#[cfg(test)]
pub use duty_roster_command::MockDutyRosterCommand;
pub use duty_roster_command::DutyRosterCommand;
#[cfg(test)]
pub use duty_roster_query::MockDutyRosterQuery;
pub use duty_roster_query::DutyRosterQuery;
#[cfg(test)]
pub use duty_roster_repository::MockDutyRosterRepository;
pub use duty_roster_repository::{
    DutyRosterRepository, DutyRosterRepositoryError, NewDutyRosterEntry,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use sign_in_command::MockSignInCommand;
pub use sign_in_command::SignInCommand;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserProfileUpsert, UserRepository, UserRepositoryError};
