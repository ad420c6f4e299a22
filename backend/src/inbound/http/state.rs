//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports,
//! so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DailyInfoCommand, DailyInfoQuery, DutyRosterCommand, DutyRosterQuery, SignInCommand,
    UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sign_in: Arc<dyn SignInCommand>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub daily_info: Arc<dyn DailyInfoCommand>,
    pub daily_info_query: Arc<dyn DailyInfoQuery>,
    pub duty_roster: Arc<dyn DutyRosterCommand>,
    pub duty_roster_query: Arc<dyn DutyRosterQuery>,
}
