//! HTTP inbound adapter exposing the dashboard REST endpoints.

pub mod auth;
pub mod daily_info;
pub mod duty_roster;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` handler on `cfg`.
///
/// `duty-roster/week` is registered ahead of `duty-roster/{id}` so the
/// literal segment wins.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::sign_in)
        .service(auth::sign_out)
        .service(auth::current_session)
        .service(daily_info::list_daily_info)
        .service(daily_info::create_daily_info)
        .service(daily_info::get_daily_info)
        .service(daily_info::update_daily_info)
        .service(daily_info::delete_daily_info)
        .service(duty_roster::list_duty_roster)
        .service(duty_roster::duty_roster_week)
        .service(duty_roster::create_duty_roster)
        .service(duty_roster::get_duty_roster)
        .service(duty_roster::update_duty_roster)
        .service(duty_roster::delete_duty_roster);
}
