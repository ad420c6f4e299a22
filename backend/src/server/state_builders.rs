//! Wiring of driven adapters into the driving ports handlers depend on.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use dispatch_board::domain::ports::{FixtureIdentityProvider, IdentityProvider};
use dispatch_board::domain::{AllowList, DailyInfoService, DutyRosterService, SignInService};
use dispatch_board::inbound::http::session_config::BuildMode;
use dispatch_board::inbound::http::state::HttpState;
use dispatch_board::outbound::identity::UserInfoIdentityProvider;
use dispatch_board::outbound::persistence::{
    DbPool, DieselAuditLogRepository, DieselDailyInfoRepository, DieselDutyRosterRepository,
    DieselUserRepository,
};

use super::settings::AppSettings;

/// Build handler state from the pool and settings.
///
/// Debug builds fall back to [`FixtureIdentityProvider`] when no userinfo
/// endpoint is configured, so `fixture:<email>` tokens sign in. Release
/// builds refuse to start without an endpoint.
///
/// # Errors
/// Returns [`std::io::Error`] when the userinfo endpoint is missing in a
/// release build, malformed, or the HTTP client cannot be built.
pub fn build_http_state(
    pool: &DbPool,
    settings: &AppSettings,
    mode: BuildMode,
) -> std::io::Result<HttpState> {
    let allow_list = settings.allow_list();
    let userinfo_url = settings
        .identity_endpoint(mode)
        .map_err(std::io::Error::other)?;
    match userinfo_url {
        Some(endpoint) => {
            info!(%endpoint, "verifying sign-in tokens against userinfo endpoint");
            let provider =
                UserInfoIdentityProvider::new(endpoint, UserInfoIdentityProvider::DEFAULT_TIMEOUT)
                    .map_err(|err| {
                        std::io::Error::other(format!("identity client setup failed: {err}"))
                    })?;
            Ok(assemble(pool, provider, allow_list))
        }
        None => {
            warn!("DISPATCH_USERINFO_URL unset; accepting fixture sign-in tokens in debug build");
            Ok(assemble(pool, FixtureIdentityProvider, allow_list))
        }
    }
}

fn assemble<I>(pool: &DbPool, identity: I, allow_list: AllowList) -> HttpState
where
    I: IdentityProvider + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let audit = Arc::new(DieselAuditLogRepository::new(pool.clone()));

    let sign_in = Arc::new(SignInService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(identity),
        allow_list,
    ));
    let daily_info = Arc::new(DailyInfoService::new(
        Arc::new(DieselDailyInfoRepository::new(pool.clone())),
        Arc::clone(&audit),
        Arc::clone(&clock),
    ));
    let duty_roster = Arc::new(DutyRosterService::new(
        Arc::new(DieselDutyRosterRepository::new(pool.clone())),
        audit,
        clock,
    ));

    HttpState {
        sign_in: sign_in.clone(),
        profile: sign_in,
        daily_info: daily_info.clone(),
        daily_info_query: daily_info,
        duty_roster: duty_roster.clone(),
        duty_roster_query: duty_roster,
    }
}
