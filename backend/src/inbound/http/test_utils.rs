//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};

use crate::domain::ports::{
    DailyInfoCommand, DailyInfoQuery, DutyRosterCommand, DutyRosterQuery, MockDailyInfoCommand,
    MockDailyInfoQuery, MockDutyRosterCommand, MockDutyRosterQuery, MockSignInCommand,
    MockUserProfileQuery, SignInCommand, UserProfileQuery,
};
use crate::domain::{Actor, Error, Role, UserId};

use super::session::SessionContext;
use super::state::HttpState;

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per call, the `session` cookie name, and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Path of the helper route that signs a fixed actor in.
pub const TEST_SIGN_IN_PATH: &str = "/__test/sign-in";

/// Actor stored by [`TEST_SIGN_IN_PATH`].
pub fn test_actor() -> Actor {
    Actor::new(
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture user id"),
        Role::Operator,
    )
}

/// Route that signs [`test_actor`] in without an identity provider.
pub fn test_sign_in_route(cfg: &mut web::ServiceConfig) {
    cfg.route(
        TEST_SIGN_IN_PATH,
        web::post().to(|session: SessionContext| async move {
            session.persist_actor(&test_actor())?;
            Ok::<_, Error>(HttpResponse::NoContent().finish())
        }),
    );
}

/// Call the sign-in helper route and return the session cookie.
pub async fn signed_in_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post().uri(TEST_SIGN_IN_PATH).to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Mocks backing an [`HttpState`]. Unused ports panic if called.
#[derive(Default)]
pub struct MockPorts {
    pub sign_in: MockSignInCommand,
    pub profile: MockUserProfileQuery,
    pub daily_info: MockDailyInfoCommand,
    pub daily_info_query: MockDailyInfoQuery,
    pub duty_roster: MockDutyRosterCommand,
    pub duty_roster_query: MockDutyRosterQuery,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        let sign_in: Arc<dyn SignInCommand> = Arc::new(self.sign_in);
        let profile: Arc<dyn UserProfileQuery> = Arc::new(self.profile);
        let daily_info: Arc<dyn DailyInfoCommand> = Arc::new(self.daily_info);
        let daily_info_query: Arc<dyn DailyInfoQuery> = Arc::new(self.daily_info_query);
        let duty_roster: Arc<dyn DutyRosterCommand> = Arc::new(self.duty_roster);
        let duty_roster_query: Arc<dyn DutyRosterQuery> = Arc::new(self.duty_roster_query);
        web::Data::new(HttpState {
            sign_in,
            profile,
            daily_info,
            daily_info_query,
            duty_roster,
            duty_roster_query,
        })
    }
}

/// App skeleton with session middleware, JSON error handling, and the
/// sign-in helper route.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(super::error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(super::error::query_error_handler))
        .wrap(test_session_middleware())
        .configure(test_sign_in_route)
}
