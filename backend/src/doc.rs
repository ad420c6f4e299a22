//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler and the health checks, the
//! request and response shapes they exchange, and the session cookie
//! security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` writes it out for tooling.

use crate::inbound::http::auth::{SessionUserResponse, SignInRequest};
use crate::inbound::http::daily_info::{
    CreateDailyInfoRequest, DailyInfoResponse, UpdateDailyInfoRequest,
};
use crate::inbound::http::duty_roster::{
    CreateDutyRosterRequest, DutyRosterResponse, RosterCellResponse, RosterDayResponse,
    RosterWeekResponse, UpdateDutyRosterRequest,
};
use crate::inbound::http::schemas::{
    CreatedByResponse, DeletedResponse, ErrorCodeSchema, ErrorSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/sign-in.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Dispatch board API",
        description = "Daily operational notices and the weekly duty roster for an emergency dispatch centre."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::daily_info::list_daily_info,
        crate::inbound::http::daily_info::create_daily_info,
        crate::inbound::http::daily_info::get_daily_info,
        crate::inbound::http::daily_info::update_daily_info,
        crate::inbound::http::daily_info::delete_daily_info,
        crate::inbound::http::duty_roster::list_duty_roster,
        crate::inbound::http::duty_roster::duty_roster_week,
        crate::inbound::http::duty_roster::create_duty_roster,
        crate::inbound::http::duty_roster::get_duty_roster,
        crate::inbound::http::duty_roster::update_duty_roster,
        crate::inbound::http::duty_roster::delete_duty_roster,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreatedByResponse,
        DeletedResponse,
        SignInRequest,
        SessionUserResponse,
        CreateDailyInfoRequest,
        UpdateDailyInfoRequest,
        DailyInfoResponse,
        CreateDutyRosterRequest,
        UpdateDutyRosterRequest,
        DutyRosterResponse,
        RosterCellResponse,
        RosterDayResponse,
        RosterWeekResponse,
    )),
    tags(
        (name = "auth", description = "Session sign-in and sign-out"),
        (name = "daily-info", description = "Time-bounded operational notices"),
        (name = "duty-roster", description = "Operator shift assignments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's shape.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    #[case("/api/v1/auth/sign-in")]
    #[case("/api/v1/daily-info")]
    #[case("/api/v1/daily-info/{id}")]
    #[case("/api/v1/duty-roster/week")]
    #[case("/api/v1/duty-roster/{id}")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let RefOr::T(Schema::Object(error)) = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema")
        else {
            panic!("expected Object schema");
        };
        for field in ["code", "message", "traceId", "details"] {
            assert!(error.properties.contains_key(field), "missing {field}");
        }
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
