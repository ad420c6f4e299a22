//! Sign-in, sign-out and session introspection.
//!
//! ```text
//! POST /api/v1/auth/sign-in {"token":"<identity provider access token>"}
//! POST /api/v1/auth/sign-out
//! GET  /api/v1/auth/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Actor, Error, IdentityToken, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{Authenticated, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    CollectViolations, FieldName, FieldResult, FieldViolation, ViolationCode, required,
};

const TOKEN: FieldName = FieldName::new("token");

/// Sign-in request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignInRequest {
    /// Access token issued by the identity provider.
    pub token: Option<String>,
}

fn identity_token(raw: String) -> FieldResult<IdentityToken> {
    IdentityToken::new(&raw).map_err(|err| {
        FieldViolation::new(TOKEN, ViolationCode::EmptyText, format!("token: {err}"))
    })
}

impl TryFrom<SignInRequest> for IdentityToken {
    type Error = Error;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        let (token,) = (required(TOKEN, value.token).and_then(identity_token),)
            .collect_violations()?;
        Ok(token)
    }
}

/// Signed-in operator profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "kari@example.com")]
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    #[schema(example = "OPERATOR")]
    pub role: String,
}

impl From<User> for SessionUserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            email: value.email.into(),
            name: value.name,
            image: value.image,
            role: value.role.as_str().to_owned(),
        }
    }
}

/// Exchange an identity provider token for a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank token", body = ErrorSchema),
        (status = 401, description = "Token rejected", body = ErrorSchema),
        (status = 403, description = "Email not allow-listed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/sign-in")]
pub async fn sign_in(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<SessionUserResponse>> {
    let token = IdentityToken::try_from(payload.into_inner())?;
    let user = state.sign_in.sign_in(token).await?;
    session.persist_actor(&Actor::new(user.id, user.role))?;
    Ok(web::Json(user.into()))
}

/// Drop the current session. Succeeds without one.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[post("/auth/sign-out")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Profile of the signed-in operator.
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Current operator", body = SessionUserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentSession",
    security(("SessionCookie" = []))
)]
#[get("/auth/session")]
pub async fn current_session(
    gate: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<SessionUserResponse>> {
    let user = state.profile.fetch_profile(&gate.actor().user_id).await?;
    Ok(web::Json(user.into()))
}
