//! Daily info API handlers.
//!
//! ```text
//! GET    /api/v1/daily-info?category=ROAD_CLOSURE&active=true
//! POST   /api/v1/daily-info {"title":"E39 stengt","description":"...","category":"ROAD_CLOSURE","validFrom":"2024-01-01T00:00:00Z"}
//! GET    /api/v1/daily-info/{id}
//! PUT    /api/v1/daily-info/{id} {"priority":"LOW"}
//! DELETE /api/v1/daily-info/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::DailyInfoView;
use crate::domain::{Category, DailyInfoDraft, DailyInfoFilter, DailyInfoPatch, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CreatedByResponse, DeletedResponse, ErrorSchema};
use crate::inbound::http::session::Authenticated;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    CollectViolations, FieldName, choice, double_option, non_empty, not_null, optional,
    required, timestamp,
};

const TITLE: FieldName = FieldName::new("title");
const DESCRIPTION: FieldName = FieldName::new("description");
const CATEGORY: FieldName = FieldName::new("category");
const PRIORITY: FieldName = FieldName::new("priority");
const VALID_FROM: FieldName = FieldName::new("validFrom");
const VALID_UNTIL: FieldName = FieldName::new("validUntil");

/// Category value meaning "no restriction" in list queries.
const ALL_CATEGORIES: &str = "ALL";

/// Query parameters for `GET /api/v1/daily-info`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DailyInfoListQuery {
    /// Category name, or `ALL`.
    pub category: Option<String>,
    /// `true` restricts to notices active now; any other value is ignored.
    pub active: Option<String>,
}

impl TryFrom<DailyInfoListQuery> for DailyInfoFilter {
    type Error = Error;

    fn try_from(value: DailyInfoListQuery) -> Result<Self, Self::Error> {
        let requested = value.category.filter(|raw| raw != ALL_CATEGORIES);
        let (category,) = (optional(requested, |raw| choice::<Category>(CATEGORY, &raw)),)
            .collect_violations()?;
        Ok(Self {
            category,
            active_only: value.active.as_deref() == Some("true"),
        })
    }
}

/// Request body for creating a notice.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDailyInfoRequest {
    #[schema(example = "E39 stengt")]
    pub title: Option<String>,
    #[schema(example = "Stengt ved Hjelset grunnet ras")]
    pub description: Option<String>,
    #[schema(example = "ROAD_CLOSURE")]
    pub category: Option<String>,
    /// Defaults to `MEDIUM` when omitted; `null` is rejected.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "HIGH")]
    pub priority: Option<Option<String>>,
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub valid_from: Option<String>,
    /// Absent or `null` means open-ended.
    pub valid_until: Option<String>,
}

impl TryFrom<CreateDailyInfoRequest> for DailyInfoDraft {
    type Error = Error;

    fn try_from(value: CreateDailyInfoRequest) -> Result<Self, Self::Error> {
        let (title, description, category, priority, valid_from, valid_until) = (
            required(TITLE, value.title).and_then(|raw| non_empty(TITLE, raw)),
            required(DESCRIPTION, value.description).and_then(|raw| non_empty(DESCRIPTION, raw)),
            required(CATEGORY, value.category).and_then(|raw| choice(CATEGORY, &raw)),
            not_null(PRIORITY, value.priority)
                .and_then(|given| optional(given, |raw| choice(PRIORITY, &raw))),
            required(VALID_FROM, value.valid_from).and_then(|raw| timestamp(VALID_FROM, &raw)),
            optional(value.valid_until, |raw| timestamp(VALID_UNTIL, &raw)),
        )
            .collect_violations()?;

        Ok(Self {
            title,
            description,
            category,
            priority: priority.unwrap_or_default(),
            valid_from,
            valid_until,
        })
    }
}

/// Partial update body. Omitted fields are left unchanged; `validUntil: null`
/// clears the end of the window and `null` anywhere else is rejected.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDailyInfoRequest {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub priority: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub valid_from: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub valid_until: Option<Option<String>>,
}

impl TryFrom<UpdateDailyInfoRequest> for DailyInfoPatch {
    type Error = Error;

    fn try_from(value: UpdateDailyInfoRequest) -> Result<Self, Self::Error> {
        let valid_until = value
            .valid_until
            .map(|inner| optional(inner, |raw| timestamp(VALID_UNTIL, &raw)))
            .transpose();
        let (title, description, category, priority, valid_from, valid_until) = (
            not_null(TITLE, value.title)
                .and_then(|given| optional(given, |raw| non_empty(TITLE, raw))),
            not_null(DESCRIPTION, value.description)
                .and_then(|given| optional(given, |raw| non_empty(DESCRIPTION, raw))),
            not_null(CATEGORY, value.category)
                .and_then(|given| optional(given, |raw| choice(CATEGORY, &raw))),
            not_null(PRIORITY, value.priority)
                .and_then(|given| optional(given, |raw| choice(PRIORITY, &raw))),
            not_null(VALID_FROM, value.valid_from)
                .and_then(|given| optional(given, |raw| timestamp(VALID_FROM, &raw))),
            valid_until,
        )
            .collect_violations()?;

        Ok(Self {
            title,
            description,
            category,
            priority,
            valid_from,
            valid_until,
        })
    }
}

/// Notice as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyInfoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[schema(example = "ROAD_CLOSURE")]
    pub category: String,
    #[schema(example = "HIGH")]
    pub priority: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    /// Window evaluated at request time.
    pub is_active: bool,
    pub created_by: CreatedByResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DailyInfoView> for DailyInfoResponse {
    fn from(value: DailyInfoView) -> Self {
        let DailyInfoView { info, is_active } = value;
        Self {
            id: info.id,
            title: info.title.into(),
            description: info.description.into(),
            category: info.category.as_str().to_owned(),
            priority: info.priority.as_str().to_owned(),
            valid_from: info.valid_from,
            valid_until: info.valid_until,
            is_active,
            created_by: info.created_by.into(),
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

/// Ids that do not parse cannot name a live record.
pub(crate) fn parse_record_id(raw: &str, kind: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| Error::not_found(format!("{kind} {raw} not found")))
}

/// List notices, highest priority and most recent start first.
#[utoipa::path(
    get,
    path = "/api/v1/daily-info",
    params(DailyInfoListQuery),
    responses(
        (status = 200, description = "Notices", body = [DailyInfoResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["daily-info"],
    operation_id = "listDailyInfo",
    security(("SessionCookie" = []))
)]
#[get("/daily-info")]
pub async fn list_daily_info(
    _gate: Authenticated,
    state: web::Data<HttpState>,
    query: web::Query<DailyInfoListQuery>,
) -> ApiResult<web::Json<Vec<DailyInfoResponse>>> {
    let filter = DailyInfoFilter::try_from(query.into_inner())?;
    let views = state.daily_info_query.list(filter).await?;
    Ok(web::Json(
        views.into_iter().map(DailyInfoResponse::from).collect(),
    ))
}

/// Create a notice.
#[utoipa::path(
    post,
    path = "/api/v1/daily-info",
    request_body = CreateDailyInfoRequest,
    responses(
        (status = 201, description = "Notice created", body = DailyInfoResponse),
        (status = 400, description = "Validation error", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["daily-info"],
    operation_id = "createDailyInfo",
    security(("SessionCookie" = []))
)]
#[post("/daily-info")]
pub async fn create_daily_info(
    gate: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<CreateDailyInfoRequest>,
) -> ApiResult<HttpResponse> {
    let draft = DailyInfoDraft::try_from(payload.into_inner())?;
    let view = state.daily_info.create(gate.actor(), draft).await?;
    Ok(HttpResponse::Created().json(DailyInfoResponse::from(view)))
}

/// Fetch one notice.
#[utoipa::path(
    get,
    path = "/api/v1/daily-info/{id}",
    params(("id" = String, Path, description = "Notice identifier")),
    responses(
        (status = 200, description = "Notice", body = DailyInfoResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["daily-info"],
    operation_id = "getDailyInfo",
    security(("SessionCookie" = []))
)]
#[get("/daily-info/{id}")]
pub async fn get_daily_info(
    _gate: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DailyInfoResponse>> {
    let id = parse_record_id(&path.into_inner(), "daily info")?;
    let view = state.daily_info_query.get(id).await?;
    Ok(web::Json(view.into()))
}

/// Partially update a notice.
#[utoipa::path(
    put,
    path = "/api/v1/daily-info/{id}",
    params(("id" = String, Path, description = "Notice identifier")),
    request_body = UpdateDailyInfoRequest,
    responses(
        (status = 200, description = "Notice updated", body = DailyInfoResponse),
        (status = 400, description = "Validation error", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["daily-info"],
    operation_id = "updateDailyInfo",
    security(("SessionCookie" = []))
)]
#[put("/daily-info/{id}")]
pub async fn update_daily_info(
    gate: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateDailyInfoRequest>,
) -> ApiResult<web::Json<DailyInfoResponse>> {
    let patch = DailyInfoPatch::try_from(payload.into_inner())?;
    let id = parse_record_id(&path.into_inner(), "daily info")?;
    let view = state.daily_info.update(gate.actor(), id, patch).await?;
    Ok(web::Json(view.into()))
}

/// Delete a notice.
#[utoipa::path(
    delete,
    path = "/api/v1/daily-info/{id}",
    params(("id" = String, Path, description = "Notice identifier")),
    responses(
        (status = 200, description = "Notice deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["daily-info"],
    operation_id = "deleteDailyInfo",
    security(("SessionCookie" = []))
)]
#[delete("/daily-info/{id}")]
pub async fn delete_daily_info(
    gate: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_record_id(&path.into_inner(), "daily info")?;
    state.daily_info.delete(gate.actor(), id).await?;
    Ok(web::Json(DeletedResponse::ok()))
}

#[cfg(test)]
#[path = "daily_info_tests.rs"]
mod tests;
