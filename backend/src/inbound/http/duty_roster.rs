//! Duty roster API handlers.
//!
//! ```text
//! GET    /api/v1/duty-roster?weekStart=2024-03-06
//! GET    /api/v1/duty-roster/week?weekStart=2024-03-06
//! POST   /api/v1/duty-roster {"date":"2024-03-04","operatorName":"Ola Nordmann","shift":"DAY"}
//! GET    /api/v1/duty-roster/{id}
//! PUT    /api/v1/duty-roster/{id} {"notes":null}
//! DELETE /api/v1/duty-roster/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    DutyRosterDraft, DutyRosterEntry, DutyRosterPatch, Error, RosterCell, RosterDay, RosterWeek,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::daily_info::parse_record_id;
use crate::inbound::http::schemas::{CreatedByResponse, DeletedResponse, ErrorSchema};
use crate::inbound::http::session::Authenticated;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    CollectViolations, FieldName, choice, double_option, non_empty, not_null, optional,
    required, timestamp_or_date,
};

const DATE: FieldName = FieldName::new("date");
const OPERATOR_NAME: FieldName = FieldName::new("operatorName");
const SHIFT: FieldName = FieldName::new("shift");
const WEEK_START: FieldName = FieldName::new("weekStart");

/// Query parameters for roster listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct RosterWeekQuery {
    /// Any date or timestamp inside the wanted week.
    #[param(example = "2024-03-06")]
    pub week_start: Option<String>,
}

impl RosterWeekQuery {
    fn reference(self) -> Result<Option<DateTime<Utc>>, Error> {
        let (reference,) = (optional(self.week_start, |raw| {
            timestamp_or_date(WEEK_START, &raw)
        }),)
            .collect_violations()?;
        Ok(reference)
    }
}

/// Request body for creating a roster entry.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDutyRosterRequest {
    /// Calendar day, as `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[schema(example = "2024-03-04")]
    pub date: Option<String>,
    #[schema(example = "Ola Nordmann")]
    pub operator_name: Option<String>,
    #[schema(example = "DAY")]
    pub shift: Option<String>,
    /// Empty strings are stored as `null`.
    pub notes: Option<String>,
}

impl TryFrom<CreateDutyRosterRequest> for DutyRosterDraft {
    type Error = Error;

    fn try_from(value: CreateDutyRosterRequest) -> Result<Self, Self::Error> {
        let (date, operator_name, shift) = (
            required(DATE, value.date).and_then(|raw| timestamp_or_date(DATE, &raw)),
            required(OPERATOR_NAME, value.operator_name)
                .and_then(|raw| non_empty(OPERATOR_NAME, raw)),
            required(SHIFT, value.shift).and_then(|raw| choice(SHIFT, &raw)),
        )
            .collect_violations()?;

        Ok(Self {
            date,
            operator_name,
            shift,
            notes: value.notes.filter(|notes| !notes.is_empty()),
        })
    }
}

/// Partial update body. `notes: null` clears the notes; `null` anywhere else
/// is rejected.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDutyRosterRequest {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub date: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub operator_name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub shift: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub notes: Option<Option<String>>,
}

impl TryFrom<UpdateDutyRosterRequest> for DutyRosterPatch {
    type Error = Error;

    fn try_from(value: UpdateDutyRosterRequest) -> Result<Self, Self::Error> {
        let (date, operator_name, shift) = (
            not_null(DATE, value.date)
                .and_then(|given| optional(given, |raw| timestamp_or_date(DATE, &raw))),
            not_null(OPERATOR_NAME, value.operator_name)
                .and_then(|given| optional(given, |raw| non_empty(OPERATOR_NAME, raw))),
            not_null(SHIFT, value.shift)
                .and_then(|given| optional(given, |raw| choice(SHIFT, &raw))),
        )
            .collect_violations()?;

        Ok(Self {
            date,
            operator_name,
            shift,
            notes: value.notes,
        })
    }
}

/// Roster entry as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DutyRosterResponse {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    #[schema(example = "Ola Nordmann")]
    pub operator_name: String,
    #[schema(example = "DAY")]
    pub shift: String,
    pub notes: Option<String>,
    pub created_by: CreatedByResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DutyRosterEntry> for DutyRosterResponse {
    fn from(value: DutyRosterEntry) -> Self {
        Self {
            id: value.id,
            date: value.date,
            operator_name: value.operator_name.into(),
            shift: value.shift.as_str().to_owned(),
            notes: value.notes,
            created_by: value.created_by.into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// One shift slot of the week grid.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterCellResponse {
    #[schema(example = "EVENING")]
    pub shift: String,
    /// `null` when nobody is rostered.
    pub entry: Option<DutyRosterResponse>,
}

impl From<RosterCell> for RosterCellResponse {
    fn from(value: RosterCell) -> Self {
        Self {
            shift: value.shift.as_str().to_owned(),
            entry: value.entry.map(DutyRosterResponse::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterDayResponse {
    #[schema(value_type = String, example = "2024-03-04")]
    pub date: NaiveDate,
    pub shifts: Vec<RosterCellResponse>,
}

impl From<RosterDay> for RosterDayResponse {
    fn from(value: RosterDay) -> Self {
        Self {
            date: value.date,
            shifts: value.shifts.into_iter().map(Into::into).collect(),
        }
    }
}

/// Monday-to-Sunday grid with one cell per shift.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterWeekResponse {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub days: Vec<RosterDayResponse>,
}

impl From<RosterWeek> for RosterWeekResponse {
    fn from(value: RosterWeek) -> Self {
        Self {
            week_start: value.bounds.start,
            week_end: value.bounds.end,
            days: value.days.into_iter().map(Into::into).collect(),
        }
    }
}

/// List roster entries by date, then shift.
#[utoipa::path(
    get,
    path = "/api/v1/duty-roster",
    params(RosterWeekQuery),
    responses(
        (status = 200, description = "Roster entries", body = [DutyRosterResponse]),
        (status = 400, description = "Invalid weekStart", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["duty-roster"],
    operation_id = "listDutyRoster",
    security(("SessionCookie" = []))
)]
#[get("/duty-roster")]
pub async fn list_duty_roster(
    _gate: Authenticated,
    state: web::Data<HttpState>,
    query: web::Query<RosterWeekQuery>,
) -> ApiResult<web::Json<Vec<DutyRosterResponse>>> {
    let week_of = query.into_inner().reference()?;
    let entries = state.duty_roster_query.list(week_of).await?;
    Ok(web::Json(
        entries.into_iter().map(DutyRosterResponse::from).collect(),
    ))
}

/// Week grid; defaults to the current week.
#[utoipa::path(
    get,
    path = "/api/v1/duty-roster/week",
    params(RosterWeekQuery),
    responses(
        (status = 200, description = "Week grid", body = RosterWeekResponse),
        (status = 400, description = "Invalid weekStart", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["duty-roster"],
    operation_id = "getDutyRosterWeek",
    security(("SessionCookie" = []))
)]
#[get("/duty-roster/week")]
pub async fn duty_roster_week(
    _gate: Authenticated,
    state: web::Data<HttpState>,
    query: web::Query<RosterWeekQuery>,
) -> ApiResult<web::Json<RosterWeekResponse>> {
    let reference = query.into_inner().reference()?;
    let week = state.duty_roster_query.week(reference).await?;
    Ok(web::Json(week.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/duty-roster",
    request_body = CreateDutyRosterRequest,
    responses(
        (status = 201, description = "Entry created", body = DutyRosterResponse),
        (status = 400, description = "Validation error", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["duty-roster"],
    operation_id = "createDutyRoster",
    security(("SessionCookie" = []))
)]
#[post("/duty-roster")]
pub async fn create_duty_roster(
    gate: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<CreateDutyRosterRequest>,
) -> ApiResult<HttpResponse> {
    let draft = DutyRosterDraft::try_from(payload.into_inner())?;
    let entry = state.duty_roster.create(gate.actor(), draft).await?;
    Ok(HttpResponse::Created().json(DutyRosterResponse::from(entry)))
}

#[utoipa::path(
    get,
    path = "/api/v1/duty-roster/{id}",
    params(("id" = String, Path, description = "Roster entry identifier")),
    responses(
        (status = 200, description = "Roster entry", body = DutyRosterResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["duty-roster"],
    operation_id = "getDutyRoster",
    security(("SessionCookie" = []))
)]
#[get("/duty-roster/{id}")]
pub async fn get_duty_roster(
    _gate: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DutyRosterResponse>> {
    let id = parse_record_id(&path.into_inner(), "duty roster entry")?;
    let entry = state.duty_roster_query.get(id).await?;
    Ok(web::Json(entry.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/duty-roster/{id}",
    params(("id" = String, Path, description = "Roster entry identifier")),
    request_body = UpdateDutyRosterRequest,
    responses(
        (status = 200, description = "Entry updated", body = DutyRosterResponse),
        (status = 400, description = "Validation error", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["duty-roster"],
    operation_id = "updateDutyRoster",
    security(("SessionCookie" = []))
)]
#[put("/duty-roster/{id}")]
pub async fn update_duty_roster(
    gate: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateDutyRosterRequest>,
) -> ApiResult<web::Json<DutyRosterResponse>> {
    let patch = DutyRosterPatch::try_from(payload.into_inner())?;
    let id = parse_record_id(&path.into_inner(), "duty roster entry")?;
    let entry = state.duty_roster.update(gate.actor(), id, patch).await?;
    Ok(web::Json(entry.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/duty-roster/{id}",
    params(("id" = String, Path, description = "Roster entry identifier")),
    responses(
        (status = 200, description = "Entry deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["duty-roster"],
    operation_id = "deleteDutyRoster",
    security(("SessionCookie" = []))
)]
#[delete("/duty-roster/{id}")]
pub async fn delete_duty_roster(
    gate: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_record_id(&path.into_inner(), "duty roster entry")?;
    state.duty_roster.delete(gate.actor(), id).await?;
    Ok(web::Json(DeletedResponse::ok()))
}

#[cfg(test)]
#[path = "duty_roster_tests.rs"]
mod tests;
