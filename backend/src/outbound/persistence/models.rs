//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversion into domain
//! types happens in [`super::row_mapping`], which rejects rows whose enum
//! columns hold unknown values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{audit_logs, daily_info, duty_roster, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub role: String,
}

/// Creator columns joined onto entity reads.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CreatorRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub image: Option<&'a str>,
    pub role: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = daily_info)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DailyInfoRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_info)]
pub(crate) struct NewDailyInfoRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full overwrite of the mutable columns; `None` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = daily_info, treat_none_as_null = true)]
pub(crate) struct DailyInfoUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = duty_roster)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DutyRosterRow {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub operator_name: String,
    pub shift: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = duty_roster)]
pub(crate) struct NewDutyRosterRow<'a> {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub operator_name: &'a str,
    pub shift: &'a str,
    pub notes: Option<&'a str>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = duty_roster, treat_none_as_null = true)]
pub(crate) struct DutyRosterUpdate<'a> {
    pub date: DateTime<Utc>,
    pub operator_name: &'a str,
    pub shift: &'a str,
    pub notes: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_logs)]
pub(crate) struct NewAuditLogRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: &'a str,
    pub entity_type: &'a str,
    pub entity_id: &'a str,
    pub changes: Option<&'a serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
