//! Row to domain conversion shared by the Diesel repositories.

use std::str::FromStr;

use crate::domain::{
    DailyInfo, DutyRosterEntry, Email, NonEmptyText, User, UserId, UserSummary,
};

use super::models::{CreatorRow, DailyInfoRow, DutyRosterRow, UserRow};

/// A stored value the domain cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("column {column} holds unsupported value '{value}'")]
pub(crate) struct CorruptRow {
    column: &'static str,
    value: String,
}

fn decode<T, E>(column: &'static str, raw: &str, parse: impl FnOnce(&str) -> Result<T, E>) -> Result<T, CorruptRow> {
    parse(raw).map_err(|_| CorruptRow {
        column,
        value: raw.to_owned(),
    })
}

fn parsed<T: FromStr>(column: &'static str, raw: &str) -> Result<T, CorruptRow> {
    decode(column, raw, str::parse::<T>)
}

fn text(column: &'static str, raw: String) -> Result<NonEmptyText, CorruptRow> {
    NonEmptyText::new(raw).map_err(|_| CorruptRow {
        column,
        value: String::new(),
    })
}

fn email(raw: String) -> Result<Email, CorruptRow> {
    decode("email", &raw, |value| Email::new(value))
}

pub(crate) fn creator(row: CreatorRow) -> Result<UserSummary, CorruptRow> {
    Ok(UserSummary {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: email(row.email)?,
    })
}

pub(crate) fn user(row: UserRow) -> Result<User, CorruptRow> {
    Ok(User {
        id: UserId::from_uuid(row.id),
        role: parsed("role", &row.role)?,
        email: email(row.email)?,
        name: row.name,
        image: row.image,
    })
}

pub(crate) fn daily_info(row: DailyInfoRow, created_by: CreatorRow) -> Result<DailyInfo, CorruptRow> {
    Ok(DailyInfo {
        id: row.id,
        category: parsed("category", &row.category)?,
        priority: parsed("priority", &row.priority)?,
        title: text("title", row.title)?,
        description: text("description", row.description)?,
        valid_from: row.valid_from,
        valid_until: row.valid_until,
        created_by: creator(created_by)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub(crate) fn duty_roster_entry(
    row: DutyRosterRow,
    created_by: CreatorRow,
) -> Result<DutyRosterEntry, CorruptRow> {
    Ok(DutyRosterEntry {
        id: row.id,
        date: row.date,
        shift: parsed("shift", &row.shift)?,
        operator_name: text("operator_name", row.operator_name)?,
        notes: row.notes,
        created_by: creator(created_by)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
