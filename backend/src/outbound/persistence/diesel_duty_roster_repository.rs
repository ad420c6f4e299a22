//! PostgreSQL-backed `DutyRosterRepository`.
//!
//! Week scoping is an inclusive `date` range; shift ordering is applied by
//! the service because the storage strings do not sort in shift order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{DutyRosterRepository, DutyRosterRepositoryError, NewDutyRosterEntry};
use crate::domain::{DutyRosterCriteria, DutyRosterEntry};

use super::error_mapping::repository_error_mappers;
use super::models::{CreatorRow, DutyRosterRow, DutyRosterUpdate, NewDutyRosterRow};
use super::pool::DbPool;
use super::row_mapping;
use super::schema::{duty_roster, users};

repository_error_mappers!(DutyRosterRepositoryError);

#[derive(Clone)]
pub struct DieselDutyRosterRepository {
    pool: DbPool,
}

impl DieselDutyRosterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    id: &Uuid,
) -> Result<Option<DutyRosterEntry>, DutyRosterRepositoryError> {
    let row = duty_roster::table
        .inner_join(users::table)
        .filter(duty_roster::id.eq(id))
        .select((DutyRosterRow::as_select(), CreatorRow::as_select()))
        .first::<(DutyRosterRow, CreatorRow)>(conn)
        .await
        .optional()
        .map_err(diesel_error)?;

    row.map(|(row, creator)| row_mapping::duty_roster_entry(row, creator).map_err(corrupt_row))
        .transpose()
}

#[async_trait]
impl DutyRosterRepository for DieselDutyRosterRepository {
    async fn insert(
        &self,
        record: &NewDutyRosterEntry,
    ) -> Result<DutyRosterEntry, DutyRosterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let draft = &record.draft;
        let row = NewDutyRosterRow {
            id: record.id,
            date: draft.date,
            operator_name: draft.operator_name.as_str(),
            shift: draft.shift.as_str(),
            notes: draft.notes.as_deref(),
            created_by_id: *record.created_by.as_uuid(),
            created_at: record.created_at,
            updated_at: record.created_at,
        };

        diesel::insert_into(duty_roster::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        load_one(&mut conn, &record.id)
            .await?
            .ok_or_else(|| DutyRosterRepositoryError::query("inserted roster entry vanished"))
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<DutyRosterEntry>, DutyRosterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        load_one(&mut conn, id).await
    }

    async fn list(
        &self,
        criteria: &DutyRosterCriteria,
    ) -> Result<Vec<DutyRosterEntry>, DutyRosterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = duty_roster::table
            .inner_join(users::table)
            .select((DutyRosterRow::as_select(), CreatorRow::as_select()))
            .order((duty_roster::created_at.asc(), duty_roster::id.asc()))
            .into_boxed();
        if let Some(week) = criteria.week {
            query = query.filter(duty_roster::date.between(week.start, week.end));
        }

        query
            .load::<(DutyRosterRow, CreatorRow)>(&mut conn)
            .await
            .map_err(diesel_error)?
            .into_iter()
            .map(|(row, creator)| row_mapping::duty_roster_entry(row, creator).map_err(corrupt_row))
            .collect()
    }

    async fn update(
        &self,
        record: &DutyRosterEntry,
    ) -> Result<Option<DutyRosterEntry>, DutyRosterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = DutyRosterUpdate {
            date: record.date,
            operator_name: record.operator_name.as_str(),
            shift: record.shift.as_str(),
            notes: record.notes.as_deref(),
            updated_at: record.updated_at,
        };

        let updated = diesel::update(duty_roster::table.find(record.id))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Ok(None);
        }
        load_one(&mut conn, &record.id).await
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DutyRosterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(duty_roster::table.find(*id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}
