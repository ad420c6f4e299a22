//! PostgreSQL-backed `DailyInfoRepository`.
//!
//! Category and active-window filters run in SQL; the active predicate must
//! agree with [`crate::domain::is_active`]. Rows come back in insertion order
//! and the service applies the listing sort.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{DailyInfoRepository, DailyInfoRepositoryError, NewDailyInfo};
use crate::domain::{DailyInfo, DailyInfoCriteria};

use super::error_mapping::repository_error_mappers;
use super::models::{CreatorRow, DailyInfoRow, DailyInfoUpdate, NewDailyInfoRow};
use super::pool::DbPool;
use super::row_mapping;
use super::schema::{daily_info, users};

repository_error_mappers!(DailyInfoRepositoryError);

#[derive(Clone)]
pub struct DieselDailyInfoRepository {
    pool: DbPool,
}

impl DieselDailyInfoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn decode_all(
    rows: Vec<(DailyInfoRow, CreatorRow)>,
) -> Result<Vec<DailyInfo>, DailyInfoRepositoryError> {
    rows.into_iter()
        .map(|(row, creator)| row_mapping::daily_info(row, creator).map_err(corrupt_row))
        .collect()
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    id: &Uuid,
) -> Result<Option<DailyInfo>, DailyInfoRepositoryError> {
    let row = daily_info::table
        .inner_join(users::table)
        .filter(daily_info::id.eq(id))
        .select((DailyInfoRow::as_select(), CreatorRow::as_select()))
        .first::<(DailyInfoRow, CreatorRow)>(conn)
        .await
        .optional()
        .map_err(diesel_error)?;

    row.map(|(row, creator)| row_mapping::daily_info(row, creator).map_err(corrupt_row))
        .transpose()
}

#[async_trait]
impl DailyInfoRepository for DieselDailyInfoRepository {
    async fn insert(&self, record: &NewDailyInfo) -> Result<DailyInfo, DailyInfoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let draft = &record.draft;
        let row = NewDailyInfoRow {
            id: record.id,
            title: draft.title.as_str(),
            description: draft.description.as_str(),
            category: draft.category.as_str(),
            priority: draft.priority.as_str(),
            valid_from: draft.valid_from,
            valid_until: draft.valid_until,
            created_by_id: *record.created_by.as_uuid(),
            created_at: record.created_at,
            updated_at: record.created_at,
        };

        diesel::insert_into(daily_info::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        load_one(&mut conn, &record.id)
            .await?
            .ok_or_else(|| DailyInfoRepositoryError::query("inserted notice vanished"))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<DailyInfo>, DailyInfoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        load_one(&mut conn, id).await
    }

    async fn list(
        &self,
        criteria: &DailyInfoCriteria,
    ) -> Result<Vec<DailyInfo>, DailyInfoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = daily_info::table
            .inner_join(users::table)
            .select((DailyInfoRow::as_select(), CreatorRow::as_select()))
            .order((daily_info::created_at.asc(), daily_info::id.asc()))
            .into_boxed();
        if let Some(category) = criteria.category {
            query = query.filter(daily_info::category.eq(category.as_str()));
        }
        if let Some(now) = criteria.active_at {
            query = query.filter(daily_info::valid_from.le(now)).filter(
                daily_info::valid_until
                    .is_null()
                    .or(daily_info::valid_until.ge(now)),
            );
        }

        let rows = query
            .load::<(DailyInfoRow, CreatorRow)>(&mut conn)
            .await
            .map_err(diesel_error)?;
        decode_all(rows)
    }

    async fn update(
        &self,
        record: &DailyInfo,
    ) -> Result<Option<DailyInfo>, DailyInfoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = DailyInfoUpdate {
            title: record.title.as_str(),
            description: record.description.as_str(),
            category: record.category.as_str(),
            priority: record.priority.as_str(),
            valid_from: record.valid_from,
            valid_until: record.valid_until,
            updated_at: record.updated_at,
        };

        let updated = diesel::update(daily_info::table.find(record.id))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Ok(None);
        }
        load_one(&mut conn, &record.id).await
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DailyInfoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(daily_info::table.find(*id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}
