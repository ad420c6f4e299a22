//! PostgreSQL-backed `UserRepository`.
//!
//! Sign-in upserts by email in a single statement. `COALESCE` keeps the
//! stored name and image when the identity provider omits them, and the role
//! column is never part of the update.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserProfileUpsert, UserRepository, UserRepositoryError};
use crate::domain::{Role, User, UserId};

use super::error_mapping::repository_error_mappers;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::row_mapping;
use super::schema::users;

repository_error_mappers!(UserRepositoryError);

diesel::define_sql_function! {
    #[sql_name = "COALESCE"]
    fn coalesce(
        preferred: Nullable<Text>,
        fallback: Nullable<Text>,
    ) -> Nullable<Text>;
}

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert_by_email(
        &self,
        profile: &UserProfileUpsert,
    ) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *profile.new_id.as_uuid(),
            email: profile.email.as_str(),
            name: profile.name.as_deref(),
            image: profile.image.as_deref(),
            role: Role::Operator.as_str(),
        };

        let stored = diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::email)
            .do_update()
            .set((
                users::name.eq(coalesce(excluded(users::name), users::name)),
                users::image.eq(coalesce(excluded(users::image), users::image)),
                users::updated_at.eq(now),
            ))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_mapping::user(stored).map_err(corrupt_row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|row| row_mapping::user(row).map_err(corrupt_row))
            .transpose()
    }
}
