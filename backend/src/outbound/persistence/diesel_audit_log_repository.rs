//! PostgreSQL-backed append-only audit log.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::AuditEntry;
use crate::domain::ports::{AuditLogRepository, AuditLogRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewAuditLogRow;
use super::pool::DbPool;
use super::schema::audit_logs;

#[derive(Clone)]
pub struct DieselAuditLogRepository {
    pool: DbPool,
}

impl DieselAuditLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for DieselAuditLogRepository {
    async fn append(&self, entry: &AuditEntry) -> Result<(), AuditLogRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AuditLogRepositoryError::connection))?;

        let row = NewAuditLogRow {
            id: entry.id,
            user_id: *entry.user_id.as_uuid(),
            action: entry.action.as_str(),
            entity_type: entry.entity_type.as_str(),
            entity_id: &entry.entity_id,
            changes: entry.changes.as_ref(),
            created_at: entry.created_at,
        };

        diesel::insert_into(audit_logs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                map_diesel_error(
                    err,
                    AuditLogRepositoryError::query,
                    AuditLogRepositoryError::connection,
                )
            })
    }
}
