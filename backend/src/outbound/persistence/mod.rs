//! PostgreSQL persistence adapters built on Diesel, `diesel-async` and bb8.
//!
//! Row structs and the table schema stay private to this module; only the
//! repositories, the pool and the migration runner are exported.

mod diesel_audit_log_repository;
mod diesel_daily_info_repository;
mod diesel_duty_roster_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod row_mapping;
mod schema;

pub use diesel_audit_log_repository::DieselAuditLogRepository;
pub use diesel_daily_info_repository::DieselDailyInfoRepository;
pub use diesel_duty_roster_repository::DieselDutyRosterRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
