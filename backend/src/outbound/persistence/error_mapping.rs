//! Pool and Diesel error mapping shared by every repository.
//!
//! Each repository error type is generated by `define_port_error!` with
//! `connection` and `query` constructors; these helpers take those
//! constructors so the classification lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto a repository's connection variant.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure onto a repository's query or connection variant.
///
/// Driver messages are logged at debug level and replaced with fixed text so
/// SQL details never reach the domain.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced user does not exist")
        }
        _ => query("database error"),
    }
}

/// Bind the mappers to one repository error type.
///
/// ```ignore
/// repository_error_mappers!(DailyInfoRepositoryError);
/// let mut conn = self.pool.get().await.map_err(pool_error)?;
/// ```
macro_rules! repository_error_mappers {
    ($error:ty) => {
        fn pool_error(error: $crate::outbound::persistence::pool::PoolError) -> $error {
            $crate::outbound::persistence::error_mapping::map_pool_error(error, <$error>::connection)
        }

        fn diesel_error(error: ::diesel::result::Error) -> $error {
            $crate::outbound::persistence::error_mapping::map_diesel_error(
                error,
                <$error>::query,
                <$error>::connection,
            )
        }

        fn corrupt_row(error: $crate::outbound::persistence::row_mapping::CorruptRow) -> $error {
            <$error>::query(error.to_string())
        }
    };
}

pub(crate) use repository_error_mappers;
