//! Shared Diesel error mapping for the invite and RSVP repositories.
//!
//! Both repository error types expose `connection`, `query` and `constraint`
//! constructors; callers pass those in so one mapping serves both ports.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constructors for one repository error type.
pub(crate) struct ErrorConstructors<E> {
    pub connection: fn(String) -> E,
    pub query: fn(String) -> E,
    pub constraint: fn(String) -> E,
}

impl<E> ErrorConstructors<E> {
    pub(crate) fn pool(&self, error: PoolError) -> E {
        (self.connection)(error.into_message())
    }

    pub(crate) fn diesel(&self, error: DieselError) -> E {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::NotFound => (self.query)("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => (self.query)("database query error".to_owned()),
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                (self.connection)("database connection error".to_owned())
            }
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => (self.constraint)(
                info.constraint_name()
                    .map_or_else(|| info.message().to_owned(), str::to_owned),
            ),
            _ => (self.query)("database error".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::InviteRepositoryError;
    use rstest::rstest;

    fn constructors() -> ErrorConstructors<InviteRepositoryError> {
        ErrorConstructors {
            connection: InviteRepositoryError::connection,
            query: InviteRepositoryError::query,
            constraint: InviteRepositoryError::constraint,
        }
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let mapped = constructors().pool(PoolError::checkout("timed out"));
        assert_eq!(mapped, InviteRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        let mapped = constructors().diesel(DieselError::NotFound);
        assert_eq!(mapped, InviteRepositoryError::query("record not found"));
    }

    #[rstest]
    fn rolled_back_transactions_are_query_errors() {
        let mapped = constructors().diesel(DieselError::RollbackTransaction);
        assert_eq!(mapped, InviteRepositoryError::query("database error"));
    }
}
