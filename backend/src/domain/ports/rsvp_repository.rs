//! Port for RSVP persistence.

use async_trait::async_trait;

use crate::domain::{FieldCount, NewRsvp, Rsvp, RsvpId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by RSVP repository adapters.
    pub enum RsvpRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "rsvp repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "rsvp repository query failed: {message}",
        /// A storage constraint rejected the row.
        Constraint { message: String } =>
            "rsvp repository constraint violated: {message}",
    }
}

/// Storage operations on the `rsvps` table. Rows are append-only apart from
/// the write-once confirmation id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RsvpRepository: Send + Sync {
    /// Insert a new RSVP and return the stored row.
    async fn insert(&self, rsvp: &NewRsvp) -> Result<Rsvp, RsvpRepositoryError>;

    /// All RSVPs, newest first.
    async fn list(&self) -> Result<Vec<Rsvp>, RsvpRepositoryError>;

    /// Row counts grouped by attendance.
    async fn count_by_attendance(&self) -> Result<Vec<FieldCount>, RsvpRepositoryError>;

    /// Set `confirmation_id` when it is still empty. Returns whether the row
    /// changed.
    async fn attach_confirmation_id(
        &self,
        id: RsvpId,
        confirmation_id: &str,
    ) -> Result<bool, RsvpRepositoryError>;
}

/// Fixture implementation for tests that do not exercise RSVP storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRsvpRepository;

#[async_trait]
impl RsvpRepository for FixtureRsvpRepository {
    async fn insert(&self, _rsvp: &NewRsvp) -> Result<Rsvp, RsvpRepositoryError> {
        Err(RsvpRepositoryError::connection(
            "fixture rsvp repository does not store rows",
        ))
    }

    async fn list(&self) -> Result<Vec<Rsvp>, RsvpRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_by_attendance(&self) -> Result<Vec<FieldCount>, RsvpRepositoryError> {
        Ok(Vec::new())
    }

    async fn attach_confirmation_id(
        &self,
        _id: RsvpId,
        _confirmation_id: &str,
    ) -> Result<bool, RsvpRepositoryError> {
        Ok(false)
    }
}
