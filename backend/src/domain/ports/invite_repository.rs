//! Port for invite persistence.

use async_trait::async_trait;

use crate::domain::{FieldCount, Invite, InviteId, NewInvite, StatusChange};

use super::define_port_error;

define_port_error! {
    /// Errors raised by invite repository adapters.
    pub enum InviteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "invite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "invite repository query failed: {message}",
        /// A storage constraint rejected the row.
        Constraint { message: String } =>
            "invite repository constraint violated: {message}",
    }
}

/// Storage operations on the `invites` table.
///
/// Listings are newest first (`created_at DESC, id DESC`). Emails passed in
/// are already normalized.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Insert a `pending` invite and return the stored row.
    async fn insert(&self, invite: &NewInvite) -> Result<Invite, InviteRepositoryError>;

    /// All invites, newest first.
    async fn list(&self) -> Result<Vec<Invite>, InviteRepositoryError>;

    /// Invites whose id is in `ids`, newest first. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[InviteId]) -> Result<Vec<Invite>, InviteRepositoryError>;

    /// The most recently created invite for `email`, if any.
    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Invite>, InviteRepositoryError>;

    /// Apply `change` to one row unless it is already `responded`; a
    /// response relink still applies while the stored `rsvp_id` is older.
    ///
    /// Returns whether a row changed.
    async fn update_status(
        &self,
        id: InviteId,
        change: &StatusChange,
    ) -> Result<bool, InviteRepositoryError>;

    /// Row counts grouped by status.
    async fn count_by_status(&self) -> Result<Vec<FieldCount>, InviteRepositoryError>;
}

/// Fixture implementation for tests that do not exercise invite storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInviteRepository;

#[async_trait]
impl InviteRepository for FixtureInviteRepository {
    async fn insert(&self, _invite: &NewInvite) -> Result<Invite, InviteRepositoryError> {
        Err(InviteRepositoryError::connection(
            "fixture invite repository does not store rows",
        ))
    }

    async fn list(&self) -> Result<Vec<Invite>, InviteRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_ids(&self, _ids: &[InviteId]) -> Result<Vec<Invite>, InviteRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_latest_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<Invite>, InviteRepositoryError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _id: InviteId,
        _change: &StatusChange,
    ) -> Result<bool, InviteRepositoryError> {
        Ok(false)
    }

    async fn count_by_status(&self) -> Result<Vec<FieldCount>, InviteRepositoryError> {
        Ok(Vec::new())
    }
}
