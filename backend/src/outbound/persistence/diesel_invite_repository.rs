//! PostgreSQL-backed [`InviteRepository`].
//!
//! The terminal guard lives in the `UPDATE` filter, so two concurrent
//! transitions cannot move a `responded` row.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{InviteRepository, InviteRepositoryError};
use crate::domain::{
    FieldCount, Invite, InviteId, InviteStatus, NewInvite, RsvpId, StatusChange,
};

use super::diesel_error_mapping::ErrorConstructors;
use super::models::{InviteRow, InviteStatusUpdate, NewInviteRow};
use super::pool::DbPool;
use super::schema::invites;

const ERRORS: ErrorConstructors<InviteRepositoryError> = ErrorConstructors {
    connection: InviteRepositoryError::connection,
    query: InviteRepositoryError::query,
    constraint: InviteRepositoryError::constraint,
};

/// Diesel implementation of the invite port.
#[derive(Clone)]
pub struct DieselInviteRepository {
    pool: DbPool,
}

impl DieselInviteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_invite(row: InviteRow) -> Result<Invite, InviteRepositoryError> {
    let status = row.status.parse::<InviteStatus>().map_err(|err| {
        warn!(invite_id = row.id, value = %row.status, "unrecognised invite status");
        InviteRepositoryError::query(err.to_string())
    })?;
    Ok(Invite {
        id: InviteId::new(row.id),
        name: row.name,
        email: row.email,
        status,
        invite_url: row.invite_url,
        sent_at: row.sent_at,
        rsvp_id: row.rsvp_id.map(RsvpId::new),
        created_at: row.created_at,
    })
}

fn rows_to_invites(rows: Vec<InviteRow>) -> Result<Vec<Invite>, InviteRepositoryError> {
    rows.into_iter().map(row_to_invite).collect()
}

#[async_trait]
impl InviteRepository for DieselInviteRepository {
    async fn insert(&self, invite: &NewInvite) -> Result<Invite, InviteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let row = NewInviteRow {
            name: &invite.name,
            email: invite.email.as_str(),
            status: InviteStatus::Pending.as_str(),
            invite_url: invite.invite_url.as_deref(),
        };
        let stored: InviteRow = diesel::insert_into(invites::table)
            .values(&row)
            .returning(InviteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        row_to_invite(stored)
    }

    async fn list(&self) -> Result<Vec<Invite>, InviteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let rows: Vec<InviteRow> = invites::table
            .order((invites::created_at.desc(), invites::id.desc()))
            .select(InviteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        rows_to_invites(rows)
    }

    async fn find_by_ids(&self, ids: &[InviteId]) -> Result<Vec<Invite>, InviteRepositoryError> {
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let rows: Vec<InviteRow> = invites::table
            .filter(invites::id.eq_any(raw))
            .order((invites::created_at.desc(), invites::id.desc()))
            .select(InviteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        rows_to_invites(rows)
    }

    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Invite>, InviteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let row: Option<InviteRow> = invites::table
            .filter(invites::email.eq(email))
            .order((invites::created_at.desc(), invites::id.desc()))
            .select(InviteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?;
        row.map(row_to_invite).transpose()
    }

    async fn update_status(
        &self,
        id: InviteId,
        change: &StatusChange,
    ) -> Result<bool, InviteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let update = InviteStatusUpdate {
            status: change.status.as_str(),
            rsvp_id: change.rsvp_id.map(RsvpId::get),
            sent_at: change.sent_at,
        };
        let row = invites::table.filter(invites::id.eq(id.get()));
        let affected = match change.rsvp_id {
            // Relinks only move forward so concurrent RSVPs settle on the newest.
            Some(rsvp_id) if change.is_response_relink() => {
                diesel::update(row.filter(
                    invites::status
                        .ne(InviteStatus::Responded.as_str())
                        .or(invites::rsvp_id.is_null())
                        .or(invites::rsvp_id.lt(rsvp_id.get())),
                ))
                .set(&update)
                .execute(&mut conn)
                .await
            }
            _ => {
                diesel::update(row.filter(invites::status.ne(InviteStatus::Responded.as_str())))
                    .set(&update)
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(|err| ERRORS.diesel(err))?;
        Ok(affected > 0)
    }

    async fn count_by_status(&self) -> Result<Vec<FieldCount>, InviteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let groups: Vec<(String, i64)> = invites::table
            .group_by(invites::status)
            .select((invites::status, count_star()))
            .load(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        Ok(groups
            .into_iter()
            .map(|(status, count)| FieldCount::new(status, u64::try_from(count).unwrap_or(0)))
            .collect())
    }
}
