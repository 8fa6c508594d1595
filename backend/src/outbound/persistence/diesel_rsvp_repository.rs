//! PostgreSQL-backed [`RsvpRepository`].

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{RsvpRepository, RsvpRepositoryError};
use crate::domain::{Attendance, FieldCount, NewRsvp, Rsvp, RsvpId};

use super::diesel_error_mapping::ErrorConstructors;
use super::models::{NewRsvpRow, RsvpRow};
use super::pool::DbPool;
use super::schema::rsvps;

const ERRORS: ErrorConstructors<RsvpRepositoryError> = ErrorConstructors {
    connection: RsvpRepositoryError::connection,
    query: RsvpRepositoryError::query,
    constraint: RsvpRepositoryError::constraint,
};

/// Diesel implementation of the RSVP port.
#[derive(Clone)]
pub struct DieselRsvpRepository {
    pool: DbPool,
}

impl DieselRsvpRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_rsvp(row: RsvpRow) -> Result<Rsvp, RsvpRepositoryError> {
    let attendance = row.attendance.parse::<Attendance>().map_err(|err| {
        warn!(rsvp_id = row.id, value = %row.attendance, "unrecognised attendance");
        RsvpRepositoryError::query(err.to_string())
    })?;
    Ok(Rsvp {
        id: RsvpId::new(row.id),
        name: row.name,
        email: row.email,
        attendance,
        dietary_requirements: row.dietary_requirements,
        confirmation_id: row.confirmation_id,
        rsvp_date: row.rsvp_date,
        created_at: row.created_at,
    })
}

#[async_trait]
impl RsvpRepository for DieselRsvpRepository {
    async fn insert(&self, rsvp: &NewRsvp) -> Result<Rsvp, RsvpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let row = NewRsvpRow {
            name: &rsvp.name,
            email: &rsvp.email,
            attendance: rsvp.attendance.as_str(),
            dietary_requirements: rsvp.dietary_requirements.as_deref(),
            confirmation_id: rsvp.confirmation_id.as_deref(),
        };
        let stored: RsvpRow = diesel::insert_into(rsvps::table)
            .values(&row)
            .returning(RsvpRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        row_to_rsvp(stored)
    }

    async fn list(&self) -> Result<Vec<Rsvp>, RsvpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let rows: Vec<RsvpRow> = rsvps::table
            .order((rsvps::created_at.desc(), rsvps::id.desc()))
            .select(RsvpRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        rows.into_iter().map(row_to_rsvp).collect()
    }

    async fn count_by_attendance(&self) -> Result<Vec<FieldCount>, RsvpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let groups: Vec<(String, i64)> = rsvps::table
            .group_by(rsvps::attendance)
            .select((rsvps::attendance, count_star()))
            .load(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        Ok(groups
            .into_iter()
            .map(|(value, count)| FieldCount::new(value, u64::try_from(count).unwrap_or(0)))
            .collect())
    }

    async fn attach_confirmation_id(
        &self,
        id: RsvpId,
        confirmation_id: &str,
    ) -> Result<bool, RsvpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let affected = diesel::update(
            rsvps::table
                .filter(rsvps::id.eq(id.get()))
                .filter(rsvps::confirmation_id.is_null()),
        )
        .set(rsvps::confirmation_id.eq(confirmation_id))
        .execute(&mut conn)
        .await
        .map_err(|err| ERRORS.diesel(err))?;
        Ok(affected > 0)
    }
}
