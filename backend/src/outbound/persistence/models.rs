//! Diesel row structs. Internal to the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{invites, rsvps};

/// Row read from `rsvps`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rsvps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RsvpRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub attendance: String,
    pub dietary_requirements: Option<String>,
    pub confirmation_id: Option<String>,
    pub rsvp_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rsvps)]
pub(crate) struct NewRsvpRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub attendance: &'a str,
    pub dietary_requirements: Option<&'a str>,
    pub confirmation_id: Option<&'a str>,
}

/// Row read from `invites`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InviteRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub status: String,
    pub invite_url: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub rsvp_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invites)]
pub(crate) struct NewInviteRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub status: &'a str,
    pub invite_url: Option<&'a str>,
}

/// Status transition changeset. `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invites)]
pub(crate) struct InviteStatusUpdate<'a> {
    pub status: &'a str,
    pub rsvp_id: Option<i64>,
    pub sent_at: Option<DateTime<Utc>>,
}
