//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be tested with fixtures or mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminQuery, FixtureAdminQuery, FixtureInviteCommand, FixtureLoginService, FixtureRsvpIntake,
    InviteCommand, LoginService, RsvpIntake,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub rsvps: Arc<dyn RsvpIntake>,
    pub invites: Arc<dyn InviteCommand>,
    pub admin: Arc<dyn AdminQuery>,
}

impl HttpState {
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureAdminQuery, FixtureInviteCommand, FixtureLoginService, FixtureRsvpIntake,
    /// };
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureRsvpIntake),
    ///     Arc::new(FixtureInviteCommand),
    ///     Arc::new(FixtureAdminQuery),
    /// );
    /// let _admin = state.admin.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        rsvps: Arc<dyn RsvpIntake>,
        invites: Arc<dyn InviteCommand>,
        admin: Arc<dyn AdminQuery>,
    ) -> Self {
        Self {
            login,
            rsvps,
            invites,
            admin,
        }
    }

    /// Replace the login port.
    pub fn with_login(mut self, login: Arc<dyn LoginService>) -> Self {
        self.login = login;
        self
    }

    /// Replace the RSVP intake port.
    pub fn with_rsvps(mut self, rsvps: Arc<dyn RsvpIntake>) -> Self {
        self.rsvps = rsvps;
        self
    }

    /// Replace the invite command port.
    pub fn with_invites(mut self, invites: Arc<dyn InviteCommand>) -> Self {
        self.invites = invites;
        self
    }

    /// Replace the admin query port.
    pub fn with_admin(mut self, admin: Arc<dyn AdminQuery>) -> Self {
        self.admin = admin;
        self
    }
}

/// Fixture-backed state; tests override the port under test.
impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureRsvpIntake),
            Arc::new(FixtureInviteCommand),
            Arc::new(FixtureAdminQuery),
        )
    }
}
