//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, email, snapshot sink) are implemented by
//! outbound adapters. Driving ports (intake, invite commands, admin queries,
//! login) are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_query;
mod email_sender;
mod invite_command;
mod invite_repository;
mod login_service;
mod rsvp_intake;
mod rsvp_repository;
mod snapshot_sink;

#[cfg(test)]
pub use admin_query::MockAdminQuery;
pub use admin_query::{AdminQuery, FixtureAdminQuery, Listing, SnapshotStatus, SnapshotSyncOutcome};
#[cfg(test)]
pub use email_sender::MockEmailSender;
pub use email_sender::{EmailSender, EmailSenderError, NoOpEmailSender, OutgoingEmail, SentEmail};
#[cfg(test)]
pub use invite_command::MockInviteCommand;
pub use invite_command::{
    BulkInviteOutcome, FixtureInviteCommand, InviteCommand, InviteCreationResult,
    InviteSelection, InviteSendResult, SendInvitesOutcome, SetInviteStatusRequest,
};
#[cfg(test)]
pub use invite_repository::MockInviteRepository;
pub use invite_repository::{FixtureInviteRepository, InviteRepository, InviteRepositoryError};
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use rsvp_intake::MockRsvpIntake;
pub use rsvp_intake::{FixtureRsvpIntake, RsvpIntake, RsvpReceipt};
#[cfg(test)]
pub use rsvp_repository::MockRsvpRepository;
pub use rsvp_repository::{FixtureRsvpRepository, RsvpRepository, RsvpRepositoryError};
#[cfg(test)]
pub use snapshot_sink::MockSnapshotSink;
pub use snapshot_sink::{NoOpSnapshotSink, SnapshotSink, SnapshotSinkError, SnapshotTarget};
