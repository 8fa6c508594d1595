//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed RSVP and invite entities, the invite
//! lifecycle rules, and the services that implement the driving ports. Types
//! here stay free of HTTP and persistence concerns; serialisation contracts
//! (serde) are documented on each type.
//!
//! Public surface:
//! - Error, ErrorCode: API error payload and stable identifiers.
//! - Invite, Rsvp and their identifiers, statuses and inputs.
//! - InviteLifecycleManager: the single writer of invite status.
//! - RsvpIntakeService, InviteCommandService, AdminQueryService,
//!   ConfiguredLoginService: implementations of the driving ports.

pub mod admin_login_service;
pub mod admin_query_service;
pub mod auth;
pub mod email_address;
pub mod error;
pub mod export;
pub mod invite;
pub mod invite_lifecycle;
pub mod invite_request;
pub mod invite_service;
pub mod notifications;
pub mod ports;
pub mod rsvp;
pub mod rsvp_intake_service;
pub mod sanitize;
pub mod summary;
pub mod trace_id;
pub mod validation;

pub use self::admin_login_service::{AdminCredentials, AdminSecret, ConfiguredLoginService};
pub use self::admin_query_service::AdminQueryService;
pub use self::auth::{AdminIdentity, AdminRole, LoginCredentials, LoginValidationError};
pub use self::email_address::{EmailAddress, EmailValidationError, normalize_email};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::export::{
    ExportFile, ExportFormat, ExportKind, ExportTable, UnknownExportFormat, UnknownExportKind,
    escape_csv_field, export_file_name,
};
pub use self::invite::{
    Invite, InviteId, InviteStatus, NewInvite, StatusChange, UnknownInviteStatus,
};
pub use self::invite_lifecycle::{
    InviteLifecycleManager, LifecycleOutcome, TransitionDecision, decide_transition,
};
pub use self::invite_request::{InviteLinkBuilder, InviteRequest, ValidInviteRequest};
pub use self::invite_service::InviteCommandService;
pub use self::notifications::EventDetails;
pub use self::rsvp::{
    Attendance, NewRsvp, Rsvp, RsvpId, RsvpSubmission, UnknownAttendance, ValidRsvp,
};
pub use self::rsvp_intake_service::RsvpIntakeService;
pub use self::sanitize::sanitize_text;
pub use self::summary::{
    AggregateField, AttendanceCounts, FieldCount, InviteStatusCounts, SummaryCounts,
    UnknownAggregateField,
};
pub use self::trace_id::TraceId;
pub use self::validation::{FieldViolation, ValidationReport};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
