//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape and are registered with
//! utoipa under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// Storage or a required collaborator is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "validation failed")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Validation failures carry `fields: [{field, code, message}]`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::AdminIdentity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AdminIdentity)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AdminIdentitySchema {
    #[schema(example = "admin")]
    username: String,
    #[schema(example = "admin")]
    role: String,
}

/// OpenAPI schema for [`crate::domain::InviteStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InviteStatus)]
pub enum InviteStatusSchema {
    #[schema(rename = "pending")]
    Pending,
    #[schema(rename = "sent")]
    Sent,
    /// Terminal: a guest has submitted an RSVP.
    #[schema(rename = "responded")]
    Responded,
    #[schema(rename = "declined")]
    Declined,
}

/// OpenAPI schema for [`crate::domain::Attendance`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Attendance)]
pub enum AttendanceSchema {
    #[schema(rename = "yes")]
    Yes,
    #[schema(rename = "no")]
    No,
}

/// OpenAPI schema for [`crate::domain::Invite`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Invite, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InviteSchema {
    #[schema(example = 7)]
    id: i64,
    #[schema(example = "Alex Lee")]
    name: String,
    #[schema(example = "alex@example.com")]
    email: String,
    status: InviteStatusSchema,
    #[schema(example = "https://party.example.com/rsvp?email=alex%40example.com")]
    invite_url: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    sent_at: Option<String>,
    rsvp_id: Option<i64>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Rsvp`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Rsvp, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RsvpSchema {
    #[schema(example = 3)]
    id: i64,
    #[schema(example = "Alex Lee")]
    name: String,
    #[schema(example = "alex@example.com")]
    email: String,
    attendance: AttendanceSchema,
    #[schema(example = "vegetarian")]
    dietary_requirements: Option<String>,
    confirmation_id: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    rsvp_date: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Invite listing with its row count.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::InviteListing)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InviteListingSchema {
    items: Vec<InviteSchema>,
    count: u64,
}

/// RSVP listing with its row count.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::RsvpListing)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RsvpListingSchema {
    items: Vec<RsvpSchema>,
    count: u64,
}

/// OpenAPI schema for [`crate::domain::ports::RsvpReceipt`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::RsvpReceipt, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RsvpReceiptSchema {
    #[schema(example = 3)]
    rsvp_id: i64,
    /// Present when the confirmation email was accepted by the provider.
    confirmation_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::InviteCreationResult`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::InviteCreationResult, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InviteCreationResultSchema {
    email: String,
    success: bool,
    message: String,
    invite_id: Option<i64>,
    invite_url: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::BulkInviteOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BulkInviteOutcome, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BulkInviteOutcomeSchema {
    results: Vec<InviteCreationResultSchema>,
    success_count: u64,
    fail_count: u64,
}

/// OpenAPI schema for [`crate::domain::ports::InviteSendResult`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::InviteSendResult, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InviteSendResultSchema {
    invite_id: i64,
    email: String,
    success: bool,
    message_id: Option<String>,
    error: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::SendInvitesOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::SendInvitesOutcome, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SendInvitesOutcomeSchema {
    results: Vec<InviteSendResultSchema>,
    success_count: u64,
    fail_count: u64,
}

/// OpenAPI schema for [`crate::domain::LifecycleOutcome`].
///
/// `outcome` is `applied`, `noMatchingInvite` or `alreadyResponded`.
#[derive(ToSchema)]
#[schema(as = crate::domain::LifecycleOutcome, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LifecycleOutcomeSchema {
    #[schema(example = "applied")]
    outcome: String,
    invite_id: Option<i64>,
    status: Option<InviteStatusSchema>,
}

/// OpenAPI schema for [`crate::domain::InviteStatusCounts`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InviteStatusCounts)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InviteStatusCountsSchema {
    pending: u64,
    sent: u64,
    responded: u64,
    declined: u64,
    total: u64,
}

/// OpenAPI schema for [`crate::domain::AttendanceCounts`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AttendanceCounts)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AttendanceCountsSchema {
    yes: u64,
    no: u64,
    total: u64,
}

/// OpenAPI schema for [`crate::domain::SummaryCounts`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SummaryCounts)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SummaryCountsSchema {
    invites: InviteStatusCountsSchema,
    rsvps: AttendanceCountsSchema,
}

/// OpenAPI schema for [`crate::domain::FieldCount`].
#[derive(ToSchema)]
#[schema(as = crate::domain::FieldCount)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldCountSchema {
    #[schema(example = "yes")]
    value: String,
    #[schema(example = 12)]
    count: u64,
}

/// OpenAPI schema for [`crate::domain::ports::SnapshotSyncOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::SnapshotSyncOutcome)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SnapshotSyncOutcomeSchema {
    synced: u64,
    location: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::SnapshotStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::SnapshotStatus)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SnapshotStatusSchema {
    configured: bool,
    location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_conflict() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert!(schema_json.contains("conflict"));
        assert!(schema_json.contains("service_unavailable"));
    }

    #[test]
    fn error_schema_uses_camel_case() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
    }

    #[test]
    fn rsvp_schema_names_dietary_field() {
        let schema_json = schema_to_json::<RsvpSchema>();
        assert_eq!(RsvpSchema::name(), "crate.domain.Rsvp");
        assert!(schema_json.contains("dietaryRequirements"));
    }
}
