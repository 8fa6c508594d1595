//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP path from the inbound layer, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the session cookie
//! security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::invites::{
    BulkInviteInput, CreateInvitesRequest, InviteInput, InviteStatusRequest, SendInvitesRequest,
};
use crate::inbound::http::rsvp::RsvpRequest;
use crate::inbound::http::schemas::{
    AdminIdentitySchema, AttendanceCountsSchema, AttendanceSchema, BulkInviteOutcomeSchema,
    ErrorCodeSchema, ErrorSchema, FieldCountSchema, InviteCreationResultSchema,
    InviteListingSchema, InviteSchema, InviteSendResultSchema, InviteStatusCountsSchema,
    InviteStatusSchema, LifecycleOutcomeSchema, RsvpListingSchema, RsvpReceiptSchema, RsvpSchema,
    SendInvitesOutcomeSchema, SnapshotStatusSchema, SnapshotSyncOutcomeSchema,
    SummaryCountsSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Admin session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "RSVP backend API",
        description = "Public RSVP intake plus a session-authenticated admin surface for invites, counts and exports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::rsvp::submit_rsvp,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::invites::list_invites,
        crate::inbound::http::invites::create_invites,
        crate::inbound::http::invites::send_invites,
        crate::inbound::http::invites::set_invite_status,
        crate::inbound::http::admin::list_rsvps,
        crate::inbound::http::admin::summary,
        crate::inbound::http::admin::aggregate,
        crate::inbound::http::admin::sync_snapshot,
        crate::inbound::http::admin::snapshot_status,
        crate::inbound::http::export::export,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        AdminIdentitySchema,
        InviteStatusSchema,
        AttendanceSchema,
        InviteSchema,
        RsvpSchema,
        InviteListingSchema,
        RsvpListingSchema,
        RsvpReceiptSchema,
        InviteCreationResultSchema,
        BulkInviteOutcomeSchema,
        InviteSendResultSchema,
        SendInvitesOutcomeSchema,
        LifecycleOutcomeSchema,
        InviteStatusCountsSchema,
        AttendanceCountsSchema,
        SummaryCountsSchema,
        FieldCountSchema,
        SnapshotSyncOutcomeSchema,
        SnapshotStatusSchema,
        LoginRequest,
        RsvpRequest,
        InviteInput,
        BulkInviteInput,
        CreateInvitesRequest,
        SendInvitesRequest,
        InviteStatusRequest,
    )),
    tags(
        (name = "rsvp", description = "Public RSVP form"),
        (name = "auth", description = "Admin session login and logout"),
        (name = "invites", description = "Invite creation, sending and status changes"),
        (name = "admin", description = "Dashboard listings, counts, exports and snapshot sync"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
