//! Admin invite management endpoints.
//!
//! ```text
//! GET  /api/v1/admin/invites
//! POST /api/v1/admin/invites         {"name":"Alex Lee","email":"alex@example.com"}
//! POST /api/v1/admin/invites         {"invites":[{"name":..,"email":..}]}
//! POST /api/v1/admin/invites/send    {"inviteIds":[1,2]} or {}
//! PUT  /api/v1/admin/invites/status  {"email":"alex@example.com","status":"declined"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{InviteSelection, SetInviteStatusRequest};
use crate::domain::{Error, InviteId, InviteRequest, InviteStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    BulkInviteOutcomeSchema, ErrorSchema, InviteListingSchema, InviteSchema,
    LifecycleOutcomeSchema, SendInvitesOutcomeSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One guest to invite.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteInput {
    #[schema(example = "Alex Lee")]
    pub name: String,
    #[schema(example = "alex@example.com")]
    pub email: String,
}

impl From<InviteInput> for InviteRequest {
    fn from(value: InviteInput) -> Self {
        Self {
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BulkInviteInput {
    pub invites: Vec<InviteInput>,
}

/// Body of `POST /api/v1/admin/invites`: one invite or a batch.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum CreateInvitesRequest {
    Bulk(BulkInviteInput),
    Single(InviteInput),
}

/// Body of `POST /api/v1/admin/invites/send`. Without ids every pending
/// invite is sent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendInvitesRequest {
    #[serde(default)]
    pub invite_ids: Option<Vec<i64>>,
}

impl From<SendInvitesRequest> for InviteSelection {
    fn from(value: SendInvitesRequest) -> Self {
        match value.invite_ids {
            Some(ids) => Self::Ids(ids.into_iter().map(InviteId::new).collect()),
            None => Self::AllPending,
        }
    }
}

/// Body of `PUT /api/v1/admin/invites/status`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteStatusRequest {
    #[schema(example = "alex@example.com")]
    pub email: String,
    /// `sent`, `responded` or `declined`.
    #[schema(example = "declined")]
    pub status: String,
}

impl TryFrom<InviteStatusRequest> for SetInviteStatusRequest {
    type Error = Error;

    fn try_from(value: InviteStatusRequest) -> Result<Self, Self::Error> {
        let status = value.status.parse::<InviteStatus>().map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "status", "code": "invalid_choice" }))
        })?;
        Ok(Self {
            email: value.email,
            status,
        })
    }
}

/// List every invite, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/invites",
    responses(
        (status = 200, description = "Invites", body = InviteListingSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["invites"],
    operation_id = "listInvites"
)]
#[get("/admin/invites")]
pub async fn list_invites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let listing = state.admin.list_invites().await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Create one invite (`201`, `409` on duplicates) or a batch (`200` with
/// per-row results).
#[utoipa::path(
    post,
    path = "/api/v1/admin/invites",
    request_body = CreateInvitesRequest,
    responses(
        (status = 201, description = "Invite created", body = InviteSchema),
        (status = 200, description = "Batch processed", body = BulkInviteOutcomeSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Invite already exists", body = ErrorSchema)
    ),
    tags = ["invites"],
    operation_id = "createInvites"
)]
#[post("/admin/invites")]
pub async fn create_invites(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateInvitesRequest>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    match payload.into_inner() {
        CreateInvitesRequest::Single(input) => {
            let invite = state.invites.create_invite(input.into()).await?;
            Ok(HttpResponse::Created().json(invite))
        }
        CreateInvitesRequest::Bulk(batch) => {
            let requests = batch.invites.into_iter().map(InviteRequest::from).collect();
            let outcome = state.invites.create_invites(requests).await?;
            Ok(HttpResponse::Ok().json(outcome))
        }
    }
}

/// Email the selected invites and mark them sent.
#[utoipa::path(
    post,
    path = "/api/v1/admin/invites/send",
    request_body = SendInvitesRequest,
    responses(
        (status = 200, description = "Per-invite results", body = SendInvitesOutcomeSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No invites selected", body = ErrorSchema)
    ),
    tags = ["invites"],
    operation_id = "sendInvites"
)]
#[post("/admin/invites/send")]
pub async fn send_invites(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<SendInvitesRequest>>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let outcome = state.invites.send_invites(request.into()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Move the latest invite for an email to a new status.
///
/// `responded` invites never change; the outcome reports `alreadyResponded`.
#[utoipa::path(
    put,
    path = "/api/v1/admin/invites/status",
    request_body = InviteStatusRequest,
    responses(
        (status = 200, description = "Lifecycle outcome", body = LifecycleOutcomeSchema),
        (status = 400, description = "Unknown or disallowed status", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["invites"],
    operation_id = "setInviteStatus"
)]
#[put("/admin/invites/status")]
pub async fn set_invite_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<InviteStatusRequest>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let request = SetInviteStatusRequest::try_from(payload.into_inner())?;
    let outcome = state.invites.set_invite_status(request).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Register the invite routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_invites)
        .service(create_invites)
        .service(send_invites)
        .service(set_invite_status);
}

#[cfg(test)]
#[path = "invites_tests.rs"]
mod tests;
