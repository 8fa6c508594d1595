//! Public RSVP form endpoint.
//!
//! ```text
//! POST /api/v1/rsvp {"name":"Alex Lee","email":"alex@example.com","attendance":"yes"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::RsvpSubmission;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RsvpReceiptSchema};
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/rsvp`.
///
/// Fields arrive as raw strings; validation and sanitisation happen in the
/// intake service so every failing field is reported at once.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequest {
    #[schema(example = "Alex Lee")]
    pub name: String,
    #[schema(example = "alex@example.com")]
    pub email: String,
    /// `yes` or `no`.
    #[schema(example = "yes")]
    pub attendance: String,
    #[serde(default)]
    #[schema(example = "vegetarian")]
    pub dietary_requirements: Option<String>,
}

impl From<RsvpRequest> for RsvpSubmission {
    fn from(value: RsvpRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            attendance: value.attendance,
            dietary_requirements: value.dietary_requirements,
        }
    }
}

/// Record an RSVP and mark the guest's latest invite as responded.
#[utoipa::path(
    post,
    path = "/api/v1/rsvp",
    request_body = RsvpRequest,
    responses(
        (status = 201, description = "RSVP stored", body = RsvpReceiptSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["rsvp"],
    operation_id = "submitRsvp",
    security([])
)]
#[post("/rsvp")]
pub async fn submit_rsvp(
    state: web::Data<HttpState>,
    payload: web::Json<RsvpRequest>,
) -> ApiResult<HttpResponse> {
    let receipt = state.rsvps.submit(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(receipt))
}
