//! Admin export download.
//!
//! ```text
//! GET /api/v1/admin/export?type=rsvps&format=csv
//! ```

use actix_web::http::header::{
    CONTENT_TYPE, ContentDisposition, DispositionParam, DispositionType,
};
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, ExportFormat, ExportKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query for `GET /api/v1/admin/export`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// `rsvps`, `invites` or `summary`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `csv` (default) or `json`.
    #[serde(default)]
    pub format: Option<String>,
}

impl ExportQuery {
    fn parse(&self) -> Result<(ExportKind, ExportFormat), Error> {
        let kind = self.kind.parse::<ExportKind>().map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "type", "code": "invalid_choice" }))
        })?;
        let format = match self.format.as_deref() {
            None => ExportFormat::default(),
            Some(raw) => raw.parse::<ExportFormat>().map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "format", "code": "invalid_choice" }))
            })?,
        };
        Ok((kind, format))
    }
}

/// Download invites, RSVPs or the summary as a dated attachment.
#[utoipa::path(
    get,
    path = "/api/v1/admin/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Export file", content_type = "text/csv", body = String,
            headers(("Content-Disposition" = String, description = "Attachment file name"))),
        (status = 400, description = "Unknown type or format", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No data to export", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "export"
)]
#[get("/admin/export")]
pub async fn export(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ExportQuery>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let (kind, format) = query.parse()?;
    let file = state.admin.export(kind, format).await?;
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(file.file_name)],
    };
    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, file.content_type))
        .insert_header(disposition)
        .insert_header(private_no_cache_header())
        .body(file.body))
}
