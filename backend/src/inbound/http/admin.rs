//! Read-only admin dashboard endpoints and snapshot sync.
//!
//! ```text
//! GET  /api/v1/admin/rsvps
//! GET  /api/v1/admin/summary
//! GET  /api/v1/admin/aggregate?field=rsvps.attendance
//! POST /api/v1/admin/snapshot
//! GET  /api/v1/admin/snapshot
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{AggregateField, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{
    ErrorSchema, FieldCountSchema, RsvpListingSchema, SnapshotStatusSchema,
    SnapshotSyncOutcomeSchema, SummaryCountsSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query for `GET /api/v1/admin/aggregate`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AggregateQuery {
    /// `invites.status` or `rsvps.attendance`.
    pub field: String,
}

/// List every RSVP, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/rsvps",
    responses(
        (status = 200, description = "RSVPs", body = RsvpListingSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listRsvps"
)]
#[get("/admin/rsvps")]
pub async fn list_rsvps(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let listing = state.admin.list_rsvps().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(listing))
}

/// Invite status and attendance counts, computed per request.
#[utoipa::path(
    get,
    path = "/api/v1/admin/summary",
    responses(
        (status = 200, description = "Counts", body = SummaryCountsSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "summary"
)]
#[get("/admin/summary")]
pub async fn summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let counts = state.admin.summary().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(counts))
}

/// Row counts grouped by one column.
#[utoipa::path(
    get,
    path = "/api/v1/admin/aggregate",
    params(AggregateQuery),
    responses(
        (status = 200, description = "Groups", body = [FieldCountSchema]),
        (status = 400, description = "Unsupported field", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "aggregate"
)]
#[get("/admin/aggregate")]
pub async fn aggregate(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AggregateQuery>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let field = query.field.parse::<AggregateField>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "field", "code": "unsupported" }))
    })?;
    let groups = state.admin.aggregate(field).await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// Push every RSVP to the configured snapshot sink.
#[utoipa::path(
    post,
    path = "/api/v1/admin/snapshot",
    responses(
        (status = 200, description = "Snapshot pushed", body = SnapshotSyncOutcomeSchema),
        (status = 400, description = "No snapshot sink configured", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No RSVPs to sync", body = ErrorSchema),
        (status = 503, description = "Snapshot sink unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "syncSnapshot"
)]
#[post("/admin/snapshot")]
pub async fn sync_snapshot(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let outcome = state.admin.sync_snapshot().await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Whether a snapshot sink is configured, and where it points.
#[utoipa::path(
    get,
    path = "/api/v1/admin/snapshot",
    responses(
        (status = 200, description = "Sink status", body = SnapshotStatusSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "snapshotStatus"
)]
#[get("/admin/snapshot")]
pub async fn snapshot_status(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    Ok(HttpResponse::Ok().json(state.admin.snapshot_status()))
}

/// Register the dashboard routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_rsvps)
        .service(summary)
        .service(aggregate)
        .service(sync_snapshot)
        .service(snapshot_status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{MockAdminQuery, SnapshotStatus, SnapshotSyncOutcome};
    use crate::domain::{
        AttendanceCounts, FieldCount, InviteStatusCounts, SummaryCounts,
    };
    use crate::inbound::http::cache_control::PRIVATE_NO_CACHE_MUST_REVALIDATE;
    use crate::inbound::http::test_utils::call_api;

    #[rstest]
    #[case("/api/v1/admin/rsvps")]
    #[case("/api/v1/admin/summary")]
    #[case("/api/v1/admin/snapshot")]
    #[case("/api/v1/admin/aggregate?field=invites.status")]
    #[actix_web::test]
    async fn dashboard_requires_login(#[case] uri: &str) {
        let res = call_api(
            HttpState::default(),
            configure,
            actix_test::TestRequest::get().uri(uri),
            false,
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn summary_returns_all_status_keys() {
        let mut admin = MockAdminQuery::new();
        admin.expect_summary().times(1).returning(|| {
            Ok(SummaryCounts {
                invites: InviteStatusCounts {
                    pending: 1,
                    sent: 2,
                    responded: 3,
                    declined: 0,
                    total: 6,
                },
                rsvps: AttendanceCounts {
                    yes: 2,
                    no: 1,
                    total: 3,
                },
            })
        });
        let state = HttpState::default().with_admin(Arc::new(admin));

        let res = call_api(
            state,
            configure,
            actix_test::TestRequest::get().uri("/api/v1/admin/summary"),
            true,
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some(PRIVATE_NO_CACHE_MUST_REVALIDATE)
        );
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["invites"]["declined"], 0);
        assert_eq!(body["invites"]["total"], 6);
        assert_eq!(body["rsvps"]["yes"], 2);
    }

    #[actix_web::test]
    async fn aggregate_parses_field() {
        let mut admin = MockAdminQuery::new();
        admin
            .expect_aggregate()
            .withf(|field| *field == AggregateField::RsvpAttendance)
            .times(1)
            .returning(|_| {
                Ok(vec![FieldCount {
                    value: "yes".to_owned(),
                    count: 4,
                }])
            });
        let state = HttpState::default().with_admin(Arc::new(admin));

        let res = call_api(
            state,
            configure,
            actix_test::TestRequest::get().uri("/api/v1/admin/aggregate?field=rsvps.attendance"),
            true,
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["count"], 4);
    }

    #[actix_web::test]
    async fn aggregate_rejects_unknown_field() {
        let res = call_api(
            HttpState::default(),
            configure,
            actix_test::TestRequest::get().uri("/api/v1/admin/aggregate?field=rsvps.email"),
            true,
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unconfigured_snapshot_sync_is_invalid_request() {
        let res = call_api(
            HttpState::default(),
            configure,
            actix_test::TestRequest::post().uri("/api/v1/admin/snapshot"),
            true,
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn snapshot_sync_reports_count() {
        let mut admin = MockAdminQuery::new();
        admin.expect_sync_snapshot().times(1).returning(|| {
            Ok(SnapshotSyncOutcome {
                synced: 5,
                location: Some("https://sheets.example.com/hook".to_owned()),
            })
        });
        admin.expect_snapshot_status().returning(|| SnapshotStatus {
            configured: true,
            location: Some("https://sheets.example.com/hook".to_owned()),
        });
        let state = HttpState::default().with_admin(Arc::new(admin));

        let res = call_api(
            state,
            configure,
            actix_test::TestRequest::post().uri("/api/v1/admin/snapshot"),
            true,
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["synced"], 5);
    }

    #[actix_web::test]
    async fn snapshot_status_reports_unconfigured_sink() {
        let res = call_api(
            HttpState::default(),
            configure,
            actix_test::TestRequest::get().uri("/api/v1/admin/snapshot"),
            true,
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["configured"], false);
        assert!(body.get("location").is_none());
    }
}
