//! Reqwest-backed snapshot sink.
//!
//! Posts the complete RSVP list as one JSON document. The receiving store
//! replaces its previous copy, so a sync is idempotent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::domain::ports::{SnapshotSink, SnapshotSinkError, SnapshotTarget};
use crate::domain::{Rsvp, RsvpId};
use crate::outbound::body_preview;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRowDto<'a> {
    id: RsvpId,
    name: &'a str,
    email: &'a str,
    attendance: &'static str,
    dietary_requirements: &'a str,
    rsvp_date: String,
}

#[derive(Debug, Serialize)]
struct SnapshotDto<'a> {
    rows: Vec<SnapshotRowDto<'a>>,
}

fn snapshot(rsvps: &[Rsvp]) -> SnapshotDto<'_> {
    SnapshotDto {
        rows: rsvps
            .iter()
            .map(|rsvp| SnapshotRowDto {
                id: rsvp.id,
                name: &rsvp.name,
                email: &rsvp.email,
                attendance: rsvp.attendance.as_str(),
                dietary_requirements: rsvp.dietary_requirements.as_deref().unwrap_or(""),
                rsvp_date: rsvp.rsvp_date.to_rfc3339(),
            })
            .collect(),
    }
}

/// Pushes RSVP snapshots to one HTTP endpoint.
pub struct HttpSnapshotSink {
    client: Client,
    endpoint: Url,
    token: Option<Zeroizing<String>>,
}

impl HttpSnapshotSink {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            token: token.map(Zeroizing::new),
        })
    }
}

#[async_trait]
impl SnapshotSink for HttpSnapshotSink {
    async fn push(&self, rsvps: &[Rsvp]) -> Result<(), SnapshotSinkError> {
        let mut request = self.client.post(self.endpoint.clone()).json(&snapshot(rsvps));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.as_str());
        }
        let response = request
            .send()
            .await
            .map_err(|err| SnapshotSinkError::transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(map_status_error(status, body.as_ref()))
    }

    fn target(&self) -> SnapshotTarget {
        SnapshotTarget {
            configured: true,
            location: Some(self.endpoint.to_string()),
        }
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SnapshotSinkError {
    let preview = body_preview(body);
    if status.is_server_error() {
        SnapshotSinkError::transport(format!("status {}: {preview}", status.as_u16()))
    } else {
        SnapshotSinkError::rejected(status.as_u16(), preview)
    }
}
