//! Reqwest-backed Resend email adapter.
//!
//! Owns transport details only: request serialisation, timeout, status
//! mapping and decoding the provider message id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{EmailSender, EmailSenderError, OutgoingEmail, SentEmail};
use crate::outbound::body_preview;

/// Public Resend endpoint.
pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct SendRequestDto<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponseDto {
    id: Option<String>,
}

/// Sends transactional email through the Resend HTTP API.
pub struct ResendEmailSender {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    from: String,
}

impl ResendEmailSender {
    /// Build a sender for `endpoint` with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: Zeroizing::new(api_key.into()),
            from: from.into(),
        })
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, EmailSenderError> {
        let payload = SendRequestDto {
            from: &self.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|err| EmailSenderError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| EmailSenderError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let sent = parse_sent(body.as_ref());
        debug!(message_id = ?sent.id, "email accepted by provider");
        Ok(sent)
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> EmailSenderError {
    let preview = body_preview(body);
    if status.is_client_error() {
        EmailSenderError::rejected(status.as_u16(), preview)
    } else {
        EmailSenderError::transport(format!("status {}: {preview}", status.as_u16()))
    }
}

/// A 2xx with an unreadable body still counts as sent, without an id.
fn parse_sent(body: &[u8]) -> SentEmail {
    match serde_json::from_slice::<SendResponseDto>(body) {
        Ok(dto) => SentEmail { id: dto.id },
        Err(error) => {
            debug!(%error, "provider response had no readable id");
            SentEmail::default()
        }
    }
}
