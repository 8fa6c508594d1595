//! Port for outbound transactional email.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by email sender adapters.
    pub enum EmailSenderError {
        /// The provider could not be reached.
        Transport { message: String } =>
            "email transport failed: {message}",
        /// The provider refused the message.
        Rejected { status: u16, message: String } =>
            "email provider rejected message ({status}): {message}",
    }
}

/// A rendered message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivery receipt. `id` is the provider's message id when it issues one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentEmail {
    pub id: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, EmailSenderError>;
}

/// Used when no provider is configured: accepts every message and issues no
/// message id.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEmailSender;

#[async_trait]
impl EmailSender for NoOpEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, EmailSenderError> {
        tracing::debug!(to = %email.to, subject = %email.subject, "email delivery disabled");
        Ok(SentEmail::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_op_sender_accepts_without_id() {
        let sent = NoOpEmailSender
            .send(&OutgoingEmail {
                to: "alex@example.com".to_owned(),
                subject: "hi".to_owned(),
                html: "<p>hi</p>".to_owned(),
            })
            .await
            .expect("no-op send");
        assert_eq!(sent.id, None);
    }
}
