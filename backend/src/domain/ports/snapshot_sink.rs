//! Port for pushing RSVP snapshots to an external document store.

use async_trait::async_trait;

use crate::domain::Rsvp;

use super::define_port_error;

define_port_error! {
    /// Errors raised by snapshot sink adapters.
    pub enum SnapshotSinkError {
        /// No sink is configured.
        NotConfigured => "snapshot sink is not configured",
        /// The sink could not be reached.
        Transport { message: String } =>
            "snapshot sink unreachable: {message}",
        /// The sink refused the snapshot.
        Rejected { status: u16, message: String } =>
            "snapshot sink rejected upload ({status}): {message}",
    }
}

/// Where snapshots go, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotTarget {
    pub configured: bool,
    pub location: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Replace the remote snapshot with `rsvps`.
    async fn push(&self, rsvps: &[Rsvp]) -> Result<(), SnapshotSinkError>;

    fn target(&self) -> SnapshotTarget;
}

/// Used when no sink is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSnapshotSink;

#[async_trait]
impl SnapshotSink for NoOpSnapshotSink {
    async fn push(&self, _rsvps: &[Rsvp]) -> Result<(), SnapshotSinkError> {
        Err(SnapshotSinkError::not_configured())
    }

    fn target(&self) -> SnapshotTarget {
        SnapshotTarget {
            configured: false,
            location: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_op_sink_reports_unconfigured() {
        let sink = NoOpSnapshotSink;
        assert!(!sink.target().configured);
        assert_eq!(
            sink.push(&[]).await,
            Err(SnapshotSinkError::NotConfigured)
        );
    }
}
