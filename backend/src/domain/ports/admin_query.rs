//! Driving port for the read-only admin dashboard and exports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AggregateField, Error, ExportFile, ExportFormat, ExportKind, FieldCount, Invite, Rsvp,
    SummaryCounts,
};

/// A listing with its row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Result of pushing RSVPs to the snapshot sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSyncOutcome {
    pub synced: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStatus {
    pub configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminQuery: Send + Sync {
    async fn list_invites(&self) -> Result<Listing<Invite>, Error>;

    async fn list_rsvps(&self) -> Result<Listing<Rsvp>, Error>;

    /// Counts per invite status and per attendance answer.
    async fn summary(&self) -> Result<SummaryCounts, Error>;

    async fn aggregate(&self, field: AggregateField) -> Result<Vec<FieldCount>, Error>;

    /// Render a dated export; an empty table is `not_found`.
    async fn export(&self, kind: ExportKind, format: ExportFormat) -> Result<ExportFile, Error>;

    /// Push every RSVP to the snapshot sink.
    async fn sync_snapshot(&self) -> Result<SnapshotSyncOutcome, Error>;

    fn snapshot_status(&self) -> SnapshotStatus;
}

/// Empty dashboard for tests that do not exercise storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminQuery;

#[async_trait]
impl AdminQuery for FixtureAdminQuery {
    async fn list_invites(&self) -> Result<Listing<Invite>, Error> {
        Ok(Listing::from(Vec::new()))
    }

    async fn list_rsvps(&self) -> Result<Listing<Rsvp>, Error> {
        Ok(Listing::from(Vec::new()))
    }

    async fn summary(&self) -> Result<SummaryCounts, Error> {
        Ok(SummaryCounts::default())
    }

    async fn aggregate(&self, _field: AggregateField) -> Result<Vec<FieldCount>, Error> {
        Ok(Vec::new())
    }

    async fn export(&self, _kind: ExportKind, _format: ExportFormat) -> Result<ExportFile, Error> {
        Err(Error::not_found("no data to export"))
    }

    async fn sync_snapshot(&self) -> Result<SnapshotSyncOutcome, Error> {
        Err(Error::invalid_request("snapshot sink is not configured"))
    }

    fn snapshot_status(&self) -> SnapshotStatus {
        SnapshotStatus {
            configured: false,
            location: None,
        }
    }
}
