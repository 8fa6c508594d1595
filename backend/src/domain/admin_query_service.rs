//! Read-only admin queries, exports and snapshot sync.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::export::{ExportTable, export_file_name};
use crate::domain::invite_lifecycle::map_invite_repository_error;
use crate::domain::notifications::EventDetails;
use crate::domain::ports::{
    AdminQuery, InviteRepository, Listing, RsvpRepository, SnapshotSink, SnapshotSinkError,
    SnapshotStatus, SnapshotSyncOutcome,
};
use crate::domain::rsvp_intake_service::map_rsvp_repository_error;
use crate::domain::{
    AggregateField, AttendanceCounts, Error, ExportFile, ExportFormat, ExportKind, FieldCount,
    Invite, InviteStatusCounts, Rsvp, SummaryCounts,
};

fn map_snapshot_error(error: SnapshotSinkError) -> Error {
    match error {
        SnapshotSinkError::NotConfigured => Error::invalid_request(error.to_string()),
        SnapshotSinkError::Transport { .. } | SnapshotSinkError::Rejected { .. } => {
            Error::service_unavailable(error.to_string())
        }
    }
}

/// Implements [`AdminQuery`]; every figure is read from storage per call.
pub struct AdminQueryService<I, R> {
    invites: Arc<I>,
    rsvps: Arc<R>,
    snapshot: Arc<dyn SnapshotSink>,
    clock: Arc<dyn Clock>,
    event: EventDetails,
}

impl<I, R> Clone for AdminQueryService<I, R> {
    fn clone(&self) -> Self {
        Self {
            invites: Arc::clone(&self.invites),
            rsvps: Arc::clone(&self.rsvps),
            snapshot: Arc::clone(&self.snapshot),
            clock: Arc::clone(&self.clock),
            event: self.event.clone(),
        }
    }
}

impl<I, R> AdminQueryService<I, R> {
    pub fn new(
        invites: Arc<I>,
        rsvps: Arc<R>,
        snapshot: Arc<dyn SnapshotSink>,
        clock: Arc<dyn Clock>,
        event: EventDetails,
    ) -> Self {
        Self {
            invites,
            rsvps,
            snapshot,
            clock,
            event,
        }
    }
}

impl<I, R> AdminQueryService<I, R>
where
    I: InviteRepository,
    R: RsvpRepository,
{
    async fn all_invites(&self) -> Result<Vec<Invite>, Error> {
        self.invites.list().await.map_err(map_invite_repository_error)
    }

    async fn all_rsvps(&self) -> Result<Vec<Rsvp>, Error> {
        self.rsvps.list().await.map_err(map_rsvp_repository_error)
    }

    async fn table(&self, kind: ExportKind) -> Result<ExportTable, Error> {
        Ok(match kind {
            ExportKind::Rsvps => ExportTable::rsvps(&self.all_rsvps().await?),
            ExportKind::Invites => ExportTable::invites(&self.all_invites().await?),
            ExportKind::Summary => ExportTable::summary(&self.summary().await?, &self.event),
        })
    }
}

#[async_trait]
impl<I, R> AdminQuery for AdminQueryService<I, R>
where
    I: InviteRepository,
    R: RsvpRepository,
{
    async fn list_invites(&self) -> Result<Listing<Invite>, Error> {
        Ok(Listing::from(self.all_invites().await?))
    }

    async fn list_rsvps(&self) -> Result<Listing<Rsvp>, Error> {
        Ok(Listing::from(self.all_rsvps().await?))
    }

    async fn summary(&self) -> Result<SummaryCounts, Error> {
        let invites = self.aggregate(AggregateField::InviteStatus).await?;
        let rsvps = self.aggregate(AggregateField::RsvpAttendance).await?;
        Ok(SummaryCounts {
            invites: InviteStatusCounts::from_groups(&invites),
            rsvps: AttendanceCounts::from_groups(&rsvps),
        })
    }

    async fn aggregate(&self, field: AggregateField) -> Result<Vec<FieldCount>, Error> {
        match field {
            AggregateField::InviteStatus => self
                .invites
                .count_by_status()
                .await
                .map_err(map_invite_repository_error),
            AggregateField::RsvpAttendance => self
                .rsvps
                .count_by_attendance()
                .await
                .map_err(map_rsvp_repository_error),
        }
    }

    async fn export(&self, kind: ExportKind, format: ExportFormat) -> Result<ExportFile, Error> {
        let table = self.table(kind).await?;
        if table.is_empty() {
            return Err(Error::not_found("no data to export"));
        }
        let file_name = export_file_name(
            &self.event.name,
            kind,
            self.clock.utc().date_naive(),
            format,
        );
        info!(%file_name, rows = table.rows.len(), "export rendered");
        Ok(ExportFile {
            file_name,
            content_type: format.content_type(),
            body: table.render(format),
        })
    }

    async fn sync_snapshot(&self) -> Result<SnapshotSyncOutcome, Error> {
        let target = self.snapshot.target();
        if !target.configured {
            return Err(map_snapshot_error(SnapshotSinkError::not_configured()));
        }
        let rsvps = self.all_rsvps().await?;
        if rsvps.is_empty() {
            return Err(Error::not_found("no rsvps to sync"));
        }
        self.snapshot.push(&rsvps).await.map_err(|error| {
            warn!(%error, "snapshot sync failed");
            map_snapshot_error(error)
        })?;
        info!(synced = rsvps.len(), "snapshot synced");
        Ok(SnapshotSyncOutcome {
            synced: rsvps.len(),
            location: target.location,
        })
    }

    fn snapshot_status(&self) -> SnapshotStatus {
        let target = self.snapshot.target();
        SnapshotStatus {
            configured: target.configured,
            location: target.location,
        }
    }
}

#[cfg(test)]
#[path = "admin_query_service_tests.rs"]
mod tests;
