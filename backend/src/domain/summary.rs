//! Dashboard counts derived from grouped storage queries.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::invite::InviteStatus;
use super::rsvp::Attendance;

/// One `{value, count}` group produced by an aggregation query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCount {
    pub value: String,
    pub count: u64,
}

impl FieldCount {
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Columns that may be grouped for dashboard summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregateField {
    /// `invites.status`
    InviteStatus,
    /// `rsvps.attendance`
    RsvpAttendance,
}

/// Raised for an unsupported `table.field` pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot aggregate by {0}")]
pub struct UnknownAggregateField(pub String);

impl FromStr for AggregateField {
    type Err = UnknownAggregateField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invites.status" | "inviteStatus" => Ok(Self::InviteStatus),
            "rsvps.attendance" | "rsvpAttendance" => Ok(Self::RsvpAttendance),
            other => Err(UnknownAggregateField(other.to_owned())),
        }
    }
}

/// Invite counts per status. Every status is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteStatusCounts {
    pub pending: u64,
    pub sent: u64,
    pub responded: u64,
    pub declined: u64,
    pub total: u64,
}

/// RSVP counts per attendance answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCounts {
    pub yes: u64,
    pub no: u64,
    pub total: u64,
}

/// Both dashboards' counts, computed at query time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub invites: InviteStatusCounts,
    pub rsvps: AttendanceCounts,
}

impl InviteStatusCounts {
    /// Fold grouped rows into per-status counts. Values outside the status
    /// set are skipped.
    pub fn from_groups(groups: &[FieldCount]) -> Self {
        let mut counts = Self::default();
        for group in groups {
            let Ok(status) = group.value.parse::<InviteStatus>() else {
                continue;
            };
            match status {
                InviteStatus::Pending => counts.pending += group.count,
                InviteStatus::Sent => counts.sent += group.count,
                InviteStatus::Responded => counts.responded += group.count,
                InviteStatus::Declined => counts.declined += group.count,
            }
            counts.total += group.count;
        }
        counts
    }

    pub fn get(&self, status: InviteStatus) -> u64 {
        match status {
            InviteStatus::Pending => self.pending,
            InviteStatus::Sent => self.sent,
            InviteStatus::Responded => self.responded,
            InviteStatus::Declined => self.declined,
        }
    }
}

impl AttendanceCounts {
    pub fn from_groups(groups: &[FieldCount]) -> Self {
        let mut counts = Self::default();
        for group in groups {
            let Ok(attendance) = group.value.parse::<Attendance>() else {
                continue;
            };
            match attendance {
                Attendance::Yes => counts.yes += group.count,
                Attendance::No => counts.no += group.count,
            }
            counts.total += group.count;
        }
        counts
    }
}
