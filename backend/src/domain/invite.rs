//! Invite aggregate and its status model.
//!
//! An invite moves `pending -> sent -> responded`, with `declined` reachable
//! only through an administrative action. `responded` is terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email_address::EmailAddress;
use super::rsvp::RsvpId;

/// System-assigned invite identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteId(i64);

impl InviteId {
    /// Wrap a raw storage identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw storage identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for InviteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Sent,
    Responded,
    Declined,
}

impl InviteStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [InviteStatus; 4] = [
        InviteStatus::Pending,
        InviteStatus::Sent,
        InviteStatus::Responded,
        InviteStatus::Declined,
    ];

    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Responded => "responded",
            Self::Declined => "declined",
        }
    }

    /// Whether no further transition may leave this status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Responded)
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or supplied status string is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invite status: {0}")]
pub struct UnknownInviteStatus(pub String);

impl FromStr for InviteStatus {
    type Err = UnknownInviteStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "responded" => Ok(Self::Responded),
            "declined" => Ok(Self::Declined),
            other => Err(UnknownInviteStatus(other.to_owned())),
        }
    }
}

/// A stored invite.
///
/// `email` always holds the normalized address; `rsvp_id` and `sent_at` are
/// only ever written alongside a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: InviteId,
    pub name: String,
    pub email: String,
    pub status: InviteStatus,
    pub invite_url: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub rsvp_id: Option<RsvpId>,
    pub created_at: DateTime<Utc>,
}

/// Values for a new invite row; storage assigns id, status and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvite {
    pub name: String,
    pub email: EmailAddress,
    pub invite_url: Option<String>,
}

/// A status change to persist against one invite row.
///
/// Adapters must apply the change only while the row is not `responded`,
/// except for a [response relink](Self::is_response_relink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: InviteStatus,
    pub rsvp_id: Option<RsvpId>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl StatusChange {
    /// A newer RSVP re-pointing a `responded` invite. The status stays
    /// `responded`; only `rsvp_id` moves.
    pub const fn is_response_relink(&self) -> bool {
        matches!(self.status, InviteStatus::Responded) && self.rsvp_id.is_some()
    }
}

impl Invite {
    /// Apply a status change to an in-memory copy, respecting the terminal
    /// guard. Returns `false` when the invite is already `responded` and the
    /// change is not a relink to a newer RSVP.
    pub fn apply(&mut self, change: &StatusChange) -> bool {
        if self.status.is_terminal()
            && !(change.is_response_relink() && self.rsvp_id < change.rsvp_id)
        {
            return false;
        }
        self.status = change.status;
        if let Some(rsvp_id) = change.rsvp_id {
            self.rsvp_id = Some(rsvp_id);
        }
        if let Some(sent_at) = change.sent_at {
            self.sent_at = Some(sent_at);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn invite(status: InviteStatus) -> Invite {
        Invite {
            id: InviteId::new(1),
            name: "Alex Lee".to_owned(),
            email: "alex@example.com".to_owned(),
            status,
            invite_url: None,
            sent_at: None,
            rsvp_id: None,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("pending", InviteStatus::Pending)]
    #[case("sent", InviteStatus::Sent)]
    #[case("responded", InviteStatus::Responded)]
    #[case("declined", InviteStatus::Declined)]
    fn parses_known_statuses(#[case] raw: &str, #[case] expected: InviteStatus) {
        assert_eq!(raw.parse::<InviteStatus>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn rejects_unknown_status() {
        assert!("archived".parse::<InviteStatus>().is_err());
    }

    #[rstest]
    fn apply_keeps_responded_rows_untouched() {
        let mut responded = invite(InviteStatus::Responded);
        let change = StatusChange {
            status: InviteStatus::Sent,
            rsvp_id: Some(RsvpId::new(9)),
            sent_at: Some(Utc::now()),
        };
        assert!(!responded.apply(&change));
        assert_eq!(responded.status, InviteStatus::Responded);
        assert_eq!(responded.rsvp_id, None);
    }

    #[rstest]
    fn apply_sets_link_only_when_given() {
        let mut row = invite(InviteStatus::Sent);
        row.rsvp_id = Some(RsvpId::new(3));
        let change = StatusChange {
            status: InviteStatus::Declined,
            rsvp_id: None,
            sent_at: None,
        };
        assert!(row.apply(&change));
        assert_eq!(row.status, InviteStatus::Declined);
        assert_eq!(row.rsvp_id, Some(RsvpId::new(3)));
    }

    #[rstest]
    fn newer_response_relinks_responded_row() {
        let mut row = invite(InviteStatus::Responded);
        row.rsvp_id = Some(RsvpId::new(3));
        let change = StatusChange {
            status: InviteStatus::Responded,
            rsvp_id: Some(RsvpId::new(4)),
            sent_at: None,
        };
        assert!(row.apply(&change));
        assert_eq!(row.status, InviteStatus::Responded);
        assert_eq!(row.rsvp_id, Some(RsvpId::new(4)));
    }

    #[rstest]
    fn responded_without_rsvp_is_not_a_relink() {
        let change = StatusChange {
            status: InviteStatus::Responded,
            rsvp_id: None,
            sent_at: None,
        };
        assert!(!change.is_response_relink());
        let mut row = invite(InviteStatus::Responded);
        assert!(!row.apply(&change));
    }
}
