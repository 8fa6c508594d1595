//! Invite lifecycle manager.
//!
//! The transition decision is a pure function of the current row; the
//! manager looks the row up, applies the decision and persists it through
//! the repository's guarded update, which re-checks the terminal state in the
//! same statement.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::ports::{InviteRepository, InviteRepositoryError};
use crate::domain::{Error, Invite, InviteId, InviteStatus, RsvpId, StatusChange, normalize_email};

/// What a lifecycle request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum LifecycleOutcome {
    /// The invite moved to `status`.
    #[serde(rename_all = "camelCase")]
    Applied {
        invite_id: InviteId,
        status: InviteStatus,
    },
    /// No invite exists for the email.
    NoMatchingInvite,
    /// The invite had already reached `responded` and the request could not
    /// change it.
    #[serde(rename_all = "camelCase")]
    AlreadyResponded { invite_id: InviteId },
}

/// Pure transition decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDecision {
    Apply { id: InviteId, change: StatusChange },
    Skip(LifecycleOutcome),
}

/// Decide how `current` moves to `target`.
///
/// `sent_at` is stamped only for `sent`; `rsvp_id` is carried only when given.
/// A `responded` invite only accepts a newer RSVP id, which keeps the status
/// and re-points the link at the latest response.
///
/// # Examples
/// ```
/// use backend::domain::{decide_transition, InviteStatus, LifecycleOutcome, TransitionDecision};
/// use chrono::Utc;
///
/// let decision = decide_transition(None, InviteStatus::Responded, None, Utc::now());
/// assert_eq!(decision, TransitionDecision::Skip(LifecycleOutcome::NoMatchingInvite));
/// ```
pub fn decide_transition(
    current: Option<&Invite>,
    target: InviteStatus,
    rsvp_id: Option<RsvpId>,
    now: DateTime<Utc>,
) -> TransitionDecision {
    let Some(invite) = current else {
        return TransitionDecision::Skip(LifecycleOutcome::NoMatchingInvite);
    };
    let change = StatusChange {
        status: target,
        rsvp_id,
        sent_at: (target == InviteStatus::Sent).then_some(now),
    };
    let relinks = change.is_response_relink() && invite.rsvp_id < rsvp_id;
    if invite.status.is_terminal() && !relinks {
        return TransitionDecision::Skip(LifecycleOutcome::AlreadyResponded {
            invite_id: invite.id,
        });
    }
    TransitionDecision::Apply {
        id: invite.id,
        change,
    }
}

pub(crate) fn map_invite_repository_error(error: InviteRepositoryError) -> Error {
    match error {
        InviteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("invite repository unavailable: {message}"))
        }
        InviteRepositoryError::Query { message } => {
            Error::internal(format!("invite repository error: {message}"))
        }
        InviteRepositoryError::Constraint { message } => {
            Error::conflict(format!("invite rejected by storage: {message}"))
        }
    }
}

/// Applies status transitions to the latest invite for an email.
pub struct InviteLifecycleManager<R> {
    invites: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for InviteLifecycleManager<R> {
    fn clone(&self) -> Self {
        Self {
            invites: Arc::clone(&self.invites),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> InviteLifecycleManager<R> {
    pub fn new(invites: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { invites, clock }
    }
}

impl<R> InviteLifecycleManager<R>
where
    R: InviteRepository,
{
    /// Transition the most recently created invite matching `email`.
    ///
    /// A missing invite and a `responded` invite are both no-ops reported
    /// through the outcome. Storage failures propagate without retry.
    pub async fn update_invite_status(
        &self,
        email: &str,
        status: InviteStatus,
        rsvp_id: Option<RsvpId>,
    ) -> Result<LifecycleOutcome, Error> {
        let email = normalize_email(email);
        let current = self
            .invites
            .find_latest_by_email(&email)
            .await
            .map_err(map_invite_repository_error)?;
        if current.is_none() {
            debug!(%email, %status, "no invite matches email; nothing to transition");
        }
        self.transition(current.as_ref(), status, rsvp_id).await
    }

    /// Transition a row the caller already holds.
    pub async fn transition(
        &self,
        current: Option<&Invite>,
        status: InviteStatus,
        rsvp_id: Option<RsvpId>,
    ) -> Result<LifecycleOutcome, Error> {
        match decide_transition(current, status, rsvp_id, self.clock.utc()) {
            TransitionDecision::Skip(outcome) => Ok(outcome),
            TransitionDecision::Apply { id, change } => {
                let changed = self
                    .invites
                    .update_status(id, &change)
                    .await
                    .map_err(map_invite_repository_error)?;
                if changed {
                    info!(invite_id = %id, %status, rsvp_id = ?rsvp_id, "invite status updated");
                    Ok(LifecycleOutcome::Applied {
                        invite_id: id,
                        status,
                    })
                } else {
                    // A concurrent writer reached `responded` first.
                    debug!(invite_id = %id, "guarded update matched no row");
                    Ok(LifecycleOutcome::AlreadyResponded { invite_id: id })
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "invite_lifecycle_tests.rs"]
mod tests;
