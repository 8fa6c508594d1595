//! Driving port for the public RSVP form.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, RsvpId, RsvpSubmission};

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpReceipt {
    pub rsvp_id: RsvpId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_id: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RsvpIntake: Send + Sync {
    /// Validate, store and link a submission, then notify best effort.
    ///
    /// Validation failures return `invalid_request` with one entry per
    /// failing field in `details.fields`.
    async fn submit(&self, submission: RsvpSubmission) -> Result<RsvpReceipt, Error>;
}

/// Validates like the real intake and hands back a fixed id without storing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRsvpIntake;

#[async_trait]
impl RsvpIntake for FixtureRsvpIntake {
    async fn submit(&self, submission: RsvpSubmission) -> Result<RsvpReceipt, Error> {
        submission.validate()?;
        Ok(RsvpReceipt {
            rsvp_id: RsvpId::new(1),
            confirmation_id: None,
        })
    }
}
