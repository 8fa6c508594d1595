//! RSVP intake service.
//!
//! Validation happens before any side effect. Once the RSVP row is stored the
//! response is committed: lifecycle linking failures are errors, but email
//! failures are only logged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::invite_lifecycle::InviteLifecycleManager;
use crate::domain::notifications::{EventDetails, organizer_notification, rsvp_confirmation};
use crate::domain::ports::{
    EmailSender, InviteRepository, RsvpIntake, RsvpReceipt, RsvpRepository, RsvpRepositoryError,
};
use crate::domain::{EmailAddress, Error, InviteStatus, Rsvp, RsvpSubmission};

pub(crate) fn map_rsvp_repository_error(error: RsvpRepositoryError) -> Error {
    match error {
        RsvpRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("rsvp repository unavailable: {message}"))
        }
        RsvpRepositoryError::Query { message } => {
            Error::internal(format!("rsvp repository error: {message}"))
        }
        RsvpRepositoryError::Constraint { message } => {
            Error::invalid_request(format!("rsvp rejected by storage: {message}"))
        }
    }
}

/// Implements [`RsvpIntake`] over the two repositories and the email port.
pub struct RsvpIntakeService<R, I> {
    rsvps: Arc<R>,
    lifecycle: InviteLifecycleManager<I>,
    email: Arc<dyn EmailSender>,
    event: EventDetails,
    organizer_email: Option<String>,
}

impl<R, I> Clone for RsvpIntakeService<R, I> {
    fn clone(&self) -> Self {
        Self {
            rsvps: Arc::clone(&self.rsvps),
            lifecycle: self.lifecycle.clone(),
            email: Arc::clone(&self.email),
            event: self.event.clone(),
            organizer_email: self.organizer_email.clone(),
        }
    }
}

impl<R, I> RsvpIntakeService<R, I> {
    pub fn new(
        rsvps: Arc<R>,
        lifecycle: InviteLifecycleManager<I>,
        email: Arc<dyn EmailSender>,
        event: EventDetails,
    ) -> Self {
        Self {
            rsvps,
            lifecycle,
            email,
            event,
            organizer_email: None,
        }
    }

    /// Also notify `organizer` of every accepted RSVP.
    pub fn with_organizer_email(mut self, organizer: impl Into<String>) -> Self {
        self.organizer_email = Some(organizer.into());
        self
    }
}

impl<R, I> RsvpIntakeService<R, I>
where
    R: RsvpRepository,
    I: InviteRepository,
{
    /// Send the confirmation to `recipient` and the organizer notice,
    /// returning the confirmation message id when the provider issued one.
    async fn notify(&self, recipient: &EmailAddress, rsvp: &Rsvp) -> Option<String> {
        let confirmation = rsvp_confirmation(recipient, rsvp, &self.event);
        let confirmation_id = match self.email.send(&confirmation).await {
            Ok(sent) => sent.id,
            Err(error) => {
                warn!(rsvp_id = %rsvp.id, %error, "confirmation email failed");
                None
            }
        };

        if let Some(organizer) = self.organizer_email.as_deref() {
            let notice = organizer_notification(organizer, rsvp, &self.event);
            if let Err(error) = self.email.send(&notice).await {
                warn!(rsvp_id = %rsvp.id, %error, "organizer notification failed");
            }
        }

        confirmation_id
    }

    async fn record_confirmation_id(&self, rsvp: &Rsvp, confirmation_id: &str) -> bool {
        match self
            .rsvps
            .attach_confirmation_id(rsvp.id, confirmation_id)
            .await
        {
            Ok(attached) => attached,
            Err(error) => {
                warn!(rsvp_id = %rsvp.id, %error, "could not store confirmation id");
                false
            }
        }
    }
}

#[async_trait]
impl<R, I> RsvpIntake for RsvpIntakeService<R, I>
where
    R: RsvpRepository,
    I: InviteRepository,
{
    async fn submit(&self, submission: RsvpSubmission) -> Result<RsvpReceipt, Error> {
        let valid = submission.validate()?;

        let rsvp = self
            .rsvps
            .insert(&valid.to_new_rsvp())
            .await
            .map_err(map_rsvp_repository_error)?;
        info!(rsvp_id = %rsvp.id, attendance = %rsvp.attendance, "rsvp recorded");

        let outcome = self
            .lifecycle
            .update_invite_status(valid.email.as_str(), InviteStatus::Responded, Some(rsvp.id))
            .await?;
        info!(rsvp_id = %rsvp.id, ?outcome, "invite lifecycle updated for rsvp");

        let mut confirmation_id = self.notify(&valid.email, &rsvp).await;
        if let Some(id) = confirmation_id.as_deref() {
            if !self.record_confirmation_id(&rsvp, id).await {
                confirmation_id = None;
            }
        }

        Ok(RsvpReceipt {
            rsvp_id: rsvp.id,
            confirmation_id,
        })
    }
}

#[cfg(test)]
#[path = "rsvp_intake_service_tests.rs"]
mod tests;
