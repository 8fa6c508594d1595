//! Invite command service: creation, sending and administrative status
//! changes.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::invite_lifecycle::{InviteLifecycleManager, map_invite_repository_error};
use crate::domain::notifications::{EventDetails, invitation};
use crate::domain::ports::{
    BulkInviteOutcome, EmailSender, InviteCommand, InviteCreationResult, InviteRepository,
    InviteSelection, InviteSendResult, SendInvitesOutcome, SetInviteStatusRequest,
};
use crate::domain::{
    EmailAddress, Error, Invite, InviteLinkBuilder, InviteRequest, InviteStatus, LifecycleOutcome,
    NewInvite,
};

const DUPLICATE_INVITE: &str = "Invite already exists for this email";

/// Implements [`InviteCommand`] over the invite repository.
pub struct InviteCommandService<R> {
    invites: Arc<R>,
    lifecycle: InviteLifecycleManager<R>,
    email: Arc<dyn EmailSender>,
    links: Option<InviteLinkBuilder>,
    event: EventDetails,
}

impl<R> Clone for InviteCommandService<R> {
    fn clone(&self) -> Self {
        Self {
            invites: Arc::clone(&self.invites),
            lifecycle: self.lifecycle.clone(),
            email: Arc::clone(&self.email),
            links: self.links.clone(),
            event: self.event.clone(),
        }
    }
}

impl<R> InviteCommandService<R> {
    pub fn new(
        invites: Arc<R>,
        lifecycle: InviteLifecycleManager<R>,
        email: Arc<dyn EmailSender>,
        event: EventDetails,
    ) -> Self {
        Self {
            invites,
            lifecycle,
            email,
            links: None,
            event,
        }
    }

    /// Attach a personalised RSVP link to every new invite.
    pub fn with_links(mut self, links: InviteLinkBuilder) -> Self {
        self.links = Some(links);
        self
    }
}

impl<R> InviteCommandService<R>
where
    R: InviteRepository,
{
    async fn create_one(&self, request: &InviteRequest) -> Result<Invite, Error> {
        let valid = request.validate()?;

        let existing = self
            .invites
            .find_latest_by_email(valid.email.as_str())
            .await
            .map_err(map_invite_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict(DUPLICATE_INVITE)
                .with_details(json!({ "email": valid.email.as_str() })));
        }

        let invite_url = self
            .links
            .as_ref()
            .map(|links| links.build(&valid.name, &valid.email))
            .transpose()
            .map_err(|err| Error::internal(format!("invalid invite link configuration: {err}")))?;

        let invite = self
            .invites
            .insert(&NewInvite {
                name: valid.name,
                email: valid.email,
                invite_url,
            })
            .await
            .map_err(map_invite_repository_error)?;
        info!(invite_id = %invite.id, "invite created");
        Ok(invite)
    }

    async fn select(&self, selection: InviteSelection) -> Result<Vec<Invite>, Error> {
        let selected = match selection {
            InviteSelection::Ids(ids) if ids.is_empty() => Ok(Vec::new()),
            InviteSelection::Ids(ids) => self.invites.find_by_ids(&ids).await,
            InviteSelection::AllPending => self.invites.list().await.map(|invites| {
                invites
                    .into_iter()
                    .filter(|invite| invite.status == InviteStatus::Pending)
                    .collect()
            }),
        }
        .map_err(map_invite_repository_error)?;
        Ok(selected)
    }

    async fn send_one(&self, invite: &Invite) -> InviteSendResult {
        let failure = |error: String| InviteSendResult {
            invite_id: invite.id,
            email: invite.email.clone(),
            success: false,
            message_id: None,
            error: Some(error),
        };

        if invite.status.is_terminal() {
            info!(invite_id = %invite.id, "invite already responded; not sent");
            return failure("invite already responded; skipped".to_owned());
        }

        let sent = match self.email.send(&invitation(invite, &self.event)).await {
            Ok(sent) => sent,
            Err(error) => {
                warn!(invite_id = %invite.id, %error, "invitation email failed");
                return failure(error.to_string());
            }
        };

        match self
            .lifecycle
            .transition(Some(invite), InviteStatus::Sent, None)
            .await
        {
            Ok(outcome) => {
                if let LifecycleOutcome::AlreadyResponded { .. } = outcome {
                    info!(invite_id = %invite.id, "invite already responded; status kept");
                }
                InviteSendResult {
                    invite_id: invite.id,
                    email: invite.email.clone(),
                    success: true,
                    message_id: sent.id,
                    error: None,
                }
            }
            Err(error) => {
                warn!(invite_id = %invite.id, %error, "invitation sent but status not updated");
                failure(error.message().to_owned())
            }
        }
    }
}

#[async_trait]
impl<R> InviteCommand for InviteCommandService<R>
where
    R: InviteRepository,
{
    async fn create_invite(&self, request: InviteRequest) -> Result<Invite, Error> {
        self.create_one(&request).await
    }

    async fn create_invites(
        &self,
        requests: Vec<InviteRequest>,
    ) -> Result<BulkInviteOutcome, Error> {
        if requests.is_empty() {
            return Err(Error::invalid_request("at least one invite is required"));
        }

        let mut results = Vec::with_capacity(requests.len());
        for request in &requests {
            let result = match self.create_one(request).await {
                Ok(invite) => InviteCreationResult {
                    email: invite.email,
                    success: true,
                    message: "Invite created".to_owned(),
                    invite_id: Some(invite.id),
                    invite_url: invite.invite_url,
                },
                Err(error) => InviteCreationResult {
                    email: EmailAddress::parse(&request.email)
                        .map(String::from)
                        .unwrap_or_else(|_| request.email.clone()),
                    success: false,
                    message: error.message().to_owned(),
                    invite_id: None,
                    invite_url: None,
                },
            };
            results.push(result);
        }

        let success_count = results.iter().filter(|r| r.success).count();
        let fail_count = results.len() - success_count;
        info!(success_count, fail_count, "bulk invite creation finished");
        Ok(BulkInviteOutcome {
            results,
            success_count,
            fail_count,
        })
    }

    async fn send_invites(&self, selection: InviteSelection) -> Result<SendInvitesOutcome, Error> {
        let invites = self.select(selection).await?;
        if invites.is_empty() {
            return Err(Error::not_found("no invites selected"));
        }

        let mut results = Vec::with_capacity(invites.len());
        for invite in &invites {
            results.push(self.send_one(invite).await);
        }

        let success_count = results.iter().filter(|r| r.success).count();
        let fail_count = results.len() - success_count;
        info!(success_count, fail_count, "invite send finished");
        Ok(SendInvitesOutcome {
            results,
            success_count,
            fail_count,
        })
    }

    async fn set_invite_status(
        &self,
        request: SetInviteStatusRequest,
    ) -> Result<LifecycleOutcome, Error> {
        if request.status == InviteStatus::Pending {
            return Err(Error::invalid_request(
                "status must be one of sent, responded or declined",
            )
            .with_details(json!({ "field": "status", "code": "invalid_choice" })));
        }
        let email = EmailAddress::parse(&request.email).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "email", "code": "invalid_format" }))
        })?;
        self.lifecycle
            .update_invite_status(email.as_str(), request.status, None)
            .await
    }
}

#[cfg(test)]
#[path = "invite_service_tests.rs"]
mod tests;
