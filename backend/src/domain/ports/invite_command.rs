//! Driving port for operator invite mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Invite, InviteId, InviteRequest, InviteStatus, LifecycleOutcome};

/// Per-row result of a bulk create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCreationResult {
    pub email: String,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_id: Option<InviteId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_url: Option<String>,
}

/// Results of a bulk create, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkInviteOutcome {
    pub results: Vec<InviteCreationResult>,
    pub success_count: usize,
    pub fail_count: usize,
}

/// Which invites a send action targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InviteSelection {
    Ids(Vec<InviteId>),
    AllPending,
}

/// Per-invite result of a send action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteSendResult {
    pub invite_id: InviteId,
    pub email: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInvitesOutcome {
    pub results: Vec<InviteSendResult>,
    pub success_count: usize,
    pub fail_count: usize,
}

/// Administrative status change addressed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInviteStatusRequest {
    pub email: String,
    pub status: InviteStatus,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteCommand: Send + Sync {
    /// Create one invite; an existing invite for the same email is a
    /// `conflict`.
    async fn create_invite(&self, request: InviteRequest) -> Result<Invite, Error>;

    /// Create each invite independently, reporting a result per row.
    async fn create_invites(&self, requests: Vec<InviteRequest>)
    -> Result<BulkInviteOutcome, Error>;

    /// Email the selected invites and mark them `sent`.
    async fn send_invites(&self, selection: InviteSelection) -> Result<SendInvitesOutcome, Error>;

    /// Move the latest invite for an email to `sent`, `responded` or
    /// `declined`.
    async fn set_invite_status(
        &self,
        request: SetInviteStatusRequest,
    ) -> Result<LifecycleOutcome, Error>;
}

/// Rejects every mutation as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInviteCommand;

#[async_trait]
impl InviteCommand for FixtureInviteCommand {
    async fn create_invite(&self, _request: InviteRequest) -> Result<Invite, Error> {
        Err(Error::service_unavailable("invite storage is not configured"))
    }

    async fn create_invites(
        &self,
        _requests: Vec<InviteRequest>,
    ) -> Result<BulkInviteOutcome, Error> {
        Err(Error::service_unavailable("invite storage is not configured"))
    }

    async fn send_invites(&self, _selection: InviteSelection) -> Result<SendInvitesOutcome, Error> {
        Err(Error::service_unavailable("invite storage is not configured"))
    }

    async fn set_invite_status(
        &self,
        _request: SetInviteStatusRequest,
    ) -> Result<LifecycleOutcome, Error> {
        Err(Error::service_unavailable("invite storage is not configured"))
    }
}
