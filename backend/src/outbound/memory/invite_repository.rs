use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{InviteRepository, InviteRepositoryError};
use crate::domain::{FieldCount, Invite, InviteId, InviteStatus, NewInvite, StatusChange};

use super::lock;

#[derive(Default)]
struct State {
    next_id: i64,
    rows: Vec<Invite>,
}

/// Invite storage held in a mutex-guarded vector.
#[derive(Clone)]
pub struct InMemoryInviteRepository {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryInviteRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryInviteRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }
}

fn newest_first(rows: &[Invite]) -> Vec<Invite> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    sorted
}

#[async_trait]
impl InviteRepository for InMemoryInviteRepository {
    async fn insert(&self, invite: &NewInvite) -> Result<Invite, InviteRepositoryError> {
        if invite.name.trim().is_empty() {
            return Err(InviteRepositoryError::constraint("invites_name_not_blank"));
        }
        let mut state = lock(&self.state).map_err(InviteRepositoryError::query)?;
        state.next_id += 1;
        let stored = Invite {
            id: InviteId::new(state.next_id),
            name: invite.name.clone(),
            email: invite.email.as_str().to_owned(),
            status: InviteStatus::Pending,
            invite_url: invite.invite_url.clone(),
            sent_at: None,
            rsvp_id: None,
            created_at: self.clock.utc(),
        };
        state.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Invite>, InviteRepositoryError> {
        let state = lock(&self.state).map_err(InviteRepositoryError::query)?;
        Ok(newest_first(&state.rows))
    }

    async fn find_by_ids(&self, ids: &[InviteId]) -> Result<Vec<Invite>, InviteRepositoryError> {
        let state = lock(&self.state).map_err(InviteRepositoryError::query)?;
        let matching: Vec<Invite> = state
            .rows
            .iter()
            .filter(|invite| ids.contains(&invite.id))
            .cloned()
            .collect();
        Ok(newest_first(&matching))
    }

    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Invite>, InviteRepositoryError> {
        let state = lock(&self.state).map_err(InviteRepositoryError::query)?;
        Ok(state
            .rows
            .iter()
            .filter(|invite| invite.email == email)
            .max_by_key(|invite| (invite.created_at, invite.id))
            .cloned())
    }

    async fn update_status(
        &self,
        id: InviteId,
        change: &StatusChange,
    ) -> Result<bool, InviteRepositoryError> {
        let mut state = lock(&self.state).map_err(InviteRepositoryError::query)?;
        Ok(state
            .rows
            .iter_mut()
            .find(|invite| invite.id == id)
            .is_some_and(|invite| invite.apply(change)))
    }

    async fn count_by_status(&self) -> Result<Vec<FieldCount>, InviteRepositoryError> {
        let state = lock(&self.state).map_err(InviteRepositoryError::query)?;
        Ok(InviteStatus::ALL
            .iter()
            .map(|status| {
                let count = state.rows.iter().filter(|i| i.status == *status).count();
                FieldCount::new(status.as_str(), count as u64)
            })
            .filter(|group| group.count > 0)
            .collect())
    }
}
