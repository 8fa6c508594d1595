use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{RsvpRepository, RsvpRepositoryError};
use crate::domain::{Attendance, FieldCount, NewRsvp, Rsvp, RsvpId};

use super::lock;

#[derive(Default)]
struct State {
    next_id: i64,
    rows: Vec<Rsvp>,
}

/// RSVP storage held in a mutex-guarded vector.
#[derive(Clone)]
pub struct InMemoryRsvpRepository {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryRsvpRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryRsvpRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }
}

#[async_trait]
impl RsvpRepository for InMemoryRsvpRepository {
    async fn insert(&self, rsvp: &NewRsvp) -> Result<Rsvp, RsvpRepositoryError> {
        if rsvp.name.trim().is_empty() {
            return Err(RsvpRepositoryError::constraint("rsvps_name_not_blank"));
        }
        if rsvp.email.trim().is_empty() {
            return Err(RsvpRepositoryError::constraint("rsvps_email_not_blank"));
        }
        let mut state = lock(&self.state).map_err(RsvpRepositoryError::query)?;
        state.next_id += 1;
        let now = self.clock.utc();
        let stored = Rsvp {
            id: RsvpId::new(state.next_id),
            name: rsvp.name.clone(),
            email: rsvp.email.clone(),
            attendance: rsvp.attendance,
            dietary_requirements: rsvp.dietary_requirements.clone(),
            confirmation_id: rsvp.confirmation_id.clone(),
            rsvp_date: now,
            created_at: now,
        };
        state.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Rsvp>, RsvpRepositoryError> {
        let state = lock(&self.state).map_err(RsvpRepositoryError::query)?;
        let mut rows = state.rows.clone();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn count_by_attendance(&self) -> Result<Vec<FieldCount>, RsvpRepositoryError> {
        let state = lock(&self.state).map_err(RsvpRepositoryError::query)?;
        Ok(Attendance::ALL
            .iter()
            .map(|answer| {
                let count = state.rows.iter().filter(|r| r.attendance == *answer).count();
                FieldCount::new(answer.as_str(), count as u64)
            })
            .filter(|group| group.count > 0)
            .collect())
    }

    async fn attach_confirmation_id(
        &self,
        id: RsvpId,
        confirmation_id: &str,
    ) -> Result<bool, RsvpRepositoryError> {
        let mut state = lock(&self.state).map_err(RsvpRepositoryError::query)?;
        match state
            .rows
            .iter_mut()
            .find(|rsvp| rsvp.id == id && rsvp.confirmation_id.is_none())
        {
            Some(rsvp) => {
                rsvp.confirmation_id = Some(confirmation_id.to_owned());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn new_rsvp(email: &str, attendance: Attendance) -> NewRsvp {
        NewRsvp {
            name: "Alex Lee".to_owned(),
            email: email.to_owned(),
            attendance,
            dietary_requirements: None,
            confirmation_id: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn confirmation_id_is_write_once() {
        let repo = InMemoryRsvpRepository::default();
        let rsvp = repo
            .insert(&new_rsvp("alex@example.com", Attendance::Yes))
            .await
            .expect("insert");

        assert!(repo.attach_confirmation_id(rsvp.id, "first").await.expect("attach"));
        assert!(!repo.attach_confirmation_id(rsvp.id, "second").await.expect("attach"));
        let stored = repo.list().await.expect("list");
        assert_eq!(stored[0].confirmation_id.as_deref(), Some("first"));
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_submissions_are_all_kept() {
        let repo = InMemoryRsvpRepository::default();
        repo.insert(&new_rsvp("alex@example.com", Attendance::Yes))
            .await
            .expect("insert");
        repo.insert(&new_rsvp("alex@example.com", Attendance::No))
            .await
            .expect("insert");

        let counts = repo.count_by_attendance().await.expect("counts");
        assert_eq!(
            counts,
            vec![FieldCount::new("yes", 1), FieldCount::new("no", 1)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn blank_email_is_a_constraint_error() {
        let repo = InMemoryRsvpRepository::default();
        let err = repo
            .insert(&new_rsvp(" ", Attendance::Yes))
            .await
            .expect_err("blank email rejected");
        assert!(matches!(err, RsvpRepositoryError::Constraint { .. }));
        assert!(repo.list().await.expect("list").is_empty());
    }
}
