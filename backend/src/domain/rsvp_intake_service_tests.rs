//! Tests for the RSVP intake service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::{Clock, MockClock};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    EmailSenderError, MockEmailSender, MockInviteRepository, MockRsvpRepository, NoOpEmailSender,
    SentEmail,
};
use crate::domain::{Attendance, ErrorCode, Invite, InviteId, NewRsvp, RsvpId};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 2, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now());
    Arc::new(clock)
}

fn submission(email: &str, attendance: &str) -> RsvpSubmission {
    RsvpSubmission {
        name: "Alex Lee".to_owned(),
        email: email.to_owned(),
        attendance: attendance.to_owned(),
        dietary_requirements: None,
    }
}

fn stored(id: i64, row: &NewRsvp) -> Rsvp {
    Rsvp {
        id: RsvpId::new(id),
        name: row.name.clone(),
        email: row.email.clone(),
        attendance: row.attendance,
        dietary_requirements: row.dietary_requirements.clone(),
        confirmation_id: row.confirmation_id.clone(),
        rsvp_date: now(),
        created_at: now(),
    }
}

fn sent_invite(id: i64) -> Invite {
    Invite {
        id: InviteId::new(id),
        name: "Alex Lee".to_owned(),
        email: "alex@example.com".to_owned(),
        status: InviteStatus::Sent,
        invite_url: None,
        sent_at: Some(now()),
        rsvp_id: None,
        created_at: now(),
    }
}

fn service(
    rsvps: MockRsvpRepository,
    invites: MockInviteRepository,
    email: Arc<dyn EmailSender>,
    clock: Arc<dyn Clock>,
) -> RsvpIntakeService<MockRsvpRepository, MockInviteRepository> {
    RsvpIntakeService::new(
        Arc::new(rsvps),
        InviteLifecycleManager::new(Arc::new(invites), clock),
        email,
        EventDetails::default(),
    )
}

#[rstest]
#[tokio::test]
async fn invalid_submission_has_no_side_effects(clock: Arc<dyn Clock>) {
    let mut rsvps = MockRsvpRepository::new();
    rsvps.expect_insert().times(0);
    let mut invites = MockInviteRepository::new();
    invites.expect_find_latest_by_email().times(0);
    let mut email = MockEmailSender::new();
    email.expect_send().times(0);

    let intake = service(rsvps, invites, Arc::new(email), clock);
    let err = intake
        .submit(submission("not-an-email", "maybe"))
        .await
        .expect_err("validation failure");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let fields = err.details().expect("details")["fields"]
        .as_array()
        .expect("fields")
        .len();
    assert_eq!(fields, 2);
}

#[rstest]
#[tokio::test]
async fn stores_sanitized_row_and_links_invite(clock: Arc<dyn Clock>) {
    let mut rsvps = MockRsvpRepository::new();
    rsvps
        .expect_insert()
        .withf(|row| {
            row.name == "Alex &lt;Lee&gt;"
                && row.email == "alex@example.com"
                && row.attendance == Attendance::Yes
        })
        .times(1)
        .returning(|row| Ok(stored(21, row)));
    let mut invites = MockInviteRepository::new();
    invites
        .expect_find_latest_by_email()
        .withf(|email| email.to_string() == "alex@example.com")
        .times(1)
        .return_once(|_| Ok(Some(sent_invite(4))));
    invites
        .expect_update_status()
        .withf(|id, change| {
            *id == InviteId::new(4)
                && change.status == InviteStatus::Responded
                && change.rsvp_id == Some(RsvpId::new(21))
        })
        .times(1)
        .return_once(|_, _| Ok(true));

    let intake = service(rsvps, invites, Arc::new(NoOpEmailSender), clock);
    let mut input = submission("  ALEX@example.com ", "yes");
    input.name = "Alex <Lee>".to_owned();
    let receipt = intake.submit(input).await.expect("accepted");

    assert_eq!(receipt.rsvp_id, RsvpId::new(21));
    assert_eq!(receipt.confirmation_id, None);
}

#[rstest]
#[tokio::test]
async fn email_failure_does_not_undo_rsvp(clock: Arc<dyn Clock>) {
    let mut rsvps = MockRsvpRepository::new();
    rsvps
        .expect_insert()
        .times(1)
        .returning(|row| Ok(stored(3, row)));
    rsvps.expect_attach_confirmation_id().times(0);
    let mut invites = MockInviteRepository::new();
    invites
        .expect_find_latest_by_email()
        .return_once(|_| Ok(None));
    let mut email = MockEmailSender::new();
    email
        .expect_send()
        .times(2)
        .returning(|_| Err(EmailSenderError::transport("connection reset")));

    let intake = service(rsvps, invites, Arc::new(email), clock)
        .with_organizer_email("organizer@example.com");
    let receipt = intake
        .submit(submission("guest@example.com", "no"))
        .await
        .expect("rsvp survives email failure");

    assert_eq!(receipt.rsvp_id, RsvpId::new(3));
    assert_eq!(receipt.confirmation_id, None);
}

#[rstest]
#[tokio::test]
async fn confirmation_id_is_attached_once(clock: Arc<dyn Clock>) {
    let mut rsvps = MockRsvpRepository::new();
    rsvps
        .expect_insert()
        .returning(|row| Ok(stored(8, row)));
    rsvps
        .expect_attach_confirmation_id()
        .withf(|id, confirmation| *id == RsvpId::new(8) && confirmation.to_string() == "msg_123")
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut invites = MockInviteRepository::new();
    invites
        .expect_find_latest_by_email()
        .return_once(|_| Ok(None));
    let mut email = MockEmailSender::new();
    email
        .expect_send()
        .withf(|message| message.to == "alex@example.com")
        .times(1)
        .return_once(|_| {
            Ok(SentEmail {
                id: Some("msg_123".to_owned()),
            })
        });

    let intake = service(rsvps, invites, Arc::new(email), clock);
    let receipt = intake
        .submit(submission("alex@example.com", "yes"))
        .await
        .expect("accepted");

    assert_eq!(receipt.confirmation_id.as_deref(), Some("msg_123"));
}

#[rstest]
#[tokio::test]
async fn storage_outage_is_service_unavailable(clock: Arc<dyn Clock>) {
    let mut rsvps = MockRsvpRepository::new();
    rsvps
        .expect_insert()
        .return_once(|_| Err(RsvpRepositoryError::connection("pool exhausted")));
    let mut invites = MockInviteRepository::new();
    invites.expect_find_latest_by_email().times(0);

    let intake = service(rsvps, invites, Arc::new(NoOpEmailSender), clock);
    let err = intake
        .submit(submission("alex@example.com", "yes"))
        .await
        .expect_err("storage failure");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn confirmation_uses_unescaped_address(clock: Arc<dyn Clock>) {
    let mut rsvps = MockRsvpRepository::new();
    rsvps
        .expect_insert()
        .withf(|row| row.email == "o&#x27;brien@example.com")
        .times(1)
        .returning(|row| Ok(stored(9, row)));
    rsvps.expect_attach_confirmation_id().times(0);
    let mut invites = MockInviteRepository::new();
    invites
        .expect_find_latest_by_email()
        .withf(|email| email.to_string() == "o'brien@example.com")
        .return_once(|_| Ok(None));
    let mut email = MockEmailSender::new();
    email
        .expect_send()
        .withf(|message| message.to == "o'brien@example.com")
        .times(1)
        .return_once(|_| Ok(SentEmail { id: None }));

    let intake = service(rsvps, invites, Arc::new(email), clock);
    let receipt = intake
        .submit(submission("O'Brien@example.com", "yes"))
        .await
        .expect("accepted");

    assert_eq!(receipt.rsvp_id, RsvpId::new(9));
}

#[rstest]
fn clones_without_cloneable_repositories(clock: Arc<dyn Clock>) {
    let intake = service(
        MockRsvpRepository::new(),
        MockInviteRepository::new(),
        Arc::new(NoOpEmailSender),
        clock,
    );
    let copy = intake.clone();
    assert_eq!(copy.event, intake.event);
}
