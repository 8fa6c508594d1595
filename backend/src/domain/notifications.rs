//! Plain notification emails sent around the invite lifecycle.
//!
//! Bodies are deliberately minimal HTML. Values from stored RSVPs are already
//! escaped; invite fields are escaped here.

use super::email_address::EmailAddress;
use super::invite::Invite;
use super::ports::OutgoingEmail;
use super::rsvp::{Attendance, Rsvp};
use super::sanitize::sanitize_text;

/// Event facts quoted in emails and summary exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub name: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            name: "RSVP".to_owned(),
            date: None,
            time: None,
            location: None,
        }
    }
}

impl EventDetails {
    fn details_html(&self) -> String {
        let mut html = String::new();
        for (label, value) in [
            ("Date", &self.date),
            ("Time", &self.time),
            ("Location", &self.location),
        ] {
            if let Some(value) = value {
                html.push_str(&format!(
                    "<p><strong>{label}:</strong> {}</p>",
                    sanitize_text(value)
                ));
            }
        }
        html
    }
}

fn attendance_phrase(attendance: Attendance) -> &'static str {
    match attendance {
        Attendance::Yes => "Yes, I will attend",
        Attendance::No => "No, I cannot attend",
    }
}

/// Confirmation sent back to the respondent at `recipient`.
///
/// The stored row carries the escaped address, so the caller passes the
/// validated one.
pub fn rsvp_confirmation(
    recipient: &EmailAddress,
    rsvp: &Rsvp,
    event: &EventDetails,
) -> OutgoingEmail {
    let event_name = sanitize_text(&event.name);
    let dietary = rsvp
        .dietary_requirements
        .as_deref()
        .map(|value| format!("<p><strong>Dietary requirements:</strong> {value}</p>"))
        .unwrap_or_default();
    OutgoingEmail {
        to: recipient.as_str().to_owned(),
        subject: format!("RSVP Confirmation - {}", event.name),
        html: format!(
            "<h1>{event_name}</h1><p>Dear {name},</p><p>Thank you for your RSVP.</p>\
             <p><strong>Attendance:</strong> {attendance}</p>{dietary}{details}",
            name = rsvp.name,
            attendance = attendance_phrase(rsvp.attendance),
            details = event.details_html(),
        ),
    }
}

/// Notice to the organizer that a response arrived.
pub fn organizer_notification(organizer: &str, rsvp: &Rsvp, event: &EventDetails) -> OutgoingEmail {
    let dietary = rsvp.dietary_requirements.as_deref().unwrap_or("none");
    OutgoingEmail {
        to: organizer.to_owned(),
        subject: format!("New RSVP - {} - {}", rsvp.name, event.name),
        html: format!(
            "<h2>New RSVP received</h2><p><strong>Name:</strong> {name}</p>\
             <p><strong>Email:</strong> {email}</p><p><strong>Attendance:</strong> {attendance}</p>\
             <p><strong>Dietary requirements:</strong> {dietary}</p>\
             <p><strong>RSVP date:</strong> {date}</p>",
            name = rsvp.name,
            email = rsvp.email,
            attendance = attendance_phrase(rsvp.attendance),
            date = rsvp.rsvp_date.format("%Y-%m-%d %H:%M UTC"),
        ),
    }
}

/// Invitation carrying the invitee's personal link.
pub fn invitation(invite: &Invite, event: &EventDetails) -> OutgoingEmail {
    let link = invite
        .invite_url
        .as_deref()
        .map(|url| format!("<p><a href=\"{}\">RSVP here</a></p>", sanitize_text(url)))
        .unwrap_or_default();
    OutgoingEmail {
        to: invite.email.clone(),
        subject: format!("You're invited - {}", event.name),
        html: format!(
            "<h1>{event_name}</h1><p>Dear {name},</p><p>You're invited.</p>{details}{link}",
            event_name = sanitize_text(&event.name),
            name = sanitize_text(&invite.name),
            details = event.details_html(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InviteId, InviteStatus, RsvpId};
    use chrono::Utc;
    use rstest::rstest;

    fn event() -> EventDetails {
        EventDetails {
            name: "Anniversary".to_owned(),
            date: Some("30 October".to_owned()),
            time: None,
            location: Some("Level 10".to_owned()),
        }
    }

    #[rstest]
    fn invitation_escapes_invitee_name() {
        let invite = Invite {
            id: InviteId::new(1),
            name: "<Pat>".to_owned(),
            email: "pat@example.com".to_owned(),
            status: InviteStatus::Pending,
            invite_url: Some("https://example.com/rsvp?name=Pat".to_owned()),
            sent_at: None,
            rsvp_id: None,
            created_at: Utc::now(),
        };
        let email = invitation(&invite, &event());
        assert_eq!(email.to, "pat@example.com");
        assert!(email.html.contains("&lt;Pat&gt;"));
        assert!(email.html.contains("Level 10"));
        assert!(!email.html.contains("<Pat>"));
    }

    #[rstest]
    fn confirmation_goes_to_respondent() {
        let now = Utc::now();
        let rsvp = Rsvp {
            id: RsvpId::new(4),
            name: "Alex".to_owned(),
            email: "alex@example.com".to_owned(),
            attendance: Attendance::No,
            dietary_requirements: None,
            confirmation_id: None,
            rsvp_date: now,
            created_at: now,
        };
        let recipient = EmailAddress::parse("alex@example.com").expect("valid email");
        let email = rsvp_confirmation(&recipient, &rsvp, &event());
        assert_eq!(email.to, "alex@example.com");
        assert!(email.subject.contains("Anniversary"));
        assert!(email.html.contains("No, I cannot attend"));

        let notice = organizer_notification("ops@example.com", &rsvp, &event());
        assert_eq!(notice.to, "ops@example.com");
        assert!(notice.subject.starts_with("New RSVP - Alex"));
    }
}
