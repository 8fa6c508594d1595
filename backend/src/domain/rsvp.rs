//! RSVP records and the submission that produces them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email_address::EmailAddress;
use super::error::Error;
use super::sanitize::sanitize_text;
use super::validation::{
    FieldViolation, ValidationReport, validate_dietary, validate_email, validate_name,
};

/// System-assigned RSVP identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RsvpId(i64);

impl RsvpId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RsvpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attendance answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Yes,
    No,
}

impl Attendance {
    pub const ALL: [Attendance; 2] = [Attendance::Yes, Attendance::No];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an attendance value is neither `yes` nor `no`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attendance must be \"yes\" or \"no\", got {0:?}")]
pub struct UnknownAttendance(pub String);

impl FromStr for Attendance {
    type Err = UnknownAttendance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            other => Err(UnknownAttendance(other.to_owned())),
        }
    }
}

/// A stored RSVP. Text fields hold sanitized values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: RsvpId,
    pub name: String,
    pub email: String,
    pub attendance: Attendance,
    pub dietary_requirements: Option<String>,
    pub confirmation_id: Option<String>,
    pub rsvp_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Values for a new RSVP row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRsvp {
    pub name: String,
    pub email: String,
    pub attendance: Attendance,
    pub dietary_requirements: Option<String>,
    pub confirmation_id: Option<String>,
}

/// Raw RSVP form input as received from the public endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub name: String,
    pub email: String,
    pub attendance: String,
    #[serde(default)]
    pub dietary_requirements: Option<String>,
}

/// A submission that passed validation, not yet sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRsvp {
    pub name: String,
    pub email: EmailAddress,
    pub attendance: Attendance,
    pub dietary_requirements: Option<String>,
}

impl RsvpSubmission {
    /// Validate every field, reporting all failures together.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Attendance, RsvpSubmission};
    ///
    /// let submission = RsvpSubmission {
    ///     name: "Alex Lee".into(),
    ///     email: "Alex@Example.com".into(),
    ///     attendance: "yes".into(),
    ///     dietary_requirements: None,
    /// };
    /// let valid = submission.validate().expect("valid submission");
    /// assert_eq!(valid.email.as_str(), "alex@example.com");
    /// assert_eq!(valid.attendance, Attendance::Yes);
    /// ```
    pub fn validate(&self) -> Result<ValidRsvp, Error> {
        let mut report = ValidationReport::new();
        let name = report.check(validate_name("name", &self.name));
        let email = report.check(validate_email("email", &self.email));
        let attendance = report.check(self.attendance.parse::<Attendance>().map_err(|err| {
            FieldViolation {
                field: "attendance",
                code: "invalid_choice",
                message: err.to_string(),
            }
        }));
        let dietary = report.check(validate_dietary(
            "dietaryRequirements",
            self.dietary_requirements.as_deref(),
        ));

        match (name, email, attendance, dietary) {
            (Some(name), Some(email), Some(attendance), Some(dietary_requirements))
                if report.is_empty() =>
            {
                Ok(ValidRsvp {
                    name,
                    email,
                    attendance,
                    dietary_requirements,
                })
            }
            _ => Err(report.into_error()),
        }
    }
}

impl ValidRsvp {
    /// Sanitized row values ready for storage.
    pub fn to_new_rsvp(&self) -> NewRsvp {
        NewRsvp {
            name: sanitize_text(&self.name),
            email: sanitize_text(self.email.as_str()),
            attendance: self.attendance,
            dietary_requirements: self.dietary_requirements.as_deref().map(sanitize_text),
            confirmation_id: None,
        }
    }
}
