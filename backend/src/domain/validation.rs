//! Field-level validation shared by the RSVP and invite inputs.
//!
//! Every failing field is collected before anything is reported so callers
//! see the full list in one response.

use serde::Serialize;
use serde_json::json;

use super::email_address::{EmailAddress, EmailValidationError};
use super::error::Error;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const DIETARY_MAX_LEN: usize = 500;

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub code: &'static str,
    pub message: String,
}

/// Accumulates [`FieldViolation`]s across a payload.
#[derive(Debug, Default)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            code,
            message: message.into(),
        });
    }

    /// Record the outcome of a field check, returning the value on success.
    pub fn check<T>(&mut self, result: Result<T, FieldViolation>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.violations.push(violation);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Fold the collected violations into an `invalid_request` error.
    pub fn into_error(self) -> Error {
        Error::invalid_request("validation failed").with_details(json!({
            "fields": self.violations,
        }))
    }
}

/// Trim a name and check its length.
pub fn validate_name(field: &'static str, raw: &str) -> Result<String, FieldViolation> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < NAME_MIN_LEN {
        return Err(FieldViolation {
            field,
            code: "too_short",
            message: format!("name must be at least {NAME_MIN_LEN} characters"),
        });
    }
    if len > NAME_MAX_LEN {
        return Err(FieldViolation {
            field,
            code: "too_long",
            message: format!("name must be at most {NAME_MAX_LEN} characters"),
        });
    }
    Ok(trimmed.to_owned())
}

/// Normalize and validate an email address.
pub fn validate_email(field: &'static str, raw: &str) -> Result<EmailAddress, FieldViolation> {
    EmailAddress::parse(raw).map_err(|err| FieldViolation {
        field,
        code: match err {
            EmailValidationError::Empty => "missing",
            EmailValidationError::TooLong => "too_long",
            EmailValidationError::Malformed => "invalid_format",
        },
        message: err.to_string(),
    })
}

/// Optional free text bounded at [`DIETARY_MAX_LEN`]; blank becomes `None`.
pub fn validate_dietary(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<String>, FieldViolation> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > DIETARY_MAX_LEN {
        return Err(FieldViolation {
            field,
            code: "too_long",
            message: format!("dietary requirements must be at most {DIETARY_MAX_LEN} characters"),
        });
    }
    Ok(Some(value.to_owned()))
}
