//! Normalized email address used as invitee identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length of a normalized address.
pub const EMAIL_MAX_LEN: usize = 255;

/// Validation failures for [`EmailAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    #[error("email must not be empty")]
    Empty,
    #[error("email must be at most {EMAIL_MAX_LEN} characters")]
    TooLong,
    #[error("email address is not valid")]
    Malformed,
}

/// Trimmed, lower-cased, syntactically valid email address.
///
/// Two addresses refer to the same invitee exactly when their normalized
/// forms are equal.
///
/// # Examples
/// ```
/// use backend::domain::EmailAddress;
///
/// let email = EmailAddress::parse("  Alex@Example.COM ").expect("valid email");
/// assert_eq!(email.as_str(), "alex@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalize and validate a raw address.
    pub fn parse(raw: &str) -> Result<Self, EmailValidationError> {
        let normalized = normalize_email(raw);
        if normalized.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if normalized.chars().count() > EMAIL_MAX_LEN {
            return Err(EmailValidationError::TooLong);
        }
        if !is_well_formed(&normalized) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(normalized))
    }

    /// Borrow the normalized address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Trim and lower-case an address without validating it.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Syntax check via `email_address`, narrowed to a bare address whose
/// domain has at least two labels.
fn is_well_formed(address: &str) -> bool {
    let Ok(parsed) = address.parse::<::email_address::EmailAddress>() else {
        return false;
    };
    let bare = format!("{}@{}", parsed.local_part(), parsed.domain());
    bare == address && parsed.domain().contains('.')
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alex@example.com")]
    #[case("ALEX@EXAMPLE.COM")]
    #[case("  alex@example.com\t")]
    #[case("alex.lee+rsvp@mail.example.co.uk")]
    #[case("o'brien@example.com")]
    fn accepts_and_normalizes(#[case] raw: &str) {
        let email = EmailAddress::parse(raw).expect("valid email");
        assert_eq!(email.as_str(), raw.trim().to_lowercase());
    }

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("   ", EmailValidationError::Empty)]
    #[case("not-an-email", EmailValidationError::Malformed)]
    #[case("a@b", EmailValidationError::Malformed)]
    #[case("@example.com", EmailValidationError::Malformed)]
    #[case("a..b@example.com", EmailValidationError::Malformed)]
    #[case("a b@example.com", EmailValidationError::Malformed)]
    #[case("Alex <alex@example.com>", EmailValidationError::Malformed)]
    fn rejects_invalid(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(EmailAddress::parse(raw), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_address() {
        let raw = format!("{}@example.com", "a".repeat(250));
        assert_eq!(EmailAddress::parse(&raw), Err(EmailValidationError::TooLong));
    }

    #[rstest]
    fn deserialization_normalizes() {
        let email: EmailAddress =
            serde_json::from_str("\" Alex@Example.com \"").expect("deserialize");
        assert_eq!(email.as_str(), "alex@example.com");
    }
}
