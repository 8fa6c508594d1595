//! Operator input for creating invites and the link each invite carries.

use serde::{Deserialize, Serialize};
use url::Url;

use super::email_address::EmailAddress;
use super::error::Error;
use super::validation::{ValidationReport, validate_email, validate_name};

/// Raw `{name, email}` pair supplied by an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub name: String,
    pub email: String,
}

/// An invite request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInviteRequest {
    pub name: String,
    pub email: EmailAddress,
}

impl InviteRequest {
    pub fn validate(&self) -> Result<ValidInviteRequest, Error> {
        let mut report = ValidationReport::new();
        let name = report.check(validate_name("name", &self.name));
        let email = report.check(validate_email("email", &self.email));
        match (name, email) {
            (Some(name), Some(email)) => Ok(ValidInviteRequest { name, email }),
            _ => Err(report.into_error()),
        }
    }
}

/// Builds the personalised link sent with each invitation.
///
/// # Examples
/// ```
/// use backend::domain::{EmailAddress, InviteLinkBuilder};
/// use url::Url;
///
/// let base = Url::parse("https://events.example.com").expect("url");
/// let links = InviteLinkBuilder::new(base, "/rsvp");
/// let email = EmailAddress::parse("alex@example.com").expect("email");
/// let link = links.build("Alex Lee", &email).expect("link");
/// assert_eq!(link, "https://events.example.com/rsvp?name=Alex+Lee&email=alex%40example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteLinkBuilder {
    base: Url,
    path: String,
}

impl InviteLinkBuilder {
    pub fn new(base: Url, path: impl Into<String>) -> Self {
        Self {
            base,
            path: path.into(),
        }
    }

    /// Join the configured path onto the base URL and append the invitee's
    /// name and email as query parameters.
    pub fn build(&self, name: &str, email: &EmailAddress) -> Result<String, url::ParseError> {
        let mut url = self.base.join(&self.path)?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("email", email.as_str());
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn validates_and_normalizes() {
        let request = InviteRequest {
            name: " Alex Lee ".to_owned(),
            email: "ALEX@example.com".to_owned(),
        };
        let valid = request.validate().expect("valid");
        assert_eq!(valid.name, "Alex Lee");
        assert_eq!(valid.email.as_str(), "alex@example.com");
    }

    #[rstest]
    fn reports_both_fields() {
        let request = InviteRequest {
            name: String::new(),
            email: "x".to_owned(),
        };
        let err = request.validate().expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let fields = err.details().expect("details")["fields"]
            .as_array()
            .map(Vec::len);
        assert_eq!(fields, Some(2));
    }

    #[rstest]
    fn link_encodes_special_characters() {
        let base = Url::parse("https://example.com/app/").expect("url");
        let links = InviteLinkBuilder::new(base, "20-years");
        let email = EmailAddress::parse("o'brien@example.com").expect("email");
        let link = links.build("Pat O'Brien & Co", &email).expect("link");
        assert_eq!(
            link,
            "https://example.com/app/20-years?name=Pat+O%27Brien+%26+Co&email=o%27brien%40example.com"
        );
    }
}
