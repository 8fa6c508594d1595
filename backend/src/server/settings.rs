//! Application settings loaded via OrthoConfig.
//!
//! Every value may come from CLI flags, `RSVP_*` environment variables or a
//! configuration file. Optional collaborators stay disabled while their
//! settings are absent.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{AdminCredentials, AdminSecret, EventDetails};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_INVITE_PATH: &str = "/rsvp";
const DEFAULT_EVENT_NAME: &str = "RSVP";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the RSVP backend.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RSVP")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without it an in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_max_size: Option<u32>,
    /// Skip embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Bcrypt hash of the admin password; wins over the plain value.
    pub admin_password_hash: Option<String>,
    /// Resend API key; enables outbound email.
    pub resend_api_key: Option<String>,
    /// Sender address for outbound email.
    pub email_from: Option<String>,
    /// Address notified of every accepted RSVP.
    pub organizer_email: Option<String>,
    /// Public site URL that invite links are built from.
    pub public_base_url: Option<String>,
    /// Path of the public RSVP form below the base URL.
    pub invite_path: Option<String>,
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub event_location: Option<String>,
    /// Endpoint receiving RSVP snapshots.
    pub snapshot_url: Option<String>,
    /// Bearer token for the snapshot endpoint.
    pub snapshot_token: Option<String>,
    /// Timeout for outbound HTTP calls, in seconds.
    pub http_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Address to bind, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    pub fn public_base_url(&self) -> &str {
        self.public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL)
    }

    pub fn invite_path(&self) -> &str {
        self.invite_path.as_deref().unwrap_or(DEFAULT_INVITE_PATH)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    /// Event facts used in emails and export file names.
    pub fn event(&self) -> EventDetails {
        EventDetails {
            name: self
                .event_name
                .clone()
                .unwrap_or_else(|| DEFAULT_EVENT_NAME.to_owned()),
            date: self.event_date.clone(),
            time: self.event_time.clone(),
            location: self.event_location.clone(),
        }
    }

    /// The admin account, when a username and a password or hash are set.
    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        let username = self.admin_username.clone()?;
        let secret = match (&self.admin_password_hash, &self.admin_password) {
            (Some(hash), _) => AdminSecret::Bcrypt(hash.clone()),
            (None, Some(password)) => AdminSecret::Plain(Zeroizing::new(password.clone())),
            (None, None) => return None,
        };
        Some(AdminCredentials { username, secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "RSVP_BIND_ADDR",
        "RSVP_DATABASE_URL",
        "RSVP_ADMIN_USERNAME",
        "RSVP_ADMIN_PASSWORD",
        "RSVP_ADMIN_PASSWORD_HASH",
        "RSVP_EVENT_NAME",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("rsvp-backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url.is_none());
        assert!(settings.admin_credentials().is_none());
        assert_eq!(settings.event().name, DEFAULT_EVENT_NAME);
        assert_eq!(settings.invite_path(), "/rsvp");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("RSVP_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("RSVP_DATABASE_URL", Some("postgres://localhost/rsvp".to_owned())),
            ("RSVP_ADMIN_USERNAME", Some("ops".to_owned())),
            ("RSVP_ADMIN_PASSWORD", Some("plain".to_owned())),
            ("RSVP_ADMIN_PASSWORD_HASH", None),
            ("RSVP_EVENT_NAME", Some("Autumn Gala".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/rsvp")
        );
        assert_eq!(settings.event().name, "Autumn Gala");
        let credentials = settings.admin_credentials().expect("credentials");
        assert_eq!(credentials.username, "ops");
        assert!(matches!(credentials.secret, AdminSecret::Plain(_)));
    }

    #[rstest]
    fn hash_wins_over_plain_password() {
        let settings = AppSettings {
            admin_username: Some("ops".to_owned()),
            admin_password: Some("plain".to_owned()),
            admin_password_hash: Some("$2b$04$placeholderplaceholderpl".to_owned()),
            ..AppSettings::default()
        };
        let credentials = settings.admin_credentials().expect("credentials");
        assert!(matches!(credentials.secret, AdminSecret::Bcrypt(_)));
    }

    #[rstest]
    fn username_without_secret_is_unconfigured() {
        let settings = AppSettings {
            admin_username: Some("ops".to_owned()),
            ..AppSettings::default()
        };
        assert!(settings.admin_credentials().is_none());
    }
}
