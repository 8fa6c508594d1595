//! Builders wiring adapters and domain services into [`HttpState`].

use std::sync::Arc;

use mockable::Clock;
use tracing::{error, info, warn};
use url::Url;

use crate::domain::ports::{
    EmailSender, InviteRepository, LoginService, NoOpEmailSender, NoOpSnapshotSink,
    RsvpRepository, SnapshotSink,
};
use crate::domain::{
    AdminQueryService, ConfiguredLoginService, EventDetails, InviteCommandService,
    InviteLifecycleManager, InviteLinkBuilder, RsvpIntakeService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::email::{RESEND_ENDPOINT, ResendEmailSender};
use crate::outbound::memory::{InMemoryInviteRepository, InMemoryRsvpRepository};
use crate::outbound::persistence::{DbPool, DieselInviteRepository, DieselRsvpRepository};
use crate::outbound::snapshot::HttpSnapshotSink;

use super::AppSettings;

/// Where invites and RSVPs are stored.
#[derive(Clone)]
pub enum Storage {
    Database(DbPool),
    Memory {
        invites: Arc<InMemoryInviteRepository>,
        rsvps: Arc<InMemoryRsvpRepository>,
    },
}

impl Storage {
    /// Fresh in-memory repositories sharing `clock`.
    pub fn memory(clock: Arc<dyn Clock>) -> Self {
        Self::Memory {
            invites: Arc::new(InMemoryInviteRepository::new(clock.clone())),
            rsvps: Arc::new(InMemoryRsvpRepository::new(clock)),
        }
    }
}

/// Failures turning settings into adapters.
#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    #[error("invalid URL in {setting}: {source}")]
    InvalidUrl {
        setting: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

fn parse_url(setting: &'static str, raw: &str) -> Result<Url, StateBuildError> {
    Url::parse(raw).map_err(|source| StateBuildError::InvalidUrl { setting, source })
}

/// Optional collaborators and static configuration shared by the services.
#[derive(Clone)]
pub struct Collaborators {
    pub login: Arc<dyn LoginService>,
    pub email: Arc<dyn EmailSender>,
    pub snapshot: Arc<dyn SnapshotSink>,
    pub event: EventDetails,
    pub links: InviteLinkBuilder,
    pub organizer_email: Option<String>,
}

impl Collaborators {
    /// Select real adapters where configured and no-op ones elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`StateBuildError`] for malformed URLs or when an HTTP client
    /// cannot be built.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, StateBuildError> {
        let credentials = settings.admin_credentials();
        if credentials.is_none() {
            error!("admin credentials are not configured; every login will be refused");
        }
        let login: Arc<dyn LoginService> = Arc::new(ConfiguredLoginService::new(credentials));

        let email: Arc<dyn EmailSender> = match (&settings.resend_api_key, &settings.email_from) {
            (Some(api_key), Some(from)) => {
                info!("email delivery enabled");
                Arc::new(ResendEmailSender::new(
                    parse_url("resend endpoint", RESEND_ENDPOINT)?,
                    api_key.clone(),
                    from.clone(),
                    settings.http_timeout(),
                )?)
            }
            (Some(_), None) => {
                warn!("RSVP_RESEND_API_KEY set without RSVP_EMAIL_FROM; email disabled");
                Arc::new(NoOpEmailSender)
            }
            _ => Arc::new(NoOpEmailSender),
        };

        let snapshot: Arc<dyn SnapshotSink> = match &settings.snapshot_url {
            Some(raw) => Arc::new(HttpSnapshotSink::new(
                parse_url("snapshot_url", raw)?,
                settings.snapshot_token.clone(),
                settings.http_timeout(),
            )?),
            None => Arc::new(NoOpSnapshotSink),
        };

        let links = InviteLinkBuilder::new(
            parse_url("public_base_url", settings.public_base_url())?,
            settings.invite_path(),
        );

        Ok(Self {
            login,
            email,
            snapshot,
            event: settings.event(),
            links,
            organizer_email: settings.organizer_email.clone(),
        })
    }
}

fn wire<I, R>(
    invites: Arc<I>,
    rsvps: Arc<R>,
    collaborators: Collaborators,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    I: InviteRepository + 'static,
    R: RsvpRepository + 'static,
{
    let Collaborators {
        login,
        email,
        snapshot,
        event,
        links,
        organizer_email,
    } = collaborators;
    let lifecycle = InviteLifecycleManager::new(invites.clone(), clock.clone());

    let mut intake = RsvpIntakeService::new(
        rsvps.clone(),
        lifecycle.clone(),
        email.clone(),
        event.clone(),
    );
    if let Some(organizer) = organizer_email {
        intake = intake.with_organizer_email(organizer);
    }
    let commands =
        InviteCommandService::new(invites.clone(), lifecycle, email, event.clone()).with_links(links);
    let admin = AdminQueryService::new(invites, rsvps, snapshot, clock, event);

    HttpState::new(
        login,
        Arc::new(intake),
        Arc::new(commands),
        Arc::new(admin),
    )
}

/// Assemble the handler state over `storage`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::server::{AppSettings, Collaborators, Storage, build_http_state};
/// use mockable::DefaultClock;
///
/// let collaborators = Collaborators::from_settings(&AppSettings::default()).expect("defaults");
/// let clock = Arc::new(DefaultClock);
/// let _state = build_http_state(Storage::memory(clock.clone()), collaborators, clock);
/// ```
pub fn build_http_state(
    storage: Storage,
    collaborators: Collaborators,
    clock: Arc<dyn Clock>,
) -> HttpState {
    match storage {
        Storage::Database(pool) => wire(
            Arc::new(DieselInviteRepository::new(pool.clone())),
            Arc::new(DieselRsvpRepository::new(pool)),
            collaborators,
            clock,
        ),
        Storage::Memory { invites, rsvps } => wire(invites, rsvps, collaborators, clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_select_no_op_collaborators() {
        let collaborators =
            Collaborators::from_settings(&AppSettings::default()).expect("defaults are valid");
        assert!(!collaborators.snapshot.target().configured);
        assert_eq!(collaborators.event.name, "RSVP");
    }

    #[rstest]
    fn snapshot_url_enables_http_sink() {
        let settings = AppSettings {
            snapshot_url: Some("https://sheets.example.com/hook".to_owned()),
            ..AppSettings::default()
        };
        let collaborators = Collaborators::from_settings(&settings).expect("valid settings");
        let target = collaborators.snapshot.target();
        assert!(target.configured);
        assert_eq!(
            target.location.as_deref(),
            Some("https://sheets.example.com/hook")
        );
    }

    #[rstest]
    #[case(AppSettings { snapshot_url: Some("not a url".to_owned()), ..AppSettings::default() })]
    #[case(AppSettings { public_base_url: Some("::".to_owned()), ..AppSettings::default() })]
    fn malformed_urls_are_rejected(#[case] settings: AppSettings) {
        let result = Collaborators::from_settings(&settings);
        assert!(matches!(result, Err(StateBuildError::InvalidUrl { .. })));
    }
}
