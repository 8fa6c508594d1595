//! Login service backed by a single configured admin credential.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::LoginService;
use crate::domain::{AdminIdentity, Error, LoginCredentials};

/// The configured password, either verbatim or as a bcrypt hash.
#[derive(Clone)]
pub enum AdminSecret {
    Plain(Zeroizing<String>),
    Bcrypt(String),
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("AdminSecret::Plain(..)"),
            Self::Bcrypt(_) => f.write_str("AdminSecret::Bcrypt(..)"),
        }
    }
}

/// Configured admin account.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub secret: AdminSecret,
}

impl AdminSecret {
    fn matches(&self, password: &str) -> bool {
        match self {
            Self::Plain(expected) => expected.as_str() == password,
            Self::Bcrypt(hash) => match bcrypt::verify(password, hash.trim()) {
                Ok(matched) => matched,
                Err(error) => {
                    tracing::error!(%error, "configured admin password hash is unusable");
                    false
                }
            },
        }
    }
}

/// Checks credentials against the configured admin account.
///
/// With no account configured every attempt is refused.
///
/// # Examples
/// ```
/// use backend::domain::{AdminCredentials, AdminSecret, ConfiguredLoginService};
/// use zeroize::Zeroizing;
///
/// let service = ConfiguredLoginService::new(Some(AdminCredentials {
///     username: "ops".into(),
///     secret: AdminSecret::Plain(Zeroizing::new("s3cret".into())),
/// }));
/// # let _ = service;
/// ```
#[derive(Debug, Clone)]
pub struct ConfiguredLoginService {
    credentials: Option<AdminCredentials>,
}

impl ConfiguredLoginService {
    pub fn new(credentials: Option<AdminCredentials>) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error> {
        let Some(account) = self.credentials.as_ref() else {
            tracing::error!("admin login attempted but no admin credentials are configured");
            return Err(Error::unauthorized("invalid credentials"));
        };
        let username_ok = credentials.username() == account.username;
        let password_ok = account.secret.matches(credentials.password());
        if username_ok && password_ok {
            tracing::info!(username = %account.username, "admin login succeeded");
            Ok(AdminIdentity::admin(account.username.clone()))
        } else {
            tracing::warn!(username = %credentials.username(), "admin login rejected");
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn creds(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("credentials")
    }

    fn plain() -> ConfiguredLoginService {
        ConfiguredLoginService::new(Some(AdminCredentials {
            username: "ops".to_owned(),
            secret: AdminSecret::Plain(Zeroizing::new("s3cret".to_owned())),
        }))
    }

    fn hashed() -> ConfiguredLoginService {
        let hash = bcrypt::hash("s3cret", 4).expect("bcrypt hash");
        ConfiguredLoginService::new(Some(AdminCredentials {
            username: "ops".to_owned(),
            secret: AdminSecret::Bcrypt(hash),
        }))
    }

    #[rstest]
    #[case(plain())]
    #[case(hashed())]
    #[tokio::test]
    async fn accepts_matching_password(#[case] service: ConfiguredLoginService) {
        let identity = service
            .authenticate(&creds("ops", "s3cret"))
            .await
            .expect("authenticated");
        assert_eq!(identity, AdminIdentity::admin("ops"));
    }

    #[rstest]
    #[case(plain(), "ops", "wrong")]
    #[case(hashed(), "ops", "wrong")]
    #[case(plain(), "admin", "s3cret")]
    #[tokio::test]
    async fn rejects_mismatch(
        #[case] service: ConfiguredLoginService,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let err = service
            .authenticate(&creds(username, password))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_refuses_everyone() {
        let service = ConfiguredLoginService::new(None);
        let err = service
            .authenticate(&creds("admin", "password"))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_never_matches() {
        let service = ConfiguredLoginService::new(Some(AdminCredentials {
            username: "ops".to_owned(),
            secret: AdminSecret::Bcrypt("not-a-hash".to_owned()),
        }));
        assert!(service.authenticate(&creds("ops", "not-a-hash")).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn accepts_hash_from_node_bcrypt() {
        // `$2a$` hash of "s3cret" as produced by bcryptjs.
        let hash = bcrypt::hash("s3cret", 4)
            .expect("bcrypt hash")
            .replacen("$2b$", "$2a$", 1);
        let service = ConfiguredLoginService::new(Some(AdminCredentials {
            username: "ops".to_owned(),
            secret: AdminSecret::Bcrypt(hash),
        }));
        assert!(service.authenticate(&creds("ops", "s3cret")).await.is_ok());
    }
}
