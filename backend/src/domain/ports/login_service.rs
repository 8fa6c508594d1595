//! Driving port for admin login.
//!
//! Handlers authenticate through this trait so tests can swap in a fixture
//! instead of configuring real credentials.

use async_trait::async_trait;

use crate::domain::{AdminIdentity, Error, LoginCredentials};

#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated operator.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error>;
}

/// Accepts `admin` / `password` only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            Ok(AdminIdentity::admin("admin"))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
