//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers depend on driving ports through [`state::HttpState`] and map
//! domain errors to responses via [`error`].

pub mod admin;
pub mod auth;
pub mod cache_control;
pub mod error;
pub mod export;
pub mod health;
pub mod invites;
pub mod rsvp;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` route.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(rsvp::submit_rsvp)
        .service(auth::login)
        .service(auth::logout)
        .service(export::export)
        .configure(invites::configure)
        .configure(admin::configure);
}
