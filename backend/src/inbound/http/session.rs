//! Session helpers keeping handlers free of Actix session details.
//!
//! The authenticated operator is stored as an [`AdminIdentity`] in the signed
//! cookie session. Admin routes call [`SessionContext::require_admin`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AdminIdentity, AdminRole, Error};

pub(crate) const ADMIN_KEY: &str = "admin";

/// Newtype exposing the session operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated operator and rotate the session id.
    pub fn persist_admin(&self, identity: &AdminIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ADMIN_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The operator in the session, if any. Unreadable entries count as
    /// absent.
    pub fn admin(&self) -> Option<AdminIdentity> {
        match self.0.get::<AdminIdentity>(ADMIN_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable admin session entry");
                None
            }
        }
    }

    /// Require an admin session: `401` when absent, `403` for any other role.
    pub fn require_admin(&self) -> Result<AdminIdentity, Error> {
        let identity = self
            .admin()
            .ok_or_else(|| Error::unauthorized("login required"))?;
        match identity.role {
            AdminRole::Admin => Ok(identity),
        }
    }

    /// Drop every session entry and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    session.persist_admin(&AdminIdentity::admin("ops"))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/set-garbage",
                web::get().to(|session: Session| async move {
                    session
                        .insert(ADMIN_KEY, "not-an-identity")
                        .expect("set raw value");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/require",
                web::get().to(|session: SessionContext| async move {
                    let identity = session.require_admin()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(identity.username))
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_admin_identity() {
        let app = test::init_service(session_test_app()).await;
        let set = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "ops");
    }

    #[actix_web::test]
    async fn missing_admin_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_entry_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;
        let set = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-garbage").to_request(),
        )
        .await;
        let cookie = session_cookie(&set);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
