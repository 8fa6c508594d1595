//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{App, HttpResponse, test, web};

use crate::domain::AdminIdentity;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_config, query_config};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const TEST_LOGIN_PATH: &str = "/__test/login";

/// Session middleware for tests: fresh key per call, cookie named
/// `session`, `Secure` disabled for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

async fn test_login(session: SessionContext) -> ApiResult<HttpResponse> {
    session.persist_admin(&AdminIdentity::admin("ops"))?;
    Ok(HttpResponse::Ok().finish())
}

/// Serve `request` against `/api/v1` routes registered by `configure`.
///
/// With `as_admin`, an admin session is established first and its cookie
/// attached to the request.
pub async fn call_api(
    state: HttpState,
    configure: fn(&mut web::ServiceConfig),
    request: test::TestRequest,
    as_admin: bool,
) -> ServiceResponse<impl MessageBody> {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .wrap(test_session_middleware())
            .route(TEST_LOGIN_PATH, web::post().to(test_login))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;

    let request = if as_admin {
        let login = test::call_service(
            &app,
            test::TestRequest::post().uri(TEST_LOGIN_PATH).to_request(),
        )
        .await;
        request.cookie(session_cookie(&login))
    } else {
        request
    };
    test::call_service(&app, request.to_request()).await
}
