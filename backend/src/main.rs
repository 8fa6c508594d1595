//! Backend entry-point: loads settings, selects storage and adapters, and
//! serves the RSVP API.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::server::{
    AppSettings, Collaborators, ServerConfig, Storage, build_http_state, create_server,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let clock: Arc<dyn mockable::Clock> = Arc::new(DefaultClock);
    let storage = build_storage(&settings, clock.clone()).await?;
    let collaborators = Collaborators::from_settings(&settings).map_err(io::Error::other)?;
    let http_state = build_http_state(storage, collaborators, clock);

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::from_session(session, bind_addr);
    info!(addr = %config.bind_addr(), "starting server");
    let server = create_server(health_state, http_state, config)?;
    server.await
}

async fn build_storage(settings: &AppSettings, clock: Arc<dyn mockable::Clock>) -> io::Result<Storage> {
    let Some(database_url) = settings.database_url.clone() else {
        warn!("RSVP_DATABASE_URL not set; using in-memory storage, data is lost on restart");
        return Ok(Storage::memory(clock));
    };

    if settings.skip_migrations {
        info!("skipping migrations");
    } else {
        let url = database_url.clone();
        tokio::task::spawn_blocking(move || run_pending_migrations(&url))
            .await
            .map_err(io::Error::other)?
            .map_err(io::Error::other)?;
    }

    let mut config = PoolConfig::new(database_url);
    if let Some(max_size) = settings.db_pool_max_size {
        config = config.with_max_size(max_size);
    }
    let pool = DbPool::new(config).await.map_err(io::Error::other)?;
    Ok(Storage::Database(pool))
}
