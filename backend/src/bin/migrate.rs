//! Apply pending database migrations and exit.
//!
//! # Examples
//! ```sh
//! RSVP_DATABASE_URL=postgres://localhost/rsvp cargo run --bin migrate
//! ```

use backend::outbound::persistence::run_pending_migrations;
use backend::server::AppSettings;
use ortho_config::OrthoConfig;
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let database_url = settings
        .database_url
        .ok_or_else(|| eyre!("RSVP_DATABASE_URL is required"))?;

    let applied = run_pending_migrations(&database_url).context("migration run failed")?;
    if applied.is_empty() {
        println!("database is up to date");
    } else {
        for version in applied {
            println!("applied {version}");
        }
    }
    Ok(())
}
