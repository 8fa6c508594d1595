//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and contain
//! no business rules. Rows and table definitions stay private to this
//! module; every database failure is mapped onto the port's error type.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselInviteRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rsvp")).await?;
//! let invites = DieselInviteRepository::new(pool);
//! # let _ = invites;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_invite_repository;
mod diesel_rsvp_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_invite_repository::DieselInviteRepository;
pub use diesel_rsvp_repository::DieselRsvpRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
