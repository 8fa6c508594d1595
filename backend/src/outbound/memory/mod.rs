//! In-process repositories for local development and integration tests.
//!
//! Data lives for the lifetime of the process. Ordering, the terminal guard
//! and the write-once confirmation id behave as in the PostgreSQL adapters.

mod invite_repository;
mod rsvp_repository;

pub use invite_repository::InMemoryInviteRepository;
pub use rsvp_repository::InMemoryRsvpRepository;

use std::sync::{Mutex, MutexGuard};

fn lock<T>(state: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    state
        .lock()
        .map_err(|_| "in-memory store poisoned by a panicked writer".to_owned())
}
