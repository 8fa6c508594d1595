//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for development and tests
//! - **email**: Resend HTTP email sender
//! - **snapshot**: HTTP snapshot sink for RSVP exports
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod email;
pub mod memory;
pub mod persistence;
pub mod snapshot;

/// Single-line, length-capped rendering of an error response body.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
