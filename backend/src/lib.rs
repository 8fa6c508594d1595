//! RSVP backend library.
//!
//! Hexagonal layout: [`domain`] owns entities, invite lifecycle rules and
//! the services behind the driving ports; [`inbound`] adapts HTTP requests
//! onto those ports; [`outbound`] implements the driven ports for
//! PostgreSQL, in-memory storage, email and snapshot delivery. [`server`]
//! wires everything together for the binaries and integration tests.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
