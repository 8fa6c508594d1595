//! Snapshot sink outbound adapters.

mod http_sink;

pub use http_sink::HttpSnapshotSink;
