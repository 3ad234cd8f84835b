//! fizzbuzz-metrics — observability for the fizzbuzz service.
//!
//! Tracks per-endpoint request and outcome counters and renders them in the
//! Prometheus text exposition format for a `/metrics` endpoint.
//!
//! The collector is a cloneable handle injected into the transport state,
//! not process-wide mutable globals.
//!
//! # Architecture
//!
//! ```text
//! RequestMetrics
//!   ├── record_request() ← called once per inbound request
//!   ├── record_outcome() ← called once per request with the result status
//!   └── snapshot() → per-job counter values
//!
//! Prometheus exposition
//!   └── render_prometheus() → text/plain for /metrics endpoint
//! ```

pub mod collector;
pub mod prometheus;

pub use collector::{JobSnapshot, Outcome, RequestMetrics};
pub use prometheus::render_prometheus;
