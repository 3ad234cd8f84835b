//! fizzbuzz-state — the request-frequency ledger.
//!
//! Backed by [redb](https://docs.rs/redb), records one occurrence per
//! accepted fizzbuzz request, keyed by the full parameter tuple, and answers
//! "which tuple was requested most often".
//!
//! # Architecture
//!
//! Records are JSON-serialized into redb's `&[u8]` value column; the key is
//! the JSON serialization of the parameter tuple itself, so two requests
//! share a row exactly when all five fields match.
//!
//! The [`StatsStore`] is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`)
//! and can be shared across async tasks. The [`FrequencyLedger`] trait is the
//! seam the transport layer depends on; tests substitute it to simulate
//! storage failures.

pub mod error;
pub mod ledger;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StatsError, StatsResult};
pub use ledger::FrequencyLedger;
pub use store::StatsStore;
pub use types::FrequencyRecord;
