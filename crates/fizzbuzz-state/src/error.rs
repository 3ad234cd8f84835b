//! Error types for the frequency ledger.

use thiserror::Error;

/// Result type alias for ledger operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur during ledger operations.
///
/// Every variant is a storage failure carrying the underlying cause; the
/// variants exist so logs identify which storage step failed.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to open database: {0}")]
    Open(String),

    #[error("transaction error: {0}")]
    Transaction(String),

    #[error("table error: {0}")]
    Table(String),

    #[error("read error: {0}")]
    Read(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("deserialization error: {0}")]
    Deserialize(String),
}
