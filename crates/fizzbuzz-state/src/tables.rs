//! redb table definitions for the frequency ledger.

use redb::TableDefinition;

/// Frequency records keyed by the JSON-serialized parameter tuple.
///
/// Struct field order is fixed, so the JSON encoding is deterministic and
/// two requests map to the same key exactly when all five fields match.
pub const STATS: TableDefinition<&str, &[u8]> = TableDefinition::new("stats");
