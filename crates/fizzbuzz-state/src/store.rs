//! StatsStore — redb-backed frequency ledger.
//!
//! Each distinct parameter tuple owns one row; the upsert-with-increment
//! runs inside a single redb write transaction. redb serializes write
//! transactions, so concurrent identical requests cannot lose counts.
//! The store supports both on-disk and in-memory backends (the latter for
//! testing).

use std::path::Path;
use std::sync::Arc;

use fizzbuzz_core::FizzBuzzParams;
use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use crate::error::{StatsError, StatsResult};
use crate::ledger::FrequencyLedger;
use crate::tables::STATS;
use crate::types::FrequencyRecord;

/// Convert any `Display` error into a `StatsError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StatsError::$variant(e.to_string())
    };
}

/// Thread-safe frequency ledger backed by redb.
#[derive(Clone)]
pub struct StatsStore {
    db: Arc<Database>,
}

impl StatsStore {
    /// Open (or create) a persistent ledger at the given path.
    pub fn open(path: &Path) -> StatsResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "stats store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory ledger (for testing).
    pub fn open_in_memory() -> StatsResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory stats store opened");
        Ok(store)
    }

    /// Create the stats table if it doesn't exist yet.
    fn ensure_tables(&self) -> StatsResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(STATS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Number of distinct parameter tuples recorded.
    pub fn count(&self) -> StatsResult<u64> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(STATS).map_err(map_err!(Table))?;
        let mut n = 0;
        for entry in table.iter().map_err(map_err!(Read))? {
            entry.map_err(map_err!(Read))?;
            n += 1;
        }
        Ok(n)
    }
}

impl FrequencyLedger for StatsStore {
    fn record_occurrence(&self, params: &FizzBuzzParams) -> StatsResult<()> {
        let key = serde_json::to_string(params).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(STATS).map_err(map_err!(Table))?;
            let hits = match table.get(key.as_str()).map_err(map_err!(Read))? {
                Some(guard) => {
                    let existing: FrequencyRecord =
                        serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                    existing.hits + 1
                }
                None => 1,
            };
            let record = FrequencyRecord::new(params, hits);
            let value = serde_json::to_vec(&record).map_err(map_err!(Serialize))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, "occurrence recorded");
        Ok(())
    }

    fn most_frequent(&self) -> StatsResult<Option<FrequencyRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(STATS).map_err(map_err!(Table))?;
        let mut best: Option<FrequencyRecord> = None;
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let record: FrequencyRecord =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            // Strictly-greater keeps the first record at the maximum in key order.
            if best.as_ref().is_none_or(|b| record.hits > b.hits) {
                best = Some(record);
            }
        }
        Ok(best)
    }
}
