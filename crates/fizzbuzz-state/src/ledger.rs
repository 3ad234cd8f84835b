//! The ledger capability trait.

use fizzbuzz_core::FizzBuzzParams;

use crate::error::StatsResult;
use crate::types::FrequencyRecord;

/// Records request occurrences and answers the most-requested query.
///
/// The transport layer depends on this trait rather than a concrete store,
/// so tests can substitute a ledger that fails on demand.
pub trait FrequencyLedger: Send + Sync {
    /// Record one occurrence of `params`: insert a record with `hits = 1` if
    /// the tuple is unseen, otherwise increment the existing record by
    /// exactly 1. Must be atomic with respect to concurrent identical
    /// requests.
    fn record_occurrence(&self, params: &FizzBuzzParams) -> StatsResult<()>;

    /// The record with the maximum `hits` across the whole ledger, or `None`
    /// when the ledger is empty. Ties resolve to the storage's natural row
    /// order; any record at the maximum is an acceptable answer.
    fn most_frequent(&self) -> StatsResult<Option<FrequencyRecord>>;
}
