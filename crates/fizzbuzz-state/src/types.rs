//! Persisted types for the frequency ledger.

use fizzbuzz_core::FizzBuzzParams;
use serde::{Deserialize, Serialize};

/// One row of the ledger: a parameter tuple plus its occurrence count.
///
/// At most one record exists per distinct tuple; `hits` starts at 1 and
/// increases by exactly 1 on each repeated request. Records are never
/// deleted or decremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub int1: i64,
    pub int2: i64,
    pub limit: i64,
    pub str1: String,
    pub str2: String,
    pub hits: u64,
}

impl FrequencyRecord {
    /// Build a record for `params` with the given hit count.
    pub fn new(params: &FizzBuzzParams, hits: u64) -> Self {
        Self {
            int1: params.int1,
            int2: params.int2,
            limit: params.limit,
            str1: params.str1.clone(),
            str2: params.str2.clone(),
            hits,
        }
    }
}
