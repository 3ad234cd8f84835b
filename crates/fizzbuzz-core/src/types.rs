//! Shared types used across fizzbuzz crates.

use serde::{Deserialize, Serialize};

/// One parameterized fizzbuzz request.
///
/// `int1` and `int2` accept any integer; `0` is a sentinel meaning "this
/// substitution rule never fires". `limit > 0` is guaranteed by the transport
/// layer before this type reaches the core.
///
/// The full 5-tuple is the identity used by the frequency ledger: two
/// requests count as the same only if all five fields match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FizzBuzzParams {
    pub int1: i64,
    pub int2: i64,
    pub limit: i64,
    pub str1: String,
    pub str2: String,
}
