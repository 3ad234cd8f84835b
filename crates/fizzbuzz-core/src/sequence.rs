//! Pure sequence generation.
//!
//! Maps a [`FizzBuzzParams`] to the ordered list of output tokens. No I/O and
//! no error channel: given a positive `limit` the function is total and
//! deterministic.

use crate::types::FizzBuzzParams;

/// Generate the fizzbuzz sequence for positions `1..=limit`.
///
/// Each position emits `str1` when divisible by `int1`, `str2` when divisible
/// by `int2`, both concatenated (`str1` first) when divisible by both, and the
/// decimal position otherwise. A zero divisor disables its rule only: it is
/// replaced by `limit + 1` for the divisibility test, a value that never
/// divides any position in range.
///
/// The two rules are evaluated independently. When `int1 == int2 != 0` every
/// multiple of the shared value emits the concatenation, which is not what a
/// divisible-by-`int1*int2` rule would produce.
pub fn generate(params: &FizzBuzzParams) -> Vec<String> {
    let mut result = Vec::with_capacity(params.limit.max(0) as usize);

    if params.int1 == 0 && params.int2 == 0 {
        for i in 1..=params.limit {
            result.push(i.to_string());
        }
        return result;
    }

    let int1 = if params.int1 == 0 { params.limit + 1 } else { params.int1 };
    let int2 = if params.int2 == 0 { params.limit + 1 } else { params.int2 };

    for i in 1..=params.limit {
        let hit1 = i % int1 == 0;
        let hit2 = i % int2 == 0;
        result.push(match (hit1, hit2) {
            (true, true) => format!("{}{}", params.str1, params.str2),
            (true, false) => params.str1.clone(),
            (false, true) => params.str2.clone(),
            (false, false) => i.to_string(),
        });
    }
    result
}
