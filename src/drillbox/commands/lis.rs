use crate::error::{DrillError, Result};

/// Length of the longest strictly increasing subsequence.
///
/// Patience sorting: `tails[k]` is the smallest tail of any increasing
/// subsequence of length `k + 1` seen so far. Each value replaces the first
/// tail that is `>=` it (lower bound), which is what makes equal values unable
/// to extend a run. An upper-bound search would count non-decreasing runs.
///
/// O(n log n) time, O(n) extra space.
pub fn lis_length(values: &[i64]) -> usize {
    let mut tails: Vec<i64> = Vec::with_capacity(values.len());
    for &x in values {
        let i = tails.partition_point(|&t| t < x);
        if i == tails.len() {
            tails.push(x);
        } else {
            tails[i] = x;
        }
    }
    tails.len()
}

/// Parse whitespace separated integers such as `"3 10 -2 1 20"`.
pub fn parse_integers(input: &str) -> Result<Vec<i64>> {
    input
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| DrillError::Validation(format!("not an integer: {:?}", token)))
        })
        .collect()
}
