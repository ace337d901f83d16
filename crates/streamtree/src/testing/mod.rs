//! Test utilities: fixture datasets, seeded synthetic streams and
//! evaluation scorers.
//!
//! Public so integration tests and benchmarks can share them.

pub mod data;
pub mod eval;

/// Default absolute tolerance for floating point comparisons in tests.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Tolerance for values quoted to three decimals.
pub const LOOSE_TOLERANCE: f64 = 1e-3;

/// Assert two slices are element-wise equal within `epsilon`, treating
/// missing trailing entries as 0.
#[track_caller]
pub fn assert_votes_eq(actual: &[f64], expected: &[f64], epsilon: f64) {
    let len = actual.len().max(expected.len());
    for i in 0..len {
        let a = actual.get(i).copied().unwrap_or(0.0);
        let e = expected.get(i).copied().unwrap_or(0.0);
        assert!(
            (a - e).abs() <= epsilon,
            "entry {i}: {a} != {e} (epsilon {epsilon})\n  \
             actual:   {actual:?}\n  expected: {expected:?}"
        );
    }
}
