//! Range tracking for numeric split-point generation.

use serde::{Deserialize, Serialize};

/// Tracks the smallest and largest finite value of a stream.
///
/// Used by numeric observers to place a fixed number of evenly spaced
/// candidate thresholds strictly inside the observed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    min: f64,
    max: f64,
}

impl Default for MinMax {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMax {
    /// Create a tracker that has seen nothing.
    pub const fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Record a value. Non-finite values are ignored.
    #[inline]
    pub fn update(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// True once at least one finite value was recorded.
    #[inline]
    pub fn has_values(&self) -> bool {
        self.min <= self.max
    }

    /// Smallest recorded value.
    pub fn min(&self) -> Option<f64> {
        self.has_values().then_some(self.min)
    }

    /// Largest recorded value.
    pub fn max(&self) -> Option<f64> {
        self.has_values().then_some(self.max)
    }

    /// Distance between consecutive split points for `n` candidates, or
    /// `None` when the range is empty or collapsed to a single value.
    pub fn step(&self, n: usize) -> Option<f64> {
        if n == 0 || !self.has_values() || self.max <= self.min {
            return None;
        }
        Some((self.max - self.min) / (n + 1) as f64)
    }

    /// `n` evenly spaced thresholds `min + step * i` for `i = 1..=n`, or an
    /// empty vector when no range is known yet.
    pub fn split_points(&self, n: usize) -> Vec<f64> {
        let Some(step) = self.step(n) else {
            return Vec::new();
        };
        (1..=n).map(|i| self.min + step * i as f64).collect()
    }
}
