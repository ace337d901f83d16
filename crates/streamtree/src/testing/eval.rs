//! Streaming evaluation scorers.
//!
//! Lightweight accumulators used by tests and benchmarks to score a tree on a
//! held-out continuation of a stream.

use crate::stats::NumSeries;

// =============================================================================
// Classification
// =============================================================================

/// Weighted confusion matrix with accuracy and Cohen's kappa.
#[derive(Debug, Clone)]
pub struct ClassificationScore {
    /// `confusion[actual][predicted]`.
    confusion: Vec<Vec<f64>>,
    total: f64,
}

impl ClassificationScore {
    pub fn new(n_classes: usize) -> Self {
        Self {
            confusion: vec![vec![0.0; n_classes]; n_classes],
            total: 0.0,
        }
    }

    /// Record one prediction. A missing prediction counts as wrong.
    pub fn add(&mut self, actual: usize, predicted: Option<usize>, weight: f64) {
        let n = self.confusion.len();
        if actual >= n || weight <= 0.0 {
            return;
        }
        self.total += weight;
        if let Some(p) = predicted.filter(|&p| p < n) {
            self.confusion[actual][p] += weight;
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    pub fn accuracy(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        let correct: f64 = (0..self.confusion.len()).map(|i| self.confusion[i][i]).sum();
        correct / self.total
    }

    /// Cohen's kappa: agreement corrected for chance.
    pub fn kappa(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        let n = self.confusion.len();
        let observed = self.accuracy();
        let chance: f64 = (0..n)
            .map(|c| {
                let actual: f64 = self.confusion[c].iter().sum();
                let predicted: f64 = self.confusion.iter().map(|row| row[c]).sum();
                (actual / self.total) * (predicted / self.total)
            })
            .sum();
        if chance >= 1.0 {
            return 0.0;
        }
        (observed - chance) / (1.0 - chance)
    }
}

// =============================================================================
// Regression
// =============================================================================

/// Squared-error accumulator with RMSE and R².
#[derive(Debug, Clone, Default)]
pub struct RegressionScore {
    squared_error: f64,
    actual: NumSeries,
}

impl RegressionScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, actual: f64, predicted: f64, weight: f64) {
        if !actual.is_finite() || !predicted.is_finite() || weight <= 0.0 {
            return;
        }
        let err = actual - predicted;
        self.squared_error += weight * err * err;
        self.actual.append(actual, weight);
    }

    pub fn total_weight(&self) -> f64 {
        self.actual.total_weight()
    }

    pub fn rmse(&self) -> f64 {
        let w = self.actual.total_weight();
        if w <= 0.0 {
            return 0.0;
        }
        (self.squared_error / w).sqrt()
    }

    /// Coefficient of determination against the mean of the actual values.
    pub fn r2(&self) -> f64 {
        let total = self.actual.variance() * self.actual.total_weight();
        if total <= 0.0 {
            return 0.0;
        }
        1.0 - self.squared_error / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_accuracy_and_kappa() {
        let mut score = ClassificationScore::new(2);
        for (a, p) in [(0, 0), (0, 0), (1, 1), (1, 0)] {
            score.add(a, Some(p), 1.0);
        }
        score.add(1, None, 1.0);

        assert_abs_diff_eq!(score.accuracy(), 0.6, epsilon = 1e-12);
        // p_e = 0.4 * 0.6 + 0.4 * 0.2; the missing prediction has no column
        assert_abs_diff_eq!(score.kappa(), (0.6 - 0.32) / 0.68, epsilon = 1e-12);
    }

    #[test]
    fn test_perfect_regression() {
        let mut score = RegressionScore::new();
        for v in [1.0, 2.0, 3.0] {
            score.add(v, v, 1.0);
        }
        assert_eq!(score.rmse(), 0.0);
        assert_abs_diff_eq!(score.r2(), 1.0);
    }

    #[test]
    fn test_mean_predictor_has_zero_r2() {
        let mut score = RegressionScore::new();
        for v in [1.0, 2.0, 3.0] {
            score.add(v, 2.0, 1.0);
        }
        assert_abs_diff_eq!(score.r2(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(score.rmse(), (2.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }
}
