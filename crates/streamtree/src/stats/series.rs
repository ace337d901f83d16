//! Weighted streaming summary of a single numeric variable.

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::utils::{gaussian_density, normal_cdf};

// =============================================================================
// WeightEstimate
// =============================================================================

/// Approximate partition of a series' total weight around a value.
///
/// Produced by [`NumSeries::estimate`]; the three parts always add up to the
/// series' total weight (up to floating point error).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightEstimate {
    /// Weight estimated to lie strictly below the value.
    pub less_than: f64,
    /// Weight estimated to lie exactly at the value.
    pub equal_to: f64,
    /// Weight estimated to lie strictly above the value.
    pub greater_than: f64,
}

impl WeightEstimate {
    /// Weight on the `<=` side of a binary threshold.
    #[inline]
    pub fn at_or_below(&self) -> f64 {
        self.less_than + self.equal_to
    }
}

// =============================================================================
// NumSeries
// =============================================================================

/// Sufficient statistics (weight, sum, sum of squares) of a weighted numeric
/// series.
///
/// Raw values are never retained. Non-finite values and non-positive weights
/// are ignored, so the summary is always well defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumSeries {
    weight: f64,
    sum: f64,
    sum_squares: f64,
}

impl NumSeries {
    /// Create an empty series.
    pub const fn new() -> Self {
        Self {
            weight: 0.0,
            sum: 0.0,
            sum_squares: 0.0,
        }
    }

    /// Build a series from a slice of unit-weight values.
    pub fn from_values(values: &[f64]) -> Self {
        let mut series = Self::new();
        for &v in values {
            series.append(v, 1.0);
        }
        series
    }

    /// Add a weighted observation.
    ///
    /// No-op when `value` is NaN or infinite, or when `weight` is not a
    /// positive finite number.
    #[inline]
    pub fn append(&mut self, value: f64, weight: f64) {
        if !value.is_finite() || !weight.is_finite() || weight <= 0.0 {
            return;
        }

        let wv = weight * value;
        self.weight += weight;
        self.sum += wv;
        self.sum_squares += wv * value;
    }

    /// Fold another series into this one.
    pub fn merge(&mut self, other: &NumSeries) {
        self.weight += other.weight;
        self.sum += other.sum;
        self.sum_squares += other.sum_squares;
    }

    /// Return a copy with every accumulator multiplied by `factor`.
    ///
    /// Mean and variance are unchanged; only the total weight moves.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            weight: self.weight * factor,
            sum: self.sum * factor,
            sum_squares: self.sum_squares * factor,
        }
    }

    /// Total observed weight (the observation count for unit weights).
    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.weight
    }

    /// True if no weight has been observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weight <= 0.0
    }

    /// Weighted sum of all observed values.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Weighted mean, or 0 when empty.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.weight != 0.0 {
            self.sum / self.weight
        } else {
            0.0
        }
    }

    /// Weighted sum of squared deviations from the mean.
    #[inline]
    fn squared_deviations(&self) -> f64 {
        (self.sum_squares - self.sum * self.sum / self.weight).max(0.0)
    }

    /// Population variance, or 0 when empty.
    pub fn variance(&self) -> f64 {
        if self.weight > 0.0 {
            self.squared_deviations() / self.weight
        } else {
            0.0
        }
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Sample variance with Bessel's correction, or 0 while weight ≤ 1.
    pub fn sample_variance(&self) -> f64 {
        if self.weight > 1.0 {
            self.squared_deviations() / (self.weight - 1.0)
        } else {
            0.0
        }
    }

    /// Sample standard deviation.
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    /// Gaussian probability density of `value`, using the mean and the
    /// sample standard deviation.
    ///
    /// A series with positive weight but zero spread is treated as a spike:
    /// density 1 at the mean and 0 elsewhere. Empty series return 0.
    pub fn probability_density(&self, value: f64) -> f64 {
        if self.weight <= 0.0 {
            return 0.0;
        }

        let mean = self.mean();
        let std_dev = self.sample_std_dev();
        if std_dev > 0.0 {
            gaussian_density(value, mean, std_dev)
        } else if value == mean {
            1.0
        } else {
            0.0
        }
    }

    /// Estimate how the observed weight splits around `value`.
    ///
    /// `equal_to` is the density at `value` scaled by the total weight.
    /// With positive spread `less_than` follows the normal CDF of the
    /// z-score; without spread the whole mass sits on the side of `value`
    /// where the mean lies.
    pub fn estimate(&self, value: f64) -> WeightEstimate {
        let equal_to = self.probability_density(value) * self.weight;

        let mean = self.mean();
        let std_dev = self.sample_std_dev();
        let less_than = if std_dev > 0.0 {
            normal_cdf((value - mean) / std_dev) * self.weight - equal_to
        } else if value > mean {
            self.weight - equal_to
        } else {
            0.0
        };

        let greater_than = (self.weight - equal_to - less_than).max(0.0);
        WeightEstimate {
            less_than,
            equal_to,
            greater_than,
        }
    }
}

impl AbsDiffEq for NumSeries {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.weight.abs_diff_eq(&other.weight, epsilon)
            && self.sum.abs_diff_eq(&other.sum, epsilon)
            && self.sum_squares.abs_diff_eq(&other.sum_squares, epsilon)
    }
}

impl RelativeEq for NumSeries {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.weight.relative_eq(&other.weight, epsilon, max_relative)
            && self.sum.relative_eq(&other.sum, epsilon, max_relative)
            && self
                .sum_squares
                .relative_eq(&other.sum_squares, epsilon, max_relative)
    }
}
