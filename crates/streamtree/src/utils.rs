//! Numerical helpers shared by the statistics, criteria and tree modules.
//!
//! Everything here is a pure function of its inputs; there is no global state.

// =============================================================================
// Constants
// =============================================================================

/// `sqrt(2π)`, the normalisation constant of the Gaussian density.
pub const SQRT_2PI: f64 = 2.506_628_274_631_000_7;

// =============================================================================
// Distributions
// =============================================================================

/// Standard normal cumulative distribution function `Φ(z)`.
///
/// Computed through the complementary error function so that the tails stay
/// accurate: `Φ(z) = erfc(-z / √2) / 2`.
#[inline]
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * libm::erfc(-z / std::f64::consts::SQRT_2)
}

/// Gaussian probability density at `value` for the given mean and standard
/// deviation. `std_dev` must be strictly positive.
#[inline]
pub fn gaussian_density(value: f64, mean: f64, std_dev: f64) -> f64 {
    let diff = value - mean;
    (-(diff * diff) / (2.0 * std_dev * std_dev)).exp() / (SQRT_2PI * std_dev)
}

// =============================================================================
// Information
// =============================================================================

/// Shannon entropy (base 2) of a weighted distribution.
///
/// Zero and negative entries contribute nothing (`0·log(0) = 0`). An empty
/// or all-zero distribution has entropy 0.
pub fn entropy(weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    if total <= 0.0 {
        return 0.0;
    }

    weights
        .iter()
        .filter(|&&w| w > 0.0)
        .map(|&w| {
            let p = w / total;
            -p * p.log2()
        })
        .sum()
}

/// True for weights that contribute to statistics: finite and positive.
#[inline]
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

// =============================================================================
// Hoeffding Bound
// =============================================================================

/// Hoeffding bound `ε = sqrt(R² · ln(1/δ) / (2n))`.
///
/// With probability `1 - δ` the true mean of a variable with range `R` lies
/// within `ε` of the mean observed over `n` samples. Returns `+∞` when no
/// weight has been observed yet.
#[inline]
pub fn hoeffding_bound(range: f64, confidence: f64, n: f64) -> f64 {
    if n <= 0.0 {
        return f64::INFINITY;
    }
    ((range * range * (1.0 / confidence).ln()) / (2.0 * n)).sqrt()
}
