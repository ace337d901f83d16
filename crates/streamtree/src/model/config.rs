//! Hoeffding tree configuration with builder pattern.
//!
//! [`TreeConfig`] collects every option that shapes tree growth and uses the
//! `bon` crate for builder generation with validation at build time.
//!
//! # Example
//!
//! ```
//! use streamtree::model::{LeafPrediction, TreeConfig};
//!
//! // All defaults
//! let config = TreeConfig::builder().build().unwrap();
//! assert_eq!(config.grace_period, 200);
//!
//! // Faster growth, Naive Bayes leaves
//! let config = TreeConfig::builder()
//!     .grace_period(50)
//!     .split_confidence(1e-4)
//!     .leaf_prediction(LeafPrediction::NaiveBayes)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::training::Verbosity;
use crate::tree::LeafPromise;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Grace period must be at least 1.
    #[error("grace_period must be at least 1")]
    InvalidGracePeriod,

    /// Split confidence must be in (0, 1).
    #[error("split_confidence must be in (0, 1), got {0}")]
    InvalidSplitConfidence(f64),

    /// Tie threshold must be non-negative.
    #[error("tie_threshold must be >= 0, got {0}")]
    InvalidTieThreshold(f64),

    /// Minimum branch fraction must be in [0, 0.5).
    #[error("min_branch_frac must be in [0, 0.5), got {0}")]
    InvalidMinBranchFrac(f64),

    /// At least one numeric candidate threshold is needed.
    #[error("numeric_splits must be at least 1")]
    InvalidNumericSplits,

    /// Regression observers must retain at least one tuple.
    #[error("regression_buffer must be at least 1")]
    InvalidRegressionBufferSize,

    /// Memory check period must be at least 1.
    #[error("memory_check_period must be at least 1")]
    InvalidMemoryCheckPeriod,
}

// =============================================================================
// LeafPrediction
// =============================================================================

/// How classification leaves turn their statistics into a prediction.
///
/// Regression leaves always predict the target mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafPrediction {
    /// Normalised class votes.
    #[default]
    MajorityClass,
    /// Class prior combined with every observer's `P(value | class)`.
    /// Falls back to class votes on inactive or empty leaves.
    NaiveBayes,
}

// =============================================================================
// TreeConfig
// =============================================================================

/// Configuration for Hoeffding tree induction.
///
/// # Structure
///
/// - **Growth**: grace period, split confidence, tie threshold
/// - **Splits**: minimum branch fraction, numeric candidate count,
///   regression reservoir size
/// - **Memory**: byte budget, check period, demotion promise
/// - **Prediction**: leaf prediction strategy
/// - **Reproducibility / Logging**: seed, verbosity
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default)]
pub struct TreeConfig {
    // === Growth ===
    /// Instances a leaf must see between split evaluations. Default: 200.
    #[builder(default = 200)]
    pub grace_period: u32,

    /// Probability of choosing the wrong split (δ). Default: 1e-7.
    #[builder(default = 1e-7)]
    pub split_confidence: f64,

    /// Bound below which near-tied candidates are split anyway. Default: 0.05.
    #[builder(default = 0.05)]
    pub tie_threshold: f64,

    // === Splits ===
    /// Minimum weight fraction for a branch to count. Default: 0.01.
    #[builder(default = 0.01)]
    pub min_branch_frac: f64,

    /// Candidate thresholds per numeric predictor. Default: 10.
    #[builder(default = 10)]
    pub numeric_splits: usize,

    /// Tuples retained per numeric regression observer. Default: 1000.
    #[builder(default = 1000)]
    pub regression_buffer: usize,

    // === Memory ===
    /// Budget over active-leaf observers, in bytes. Default: 32 MiB.
    #[builder(default = 32 * 1024 * 1024)]
    pub max_bytes: usize,

    /// Instances between memory budget checks. Default: 1000.
    #[builder(default = 1000)]
    pub memory_check_period: u32,

    /// Ranking used to pick leaves to deactivate. Default: `Error`.
    #[builder(default)]
    pub promise: LeafPromise,

    // === Prediction ===
    /// Leaf prediction strategy. Default: `MajorityClass`.
    #[builder(default)]
    pub leaf_prediction: LeafPrediction,

    // === Reproducibility ===
    /// Random seed. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,

    // === Logging ===
    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: tree_config_builder::IsComplete> TreeConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid.
    pub fn build(self) -> Result<TreeConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl TreeConfig {
    /// Validate the configuration.
    ///
    /// Called by the builder; call it directly on configs obtained some
    /// other way (e.g. deserialized).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grace_period == 0 {
            return Err(ConfigError::InvalidGracePeriod);
        }

        if !(self.split_confidence > 0.0 && self.split_confidence < 1.0) {
            return Err(ConfigError::InvalidSplitConfidence(self.split_confidence));
        }

        if !(self.tie_threshold >= 0.0) {
            return Err(ConfigError::InvalidTieThreshold(self.tie_threshold));
        }

        if !(self.min_branch_frac >= 0.0 && self.min_branch_frac < 0.5) {
            return Err(ConfigError::InvalidMinBranchFrac(self.min_branch_frac));
        }

        if self.numeric_splits == 0 {
            return Err(ConfigError::InvalidNumericSplits);
        }

        if self.regression_buffer == 0 {
            return Err(ConfigError::InvalidRegressionBufferSize);
        }

        if self.memory_check_period == 0 {
            return Err(ConfigError::InvalidMemoryCheckPeriod);
        }

        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

// =============================================================================
// Tests
// =============================================================================
