//! Attribute observers.
//!
//! A leaf keeps one observer per predictor. The variant depends on the
//! target kind (classification or regression) and the predictor kind
//! (nominal or numeric):
//!
//! | target \ predictor | nominal | numeric |
//! |---|---|---|
//! | nominal | [`NominalClassObserver`] | [`GaussianClassObserver`] |
//! | numeric | [`NominalRegressionObserver`] | [`NumericRegressionObserver`] |

mod gaussian_class;
mod nominal_class;
mod nominal_regression;
mod numeric_regression;

pub use gaussian_class::GaussianClassObserver;
pub use nominal_class::NominalClassObserver;
pub use nominal_regression::NominalRegressionObserver;
pub use numeric_regression::NumericRegressionObserver;

use crate::data::{AttributeKind, TargetValue, Value};
use crate::model::TreeConfig;
use crate::stats::TargetStats;

use super::{Split, SplitCriterion};

/// Sufficient statistics of one predictor within one leaf.
#[derive(Debug, Clone)]
pub enum Observer {
    NominalClass(NominalClassObserver),
    GaussianClass(GaussianClassObserver),
    NominalRegression(NominalRegressionObserver),
    NumericRegression(NumericRegressionObserver),
}

impl Observer {
    /// Create the observer matching a target/predictor kind pair.
    ///
    /// `seed` drives reservoir sampling in numeric regression observers and
    /// is ignored otherwise.
    pub fn for_attribute(
        target_kind: AttributeKind,
        predictor_kind: AttributeKind,
        config: &TreeConfig,
        seed: u64,
    ) -> Self {
        match (target_kind, predictor_kind) {
            (AttributeKind::Nominal, AttributeKind::Nominal) => {
                Observer::NominalClass(NominalClassObserver::new())
            }
            (AttributeKind::Nominal, AttributeKind::Numeric) => {
                Observer::GaussianClass(GaussianClassObserver::new(config.numeric_splits))
            }
            (AttributeKind::Numeric, AttributeKind::Nominal) => {
                Observer::NominalRegression(NominalRegressionObserver::new())
            }
            (AttributeKind::Numeric, AttributeKind::Numeric) => {
                Observer::NumericRegression(NumericRegressionObserver::new(
                    config.numeric_splits,
                    config.regression_buffer,
                    seed,
                ))
            }
        }
    }

    /// Record one `(target, predictor value, weight)` triple.
    ///
    /// Missing values, non-finite numbers and non-positive weights are
    /// ignored.
    #[inline]
    pub fn observe(&mut self, target: TargetValue, value: Value, weight: f64) {
        match (self, target) {
            (Observer::NominalClass(o), TargetValue::Class(c)) => {
                o.observe(c, value.as_nominal(), weight)
            }
            (Observer::GaussianClass(o), TargetValue::Class(c)) => {
                o.observe(c, value.as_numeric(), weight)
            }
            (Observer::NominalRegression(o), TargetValue::Numeric(y)) => {
                o.observe(y, value.as_nominal(), weight)
            }
            (Observer::NumericRegression(o), TargetValue::Numeric(y)) => {
                o.observe(y, value.as_numeric(), weight)
            }
            _ => debug_assert!(false, "target kind does not match observer"),
        }
    }

    /// Estimated likelihood of the predictor value given the target.
    ///
    /// Classification observers return `P(value | class)`; regression
    /// observers return the density of the target near the predictor value.
    pub fn probability(&self, target: TargetValue, value: Value) -> f64 {
        match (self, target) {
            (Observer::NominalClass(o), TargetValue::Class(c)) => {
                o.probability(c, value.as_nominal())
            }
            (Observer::GaussianClass(o), TargetValue::Class(c)) => {
                o.probability(c, value.as_numeric())
            }
            (Observer::NominalRegression(o), TargetValue::Numeric(y)) => {
                o.probability(y, value.as_nominal())
            }
            (Observer::NumericRegression(o), TargetValue::Numeric(y)) => {
                o.probability(y, value.as_numeric())
            }
            _ => 0.0,
        }
    }

    /// Weight observed for `class` with a non-missing value. Always zero for
    /// regression observers.
    pub fn class_weight(&self, class: usize) -> f64 {
        match self {
            Observer::NominalClass(o) => o.class_weight(class),
            Observer::GaussianClass(o) => o.class_weight(class),
            Observer::NominalRegression(_) | Observer::NumericRegression(_) => 0.0,
        }
    }

    /// Best valid split for this predictor, if any.
    pub fn best_split(
        &self,
        criterion: &SplitCriterion,
        predictor: usize,
        pre: &TargetStats,
    ) -> Option<Split> {
        match self {
            Observer::NominalClass(o) => o.best_split(criterion, predictor, pre),
            Observer::GaussianClass(o) => o.best_split(criterion, predictor, pre),
            Observer::NominalRegression(o) => o.best_split(criterion, predictor, pre),
            Observer::NumericRegression(o) => o.best_split(criterion, predictor, pre),
        }
    }

    /// Approximate memory footprint in bytes. Never decreases.
    pub fn heap_size(&self) -> usize {
        match self {
            Observer::NominalClass(o) => o.heap_size(),
            Observer::GaussianClass(o) => o.heap_size(),
            Observer::NominalRegression(o) => o.heap_size(),
            Observer::NumericRegression(o) => o.heap_size(),
        }
    }
}
