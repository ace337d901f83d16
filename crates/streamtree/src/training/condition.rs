//! Split conditions: instance → branch routing.

use std::fmt;

use crate::data::Value;

/// Decision rule held by a branch node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitCondition {
    /// One branch per nominal value; branch index = value index.
    NominalMultiway { predictor: usize, branches: usize },
    /// Two branches: `value <= threshold` goes to 0, anything larger to 1.
    NumericBinary { predictor: usize, threshold: f64 },
}

impl SplitCondition {
    /// Index of the predictor this condition tests.
    #[inline]
    pub fn predictor(&self) -> usize {
        match *self {
            SplitCondition::NominalMultiway { predictor, .. }
            | SplitCondition::NumericBinary { predictor, .. } => predictor,
        }
    }

    /// Number of branches the condition routes to.
    #[inline]
    pub fn n_branches(&self) -> usize {
        match *self {
            SplitCondition::NominalMultiway { branches, .. } => branches,
            SplitCondition::NumericBinary { .. } => 2,
        }
    }

    /// Branch for a decoded predictor row.
    ///
    /// Returns `None` when the value is missing, of the wrong kind, or a
    /// nominal value the split never saw. The caller picks the fallback.
    #[inline]
    pub fn branch(&self, row: &[Value]) -> Option<usize> {
        let value = row.get(self.predictor())?;
        match *self {
            SplitCondition::NominalMultiway { branches, .. } => {
                value.as_nominal().filter(|&i| i < branches)
            }
            SplitCondition::NumericBinary { threshold, .. } => {
                value.as_numeric().map(|v| usize::from(v > threshold))
            }
        }
    }
}

impl fmt::Display for SplitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitCondition::NominalMultiway { predictor, branches } => {
                write!(f, "x[{predictor}] in {branches} values")
            }
            SplitCondition::NumericBinary { predictor, threshold } => {
                write!(f, "x[{predictor}] <= {threshold}")
            }
        }
    }
}
