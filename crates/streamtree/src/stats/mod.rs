//! Streaming sufficient statistics.
//!
//! - [`NumSeries`]: weight / sum / sum-of-squares of a numeric variable
//! - [`ClassDistribution`]: weighted per-class votes
//! - [`TargetStats`]: either of the above, depending on the target kind
//! - [`MinMax`]: range tracker producing numeric split points

mod distribution;
mod minmax;
mod series;

pub use distribution::ClassDistribution;
pub use minmax::MinMax;
pub use series::{NumSeries, WeightEstimate};

use crate::data::TargetValue;

/// Aggregate statistics of a target variable.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetStats {
    /// Class votes (classification).
    Classes(ClassDistribution),
    /// Target summary (regression).
    Numeric(NumSeries),
}

impl TargetStats {
    /// Empty statistics for a classification or regression target.
    pub fn empty(classification: bool) -> Self {
        if classification {
            TargetStats::Classes(ClassDistribution::new())
        } else {
            TargetStats::Numeric(NumSeries::new())
        }
    }

    /// Record a weighted target value. Mismatched kinds are ignored.
    #[inline]
    pub fn observe(&mut self, target: TargetValue, weight: f64) {
        match (self, target) {
            (TargetStats::Classes(d), TargetValue::Class(c)) => d.add(c, weight),
            (TargetStats::Numeric(s), TargetValue::Numeric(v)) => s.append(v, weight),
            _ => debug_assert!(false, "target kind does not match statistics"),
        }
    }

    /// Total observed weight.
    pub fn total_weight(&self) -> f64 {
        match self {
            TargetStats::Classes(d) => d.total_weight(),
            TargetStats::Numeric(s) => s.total_weight(),
        }
    }

    /// True when splitting cannot improve purity: at most one class
    /// observed, or zero target variance.
    pub fn is_pure(&self) -> bool {
        match self {
            TargetStats::Classes(d) => d.is_pure(),
            TargetStats::Numeric(s) => s.variance() <= 0.0,
        }
    }

    /// Class distribution, if classification.
    pub fn as_classes(&self) -> Option<&ClassDistribution> {
        match self {
            TargetStats::Classes(d) => Some(d),
            TargetStats::Numeric(_) => None,
        }
    }

    /// Target summary, if regression.
    pub fn as_numeric(&self) -> Option<&NumSeries> {
        match self {
            TargetStats::Numeric(s) => Some(s),
            TargetStats::Classes(_) => None,
        }
    }
}

impl From<ClassDistribution> for TargetStats {
    fn from(d: ClassDistribution) -> Self {
        TargetStats::Classes(d)
    }
}

impl From<NumSeries> for TargetStats {
    fn from(s: NumSeries) -> Self {
        TargetStats::Numeric(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_stats_observe() {
        let mut cls = TargetStats::empty(true);
        cls.observe(TargetValue::Class(1), 2.0);
        cls.observe(TargetValue::Class(0), 1.0);
        assert_eq!(cls.total_weight(), 3.0);
        assert!(!cls.is_pure());

        let mut reg = TargetStats::empty(false);
        reg.observe(TargetValue::Numeric(4.0), 1.0);
        assert!(reg.is_pure());
        reg.observe(TargetValue::Numeric(6.0), 1.0);
        assert!(!reg.is_pure());
        assert_eq!(reg.as_numeric().map(NumSeries::mean), Some(5.0));
    }

    #[test]
    fn test_zero_weight_is_noop() {
        let mut reg = TargetStats::empty(false);
        reg.observe(TargetValue::Numeric(4.0), 1.0);
        let before = reg.clone();
        reg.observe(TargetValue::Numeric(100.0), 0.0);
        assert_eq!(reg, before);
    }
}
