//! Numeric predictor, nominal target.
//!
//! Each class keeps a [`NumSeries`] of the predictor and its own observed
//! range. Candidate thresholds come from the range over all classes; at each
//! threshold a class whose values lie wholly on one side contributes its full
//! weight there, and only classes straddling the threshold are split with the
//! Gaussian [`NumSeries::estimate`].

use std::mem::size_of;

use crate::stats::{ClassDistribution, MinMax, NumSeries, TargetStats};
use crate::training::{Split, SplitCondition, SplitCriterion};
use crate::utils::is_valid_weight;

/// Per-class Gaussian approximation of one numeric predictor.
#[derive(Debug, Clone)]
pub struct GaussianClassObserver {
    /// Indexed by class.
    by_class: Vec<NumSeries>,
    /// Indexed by class.
    ranges: Vec<MinMax>,
    range: MinMax,
    n_splits: usize,
}

impl GaussianClassObserver {
    /// Observer producing `n_splits` candidate thresholds.
    pub fn new(n_splits: usize) -> Self {
        Self {
            by_class: Vec::new(),
            ranges: Vec::new(),
            range: MinMax::new(),
            n_splits,
        }
    }

    pub fn observe(&mut self, class: usize, value: Option<f64>, weight: f64) {
        let Some(value) = value else { return };
        if !is_valid_weight(weight) {
            return;
        }

        if class >= self.by_class.len() {
            self.by_class.resize(class + 1, NumSeries::new());
            self.ranges.resize(class + 1, MinMax::new());
        }
        self.by_class[class].append(value, weight);
        self.ranges[class].update(value);
        self.range.update(value);
    }

    /// Candidate thresholds over the observed range.
    pub fn split_points(&self) -> Vec<f64> {
        self.range.split_points(self.n_splits)
    }

    /// Weight observed for `class` with a non-missing value.
    pub fn class_weight(&self, class: usize) -> f64 {
        self.by_class.get(class).map_or(0.0, NumSeries::total_weight)
    }

    /// Gaussian density of `value` under the class's predictor summary.
    pub fn probability(&self, class: usize, value: Option<f64>) -> f64 {
        match (self.by_class.get(class), value) {
            (Some(series), Some(v)) => series.probability_density(v),
            _ => 0.0,
        }
    }

    /// Best binary split over the candidate thresholds. Earlier thresholds
    /// win ties.
    pub fn best_split(
        &self,
        criterion: &SplitCriterion,
        predictor: usize,
        pre: &TargetStats,
    ) -> Option<Split> {
        let mut best: Option<Split> = None;
        for threshold in self.split_points() {
            let (left, right) = self.partition(threshold);
            let post = vec![TargetStats::Classes(left), TargetStats::Classes(right)];
            let Some(merit) = criterion.merit(pre, &post) else {
                continue;
            };

            best = Split::keep_best(
                best,
                Split {
                    merit,
                    range: criterion.range(pre),
                    condition: SplitCondition::NumericBinary {
                        predictor,
                        threshold,
                    },
                    post_stats: post,
                },
            );
        }
        best
    }

    /// Estimated class votes at or below and above `threshold`.
    fn partition(&self, threshold: f64) -> (ClassDistribution, ClassDistribution) {
        let mut left = ClassDistribution::new();
        let mut right = ClassDistribution::new();

        for (class, (series, range)) in self.by_class.iter().zip(&self.ranges).enumerate() {
            let (Some(min), Some(max)) = (range.min(), range.max()) else {
                continue;
            };

            if max <= threshold {
                left.add(class, series.total_weight());
            } else if min > threshold {
                right.add(class, series.total_weight());
            } else {
                let est = series.estimate(threshold);
                left.add(class, est.at_or_below());
                right.add(class, est.greater_than);
            }
        }
        (left, right)
    }

    pub fn heap_size(&self) -> usize {
        size_of::<Self>()
            + self.by_class.capacity() * size_of::<NumSeries>()
            + self.ranges.capacity() * size_of::<MinMax>()
    }
}
