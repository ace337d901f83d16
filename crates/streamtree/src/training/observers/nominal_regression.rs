//! Nominal predictor, numeric target.

use std::mem::size_of;

use crate::stats::{NumSeries, TargetStats};
use crate::training::{Split, SplitCondition, SplitCriterion};
use crate::utils::is_valid_weight;

/// Target summary per value of one nominal predictor.
#[derive(Debug, Clone, Default)]
pub struct NominalRegressionObserver {
    /// Indexed by predictor value.
    by_value: Vec<NumSeries>,
}

impl NominalRegressionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, target: f64, value: Option<usize>, weight: f64) {
        let Some(value) = value else { return };
        if !is_valid_weight(weight) || !target.is_finite() {
            return;
        }

        if value >= self.by_value.len() {
            self.by_value.resize(value + 1, NumSeries::new());
        }
        self.by_value[value].append(target, weight);
    }

    /// Target summary for a predictor value.
    pub fn series(&self, value: usize) -> Option<&NumSeries> {
        self.by_value.get(value)
    }

    /// Gaussian density of `target` under the summary for `value`.
    pub fn probability(&self, target: f64, value: Option<usize>) -> f64 {
        value
            .and_then(|v| self.by_value.get(v))
            .map_or(0.0, |s| s.probability_density(target))
    }

    /// One multiway split over every value slot.
    pub fn best_split(
        &self,
        criterion: &SplitCriterion,
        predictor: usize,
        pre: &TargetStats,
    ) -> Option<Split> {
        let post: Vec<TargetStats> = self
            .by_value
            .iter()
            .copied()
            .map(TargetStats::Numeric)
            .collect();
        let merit = criterion.merit(pre, &post)?;

        Some(Split {
            merit,
            range: criterion.range(pre),
            condition: SplitCondition::NominalMultiway {
                predictor,
                branches: post.len(),
            },
            post_stats: post,
        })
    }

    pub fn heap_size(&self) -> usize {
        size_of::<Self>() + self.by_value.capacity() * size_of::<NumSeries>()
    }
}
