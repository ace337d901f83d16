//! Nominal predictor, nominal target.

use std::mem::size_of;

use crate::stats::{ClassDistribution, TargetStats};
use crate::training::{Split, SplitCondition, SplitCriterion};
use crate::utils::is_valid_weight;

/// Per-value class votes for one nominal predictor.
#[derive(Debug, Clone, Default)]
pub struct NominalClassObserver {
    /// Indexed by predictor value.
    by_value: Vec<ClassDistribution>,
    /// Indexed by class; sums over all values.
    class_totals: ClassDistribution,
}

impl NominalClassObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, class: usize, value: Option<usize>, weight: f64) {
        let Some(value) = value else { return };
        if !is_valid_weight(weight) {
            return;
        }

        if value >= self.by_value.len() {
            self.by_value.resize_with(value + 1, ClassDistribution::new);
        }
        self.by_value[value].add(class, weight);
        self.class_totals.add(class, weight);
    }

    /// Number of predictor values observed with positive weight.
    pub fn distinct_values(&self) -> usize {
        self.by_value.iter().filter(|d| d.total_weight() > 0.0).count()
    }

    pub fn class_weight(&self, class: usize) -> f64 {
        self.class_totals.get(class)
    }

    /// Laplace-smoothed `P(value | class)`:
    /// `(count + 1) / (class_total + distinct_values)`.
    pub fn probability(&self, class: usize, value: Option<usize>) -> f64 {
        let count = value
            .and_then(|v| self.by_value.get(v))
            .map_or(0.0, |d| d.get(class));
        let denom = self.class_totals.get(class) + self.distinct_values() as f64;
        if denom <= 0.0 {
            return 0.0;
        }
        (count + 1.0) / denom
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
            .cloned()
            .map(TargetStats::Classes)
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
        size_of::<Self>()
            + self.by_value.iter().map(ClassDistribution::heap_size).sum::<usize>()
            + self.class_totals.heap_size()
    }
}
