//! Numeric predictor, numeric target.
//!
//! Keeps a bounded reservoir of `(predictor, target, weight)` tuples. Once the
//! reservoir is full, new tuples replace random slots (uniform reservoir
//! sampling driven by a seeded generator, so runs are reproducible). The
//! predictor range is tracked over every observation, retained or not.
//!
//! Post-split summaries computed from the reservoir are scaled by
//! `observed weight / retained weight` so branch weights stay comparable to
//! the leaf's real weight.

use std::mem::size_of;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::stats::{MinMax, NumSeries, TargetStats};
use crate::training::{Split, SplitCondition, SplitCriterion};
use crate::utils::is_valid_weight;

/// A retained observation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tuple {
    value: f64,
    target: f64,
    weight: f64,
}

/// Reservoir-backed observer for one numeric predictor.
#[derive(Debug, Clone)]
pub struct NumericRegressionObserver {
    tuples: Vec<Tuple>,
    capacity: usize,
    seen: u64,
    observed_weight: f64,
    retained_weight: f64,
    range: MinMax,
    n_splits: usize,
    rng: Xoshiro256PlusPlus,
}

impl NumericRegressionObserver {
    /// Observer retaining at most `capacity` tuples and producing `n_splits`
    /// candidate thresholds.
    pub fn new(n_splits: usize, capacity: usize, seed: u64) -> Self {
        Self {
            tuples: Vec::new(),
            capacity: capacity.max(1),
            seen: 0,
            observed_weight: 0.0,
            retained_weight: 0.0,
            range: MinMax::new(),
            n_splits,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn observe(&mut self, target: f64, value: Option<f64>, weight: f64) {
        let Some(value) = value else { return };
        if !is_valid_weight(weight) || !target.is_finite() {
            return;
        }

        let tuple = Tuple {
            value,
            target,
            weight,
        };
        self.seen += 1;
        self.observed_weight += weight;
        self.range.update(value);

        if self.tuples.len() < self.capacity {
            self.tuples.push(tuple);
            self.retained_weight += weight;
            return;
        }

        let slot = self.rng.gen_range(0..self.seen);
        if let Ok(slot) = usize::try_from(slot) {
            if slot < self.capacity {
                self.retained_weight += weight - self.tuples[slot].weight;
                self.tuples[slot] = tuple;
            }
        }
    }

    /// Number of retained tuples.
    #[inline]
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Candidate thresholds over the observed range.
    pub fn split_points(&self) -> Vec<f64> {
        self.range.split_points(self.n_splits)
    }

    /// Gaussian density of `target` under the summary of retained tuples
    /// whose predictor lies within one candidate step of `value`.
    pub fn probability(&self, target: f64, value: Option<f64>) -> f64 {
        let Some(value) = value else { return 0.0 };
        let step = self.range.step(self.n_splits).unwrap_or(0.0);

        let mut local = NumSeries::new();
        for t in self.tuples.iter().filter(|t| (t.value - value).abs() <= step) {
            local.append(t.target, t.weight);
        }
        local.probability_density(target)
    }

    /// Best binary split over the candidate thresholds. Earlier thresholds
    /// win ties.
    pub fn best_split(
        &self,
        criterion: &SplitCriterion,
        predictor: usize,
        pre: &TargetStats,
    ) -> Option<Split> {
        let scale = self.scale();
        let mut best: Option<Split> = None;

        for threshold in self.split_points() {
            let mut left = NumSeries::new();
            let mut right = NumSeries::new();
            for t in &self.tuples {
                if t.value <= threshold {
                    left.append(t.target, t.weight);
                } else {
                    right.append(t.target, t.weight);
                }
            }

            let post = vec![
                TargetStats::Numeric(left.scaled(scale)),
                TargetStats::Numeric(right.scaled(scale)),
            ];
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

    /// Factor restoring reservoir weights to observed weights.
    fn scale(&self) -> f64 {
        if self.seen as usize <= self.capacity || self.retained_weight <= 0.0 {
            1.0
        } else {
            self.observed_weight / self.retained_weight
        }
    }

    pub fn heap_size(&self) -> usize {
        size_of::<Self>() + self.tuples.capacity() * size_of::<Tuple>()
    }
}
