//! Split quality criteria.
//!
//! A criterion scores a candidate split (its *merit*) from the pre-split
//! target statistics and the per-branch post-split statistics, and reports
//! the *range* of that merit, which scales the Hoeffding bound.
//!
//! Branches holding less than `min_branch_frac` of the post-split weight do
//! not count: they are left out of the weighted average, and a split needs at
//! least two qualifying branches to be valid at all. For binary splits this
//! means both sides must qualify.

use serde::{Deserialize, Serialize};

use crate::stats::{ClassDistribution, NumSeries, TargetStats};
use crate::utils::entropy;

/// Split criterion, chosen by target kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SplitCriterion {
    /// Entropy reduction over class distributions (classification).
    InformationGain { min_branch_frac: f64 },
    /// Variance reduction over target summaries (regression).
    VarianceReduction { min_branch_frac: f64 },
}

impl SplitCriterion {
    /// The criterion matching a target kind.
    pub fn for_target(classification: bool, min_branch_frac: f64) -> Self {
        if classification {
            SplitCriterion::InformationGain { min_branch_frac }
        } else {
            SplitCriterion::VarianceReduction { min_branch_frac }
        }
    }

    /// Minimum weight fraction for a branch to count.
    #[inline]
    pub fn min_branch_frac(&self) -> f64 {
        match *self {
            SplitCriterion::InformationGain { min_branch_frac }
            | SplitCriterion::VarianceReduction { min_branch_frac } => min_branch_frac,
        }
    }

    /// Merit of a split, or `None` when fewer than two branches qualify or
    /// the statistics do not match the criterion.
    pub fn merit(&self, pre: &TargetStats, post: &[TargetStats]) -> Option<f64> {
        let frac = self.min_branch_frac();
        match (self, pre) {
            (SplitCriterion::InformationGain { .. }, TargetStats::Classes(pre)) => {
                let dists: Option<Vec<&ClassDistribution>> =
                    post.iter().map(TargetStats::as_classes).collect();
                information_gain(pre, &dists?, frac)
            }
            (SplitCriterion::VarianceReduction { .. }, TargetStats::Numeric(pre)) => {
                let series: Option<Vec<&NumSeries>> =
                    post.iter().map(TargetStats::as_numeric).collect();
                variance_reduction(pre, &series?, frac)
            }
            _ => None,
        }
    }

    /// Upper bound of the merit.
    ///
    /// `log2(#classes)` for information gain (at least 1), 1.0 for variance
    /// reduction, whose merits are normalised by the pre-split variance when
    /// the bound is applied.
    pub fn range(&self, pre: &TargetStats) -> f64 {
        match (self, pre) {
            (SplitCriterion::InformationGain { .. }, TargetStats::Classes(d)) => {
                (d.len().max(2) as f64).log2()
            }
            _ => 1.0,
        }
    }
}

// =============================================================================
// Criterion kernels
// =============================================================================

/// Mask of qualifying branches, or `None` if fewer than two qualify.
fn qualifying(weights: &[f64], min_branch_frac: f64) -> Option<Vec<bool>> {
    let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let mask: Vec<bool> = weights
        .iter()
        .map(|&w| w > 0.0 && w / total >= min_branch_frac)
        .collect();
    (mask.iter().filter(|&&q| q).count() >= 2).then_some(mask)
}

/// `entropy(pre) - Σ (w_i / W) · entropy(post_i)` over qualifying branches.
pub fn information_gain(
    pre: &ClassDistribution,
    post: &[&ClassDistribution],
    min_branch_frac: f64,
) -> Option<f64> {
    let weights: Vec<f64> = post.iter().map(|d| d.total_weight()).collect();
    let mask = qualifying(&weights, min_branch_frac)?;

    let mut total = 0.0;
    let mut weighted = 0.0;
    for ((dist, &w), _) in post.iter().zip(&weights).zip(&mask).filter(|(_, q)| **q) {
        total += w;
        weighted += w * entropy(dist.votes());
    }

    Some(entropy(pre.votes()) - weighted / total)
}

/// `variance(pre) - Σ (w_i / W) · variance(post_i)` over qualifying branches.
pub fn variance_reduction(
    pre: &NumSeries,
    post: &[&NumSeries],
    min_branch_frac: f64,
) -> Option<f64> {
    let weights: Vec<f64> = post.iter().map(|s| s.total_weight()).collect();
    let mask = qualifying(&weights, min_branch_frac)?;

    let mut total = 0.0;
    let mut weighted = 0.0;
    for ((series, &w), _) in post.iter().zip(&weights).zip(&mask).filter(|(_, q)| **q) {
        total += w;
        weighted += w * series.variance();
    }

    Some(pre.variance() - weighted / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cls(votes: &[f64]) -> TargetStats {
        TargetStats::Classes(ClassDistribution::from_votes(votes.to_vec()))
    }

    #[test]
    fn test_information_gain_weather_outlook() {
        let criterion = SplitCriterion::InformationGain { min_branch_frac: 0.1 };
        let pre = cls(&[9.0, 5.0]);
        let post = [cls(&[2.0, 3.0]), cls(&[4.0, 0.0]), cls(&[3.0, 2.0])];

        let merit = criterion.merit(&pre, &post).unwrap();
        assert_abs_diff_eq!(merit, 0.247, epsilon = 0.001);
        assert_abs_diff_eq!(criterion.range(&pre), 1.0);
        assert_abs_diff_eq!(criterion.range(&cls(&[3.0, 5.0, 4.0])), 1.585, epsilon = 0.001);
    }

    #[test]
    fn test_information_gain_needs_two_qualifying_branches() {
        let criterion = SplitCriterion::InformationGain { min_branch_frac: 0.1 };
        let pre = cls(&[50.0, 50.0]);

        // 1% branch is below the fraction: only one branch qualifies
        let post = [cls(&[1.0, 0.0]), cls(&[49.0, 50.0])];
        assert_eq!(criterion.merit(&pre, &post), None);

        // With three branches the small one is simply left out
        let post = [cls(&[1.0, 0.0]), cls(&[49.0, 0.0]), cls(&[0.0, 50.0])];
        let merit = criterion.merit(&pre, &post).unwrap();
        assert_abs_diff_eq!(merit, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_variance_reduction() {
        let criterion = SplitCriterion::VarianceReduction { min_branch_frac: 0.0 };
        let pre = NumSeries::from_values(&[1.0, 1.0, 5.0, 5.0]);
        let post = [
            TargetStats::Numeric(NumSeries::from_values(&[1.0, 1.0])),
            TargetStats::Numeric(NumSeries::from_values(&[5.0, 5.0])),
        ];

        let merit = criterion.merit(&TargetStats::Numeric(pre), &post).unwrap();
        assert_abs_diff_eq!(merit, 4.0, epsilon = 1e-12);
        assert_eq!(criterion.range(&TargetStats::Numeric(pre)), 1.0);
    }

    #[test]
    fn test_mismatched_statistics() {
        let criterion = SplitCriterion::VarianceReduction { min_branch_frac: 0.0 };
        assert_eq!(criterion.merit(&cls(&[1.0, 1.0]), &[cls(&[1.0]), cls(&[0.0, 1.0])]), None);
    }

    #[test]
    fn test_merit_is_deterministic() {
        let criterion = SplitCriterion::InformationGain { min_branch_frac: 0.01 };
        let pre = cls(&[3.0, 5.0, 4.0]);
        let post = [cls(&[3.0]), cls(&[0.0, 5.0, 4.0])];
        let a = criterion.merit(&pre, &post).unwrap();
        let b = criterion.merit(&pre, &post).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
        assert_abs_diff_eq!(a, 0.811, epsilon = 0.001);
    }
}
