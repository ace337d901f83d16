//! Candidate splits produced by attribute observers.

use crate::stats::TargetStats;

use super::SplitCondition;

/// A scored split candidate.
///
/// `post_stats` holds one entry per branch, in branch order; if the split is
/// committed these seed the child leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Criterion merit.
    pub merit: f64,
    /// Criterion range used to scale the Hoeffding bound.
    pub range: f64,
    /// Routing rule.
    pub condition: SplitCondition,
    /// Per-branch target statistics.
    pub post_stats: Vec<TargetStats>,
}

impl Split {
    /// Predictor index tested by the split.
    #[inline]
    pub fn predictor(&self) -> usize {
        self.condition.predictor()
    }

    /// Number of branches.
    #[inline]
    pub fn n_branches(&self) -> usize {
        self.post_stats.len()
    }

    /// Branch with the largest post-split weight (first on ties).
    pub fn heaviest_branch(&self) -> usize {
        let mut best = 0;
        let mut best_weight = f64::NEG_INFINITY;
        for (i, stats) in self.post_stats.iter().enumerate() {
            let w = stats.total_weight();
            if w > best_weight {
                best = i;
                best_weight = w;
            }
        }
        best
    }

    /// Keep whichever of two candidates has the higher merit. On equal merit
    /// the current one stays.
    pub(crate) fn keep_best(current: Option<Split>, candidate: Split) -> Option<Split> {
        match current {
            Some(best) if best.merit >= candidate.merit => Some(best),
            _ => Some(candidate),
        }
    }
}
