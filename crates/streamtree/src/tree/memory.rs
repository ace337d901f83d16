//! Memory budget over active leaves.
//!
//! Every `memory_check_period` instances the tree sums the observer heap
//! estimates of its active leaves. Above `max_bytes`, the least promising
//! leaves are deactivated until the remaining estimate fits the budget.

use serde::{Deserialize, Serialize};

use crate::stats::TargetStats;

use super::node::{Leaf, NodeId};

/// Score ranking active leaves for deactivation. Lowest goes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafPromise {
    /// Error mass a split could still remove: misclassified weight for
    /// classification, `weight · std_dev` for regression.
    #[default]
    Error,
    /// Weight seen since the leaf was created.
    Weight,
}

impl LeafPromise {
    /// Promise of a leaf.
    pub fn score(&self, leaf: &Leaf) -> f64 {
        match self {
            LeafPromise::Error => match leaf.stats() {
                TargetStats::Classes(d) => {
                    let majority = d.majority().map_or(0.0, |c| d.get(c));
                    d.total_weight() - majority
                }
                TargetStats::Numeric(s) => s.total_weight() * s.std_dev(),
            },
            LeafPromise::Weight => leaf.observed().total_weight(),
        }
    }
}

/// Leaves to deactivate so that the remaining estimate fits `max_bytes`.
///
/// `active` holds `(node, promise, bytes)` per active leaf. Leaves are taken
/// in ascending promise order; equal promises go by node id.
pub(crate) fn select_for_deactivation(
    mut active: Vec<(NodeId, f64, usize)>,
    max_bytes: usize,
) -> Vec<NodeId> {
    let mut total: usize = active.iter().map(|&(_, _, bytes)| bytes).sum();
    if total <= max_bytes {
        return Vec::new();
    }

    active.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let mut selected = Vec::new();
    for (node, _, bytes) in active {
        if total <= max_bytes {
            break;
        }
        total = total.saturating_sub(bytes);
        selected.push(node);
    }
    selected
}
