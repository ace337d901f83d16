//! Prediction output and tree snapshots.

/// Output of [`HoeffdingTree::predict`](super::HoeffdingTree::predict).
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Class probabilities indexed by class. May be shorter than the target
    /// domain when trailing classes were never seen; those read as 0.
    Classes(Vec<f64>),
    /// Predicted target value.
    Value(f64),
}

impl Prediction {
    /// Most probable class, lowest index on ties. `None` for regression or
    /// when no class has positive probability.
    pub fn class(&self) -> Option<usize> {
        let Prediction::Classes(probs) = self else {
            return None;
        };

        let mut best: Option<(usize, f64)> = None;
        for (class, &p) in probs.iter().enumerate() {
            if p > 0.0 && best.is_none_or(|(_, bp)| p > bp) {
                best = Some((class, p));
            }
        }
        best.map(|(class, _)| class)
    }

    /// Probability of `class` (0 for regression).
    pub fn probability(&self, class: usize) -> f64 {
        match self {
            Prediction::Classes(probs) => probs.get(class).copied().unwrap_or(0.0),
            Prediction::Value(_) => 0.0,
        }
    }

    /// Predicted value, if regression.
    pub fn value(&self) -> Option<f64> {
        match *self {
            Prediction::Value(v) => Some(v),
            Prediction::Classes(_) => None,
        }
    }
}

/// Point-in-time structure summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeInfo {
    pub node_count: usize,
    pub active_leaf_count: usize,
    pub inactive_leaf_count: usize,
    /// Levels on the deepest path; a root-only tree has depth 1.
    pub max_depth: usize,
}

impl TreeInfo {
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.active_leaf_count + self.inactive_leaf_count
    }

    #[inline]
    pub fn branch_count(&self) -> usize {
        self.node_count - self.leaf_count()
    }
}
