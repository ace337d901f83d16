//! Weighted class-vote distributions.

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// Weighted vote count per class index.
///
/// The vector grows on demand, so a distribution built from a stream only
/// covers the classes seen so far. Missing trailing classes read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDistribution {
    votes: Vec<f64>,
}

impl ClassDistribution {
    /// Create an empty distribution.
    pub const fn new() -> Self {
        Self { votes: Vec::new() }
    }

    /// Create a distribution from explicit per-class weights.
    pub fn from_votes(votes: Vec<f64>) -> Self {
        Self { votes }
    }

    /// Add `weight` votes for `class`.
    ///
    /// Non-positive or non-finite weights are ignored.
    #[inline]
    pub fn add(&mut self, class: usize, weight: f64) {
        if !weight.is_finite() || weight <= 0.0 {
            return;
        }
        if class >= self.votes.len() {
            self.votes.resize(class + 1, 0.0);
        }
        self.votes[class] += weight;
    }

    /// Weight recorded for `class`.
    #[inline]
    pub fn get(&self, class: usize) -> f64 {
        self.votes.get(class).copied().unwrap_or(0.0)
    }

    /// Raw per-class weights.
    #[inline]
    pub fn votes(&self) -> &[f64] {
        &self.votes
    }

    /// Number of class slots (highest seen class index + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// True if no class slot exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Sum of all votes.
    pub fn total_weight(&self) -> f64 {
        self.votes.iter().sum()
    }

    /// Number of classes with positive weight.
    pub fn observed_classes(&self) -> usize {
        self.votes.iter().filter(|&&w| w > 0.0).count()
    }

    /// True when at most one class has positive weight.
    pub fn is_pure(&self) -> bool {
        self.observed_classes() < 2
    }

    /// Class with the most votes. Ties resolve to the lowest index.
    pub fn majority(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (class, &w) in self.votes.iter().enumerate() {
            if w > 0.0 && best.is_none_or(|(_, bw)| w > bw) {
                best = Some((class, w));
            }
        }
        best.map(|(class, _)| class)
    }

    /// Votes normalised to sum to 1. An empty distribution stays empty.
    pub fn normalized(&self) -> Vec<f64> {
        let total = self.total_weight();
        if total <= 0.0 {
            return vec![0.0; self.votes.len()];
        }
        self.votes.iter().map(|w| w / total).collect()
    }

    /// Approximate heap cost in bytes.
    pub fn heap_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.votes.capacity() * std::mem::size_of::<f64>()
    }
}

impl AbsDiffEq for ClassDistribution {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    /// Compares class by class, treating missing trailing slots as 0.
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        let n = self.len().max(other.len());
        (0..n).all(|c| self.get(c).abs_diff_eq(&other.get(c), epsilon))
    }
}
