//! Split machinery used while growing a tree.
//!
//! - [`SplitCriterion`]: merit and range of candidate splits
//! - [`SplitCondition`]: routing rule of a branch node
//! - [`Split`]: a scored candidate with its per-branch statistics
//! - [`observers`]: per-leaf, per-predictor sufficient statistics
//! - [`TrainingLogger`], [`Verbosity`]: training output

mod condition;
mod criterion;
mod logger;
pub mod observers;
mod split;

pub use condition::SplitCondition;
pub use criterion::{SplitCriterion, information_gain, variance_reduction};
pub use logger::{TrainingLogger, Verbosity};
pub use observers::Observer;
pub use split::Split;
