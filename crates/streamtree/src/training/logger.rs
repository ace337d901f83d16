//! Training progress logging.
//!
//! [`TrainingLogger`] filters events by [`Verbosity`] and forwards them to the
//! [`log`] facade, so applications choose the sink (env_logger, tracing, ...).

use serde::{Deserialize, Serialize};

/// Verbosity level for training output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Warnings only (memory pressure).
    Warning,
    /// Training start and committed splits.
    Info,
    /// Every split evaluation.
    Debug,
}

/// Emits training events at or below the configured verbosity.
#[derive(Debug, Clone, Copy)]
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// True if events at `level` are emitted.
    #[inline]
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    pub fn start_training(&self, target: &str, n_predictors: usize, classification: bool) {
        if self.enabled(Verbosity::Info) {
            let task = if classification { "classification" } else { "regression" };
            log::info!(
                target: "streamtree",
                "[train] {task} tree for '{target}' over {n_predictors} predictors"
            );
        }
    }

    pub fn log_split(
        &self,
        node: u32,
        depth: usize,
        predictor: &str,
        merit: f64,
        bound: f64,
        branches: usize,
    ) {
        if self.enabled(Verbosity::Info) {
            log::info!(
                target: "streamtree",
                "[split] node {node} (depth {depth}) on '{predictor}': \
                 merit={merit:.6} bound={bound:.6} branches={branches}"
            );
        }
    }

    pub fn log_no_split(&self, node: u32, weight: f64, gap: f64, bound: f64) {
        if self.enabled(Verbosity::Debug) {
            log::debug!(
                target: "streamtree",
                "[eval] node {node} after {weight:.1}: gap={gap:.6} bound={bound:.6}, no split"
            );
        }
    }

    pub fn log_demotion(&self, demoted: usize, bytes: usize, budget: usize) {
        if self.enabled(Verbosity::Warning) {
            log::warn!(
                target: "streamtree",
                "[memory] {bytes} bytes over budget {budget}, deactivated {demoted} leaves"
            );
        }
    }
}
