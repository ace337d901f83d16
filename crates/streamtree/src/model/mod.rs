//! Model configuration.
//!
//! - [`TreeConfig`]: every option of Hoeffding tree induction, built and
//!   validated through [`TreeConfig::builder`]
//! - [`ConfigError`]: validation failures
//! - [`LeafPrediction`]: classification leaf strategy

mod config;

pub use config::{ConfigError, LeafPrediction, TreeConfig};
