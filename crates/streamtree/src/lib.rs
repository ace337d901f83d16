//! streamtree: Hoeffding decision trees for data streams.
//!
//! Trees are grown one instance at a time, never retaining the stream. Each
//! leaf keeps approximate sufficient statistics per predictor and splits once
//! the Hoeffding bound shows, with confidence `1 - δ`, that its best
//! candidate beats the runner-up. A byte budget caps the statistics kept by
//! active leaves.
//!
//! # Key Types
//!
//! - [`HoeffdingTree`] - train / predict / info
//! - [`TreeConfig`] - configuration builder
//! - [`Model`], [`Attribute`], [`Instance`] - what is learned and how
//!   observations are read
//!
//! # Example
//!
//! ```
//! use streamtree::testing::data::weather;
//! use streamtree::{HoeffdingTree, TreeConfig};
//!
//! let (model, instances) = weather();
//! let config = TreeConfig::builder().grace_period(5).build().unwrap();
//! let mut tree = HoeffdingTree::new(model, config).unwrap();
//!
//! for inst in &instances {
//!     tree.train(inst).unwrap();
//! }
//! let prediction = tree.predict(&instances[0]).unwrap();
//! assert!(prediction.class().is_some());
//! ```

// Re-export approx traits for users who want to compare statistics
pub use approx;

pub mod data;
pub mod model;
pub mod stats;
pub mod testing;
pub mod training;
pub mod tree;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{Attribute, AttributeKind, Instance, MapInstance, Model, RowInstance, SchemaError};
pub use model::{ConfigError, LeafPrediction, TreeConfig};
pub use stats::{ClassDistribution, NumSeries, TargetStats};
pub use training::{Split, SplitCondition, SplitCriterion, Verbosity};
pub use tree::{HoeffdingTree, LeafPromise, Prediction, TreeInfo};
