//! The Hoeffding tree.
//!
//! - [`HoeffdingTree`]: train / predict / info
//! - [`Node`], [`Leaf`], [`Branch`]: arena nodes addressed by [`NodeId`]
//! - [`LeafPromise`]: ranking used to deactivate leaves under memory pressure
//! - [`Prediction`], [`TreeInfo`]: outputs

mod hoeffding;
mod memory;
mod node;
mod prediction;

pub use hoeffding::HoeffdingTree;
pub use memory::LeafPromise;
pub use node::{Branch, Leaf, LeafState, Node, NodeId, ROOT};
pub use prediction::{Prediction, TreeInfo};
