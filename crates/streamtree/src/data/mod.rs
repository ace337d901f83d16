//! Schema collaborator interface.
//!
//! - [`Attribute`], [`AttributeKind`], [`Model`]: what is being learned
//! - [`Instance`]: read access to one observation ([`MapInstance`], [`RowInstance`])
//! - [`Value`], [`TargetValue`]: decoded values consumed by the tree
//! - [`SchemaError`]: decoding failures surfaced at the train/predict boundary

mod error;
mod instance;
mod schema;
mod value;

pub use error::SchemaError;
pub use instance::{Instance, MapInstance, MapValue, RowInstance};
pub use schema::{Attribute, AttributeKind, Model};
pub use value::{RawValue, TargetValue, Value};
