//! Instance access.
//!
//! The tree reads instances through the [`Instance`] trait. Two
//! implementations are provided: [`MapInstance`] keyed by attribute name and
//! [`RowInstance`], a dense `ndarray` row laid out like the [`Model`](super::Model)
//! columns (target first).

use std::collections::HashMap;

use ndarray::ArrayView1;

use super::schema::Attribute;
use super::value::RawValue;

// =============================================================================
// Instance
// =============================================================================

/// Read access to one observation.
pub trait Instance {
    /// Raw value of `attribute`, which occupies `column` in the model
    /// (column 0 is the target). `None` when the value is absent.
    fn get(&self, column: usize, attribute: &Attribute) -> Option<RawValue<'_>>;

    /// Instance weight. Defaults to 1.
    fn weight(&self) -> f64 {
        1.0
    }
}

impl<T: Instance + ?Sized> Instance for &T {
    fn get(&self, column: usize, attribute: &Attribute) -> Option<RawValue<'_>> {
        (**self).get(column, attribute)
    }

    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

// =============================================================================
// MapInstance
// =============================================================================

/// Owned value stored in a [`MapInstance`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapValue {
    /// Label or textual number.
    Text(String),
    /// Number (index for nominal attributes).
    Number(f64),
}

impl From<&str> for MapValue {
    fn from(s: &str) -> Self {
        MapValue::Text(s.to_string())
    }
}

impl From<String> for MapValue {
    fn from(s: String) -> Self {
        MapValue::Text(s)
    }
}

impl From<f64> for MapValue {
    fn from(v: f64) -> Self {
        MapValue::Number(v)
    }
}

/// An instance backed by a name → value map.
#[derive(Debug, Clone)]
pub struct MapInstance {
    values: HashMap<String, MapValue>,
    weight: f64,
}

impl Default for MapInstance {
    fn default() -> Self {
        Self::new()
    }
}

impl MapInstance {
    /// Create an empty unit-weight instance.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            weight: 1.0,
        }
    }

    /// Set a value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<MapValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set the instance weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl Instance for MapInstance {
    fn get(&self, _column: usize, attribute: &Attribute) -> Option<RawValue<'_>> {
        self.values.get(attribute.name()).map(|v| match v {
            MapValue::Text(s) => RawValue::Text(s),
            MapValue::Number(n) => RawValue::Number(*n),
        })
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

// =============================================================================
// RowInstance
// =============================================================================

/// A dense row of `f64` values in model column order.
///
/// Nominal values are stored as their index, missing values as NaN.
#[derive(Debug, Clone, Copy)]
pub struct RowInstance<'a> {
    row: ArrayView1<'a, f64>,
    weight: f64,
}

impl<'a> RowInstance<'a> {
    /// Wrap a row with unit weight.
    pub fn new(row: ArrayView1<'a, f64>) -> Self {
        Self { row, weight: 1.0 }
    }

    /// Set the instance weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl Instance for RowInstance<'_> {
    fn get(&self, column: usize, _attribute: &Attribute) -> Option<RawValue<'_>> {
        self.row.get(column).map(|&v| RawValue::Number(v))
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}
