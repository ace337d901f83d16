//! Attribute and model declarations.
//!
//! A [`Model`] names one target attribute and an ordered list of predictors.
//! The tree only reads through this interface; it never mutates a schema.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::SchemaError;
use super::instance::Instance;
use super::value::{RawValue, TargetValue, Value};

// =============================================================================
// AttributeKind
// =============================================================================

/// Logical attribute kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Continuous numeric attribute.
    #[default]
    Numeric,
    /// Attribute drawn from a declared set of labels.
    Nominal,
}

impl AttributeKind {
    /// Returns true if this is a nominal attribute.
    #[inline]
    pub fn is_nominal(&self) -> bool {
        matches!(self, AttributeKind::Nominal)
    }
}

// =============================================================================
// Attribute
// =============================================================================

/// A named attribute with its kind and, for nominal attributes, its domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    values: Vec<String>,
}

impl Attribute {
    /// Declare a numeric attribute.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
            values: Vec::new(),
        }
    }

    /// Declare a nominal attribute over the given labels. A label's position
    /// is its value index.
    pub fn nominal<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Attribute name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute kind.
    #[inline]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Declared nominal labels (empty for numeric attributes).
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Index of a nominal label.
    pub fn value_index(&self, label: &str) -> Option<usize> {
        self.values.iter().position(|v| v == label)
    }

    /// Decode a raw value for this attribute.
    ///
    /// Absent values and NaN become [`Value::Missing`]. Nominal labels must
    /// belong to the declared domain; nominal numbers are read as indices.
    pub fn decode(&self, raw: Option<RawValue<'_>>) -> Result<Value, SchemaError> {
        let Some(raw) = raw else {
            return Ok(Value::Missing);
        };

        match (self.kind, raw) {
            (AttributeKind::Numeric, RawValue::Number(v)) if v.is_nan() => Ok(Value::Missing),
            (AttributeKind::Numeric, RawValue::Number(v)) => Ok(Value::Numeric(v)),
            (AttributeKind::Numeric, RawValue::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Value::Numeric)
                .map_err(|e| self.invalid(format!("'{s}' is not a number ({e})"))),
            (AttributeKind::Nominal, RawValue::Text(s)) => self
                .value_index(s)
                .map(Value::Nominal)
                .ok_or_else(|| SchemaError::UnknownValue {
                    attribute: self.name.clone(),
                    value: s.to_string(),
                }),
            (AttributeKind::Nominal, RawValue::Number(v)) => self.decode_index(v),
        }
    }

    /// Decode a raw value as a target.
    pub fn decode_target(&self, raw: Option<RawValue<'_>>) -> Result<TargetValue, SchemaError> {
        match self.decode(raw)? {
            Value::Nominal(i) => Ok(TargetValue::Class(i)),
            Value::Numeric(v) if v.is_finite() => Ok(TargetValue::Numeric(v)),
            Value::Numeric(v) => Err(self.invalid(format!("target must be finite, got {v}"))),
            Value::Missing => Err(SchemaError::MissingTarget(self.name.clone())),
        }
    }

    fn decode_index(&self, v: f64) -> Result<Value, SchemaError> {
        if v.is_nan() {
            return Ok(Value::Missing);
        }
        if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
            return Err(self.invalid(format!("{v} is not a nominal index")));
        }

        let index = v as usize;
        if !self.values.is_empty() && index >= self.values.len() {
            return Err(SchemaError::UnknownValue {
                attribute: self.name.clone(),
                value: index.to_string(),
            });
        }
        Ok(Value::Nominal(index))
    }

    fn invalid(&self, reason: String) -> SchemaError {
        SchemaError::InvalidValue {
            attribute: self.name.clone(),
            reason,
        }
    }
}

// =============================================================================
// Model
// =============================================================================

/// A target attribute plus its predictors.
///
/// Column 0 is the target, predictors follow in declaration order. Dense
/// instances use the same column layout.
#[derive(Clone, Debug)]
pub struct Model {
    target: Attribute,
    predictors: Vec<Attribute>,
    name_index: HashMap<String, usize>,
}

impl Model {
    /// Declare a model.
    ///
    /// # Errors
    ///
    /// Fails when there are no predictors or two attributes share a name.
    pub fn new(target: Attribute, predictors: Vec<Attribute>) -> Result<Self, SchemaError> {
        if predictors.is_empty() {
            return Err(SchemaError::NoPredictors);
        }

        let mut name_index = HashMap::with_capacity(predictors.len());
        for (i, p) in predictors.iter().enumerate() {
            if p.name() == target.name() || name_index.insert(p.name().to_string(), i).is_some() {
                return Err(SchemaError::DuplicateAttribute(p.name().to_string()));
            }
        }

        Ok(Self {
            target,
            predictors,
            name_index,
        })
    }

    /// The target attribute.
    #[inline]
    pub fn target(&self) -> &Attribute {
        &self.target
    }

    /// Look up a predictor by name.
    pub fn predictor(&self, name: &str) -> Option<&Attribute> {
        self.predictor_index(name).map(|i| &self.predictors[i])
    }

    /// Position of a predictor by name.
    pub fn predictor_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// All predictors in declaration order.
    #[inline]
    pub fn predictors(&self) -> &[Attribute] {
        &self.predictors
    }

    /// Number of predictors.
    #[inline]
    pub fn n_predictors(&self) -> usize {
        self.predictors.len()
    }

    /// True when the target is nominal.
    #[inline]
    pub fn is_classification(&self) -> bool {
        self.target.kind().is_nominal()
    }

    /// Decode the target of an instance.
    pub fn decode_target<I: Instance + ?Sized>(
        &self,
        instance: &I,
    ) -> Result<TargetValue, SchemaError> {
        self.target.decode_target(instance.get(0, &self.target))
    }

    /// Decode every predictor of an instance into `row`, replacing its
    /// contents. On error `row` is left in an unspecified but valid state.
    pub fn decode_predictors<I: Instance + ?Sized>(
        &self,
        instance: &I,
        row: &mut Vec<Value>,
    ) -> Result<(), SchemaError> {
        row.clear();
        row.reserve(self.predictors.len());
        for (i, attr) in self.predictors.iter().enumerate() {
            row.push(attr.decode(instance.get(i + 1, attr))?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MapInstance;

    fn weather_model() -> Model {
        Model::new(
            Attribute::nominal("play", ["yes", "no"]),
            vec![
                Attribute::nominal("outlook", ["rainy", "overcast", "sunny"]),
                Attribute::numeric("temperature"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_model_lookup() {
        let model = weather_model();
        assert_eq!(model.target().name(), "play");
        assert_eq!(model.predictor("temperature").unwrap().name(), "temperature");
        assert_eq!(model.predictor_index("outlook"), Some(0));
        assert_eq!(model.predictors()[0].values(), ["rainy", "overcast", "sunny"]);
        assert!(model.predictor("humidity").is_none());
        assert!(model.is_classification());
    }

    #[test]
    fn test_model_rejects_duplicates() {
        let err = Model::new(
            Attribute::numeric("y"),
            vec![Attribute::numeric("x"), Attribute::numeric("x")],
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateAttribute("x".into()));

        let err = Model::new(Attribute::numeric("y"), vec![Attribute::numeric("y")]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateAttribute("y".into()));

        assert_eq!(
            Model::new(Attribute::numeric("y"), vec![]).unwrap_err(),
            SchemaError::NoPredictors
        );
    }

    #[test]
    fn test_decode_nominal() {
        let attr = Attribute::nominal("outlook", ["rainy", "overcast", "sunny"]);
        assert_eq!(attr.decode(Some(RawValue::Text("sunny"))), Ok(Value::Nominal(2)));
        assert_eq!(attr.decode(Some(RawValue::Number(1.0))), Ok(Value::Nominal(1)));
        assert_eq!(attr.decode(Some(RawValue::Number(f64::NAN))), Ok(Value::Missing));
        assert_eq!(attr.decode(None), Ok(Value::Missing));
        assert!(matches!(
            attr.decode(Some(RawValue::Text("foggy"))),
            Err(SchemaError::UnknownValue { .. })
        ));
        assert!(matches!(
            attr.decode(Some(RawValue::Number(1.5))),
            Err(SchemaError::InvalidValue { .. })
        ));
        assert!(matches!(
            attr.decode(Some(RawValue::Number(3.0))),
            Err(SchemaError::UnknownValue { .. })
        ));
    }

    #[test]
    fn test_decode_numeric() {
        let attr = Attribute::numeric("temperature");
        assert_eq!(attr.decode(Some(RawValue::Number(21.5))), Ok(Value::Numeric(21.5)));
        assert_eq!(attr.decode(Some(RawValue::Text(" 7 "))), Ok(Value::Numeric(7.0)));
        assert!(attr.decode(Some(RawValue::Text("warm"))).is_err());
    }

    #[test]
    fn test_decode_instance() {
        let model = weather_model();
        let inst = MapInstance::new()
            .with("play", "no")
            .with("outlook", "overcast")
            .with("temperature", 18.0);

        assert_eq!(model.decode_target(&inst), Ok(TargetValue::Class(1)));

        let mut row = Vec::new();
        model.decode_predictors(&inst, &mut row).unwrap();
        assert_eq!(row, vec![Value::Nominal(1), Value::Numeric(18.0)]);

        let unlabeled = MapInstance::new().with("outlook", "sunny");
        assert_eq!(
            model.decode_target(&unlabeled),
            Err(SchemaError::MissingTarget("play".into()))
        );
    }
}
