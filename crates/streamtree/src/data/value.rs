//! Decoded attribute values.

/// A predictor value after schema decoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Index of a nominal value within its attribute's domain.
    Nominal(usize),
    /// A numeric reading. May be non-finite; statistics ignore such values.
    Numeric(f64),
    /// The instance carried no value for the attribute.
    Missing,
}

impl Value {
    /// Nominal index, if this is a nominal value.
    #[inline]
    pub fn as_nominal(&self) -> Option<usize> {
        match *self {
            Value::Nominal(i) => Some(i),
            _ => None,
        }
    }

    /// Finite numeric reading, if any.
    #[inline]
    pub fn as_numeric(&self) -> Option<f64> {
        match *self {
            Value::Numeric(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    /// True for [`Value::Missing`].
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

/// A decoded target value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetValue {
    /// Class index (classification).
    Class(usize),
    /// Numeric target (regression).
    Numeric(f64),
}

/// An undecoded value as handed over by an [`Instance`](super::Instance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// A label or a textual number.
    Text(&'a str),
    /// A number. For nominal attributes it is read as the value's index.
    Number(f64),
}
