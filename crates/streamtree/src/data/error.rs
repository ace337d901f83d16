//! Schema and decoding errors.

/// Errors raised while declaring a model or decoding an instance against it.
///
/// A decoding error aborts the current train or predict call before any
/// tree state is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Two attributes share a name.
    #[error("duplicate attribute '{0}'")]
    DuplicateAttribute(String),

    /// A model was declared without predictors.
    #[error("model has no predictors")]
    NoPredictors,

    /// Lookup of an attribute name that is not part of the model.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// A nominal label outside the attribute's declared domain.
    #[error("unknown value '{value}' for attribute '{attribute}'")]
    UnknownValue { attribute: String, value: String },

    /// A value that cannot be interpreted for the attribute's kind.
    #[error("invalid value for attribute '{attribute}': {reason}")]
    InvalidValue { attribute: String, reason: String },

    /// The instance carries no value for the target attribute.
    #[error("missing target value for '{0}'")]
    MissingTarget(String),
}
