//! Error types for the model bakery.

use thiserror::Error;

/// Result type alias using BakeryError.
pub type Result<T> = std::result::Result<T, BakeryError>;

/// Main error type for model loading and baking operations.
#[derive(Error, Debug)]
pub enum BakeryError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A state definition declares two properties with the same name.
    #[error("duplicate property name '{0}' in state definition")]
    DuplicateProperty(String),

    /// A variant key segment is not of the form `name=value`.
    #[error("malformed variant key segment '{segment}' for {block}")]
    MalformedVariantKey { block: String, segment: String },

    /// A variant key names a property the block does not have.
    #[error("unknown blockstate property '{property}' for {block}")]
    UnknownProperty { block: String, property: String },

    /// A variant key value is outside the property's domain.
    #[error("invalid value '{value}' for property '{property}' of {block}; allowed values: {allowed}")]
    InvalidPropertyValue {
        block: String,
        property: String,
        value: String,
        allowed: String,
    },

    /// Two variant keys in the same definition bind the same state to
    /// different models.
    #[error("variant keys '{first}' and '{second}' of {block} overlap on state '{state}'")]
    VariantOverlap {
        block: String,
        first: String,
        second: String,
        state: String,
    },

    /// A model requested itself while it was still being loaded.
    #[error("circular model reference involving {0}")]
    CircularModelReference(String),

    /// Failed to resolve a model reference.
    #[error("model resolution error: {0}")]
    ModelResolution(String),

    /// Failed to bake a model into geometry.
    #[error("model bake error: {0}")]
    Bake(String),

    /// The builtin missing model itself is broken. There is no fallback
    /// below the fallback, so this aborts pipeline construction.
    #[error("builtin missing model is invalid: {0}")]
    BuiltinModel(String),
}
