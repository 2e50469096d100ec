//! Error types for document construction and serialization

use thiserror::Error;

/// Errors raised while building or writing a KML document
#[derive(Debug, Error)]
pub enum KmlError {
    /// A value of the wrong type was supplied for an operation
    #[error("type error: expected {expected}, found {found}")]
    Type { expected: String, found: String },

    /// The containment rules reject adding `child` to `parent`
    #[error("cannot add {child} to {parent}: {reason}")]
    Placement {
        child: String,
        parent: String,
        reason: String,
    },

    /// A coordinate tuple does not have 2 or 3 components
    #[error("invalid coordinate tuple {tuple}: expected 2 or 3 components, found {len}")]
    Format { tuple: String, len: usize },

    /// A style or node field failed its validator
    #[error("invalid value for field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Invalid configuration (unknown style kind, undeterminable radius, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing the serialized document failed
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

impl KmlError {
    /// Create a type error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Type {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a placement error
    pub fn placement(
        child: impl Into<String>,
        parent: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Placement {
            child: child.into(),
            parent: parent.into(),
            reason: reason.into(),
        }
    }

    /// Create a coordinate format error from the offending components
    pub fn format(components: &[f64]) -> Self {
        let tuple = components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::Format {
            tuple: format!("({})", tuple),
            len: components.len(),
        }
    }

    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Name of the offending field for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
