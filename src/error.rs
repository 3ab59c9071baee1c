//! Error types for model mutations and write-back.

use thiserror::Error;

/// Errors surfaced by property models, catalogs and the writer.
///
/// Reads never fail: an unresolvable or ambiguous property reads as absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DslError {
    /// No legal syntax exists for this mutation in the current dialect.
    #[error("property '{property}' cannot be expressed in this build file")]
    Inexpressible { property: String },

    /// The value cannot be bound to the property's current shape.
    #[error("unsupported value for '{property}': {reason}")]
    UnsupportedValue { property: String, reason: String },

    /// A block path or element was expected to hold named children.
    #[error("element '{0}' is not a container")]
    NotAContainer(String),

    /// An element id or block path does not exist in this tree.
    #[error("unknown element: {0}")]
    UnknownElement(String),

    /// A version catalog could not be read.
    #[error("invalid version catalog: {0}")]
    InvalidCatalog(String),

    /// Two edits produced by one write-back overlap.
    #[error("conflicting edits: {0}")]
    WriteConflict(String),
}

impl DslError {
    pub fn inexpressible(property: impl Into<String>) -> Self {
        Self::Inexpressible {
            property: property.into(),
        }
    }

    pub fn unsupported(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for DslError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidCatalog(err.to_string())
    }
}
