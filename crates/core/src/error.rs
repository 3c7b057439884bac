//! Error types for Stowage.

use thiserror::Error;

/// Result type alias for Stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of inventory entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A stored item.
    Item,
    /// A storage container.
    Container,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item => f.write_str("item"),
            Self::Container => f.write_str("container"),
        }
    }
}

/// Errors that can occur during allocation, classification or simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// A width, depth or height is zero, negative or not finite.
    #[error("Invalid dimension on {kind} '{id}': {detail}")]
    InvalidDimension {
        kind: EntityKind,
        id: String,
        detail: String,
    },

    /// Two records of the same kind share an identifier.
    #[error("Duplicate {kind} identifier: '{id}'")]
    DuplicateIdentifier { kind: EntityKind, id: String },

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("Malformed date '{value}' on item '{item_id}'")]
    MalformedDate { item_id: String, value: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An argument is outside its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
