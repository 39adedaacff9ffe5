//! Application error types

use lacuna_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A placeholder refers back to itself on the active resolution path.
    #[error("circular placeholder reference '{key}' in property definitions")]
    CircularReference {
        /// The placeholder body that closed the cycle.
        key: String,
    },

    /// A placeholder could not be resolved in strict mode.
    #[error("could not resolve placeholder '{key}' in value \"{value}\"")]
    UnresolvablePlaceholder {
        /// The unresolvable placeholder key.
        key: String,
        /// The full original input the placeholder appeared in.
        value: String,
    },

    /// A property requested as required is not present in any source.
    #[error("required property '{key}' is not set")]
    RequiredPropertyMissing {
        /// The missing property key.
        key: String,
    },

    /// Required-properties validation found missing keys.
    #[error("missing required properties: {}", keys.join(", "))]
    MissingRequiredProperties {
        /// Every declared-required key that no source could satisfy.
        keys: Vec<String>,
    },

    /// A property value failed to parse into the requested type.
    #[error("invalid value for property '{key}': {message}")]
    InvalidPropertyValue {
        /// The property key whose value failed to parse.
        key: String,
        /// Parse failure description.
        message: String,
    },

    /// Placeholder delimiters are unusable.
    #[error("invalid placeholder delimiters: {0}")]
    InvalidDelimiters(String),

    /// A domain error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
