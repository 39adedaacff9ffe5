//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while arranging property sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A source was addressed by a name that is not in the stack.
    #[error("no property source named '{0}'")]
    UnknownSource(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
