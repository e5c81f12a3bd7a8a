//! Error types for DOM port operations.

use thiserror::Error;

/// Errors surfaced by a [`crate::DomPort`] implementation.
///
/// The engine treats every per-attempt error as a selector miss for that
/// candidate; none of these abort a fill pass.
#[derive(Debug, Error, Clone)]
pub enum DomError {
    /// Document context is unknown or has been torn down.
    #[error("Context not found: {0}")]
    ContextNotFound(String),

    /// Element handle no longer resolves (detached or never existed).
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Selector syntax the backend cannot evaluate.
    #[error("Unsupported selector: {0}")]
    UnsupportedSelector(String),

    /// Operation does not apply to this element (e.g. select-option on an
    /// input).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Backend transport/protocol failure.
    #[error("Backend error: {0}")]
    Backend(String),
}
