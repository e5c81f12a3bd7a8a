//! Error types for the fill engine.
//!
//! Almost nothing here is fatal: selector misses, match misses and
//! per-attempt automation errors are absorbed into the fill summary. The
//! engine only propagates failures that make the whole pass meaningless.

use dom_port::DomError;
use form_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum FillError {
    /// The classifier response is not a field list; no meaningful work is
    /// possible.
    #[error("Invalid form schema: {0}")]
    InvalidSchema(String),

    /// The page's document contexts could not even be enumerated.
    #[error("Page unavailable: {0}")]
    Page(#[from] DomError),
}

impl From<SchemaError> for FillError {
    fn from(err: SchemaError) -> Self {
        FillError::InvalidSchema(err.to_string())
    }
}
