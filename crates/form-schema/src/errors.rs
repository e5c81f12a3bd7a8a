//! Error types for schema parsing and extraction.

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SchemaError {
    /// The document is not `{ "fields": [...] }`. This is the only failure
    /// that aborts a fill pass: without a field list there is no work.
    #[error("Structurally invalid form schema: {0}")]
    InvalidSchema(String),

    /// The input could not be read as JSON at all.
    #[error("Schema is not valid JSON: {0}")]
    Json(String),

    /// Local fallback extraction found no input fields.
    #[error("No form fields could be extracted")]
    NoFields,

    /// External analyzer failure (network, model, quota).
    #[error("Analyzer error: {0}")]
    Analyzer(String),
}
