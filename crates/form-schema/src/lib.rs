//! Form-schema boundary: parse and validate what the external semantic
//! classifier returns, and extract a degraded schema locally when it
//! returns nothing usable.

pub mod analyzer;
pub mod errors;
pub mod fallback;
pub mod model;

pub use analyzer::FormAnalyzer;
pub use errors::SchemaError;
pub use fallback::FallbackExtractor;
pub use model::FormSchema;
