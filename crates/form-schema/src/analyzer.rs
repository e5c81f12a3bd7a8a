//! External-classifier boundary.

use crate::errors::SchemaError;
use crate::model::FormSchema;
use async_trait::async_trait;

/// A semantic form analyzer: inspects raw form HTML and assigns a role to
/// every user-visible input.
///
/// The production implementation is an AI text-completion call and lives
/// outside this workspace; [`crate::FallbackExtractor`] is the local,
/// degraded implementation used when the external analyzer is unavailable
/// or returns nothing usable.
#[async_trait]
pub trait FormAnalyzer: Send + Sync {
    async fn analyze(&self, form_html: &str) -> Result<FormSchema, SchemaError>;
}
