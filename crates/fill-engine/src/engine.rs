//! The fill pass: one field at a time, resilient by field.

use crate::captcha;
use crate::errors::FillError;
use crate::fillers;
use crate::merge::{collapse_logical_fields, merge_schema_and_observed};
use crate::selector::candidate_selectors;
use crate::summary::FillRecorder;
use crate::values::resolve_field_values;
use dom_port::{walk_breadth_first, DomPort};
use form_schema::FormSchema;
use formreach_core_types::{FieldKind, FilledEntry, SenderProfile};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Tunables for one fill pass.
#[derive(Clone, Debug)]
pub struct FillOptions {
    /// Probe for reCAPTCHA/image-captcha controls before filling.
    pub detect_captcha: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            detect_captcha: true,
        }
    }
}

/// The autofill engine. Owns nothing but a handle to the page capability;
/// the schema, profile and prior observations are inputs per pass, and the
/// returned summary is the only output.
pub struct FormFiller {
    port: Arc<dyn DomPort>,
    options: FillOptions,
}

impl FormFiller {
    pub fn new(port: Arc<dyn DomPort>) -> Self {
        Self {
            port,
            options: FillOptions::default(),
        }
    }

    pub fn with_options(port: Arc<dyn DomPort>, options: FillOptions) -> Self {
        Self { port, options }
    }

    /// Parse a raw classifier response and fill. The parse is the only
    /// place a fill pass can abort: a response that is not a field list
    /// leaves nothing to do.
    pub async fn fill_from_value(
        &self,
        raw_schema: &Value,
        profile: &SenderProfile,
        message: Option<&str>,
        prior: &[FilledEntry],
    ) -> Result<Vec<FilledEntry>, FillError> {
        let schema = FormSchema::parse_value(raw_schema)?;
        self.fill(&schema, profile, message, prior).await
    }

    /// Run one fill pass: sequential, one field at a time, at most one
    /// write per logical field. No failure of a single field aborts the
    /// pass.
    pub async fn fill(
        &self,
        schema: &FormSchema,
        profile: &SenderProfile,
        message: Option<&str>,
        prior: &[FilledEntry],
    ) -> Result<Vec<FilledEntry>, FillError> {
        let tree = self.port.frame_tree().await?;
        let contexts = walk_breadth_first(&tree);
        let port = self.port.as_ref();

        let mut recorder = FillRecorder::new();

        if self.options.detect_captcha {
            captcha::detect(port, &contexts, &mut recorder).await;
        }

        let fields =
            collapse_logical_fields(merge_schema_and_observed(&schema.fields, prior));
        info!(
            fields = fields.len(),
            contexts = contexts.len(),
            "Starting fill pass"
        );

        for field in &fields {
            // A descriptor without roles produces no side effect at all.
            if field.roles.is_empty() {
                debug!(label = %field.label, "Field has no roles; dropped");
                continue;
            }

            let order = recorder.begin_field();

            // `other`-tagged fields are recorded, never written.
            if field.is_sentinel_only() {
                debug!(label = %field.label, "Sentinel-only field; recorded without write");
                recorder.record_unresolved(field, order);
                continue;
            }

            let values = resolve_field_values(field, profile, message);
            let selectors =
                candidate_selectors(field.kind, &field.name_attr, &field.id_attr);

            match field.kind {
                FieldKind::Checkbox => {
                    fillers::checkbox::fill_checkbox(
                        port, &contexts, field, &values, &selectors, order, &mut recorder,
                    )
                    .await
                }
                FieldKind::Radio => {
                    fillers::radio::fill_radio(
                        port, &contexts, field, &values, &selectors, order, &mut recorder,
                    )
                    .await
                }
                FieldKind::Select => {
                    fillers::select_box::fill_select(
                        port, &contexts, field, &values, &selectors, order, &mut recorder,
                    )
                    .await
                }
                _ => {
                    fillers::text::fill_text(
                        port, &contexts, field, &values, &selectors, order, &mut recorder,
                    )
                    .await
                }
            }
        }

        let entries = recorder.into_entries();
        info!(entries = entries.len(), "Fill pass complete");
        Ok(entries)
    }
}
