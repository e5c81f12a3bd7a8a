//! Sequential contact processing.
//!
//! One contact at a time: load the captured page, resolve a schema
//! (pre-classified JSON, else local fallback extraction from raw HTML),
//! run a fill pass, and classify the outcome. A randomized 1–3 s delay
//! between contacts keeps the cadence irregular.

use crate::audit::{AuditLog, AuditRecord};
use crate::config::ContactEntry;
use crate::errors::AppError;
use dom_port::MemoryDom;
use fill_engine::FormFiller;
use form_schema::{FallbackExtractor, FormSchema};
use formreach_core_types::{FilledEntry, RoleTag, SenderProfile};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunStatus {
    Success,
    Failed,
    Skipped,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Success => "Success",
            RunStatus::Failed => "Failed",
            RunStatus::Skipped => "Skipped",
        }
    }
}

/// What happened for one contact.
#[derive(Clone, Debug)]
pub struct ContactOutcome {
    pub status: RunStatus,
    pub result: &'static str,
    pub error: Option<String>,
    pub filled: Vec<FilledEntry>,
}

impl ContactOutcome {
    fn failed(result: &'static str, error: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Failed,
            result,
            error: Some(error.into()),
            filled: Vec::new(),
        }
    }
}

/// Resolve the schema for one contact: a pre-classified JSON file when
/// present, else fallback extraction from the raw HTML capture.
fn resolve_schema(entry: &ContactEntry) -> Result<FormSchema, AppError> {
    if let Some(schema_path) = &entry.schema {
        let raw = fs::read_to_string(schema_path)?;
        return Ok(FormSchema::parse_str(&raw)?);
    }
    if let Some(html_path) = &entry.html {
        let html = fs::read_to_string(html_path)?;
        return Ok(FallbackExtractor::new().extract(&html)?);
    }
    Err(AppError::Config(
        "contact entry has neither a schema nor an html capture".to_string(),
    ))
}

/// Process one contact end to end. Never returns an error: every failure
/// mode collapses into a `ContactOutcome`.
pub async fn process_contact(
    entry: &ContactEntry,
    profile: &SenderProfile,
    message: Option<&str>,
) -> ContactOutcome {
    let snapshot_path = match &entry.snapshot {
        Some(path) => path,
        None => {
            warn!(company = %entry.company_name, "Contact has no page snapshot");
            return ContactOutcome::failed("form_not_found", "no page snapshot configured");
        }
    };

    let dom = match fs::read_to_string(snapshot_path)
        .map_err(AppError::from)
        .and_then(|raw| MemoryDom::from_json(&raw).map_err(AppError::from))
    {
        Ok(dom) => Arc::new(dom),
        Err(err) => {
            warn!(company = %entry.company_name, error = %err, "Snapshot unavailable");
            return ContactOutcome::failed("snapshot_error", err.to_string());
        }
    };

    let schema = match resolve_schema(entry) {
        Ok(schema) => schema,
        Err(err) => {
            warn!(company = %entry.company_name, error = %err, "Schema resolution failed");
            return ContactOutcome::failed("form_schema_error", err.to_string());
        }
    };

    let filler = FormFiller::new(dom);
    let filled = match filler.fill(&schema, profile, message, &[]).await {
        Ok(filled) => filled,
        Err(err) => {
            error!(company = %entry.company_name, error = %err, "Fill pass failed");
            return ContactOutcome::failed("exception", err.to_string());
        }
    };

    if filled.iter().any(|e| e.role == RoleTag::Captcha) {
        warn!(company = %entry.company_name, "Anti-bot control detected; manual action required");
        return ContactOutcome {
            status: RunStatus::Failed,
            result: "captcha_detected",
            error: Some("anti-bot control detected".to_string()),
            filled,
        };
    }

    if filled.is_empty() {
        return ContactOutcome {
            status: RunStatus::Failed,
            result: "fill_empty",
            error: Some("no fillable fields".to_string()),
            filled,
        };
    }

    info!(company = %entry.company_name, entries = filled.len(), "Contact filled");
    ContactOutcome {
        status: RunStatus::Success,
        result: "filled",
        error: None,
        filled,
    }
}

/// Totals for one batch run.
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Process a contact list sequentially, appending one audit record per
/// processed contact and sleeping 1–3 s between contacts.
pub async fn run_batch(
    contacts: &[ContactEntry],
    profile: &SenderProfile,
    message: Option<&str>,
    audit: Option<&AuditLog>,
) -> Result<BatchSummary, AppError> {
    let mut rng = StdRng::from_entropy();
    let mut summary = BatchSummary::default();

    for entry in contacts {
        if !entry.is_pending() {
            info!(company = %entry.company_name, status = %entry.status, "Skipping contact");
            summary.skipped += 1;
            continue;
        }

        info!(company = %entry.company_name, "Processing contact");
        let outcome = process_contact(entry, profile, message).await;

        summary.processed += 1;
        match outcome.status {
            RunStatus::Success => summary.succeeded += 1,
            RunStatus::Failed => summary.failed += 1,
            RunStatus::Skipped => summary.skipped += 1,
        }

        if let Some(log) = audit {
            let record =
                AuditRecord::from_outcome(&entry.company_name, &entry.contact_url, &outcome);
            if let Err(err) = log.append(&record) {
                warn!(company = %entry.company_name, error = %err, "Audit append failed");
            }
        }

        // Irregular cadence between contacts.
        let pause = Duration::from_millis(rng.gen_range(1000..=3000));
        tokio::time::sleep(pause).await;
    }

    info!(
        processed = summary.processed,
        succeeded = summary.succeeded,
        failed = summary.failed,
        skipped = summary.skipped,
        "Batch complete"
    );
    Ok(summary)
}
