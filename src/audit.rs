//! JSONL audit log: one line per processed contact, carrying the full fill
//! summary for downstream inspection.

use crate::errors::AppError;
use crate::runner::ContactOutcome;
use chrono::{DateTime, Utc};
use formreach_core_types::{FilledEntry, RunId};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub run_id: RunId,
    pub company_name: String,
    pub contact_url: String,
    pub status: String,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub filled: Vec<FilledEntry>,
}

impl AuditRecord {
    pub fn from_outcome(company_name: &str, contact_url: &str, outcome: &ContactOutcome) -> Self {
        Self {
            run_id: RunId::new(),
            company_name: company_name.to_string(),
            contact_url: contact_url.to_string(),
            status: outcome.status.as_str().to_string(),
            result: outcome.result.to_string(),
            error: outcome.error.clone(),
            recorded_at: Utc::now(),
            filled: outcome.filled.clone(),
        }
    }
}

/// Append-only JSONL writer.
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, record: &AuditRecord) -> Result<(), AppError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunStatus;

    #[test]
    fn appends_one_json_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = AuditLog::new(path.clone());

        let outcome = ContactOutcome {
            status: RunStatus::Success,
            result: "filled",
            error: None,
            filled: Vec::new(),
        };
        log.append(&AuditRecord::from_outcome("テスト株式会社", "", &outcome))
            .unwrap();
        log.append(&AuditRecord::from_outcome("別の会社", "", &outcome))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["companyName"], "テスト株式会社");
        assert_eq!(parsed["status"], "Success");
    }
}
