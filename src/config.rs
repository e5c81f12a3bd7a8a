//! Profile and contact-list loading.
//!
//! The sender profile is a flat key/value YAML file; an optional defaults
//! file fills gaps per key (a missing or empty value falls back, a
//! non-empty one wins). The contact list is a YAML sequence of entries,
//! one per company.

use crate::errors::AppError;
use formreach_core_types::SenderProfile;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load a sender profile from a YAML (or JSON) file.
pub fn load_profile(path: &Path) -> Result<SenderProfile, AppError> {
    let raw = fs::read_to_string(path)?;
    let profile: SenderProfile = serde_yaml::from_str(&raw)?;
    if profile.is_empty() {
        warn!(path = %path.display(), "Sender profile has no non-empty values");
    }
    Ok(profile)
}

/// Load a profile and merge it over an optional defaults file.
pub fn load_profile_with_defaults(
    path: &Path,
    defaults: Option<&Path>,
) -> Result<SenderProfile, AppError> {
    let profile = load_profile(path)?;
    match defaults {
        Some(defaults_path) => {
            let base = load_profile(defaults_path)?;
            info!(defaults = %defaults_path.display(), "Merging profile over defaults");
            Ok(profile.merged_over(&base))
        }
        None => Ok(profile),
    }
}

/// Resolve the message body: an explicit string wins over a file, which
/// wins over the profile's own `message` key (handled downstream).
pub fn load_message(
    message: Option<String>,
    message_file: Option<&Path>,
) -> Result<Option<String>, AppError> {
    if let Some(message) = message {
        if !message.trim().is_empty() {
            return Ok(Some(message));
        }
    }
    if let Some(path) = message_file {
        let body = fs::read_to_string(path)?;
        if !body.trim().is_empty() {
            return Ok(Some(body));
        }
    }
    Ok(None)
}

/// One row of the contact list.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactEntry {
    pub company_name: String,
    pub contact_url: String,
    /// Captured page snapshot (JSON) to fill against.
    pub snapshot: Option<PathBuf>,
    /// Pre-classified schema JSON; when absent, `html` is scanned locally.
    pub schema: Option<PathBuf>,
    /// Raw form HTML for fallback extraction.
    pub html: Option<PathBuf>,
    /// Processing status; anything other than empty or `Pending` is
    /// skipped.
    pub status: String,
}

impl ContactEntry {
    pub fn is_pending(&self) -> bool {
        self.status.is_empty() || self.status == "Pending"
    }
}

/// Load the contact list from a YAML file.
pub fn load_contacts(path: &Path) -> Result<Vec<ContactEntry>, AppError> {
    let raw = fs::read_to_string(path)?;
    let contacts: Vec<ContactEntry> = serde_yaml::from_str(&raw)?;
    if contacts.is_empty() {
        return Err(AppError::Config(format!(
            "contact list {} is empty",
            path.display()
        )));
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_detection() {
        let entry = ContactEntry::default();
        assert!(entry.is_pending());

        let entry = ContactEntry {
            status: "Pending".to_string(),
            ..Default::default()
        };
        assert!(entry.is_pending());

        let entry = ContactEntry {
            status: "Success".to_string(),
            ..Default::default()
        };
        assert!(!entry.is_pending());
    }

    #[test]
    fn message_precedence() {
        let msg = load_message(Some("hello".to_string()), None).unwrap();
        assert_eq!(msg.as_deref(), Some("hello"));

        let msg = load_message(Some("   ".to_string()), None).unwrap();
        assert!(msg.is_none());
    }
}
