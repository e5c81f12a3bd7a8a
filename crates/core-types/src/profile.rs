//! Sender profile: the flat key/value record the value resolver reads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category label used for inquiry-type choosers when the profile does not
/// carry one. Vendor-outreach forms in the wild are predominantly Japanese.
pub const DEFAULT_INQUIRY_LABEL: &str = "案件のご依頼";

fn default_phone_delimiter() -> String {
    "-".to_string()
}

fn default_inquiry_label() -> String {
    DEFAULT_INQUIRY_LABEL.to_string()
}

/// Flat mapping from profile key (`name`, `email`, `postalCode1`, ...) to a
/// string value. Absent keys resolve to the empty string.
///
/// Composite values (full postal code, full phone number, full address) are
/// derived from their parts by the value resolver when only parts exist;
/// decomposition of a flat value into parts is never attempted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SenderProfile {
    #[serde(flatten)]
    values: BTreeMap<String, String>,

    /// Delimiter used when joining `phone1..3` into a full number.
    #[serde(default = "default_phone_delimiter")]
    pub phone_delimiter: String,

    /// Fallback label for inquiry-type choosers.
    #[serde(default = "default_inquiry_label")]
    pub inquiry_label: String,
}

impl Default for SenderProfile {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            phone_delimiter: default_phone_delimiter(),
            inquiry_label: default_inquiry_label(),
        }
    }
}

impl SenderProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// First non-empty value among `keys`, or `""`.
    pub fn first_of(&self, keys: &[&str]) -> &str {
        keys.iter()
            .map(|k| self.get(k))
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Per-key merge: keep own non-empty values, fill gaps from `defaults`.
    pub fn merged_over(mut self, defaults: &SenderProfile) -> Self {
        for (key, value) in &defaults.values {
            if !value.is_empty() && self.get(key).is_empty() {
                self.values.insert(key.clone(), value.clone());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_resolve_to_empty() {
        let profile = SenderProfile::new();
        assert_eq!(profile.get("email"), "");
        assert_eq!(profile.first_of(&["phone1", "phone"]), "");
    }

    #[test]
    fn first_of_prefers_earlier_keys() {
        let mut profile = SenderProfile::new();
        profile.insert("companyName", "");
        profile.insert("company", "テスト株式会社");
        assert_eq!(
            profile.first_of(&["companyName", "company"]),
            "テスト株式会社"
        );
    }

    #[test]
    fn merge_fills_gaps_only() {
        let mut defaults = SenderProfile::new();
        defaults.insert("name", "テスト 太郎");
        defaults.insert("email", "default@example.com");

        let mut overrides = SenderProfile::new();
        overrides.insert("email", "real@example.com");

        let merged = overrides.merged_over(&defaults);
        assert_eq!(merged.get("email"), "real@example.com");
        assert_eq!(merged.get("name"), "テスト 太郎");
    }

    #[test]
    fn deserializes_flat_map_with_knob_defaults() {
        let profile: SenderProfile =
            serde_json::from_str(r#"{"name":"テスト 太郎","email":"a@b.com"}"#).unwrap();
        assert_eq!(profile.get("name"), "テスト 太郎");
        assert_eq!(profile.phone_delimiter, "-");
        assert_eq!(profile.inquiry_label, DEFAULT_INQUIRY_LABEL);
    }
}
