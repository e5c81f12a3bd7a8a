//! Fill-summary rows: the audit trail of what the engine actually did.

use crate::field::FieldKind;
use crate::roles::RoleTag;
use serde::{Deserialize, Serialize};

/// How a summary row came to be.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillOutcome {
    /// A candidate selector matched and the value was written normally.
    Matched,
    /// A degraded path wrote the value (last-resort text sweep, first
    /// non-placeholder option, first enabled choice).
    Fallback,
    /// No write was possible; explicit non-write record.
    Unresolved,
    /// Anti-bot/captcha detection row; nothing was written.
    Detected,
}

/// One row of the audit trail.
///
/// A multi-role field emits one row per satisfied role, all sharing the same
/// selector, value and `order`. `order` is assigned when the field is
/// dequeued, is monotonic and starts at 1 for the first field of a run, so
/// downstream logs can reconstruct the original field order. Detection rows
/// carry `order` 0: they are not part of the field sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledEntry {
    pub role: RoleTag,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleTag>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub name_attr: String,
    #[serde(default)]
    pub id_attr: String,
    /// Candidate selector that matched; empty for unresolved rows.
    #[serde(default)]
    pub selector: String,
    /// Value written (for selects, the option's value attribute); empty for
    /// unresolved rows.
    #[serde(default)]
    pub value: String,
    /// Human-readable option text, for choice fills.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_label: Option<String>,
    #[serde(default)]
    pub order: u32,
    pub outcome: FillOutcome,
}

impl FilledEntry {
    /// True when this row represents an actual DOM write.
    pub fn wrote(&self) -> bool {
        matches!(self.outcome, FillOutcome::Matched | FillOutcome::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_original_wire_names() {
        let entry = FilledEntry {
            role: RoleTag::Email,
            roles: vec![RoleTag::Email],
            kind: FieldKind::Email,
            label: "メールアドレス".to_string(),
            name_attr: "mail".to_string(),
            id_attr: String::new(),
            selector: "input[name=\"mail\"]".to_string(),
            value: "a@b.com".to_string(),
            option_label: None,
            order: 1,
            outcome: FillOutcome::Matched,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["nameAttr"], "mail");
        assert_eq!(json["type"], "email");
        assert_eq!(json["outcome"], "matched");
        assert!(json.get("optionLabel").is_none());
    }

    #[test]
    fn unresolved_rows_do_not_count_as_writes() {
        let entry = FilledEntry {
            role: RoleTag::Other,
            roles: vec![RoleTag::Gender],
            kind: FieldKind::Radio,
            label: String::new(),
            name_attr: String::new(),
            id_attr: String::new(),
            selector: String::new(),
            value: String::new(),
            option_label: None,
            order: 3,
            outcome: FillOutcome::Unresolved,
        };
        assert!(!entry.wrote());
    }
}
