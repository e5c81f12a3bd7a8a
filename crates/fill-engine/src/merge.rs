//! Field merge and logical-field grouping.
//!
//! Two passes over the classifier output before any filling happens:
//! merging with previously-observed fill attempts (re-running analysis
//! against the same physical field updates rather than duplicates it), and
//! collapsing radio/checkbox groups that span several DOM elements into one
//! logical field.

use formreach_core_types::{FieldDescriptor, FieldKind, FilledEntry};
use std::collections::{HashMap, HashSet};

/// Synthetic group key for same-typed choice inputs that carry neither a
/// name nor an id: appearing together, they are assumed to belong to one
/// question.
pub const NO_ATTR_GROUP: &str = "NO_ATTR_GROUP";

type MergeKey = (&'static str, String, String, String);

fn merge_key(field: &FieldDescriptor) -> MergeKey {
    (
        field.primary_role().map(|r| r.as_str()).unwrap_or(""),
        field.name_attr.clone(),
        field.id_attr.clone(),
        field.label.clone(),
    )
}

fn descriptor_from_entry(entry: &FilledEntry) -> FieldDescriptor {
    let roles = if entry.roles.is_empty() {
        vec![entry.role]
    } else {
        entry.roles.clone()
    };
    FieldDescriptor {
        roles,
        kind: entry.kind,
        label: entry.label.clone(),
        name_attr: entry.name_attr.clone(),
        id_attr: entry.id_attr.clone(),
        required: false,
        preferred_option: None,
    }
}

/// Merge the classifier's schema with previously-observed fill attempts,
/// keyed by `(primary_role, name_attr, id_attr, label)`. Previously seen
/// fields keep their position; a schema field with the same key replaces
/// the stored descriptor, new fields append in schema order.
pub fn merge_schema_and_observed(
    schema_fields: &[FieldDescriptor],
    prior_filled: &[FilledEntry],
) -> Vec<FieldDescriptor> {
    let mut ordered: Vec<FieldDescriptor> = Vec::new();
    let mut index: HashMap<MergeKey, usize> = HashMap::new();

    for entry in prior_filled {
        let field = descriptor_from_entry(entry);
        let key = merge_key(&field);
        if !index.contains_key(&key) {
            index.insert(key, ordered.len());
            ordered.push(field);
        }
    }

    for field in schema_fields {
        let key = merge_key(field);
        match index.get(&key) {
            Some(&at) => ordered[at] = field.clone(),
            None => {
                index.insert(key, ordered.len());
                ordered.push(field.clone());
            }
        }
    }

    ordered
}

/// Collapse radio/checkbox entries that represent one logical question.
///
/// Entries of the same choice type sharing a name (or, failing that, an id)
/// are one group; the first entry is kept, later ones dropped. Inputs with
/// neither attribute share the [`NO_ATTR_GROUP`] bucket. Idempotent.
pub fn collapse_logical_fields(fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut seen: HashSet<(&'static str, String)> = HashSet::new();
    let mut out = Vec::with_capacity(fields.len());

    for field in fields {
        let groupable = matches!(field.kind, FieldKind::Radio | FieldKind::Checkbox);
        if groupable {
            let group = if !field.name_attr.is_empty() {
                field.name_attr.clone()
            } else if !field.id_attr.is_empty() {
                field.id_attr.clone()
            } else {
                NO_ATTR_GROUP.to_string()
            };
            if !seen.insert((field.kind.as_str(), group)) {
                continue;
            }
        }
        out.push(field);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formreach_core_types::{FillOutcome, RoleTag};

    fn field(role: RoleTag, kind: FieldKind, name: &str, id: &str, label: &str) -> FieldDescriptor {
        FieldDescriptor {
            roles: vec![role],
            kind,
            label: label.to_string(),
            name_attr: name.to_string(),
            id_attr: id.to_string(),
            required: false,
            preferred_option: None,
        }
    }

    fn entry(role: RoleTag, kind: FieldKind, name: &str, label: &str) -> FilledEntry {
        FilledEntry {
            role,
            roles: vec![role],
            kind,
            label: label.to_string(),
            name_attr: name.to_string(),
            id_attr: String::new(),
            selector: String::new(),
            value: String::new(),
            option_label: None,
            order: 1,
            outcome: FillOutcome::Matched,
        }
    }

    #[test]
    fn reanalysis_updates_instead_of_duplicating() {
        let prior = vec![entry(RoleTag::Email, FieldKind::Email, "mail", "メール")];
        let mut updated = field(RoleTag::Email, FieldKind::Email, "mail", "", "メール");
        updated.required = true;

        let merged = merge_schema_and_observed(&[updated], &prior);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].required);
    }

    #[test]
    fn new_fields_append_after_observed_ones() {
        let prior = vec![entry(RoleTag::Email, FieldKind::Email, "mail", "")];
        let schema = vec![
            field(RoleTag::Name, FieldKind::Text, "your_name", "", ""),
            field(RoleTag::Email, FieldKind::Email, "mail", "", ""),
        ];
        let merged = merge_schema_and_observed(&schema, &prior);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].roles, vec![RoleTag::Email]);
        assert_eq!(merged[1].roles, vec![RoleTag::Name]);
    }

    #[test]
    fn radio_groups_collapse_by_name() {
        let fields = vec![
            field(RoleTag::InquiryType, FieldKind::Radio, "kind", "", "種別A"),
            field(RoleTag::InquiryType, FieldKind::Radio, "kind", "", "種別B"),
            field(RoleTag::Name, FieldKind::Text, "your_name", "", ""),
        ];
        let collapsed = collapse_logical_fields(fields);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].label, "種別A");
    }

    #[test]
    fn attrless_choice_inputs_share_one_group() {
        let fields = vec![
            field(RoleTag::Agreement, FieldKind::Checkbox, "", "", "同意する"),
            field(RoleTag::Other, FieldKind::Checkbox, "", "", "メルマガ希望"),
        ];
        let collapsed = collapse_logical_fields(fields);
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].label, "同意する");
    }

    #[test]
    fn different_types_do_not_collapse_together() {
        let fields = vec![
            field(RoleTag::Gender, FieldKind::Radio, "", "", ""),
            field(RoleTag::Agreement, FieldKind::Checkbox, "", "", ""),
        ];
        assert_eq!(collapse_logical_fields(fields).len(), 2);
    }

    #[test]
    fn collapsing_is_idempotent() {
        let fields = vec![
            field(RoleTag::InquiryType, FieldKind::Radio, "kind", "", "A"),
            field(RoleTag::InquiryType, FieldKind::Radio, "kind", "", "B"),
            field(RoleTag::Agreement, FieldKind::Checkbox, "", "agree", ""),
            field(RoleTag::Name, FieldKind::Text, "n", "", ""),
        ];
        let once = collapse_logical_fields(fields);
        let twice = collapse_logical_fields(once.clone());
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.label, b.label);
            assert_eq!(a.name_attr, b.name_attr);
        }
    }
}
