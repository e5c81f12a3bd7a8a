//! Fill summary recording.
//!
//! The recorder is the engine's only output channel: one or more
//! [`FilledEntry`] rows per processed field, in input order. Every field
//! with at least one role produces at least one row (success, degraded
//! write, or an explicit unresolved record); nothing is silently dropped.

use formreach_core_types::{FieldDescriptor, FillOutcome, FilledEntry, RoleTag};

/// Accumulates the audit trail for one fill pass.
#[derive(Debug, Default)]
pub struct FillRecorder {
    entries: Vec<FilledEntry>,
    next_order: u32,
}

impl FillRecorder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_order: 1,
        }
    }

    /// Claim the order slot for the field being dequeued. Monotonic,
    /// starts at 1, shared across the whole run.
    pub fn begin_field(&mut self) -> u32 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }

    /// Record a successful (or degraded-but-written) fill: one row per
    /// satisfied role, all sharing the same selector, value and order.
    #[allow(clippy::too_many_arguments)]
    pub fn record_write(
        &mut self,
        field: &FieldDescriptor,
        satisfied: &[RoleTag],
        order: u32,
        selector: &str,
        value: &str,
        option_label: Option<&str>,
        outcome: FillOutcome,
    ) {
        for &role in satisfied {
            self.entries.push(FilledEntry {
                role,
                roles: field.roles.clone(),
                kind: field.kind,
                label: field.label.clone(),
                name_attr: field.name_attr.clone(),
                id_attr: field.id_attr.clone(),
                selector: selector.to_string(),
                value: value.to_string(),
                option_label: option_label.map(str::to_string),
                order,
                outcome,
            });
        }
    }

    /// Record an explicit non-write: the field is kept in the summary as
    /// role `other` with empty selector and value.
    pub fn record_unresolved(&mut self, field: &FieldDescriptor, order: u32) {
        self.entries.push(FilledEntry {
            role: RoleTag::Other,
            roles: field.roles.clone(),
            kind: field.kind,
            label: field.label.clone(),
            name_attr: field.name_attr.clone(),
            id_attr: field.id_attr.clone(),
            selector: String::new(),
            value: String::new(),
            option_label: None,
            order,
            outcome: FillOutcome::Unresolved,
        });
    }

    /// Record an anti-bot detection row. Detection rows are outside the
    /// field sequence and carry order 0.
    pub fn record_detection(&mut self, entry: FilledEntry) {
        self.entries.push(FilledEntry { order: 0, ..entry });
    }

    pub fn entries(&self) -> &[FilledEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<FilledEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formreach_core_types::FieldKind;

    #[test]
    fn order_is_monotonic_from_one() {
        let mut recorder = FillRecorder::new();
        assert_eq!(recorder.begin_field(), 1);
        assert_eq!(recorder.begin_field(), 2);
        assert_eq!(recorder.begin_field(), 3);
    }

    #[test]
    fn multi_role_write_emits_one_row_per_role() {
        let field = FieldDescriptor {
            roles: vec![RoleTag::Department, RoleTag::Position],
            kind: FieldKind::Text,
            name_attr: "dept_pos".to_string(),
            ..Default::default()
        };
        let mut recorder = FillRecorder::new();
        let order = recorder.begin_field();
        recorder.record_write(
            &field,
            &[RoleTag::Department, RoleTag::Position],
            order,
            "input[name=\"dept_pos\"]",
            "Sales ・ Manager",
            None,
            FillOutcome::Matched,
        );

        let entries = recorder.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, RoleTag::Department);
        assert_eq!(entries[1].role, RoleTag::Position);
        assert!(entries.iter().all(|e| e.order == order));
        assert!(entries.iter().all(|e| e.value == "Sales ・ Manager"));
    }

    #[test]
    fn unresolved_rows_are_explicit_non_writes() {
        let field = FieldDescriptor {
            roles: vec![RoleTag::Gender],
            kind: FieldKind::Radio,
            ..Default::default()
        };
        let mut recorder = FillRecorder::new();
        let order = recorder.begin_field();
        recorder.record_unresolved(&field, order);

        let entry = &recorder.entries()[0];
        assert_eq!(entry.role, RoleTag::Other);
        assert_eq!(entry.roles, vec![RoleTag::Gender]);
        assert!(entry.selector.is_empty());
        assert!(entry.value.is_empty());
        assert!(!entry.wrote());
    }
}
