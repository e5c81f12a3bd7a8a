//! Classifier output model and its conversion into field descriptors.

use crate::errors::SchemaError;
use formreach_core_types::{FieldDescriptor, FieldKind, RoleTag};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// One field as the classifier emits it: loosely typed, `role` and/or
/// `roles`, every attribute optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawField {
    role: Option<String>,
    roles: Option<Vec<String>>,
    #[serde(rename = "type")]
    kind: Option<String>,
    label: Option<String>,
    name_attr: Option<String>,
    id_attr: Option<String>,
    required: Option<bool>,
    preferred_option: Option<String>,
}

/// Validated classifier output.
#[derive(Clone, Debug, Default)]
pub struct FormSchema {
    pub fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    /// Parse a classifier response. The only hard failure is a document
    /// whose `fields` is missing or not an array; malformed individual
    /// entries are skipped with a warning, and entries with neither `role`
    /// nor `roles` are excluded from processing.
    pub fn parse_value(value: &Value) -> Result<Self, SchemaError> {
        let raw_fields = value
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SchemaError::InvalidSchema("\"fields\" is missing or not an array".to_string())
            })?;

        let mut fields = Vec::new();
        for (idx, raw) in raw_fields.iter().enumerate() {
            let raw: RawField = match serde_json::from_value(raw.clone()) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(index = idx, error = %err, "Skipping malformed schema field");
                    continue;
                }
            };
            match convert_field(raw) {
                Some(field) => fields.push(field),
                None => debug!(index = idx, "Field carries no role; excluded"),
            }
        }

        Ok(Self { fields })
    }

    pub fn parse_str(json: &str) -> Result<Self, SchemaError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| SchemaError::Json(e.to_string()))?;
        Self::parse_value(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Merge `role` and `roles` into the ordered role set (primary first,
/// duplicates dropped). Returns `None` when the field declares neither.
fn convert_field(raw: RawField) -> Option<FieldDescriptor> {
    let mut roles: Vec<RoleTag> = Vec::new();
    let mut push = |tag: RoleTag| {
        if !roles.contains(&tag) {
            roles.push(tag);
        }
    };

    if let Some(role) = raw.role.as_deref() {
        if !role.trim().is_empty() {
            push(RoleTag::from_wire(role));
        }
    }
    for role in raw.roles.iter().flatten() {
        if !role.trim().is_empty() {
            push(RoleTag::from_wire(role));
        }
    }

    if roles.is_empty() {
        return None;
    }

    Some(FieldDescriptor {
        roles,
        kind: raw
            .kind
            .as_deref()
            .map(FieldKind::from_wire)
            .unwrap_or_default(),
        label: raw.label.unwrap_or_default(),
        name_attr: raw.name_attr.unwrap_or_default(),
        id_attr: raw.id_attr.unwrap_or_default(),
        required: raw.required.unwrap_or(false),
        preferred_option: raw.preferred_option.filter(|p| !p.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_and_roles_forms() {
        let schema = FormSchema::parse_str(
            r#"{"fields":[
                {"role":"email","type":"email","nameAttr":"mail","required":true},
                {"roles":["department","position"],"type":"text","nameAttr":"dept_pos"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].roles, vec![RoleTag::Email]);
        assert!(schema.fields[0].required);
        assert_eq!(
            schema.fields[1].roles,
            vec![RoleTag::Department, RoleTag::Position]
        );
        assert_eq!(schema.fields[1].kind, FieldKind::Text);
    }

    #[test]
    fn role_plus_roles_keeps_primary_first_without_duplicates() {
        let schema = FormSchema::parse_str(
            r#"{"fields":[{"role":"department","roles":["department","position"]}]}"#,
        )
        .unwrap();
        assert_eq!(
            schema.fields[0].roles,
            vec![RoleTag::Department, RoleTag::Position]
        );
    }

    #[test]
    fn fields_without_roles_are_excluded() {
        let schema = FormSchema::parse_str(
            r#"{"fields":[{"type":"text","nameAttr":"tracking"},{"role":"name"}]}"#,
        )
        .unwrap();
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].roles, vec![RoleTag::Name]);
    }

    #[test]
    fn invalid_shape_is_a_hard_error() {
        assert!(matches!(
            FormSchema::parse_str(r#"{"fields": "none"}"#),
            Err(SchemaError::InvalidSchema(_))
        ));
        assert!(matches!(
            FormSchema::parse_str(r#"{}"#),
            Err(SchemaError::InvalidSchema(_))
        ));
        assert!(matches!(
            FormSchema::parse_str("not json"),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn unknown_role_strings_become_other() {
        let schema =
            FormSchema::parse_str(r#"{"fields":[{"role":"mystery","type":"text"}]}"#).unwrap();
        assert_eq!(schema.fields[0].roles, vec![RoleTag::Other]);
    }

    #[test]
    fn blank_preferred_option_is_dropped() {
        let schema = FormSchema::parse_str(
            r#"{"fields":[{"role":"inquiryType","type":"select","preferredOption":"  "}]}"#,
        )
        .unwrap();
        assert!(schema.fields[0].preferred_option.is_none());
    }
}
