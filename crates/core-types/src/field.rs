//! Field descriptors: one logical question in a form, independent of how
//! many DOM elements implement it.

use crate::roles::RoleTag;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declared control type of a form field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Textarea => "textarea",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
        }
    }

    /// Parse a classifier/DOM type string. Unknown or missing types are
    /// treated as plain text inputs.
    pub fn from_wire(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "number" => FieldKind::Number,
            "textarea" => FieldKind::Textarea,
            "select" => FieldKind::Select,
            "radio" => FieldKind::Radio,
            "checkbox" => FieldKind::Checkbox,
            _ => FieldKind::Text,
        }
    }

    /// Free-text input written verbatim (as opposed to a choice control).
    pub fn is_text_like(self) -> bool {
        matches!(
            self,
            FieldKind::Text
                | FieldKind::Email
                | FieldKind::Tel
                | FieldKind::Number
                | FieldKind::Textarea
        )
    }

    pub fn is_choice(self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Radio | FieldKind::Checkbox)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FieldKind::from_wire(&s))
    }
}

/// One logical question in the form, as understood by the classifier.
///
/// A radio/checkbox group that spans several DOM elements is still a single
/// descriptor after logical-field collapsing. A descriptor with an empty
/// `roles` list is dropped before value resolution and produces no side
/// effect.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Ordered role set; the first entry is the primary role.
    pub roles: Vec<RoleTag>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub name_attr: String,
    pub id_attr: String,
    pub required: bool,
    /// Classifier hint: which choice text to select for categorical
    /// single-choice fields (radio/select).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_option: Option<String>,
}

impl FieldDescriptor {
    pub fn primary_role(&self) -> Option<RoleTag> {
        self.roles.first().copied()
    }

    pub fn has_role(&self, role: RoleTag) -> bool {
        self.roles.contains(&role)
    }

    /// True when every role is a sentinel (`other`/`captcha`): the field is
    /// recorded but never written.
    pub fn is_sentinel_only(&self) -> bool {
        !self.roles.is_empty() && self.roles.iter().all(|r| r.is_sentinel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_defaults_to_text() {
        assert_eq!(FieldKind::from_wire("password"), FieldKind::Text);
        assert_eq!(FieldKind::from_wire(""), FieldKind::Text);
        assert_eq!(FieldKind::from_wire("SELECT"), FieldKind::Select);
    }

    #[test]
    fn text_like_and_choice_partition() {
        assert!(FieldKind::Textarea.is_text_like());
        assert!(FieldKind::Tel.is_text_like());
        assert!(!FieldKind::Radio.is_text_like());
        assert!(FieldKind::Checkbox.is_choice());
        assert!(!FieldKind::Email.is_choice());
    }

    #[test]
    fn sentinel_only_detection() {
        let field = FieldDescriptor {
            roles: vec![RoleTag::Other],
            ..Default::default()
        };
        assert!(field.is_sentinel_only());

        let field = FieldDescriptor {
            roles: vec![RoleTag::Other, RoleTag::Email],
            ..Default::default()
        };
        assert!(!field.is_sentinel_only());

        let empty = FieldDescriptor::default();
        assert!(!empty.is_sentinel_only());
    }
}
