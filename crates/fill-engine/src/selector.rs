//! Candidate selector resolution.
//!
//! For each field the engine builds an ordered list of selectors to try,
//! most specific first: a name-scoped attribute selector, an id selector,
//! and only when neither attribute exists, a bare type selector that
//! matches the first control of that kind anywhere in the context.

use formreach_core_types::FieldKind;

/// Ordered candidate selectors for one field. Never empty.
pub fn candidate_selectors(kind: FieldKind, name_attr: &str, id_attr: &str) -> Vec<String> {
    let mut selectors = Vec::new();

    match kind {
        FieldKind::Checkbox => {
            if !name_attr.is_empty() {
                selectors.push(format!("input[type=\"checkbox\"][name=\"{}\"]", name_attr));
            }
            if !id_attr.is_empty() {
                selectors.push(format!("#{}", id_attr));
            }
            if selectors.is_empty() {
                selectors.push("input[type=\"checkbox\"]".to_string());
            }
        }
        FieldKind::Radio => {
            if !name_attr.is_empty() {
                selectors.push(format!("input[type=\"radio\"][name=\"{}\"]", name_attr));
            }
            if !id_attr.is_empty() {
                selectors.push(format!("#{}", id_attr));
            }
            if selectors.is_empty() {
                selectors.push("input[type=\"radio\"]".to_string());
            }
        }
        FieldKind::Select => {
            if !name_attr.is_empty() {
                selectors.push(format!("select[name=\"{}\"]", name_attr));
            }
            if !id_attr.is_empty() {
                selectors.push(format!("#{}", id_attr));
            }
            if selectors.is_empty() {
                selectors.push("select".to_string());
            }
        }
        FieldKind::Textarea => {
            if !name_attr.is_empty() {
                selectors.push(format!("textarea[name=\"{}\"]", name_attr));
            }
            if !id_attr.is_empty() {
                selectors.push(format!("#{}", id_attr));
            }
            if selectors.is_empty() {
                selectors.push("textarea".to_string());
            }
        }
        FieldKind::Text | FieldKind::Email | FieldKind::Tel | FieldKind::Number => {
            if !name_attr.is_empty() {
                selectors.push(format!("input[name=\"{}\"]", name_attr));
            }
            if !id_attr.is_empty() {
                selectors.push(format!("#{}", id_attr));
            }
            if selectors.is_empty() {
                selectors.push(format!("input[type=\"{}\"]", kind.as_str()));
            }
        }
    }

    selectors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_then_id_when_both_present() {
        let selectors = candidate_selectors(FieldKind::Checkbox, "agree", "consent-box");
        assert_eq!(
            selectors,
            vec![
                "input[type=\"checkbox\"][name=\"agree\"]".to_string(),
                "#consent-box".to_string(),
            ]
        );
    }

    #[test]
    fn id_only_fields_get_id_selector() {
        let selectors = candidate_selectors(FieldKind::Textarea, "", "msg");
        assert_eq!(selectors, vec!["#msg".to_string()]);
    }

    #[test]
    fn bare_type_selector_is_last_resort_only() {
        assert_eq!(
            candidate_selectors(FieldKind::Email, "", ""),
            vec!["input[type=\"email\"]".to_string()]
        );
        assert_eq!(
            candidate_selectors(FieldKind::Select, "", ""),
            vec!["select".to_string()]
        );
        // With an attribute hint the bare selector is never emitted.
        let selectors = candidate_selectors(FieldKind::Radio, "plan", "");
        assert_eq!(selectors, vec!["input[type=\"radio\"][name=\"plan\"]".to_string()]);
    }

    #[test]
    fn text_family_uses_plain_input_name_selector() {
        let selectors = candidate_selectors(FieldKind::Tel, "tel1", "");
        assert_eq!(selectors, vec!["input[name=\"tel1\"]".to_string()]);
    }

    #[test]
    fn always_returns_at_least_one() {
        for kind in [
            FieldKind::Text,
            FieldKind::Email,
            FieldKind::Tel,
            FieldKind::Number,
            FieldKind::Textarea,
            FieldKind::Select,
            FieldKind::Radio,
            FieldKind::Checkbox,
        ] {
            assert!(!candidate_selectors(kind, "", "").is_empty());
        }
    }
}
