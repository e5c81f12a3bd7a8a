//! Local fallback extraction: when the external classifier returns nothing
//! usable, scrape the raw HTML for input fields and emit them with role
//! `other` so the run can still log what the form asked.

use crate::analyzer::FormAnalyzer;
use crate::errors::SchemaError;
use crate::model::FormSchema;
use async_trait::async_trait;
use formreach_core_types::{FieldDescriptor, FieldKind, RoleTag};
use regex::Regex;
use tracing::{info, warn};

/// Input types that never take user data.
fn is_ignored_input_type(t: &str) -> bool {
    matches!(t, "hidden" | "submit" | "reset" | "button" | "image")
}

/// Regex-based field extractor. Deliberately crude: it only has to recover
/// enough structure for an audit row per field, not a faithful DOM.
pub struct FallbackExtractor {
    tag_re: Regex,
    attr_re: Regex,
    required_re: Regex,
    aria_required_re: Regex,
}

impl FallbackExtractor {
    pub fn new() -> Self {
        Self {
            tag_re: Regex::new(r"(?i)<(input|textarea|select)\b([^>]*)>").unwrap(),
            attr_re: Regex::new(r#"([a-zA-Z][a-zA-Z0-9-]*)\s*=\s*["']([^"']*)["']"#).unwrap(),
            required_re: Regex::new(r"(?i)\srequired\b").unwrap(),
            aria_required_re: Regex::new(r#"(?i)aria-required\s*=\s*["']?true"#).unwrap(),
        }
    }

    /// Extract a degraded schema from raw HTML. Every field gets role
    /// `other`; errors only when nothing at all can be extracted.
    pub fn extract(&self, html: &str) -> Result<FormSchema, SchemaError> {
        let mut fields = Vec::new();

        for caps in self.tag_re.captures_iter(html) {
            let tag = caps[1].to_ascii_lowercase();
            let attrs_raw = caps.get(2).map(|m| m.as_str()).unwrap_or("");

            let mut name_attr = String::new();
            let mut id_attr = String::new();
            let mut placeholder = String::new();
            let mut type_attr = String::new();
            for attr in self.attr_re.captures_iter(attrs_raw) {
                match attr[1].to_ascii_lowercase().as_str() {
                    "name" => name_attr = attr[2].to_string(),
                    "id" => id_attr = attr[2].to_string(),
                    "placeholder" => placeholder = attr[2].to_string(),
                    "type" => type_attr = attr[2].to_ascii_lowercase(),
                    _ => {}
                }
            }

            let kind = match tag.as_str() {
                "textarea" => FieldKind::Textarea,
                "select" => FieldKind::Select,
                _ => {
                    let t = if type_attr.is_empty() { "text" } else { &type_attr };
                    if is_ignored_input_type(t) {
                        continue;
                    }
                    FieldKind::from_wire(t)
                }
            };

            let label = if !placeholder.is_empty() {
                placeholder
            } else if !name_attr.is_empty() {
                name_attr.clone()
            } else if !id_attr.is_empty() {
                id_attr.clone()
            } else if kind == FieldKind::Textarea {
                "内容".to_string()
            } else {
                String::new()
            };

            let required = self.required_re.is_match(attrs_raw)
                || self.aria_required_re.is_match(attrs_raw);

            fields.push(FieldDescriptor {
                roles: vec![RoleTag::Other],
                kind,
                label,
                name_attr,
                id_attr,
                required,
                preferred_option: None,
            });
        }

        if fields.is_empty() {
            warn!("Fallback extraction found no form fields");
            return Err(SchemaError::NoFields);
        }

        info!(count = fields.len(), "Fallback extraction produced fields");
        Ok(FormSchema { fields })
    }
}

impl Default for FallbackExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormAnalyzer for FallbackExtractor {
    async fn analyze(&self, form_html: &str) -> Result<FormSchema, SchemaError> {
        self.extract(form_html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_user_inputs_and_skips_technical_ones() {
        let html = r#"
            <form>
              <input type="hidden" name="csrf" value="x">
              <input type="text" name="your_name" placeholder="お名前" required>
              <input type="submit" value="送信">
              <textarea name="body"></textarea>
              <select name="pref"><option>東京都</option></select>
            </form>
        "#;
        let schema = FallbackExtractor::new().extract(html).unwrap();
        assert_eq!(schema.fields.len(), 3);

        let name = &schema.fields[0];
        assert_eq!(name.roles, vec![RoleTag::Other]);
        assert_eq!(name.label, "お名前");
        assert!(name.required);

        assert_eq!(schema.fields[1].kind, FieldKind::Textarea);
        assert_eq!(schema.fields[1].label, "body");
        assert_eq!(schema.fields[2].kind, FieldKind::Select);
    }

    #[test]
    fn textarea_without_attributes_gets_default_label() {
        let schema = FallbackExtractor::new()
            .extract("<textarea></textarea>")
            .unwrap();
        assert_eq!(schema.fields[0].label, "内容");
    }

    #[test]
    fn aria_required_counts_as_required() {
        let schema = FallbackExtractor::new()
            .extract(r#"<input type="email" name="mail" aria-required="true">"#)
            .unwrap();
        assert!(schema.fields[0].required);
    }

    #[test]
    fn empty_page_is_an_error() {
        assert!(matches!(
            FallbackExtractor::new().extract("<div>no form here</div>"),
            Err(SchemaError::NoFields)
        ));
    }

    #[test]
    fn missing_input_type_defaults_to_text() {
        let schema = FallbackExtractor::new()
            .extract(r#"<input name="q">"#)
            .unwrap();
        assert_eq!(schema.fields[0].kind, FieldKind::Text);
    }
}
