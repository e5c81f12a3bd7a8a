//! Tiny CSS-subset selector matcher backing the in-memory DOM.
//!
//! Supports exactly the selector shapes the engine produces: a comma list
//! of compound simple selectors made of a tag name, `#id`, `.class`, and
//! attribute checks (`[name]`, `[name="v"]`, `[name*="v"]`). Combinators
//! are not supported and yield an error.

use crate::errors::DomError;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttrOp {
    Exists,
    Equals,
    Contains,
}

#[derive(Clone, Debug)]
pub struct AttrCheck {
    pub name: String,
    pub op: AttrOp,
    pub value: String,
}

/// One compound simple selector (`input[type="radio"][name="x"]`).
#[derive(Clone, Debug, Default)]
pub struct SimpleSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCheck>,
}

impl SimpleSelector {
    /// Match against an element described by its tag and attribute map
    /// (`id` and `class` are plain attributes).
    pub fn matches(&self, tag: &str, attrs: &BTreeMap<String, String>) -> bool {
        if let Some(want) = &self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if attrs.get("id").map(String::as_str) != Some(want.as_str()) {
                return false;
            }
        }
        for class in &self.classes {
            let found = attrs
                .get("class")
                .map(|c| c.split_whitespace().any(|part| part == class))
                .unwrap_or(false);
            if !found {
                return false;
            }
        }
        for check in &self.attrs {
            let actual = attrs.get(&check.name);
            let ok = match (check.op, actual) {
                (AttrOp::Exists, Some(_)) => true,
                (AttrOp::Equals, Some(v)) => v == &check.value,
                (AttrOp::Contains, Some(v)) => v.contains(&check.value),
                (_, None) => false,
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

/// Parse a comma-separated selector list.
pub fn parse_selector_list(input: &str) -> Result<Vec<SimpleSelector>, DomError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_compound)
        .collect()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if is_ident_char(c) {
            ident.push(c);
            chars.next();
        } else {
            break;
        }
    }
    ident
}

fn parse_compound(input: &str) -> Result<SimpleSelector, DomError> {
    let mut selector = SimpleSelector::default();
    let mut chars = input.chars().peekable();

    if chars.peek().map(|c| c.is_ascii_alphabetic()).unwrap_or(false) {
        selector.tag = Some(take_ident(&mut chars).to_ascii_lowercase());
    }

    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                chars.next();
                let ident = take_ident(&mut chars);
                if ident.is_empty() {
                    return Err(DomError::UnsupportedSelector(input.to_string()));
                }
                selector.id = Some(ident);
            }
            '.' => {
                chars.next();
                let ident = take_ident(&mut chars);
                if ident.is_empty() {
                    return Err(DomError::UnsupportedSelector(input.to_string()));
                }
                selector.classes.push(ident);
            }
            '[' => {
                chars.next();
                let mut body = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }
                if !closed {
                    return Err(DomError::UnsupportedSelector(input.to_string()));
                }
                selector.attrs.push(parse_attr_check(&body, input)?);
            }
            _ => return Err(DomError::UnsupportedSelector(input.to_string())),
        }
    }

    if selector.tag.is_none()
        && selector.id.is_none()
        && selector.classes.is_empty()
        && selector.attrs.is_empty()
    {
        return Err(DomError::UnsupportedSelector(input.to_string()));
    }

    Ok(selector)
}

fn parse_attr_check(body: &str, whole: &str) -> Result<AttrCheck, DomError> {
    let (name_part, op, value_part) = if let Some(idx) = body.find("*=") {
        (&body[..idx], AttrOp::Contains, Some(&body[idx + 2..]))
    } else if let Some(idx) = body.find('=') {
        (&body[..idx], AttrOp::Equals, Some(&body[idx + 1..]))
    } else {
        (body, AttrOp::Exists, None)
    };

    let name = name_part.trim().to_string();
    if name.is_empty() {
        return Err(DomError::UnsupportedSelector(whole.to_string()));
    }

    let value = match value_part {
        Some(raw) => {
            let trimmed = raw.trim();
            trimmed
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .or_else(|| {
                    trimmed
                        .strip_prefix('\'')
                        .and_then(|s| s.strip_suffix('\''))
                })
                .unwrap_or(trimmed)
                .to_string()
        }
        None => String::new(),
    };

    Ok(AttrCheck { name, op, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_scoped_attribute_selector() {
        let list = parse_selector_list("input[type=\"checkbox\"][name=\"agree\"]").unwrap();
        assert_eq!(list.len(), 1);
        let sel = &list[0];
        assert_eq!(sel.tag.as_deref(), Some("input"));
        assert_eq!(sel.attrs.len(), 2);
        assert!(sel.matches(
            "input",
            &attrs(&[("type", "checkbox"), ("name", "agree")])
        ));
        assert!(!sel.matches("input", &attrs(&[("type", "checkbox")])));
    }

    #[test]
    fn id_and_class_selectors() {
        let sel = &parse_selector_list("#msg").unwrap()[0];
        assert!(sel.matches("textarea", &attrs(&[("id", "msg")])));
        assert!(!sel.matches("textarea", &attrs(&[("id", "other")])));

        let sel = &parse_selector_list("div.g-recaptcha").unwrap()[0];
        assert!(sel.matches("div", &attrs(&[("class", "box g-recaptcha")])));
        assert!(!sel.matches("div", &attrs(&[("class", "g-recaptcha-badge")])));
    }

    #[test]
    fn contains_operator() {
        let sel = &parse_selector_list("iframe[src*=\"google.com/recaptcha\"]").unwrap()[0];
        assert!(sel.matches(
            "iframe",
            &attrs(&[("src", "https://www.google.com/recaptcha/api2/anchor")])
        ));
        assert!(!sel.matches("iframe", &attrs(&[("src", "https://example.com")])));
    }

    #[test]
    fn comma_list_and_bare_tags() {
        let list = parse_selector_list("input, textarea").unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[0].matches("input", &attrs(&[])));
        assert!(list[1].matches("textarea", &attrs(&[])));
    }

    #[test]
    fn rejects_combinators() {
        assert!(parse_selector_list("body > input").is_err());
        assert!(parse_selector_list("").is_ok());
    }
}
