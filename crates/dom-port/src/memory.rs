//! In-memory DOM: a `DomPort` over a captured page snapshot.
//!
//! Backs the test suite and the CLI dry-run mode. The snapshot is a plain
//! JSON document (elements per context, nested frames), so a fill pass can
//! be replayed end-to-end without a live browser.

use crate::errors::DomError;
use crate::frame::{ContextId, FrameNode};
use crate::matcher::parse_selector_list;
use crate::port::{DomPort, ElementId, SelectChoice};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

/// One element of a context snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub tag: String,
    /// Plain attributes; `id`, `class`, `name`, `type`, `src`, ... live here.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Rendered label text (`label[for]` or enclosing label), precomputed
    /// at capture time.
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub options: Vec<SelectChoice>,
}

impl ElementSnapshot {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// `<input type="...">` shorthand.
    pub fn input(input_type: &str) -> Self {
        Self::new("input").with_attr("type", input_type)
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_options(mut self, options: Vec<SelectChoice>) -> Self {
        self.options = options;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Elements of one document context plus its nested frames.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContextSnapshot {
    #[serde(default)]
    pub elements: Vec<ElementSnapshot>,
    #[serde(default)]
    pub frames: Vec<ContextSnapshot>,
}

/// A whole captured page: the main document context at the root.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(flatten)]
    pub root: ContextSnapshot,
}

/// In-memory [`DomPort`] implementation.
pub struct MemoryDom {
    tree: FrameNode,
    contexts: HashMap<ContextId, Mutex<Vec<ElementSnapshot>>>,
}

impl MemoryDom {
    pub fn from_snapshot(snapshot: PageSnapshot) -> Self {
        let mut contexts = HashMap::new();
        let tree = build_context(
            ContextId::main(),
            snapshot.root,
            &mut contexts,
        );
        Self { tree, contexts }
    }

    pub fn from_json(json: &str) -> Result<Self, DomError> {
        let snapshot: PageSnapshot =
            serde_json::from_str(json).map_err(|e| DomError::Backend(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Snapshot of one element, for assertions in tests and dry-run output.
    pub fn element_snapshot(
        &self,
        ctx: &ContextId,
        el: &ElementId,
    ) -> Result<ElementSnapshot, DomError> {
        let elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        Ok(elements[idx].clone())
    }

    fn elements(&self, ctx: &ContextId) -> Result<MutexGuard<'_, Vec<ElementSnapshot>>, DomError> {
        self.contexts
            .get(ctx)
            .ok_or_else(|| DomError::ContextNotFound(ctx.to_string()))?
            .lock()
            .map_err(|_| DomError::Backend("context lock poisoned".to_string()))
    }
}

fn build_context(
    id: ContextId,
    snapshot: ContextSnapshot,
    contexts: &mut HashMap<ContextId, Mutex<Vec<ElementSnapshot>>>,
) -> FrameNode {
    contexts.insert(id.clone(), Mutex::new(snapshot.elements));
    let children = snapshot
        .frames
        .into_iter()
        .enumerate()
        .map(|(i, frame)| build_context(ContextId(format!("{}.{}", id.0, i)), frame, contexts))
        .collect();
    FrameNode { id, children }
}

fn element_index(el: &ElementId, len: usize) -> Result<usize, DomError> {
    let idx: usize = el
        .0
        .parse()
        .map_err(|_| DomError::ElementNotFound(el.to_string()))?;
    if idx >= len {
        return Err(DomError::ElementNotFound(el.to_string()));
    }
    Ok(idx)
}

#[async_trait]
impl DomPort for MemoryDom {
    async fn frame_tree(&self) -> Result<FrameNode, DomError> {
        Ok(self.tree.clone())
    }

    async fn query_all(
        &self,
        ctx: &ContextId,
        selector: &str,
    ) -> Result<Vec<ElementId>, DomError> {
        let selectors = parse_selector_list(selector)?;
        let elements = self.elements(ctx)?;
        let mut out = Vec::new();
        for (idx, element) in elements.iter().enumerate() {
            if selectors
                .iter()
                .any(|s| s.matches(&element.tag, &element.attrs))
            {
                out.push(ElementId(idx.to_string()));
            }
        }
        Ok(out)
    }

    async fn tag_name(&self, ctx: &ContextId, el: &ElementId) -> Result<String, DomError> {
        let elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        Ok(elements[idx].tag.to_ascii_lowercase())
    }

    async fn attr(
        &self,
        ctx: &ContextId,
        el: &ElementId,
        name: &str,
    ) -> Result<Option<String>, DomError> {
        let elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        Ok(elements[idx].attrs.get(name).cloned())
    }

    async fn is_disabled(&self, ctx: &ContextId, el: &ElementId) -> Result<bool, DomError> {
        let elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        Ok(elements[idx].disabled)
    }

    async fn label_text(&self, ctx: &ContextId, el: &ElementId) -> Result<String, DomError> {
        let elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        Ok(elements[idx].label.clone())
    }

    async fn input_value(&self, ctx: &ContextId, el: &ElementId) -> Result<String, DomError> {
        let elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        Ok(elements[idx].value.clone())
    }

    async fn is_checked(&self, ctx: &ContextId, el: &ElementId) -> Result<bool, DomError> {
        let elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        Ok(elements[idx].checked)
    }

    async fn fill(&self, ctx: &ContextId, el: &ElementId, value: &str) -> Result<(), DomError> {
        let mut elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        let element = &mut elements[idx];
        match element.tag.as_str() {
            "input" | "textarea" => {
                element.value = value.to_string();
                Ok(())
            }
            other => Err(DomError::InvalidOperation(format!(
                "cannot fill a <{}>",
                other
            ))),
        }
    }

    async fn set_checked(&self, ctx: &ContextId, el: &ElementId) -> Result<(), DomError> {
        let mut elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;

        let element = &elements[idx];
        if element.tag != "input" {
            return Err(DomError::InvalidOperation(format!(
                "cannot check a <{}>",
                element.tag
            )));
        }
        let is_radio = element.attrs.get("type").map(String::as_str) == Some("radio");
        let group = element.attrs.get("name").cloned();

        // Radios are exclusive within their name group, like a real DOM.
        if is_radio {
            if let Some(group) = &group {
                for (i, sibling) in elements.iter_mut().enumerate() {
                    if i != idx
                        && sibling.attrs.get("type").map(String::as_str) == Some("radio")
                        && sibling.attrs.get("name") == Some(group)
                    {
                        sibling.checked = false;
                    }
                }
            }
        }

        elements[idx].checked = true;
        Ok(())
    }

    async fn options(
        &self,
        ctx: &ContextId,
        el: &ElementId,
    ) -> Result<Vec<SelectChoice>, DomError> {
        let elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        let element = &elements[idx];
        if element.tag != "select" {
            return Err(DomError::InvalidOperation(format!(
                "<{}> has no options",
                element.tag
            )));
        }
        Ok(element.options.clone())
    }

    async fn select_value(
        &self,
        ctx: &ContextId,
        el: &ElementId,
        value: &str,
    ) -> Result<(), DomError> {
        let mut elements = self.elements(ctx)?;
        let idx = element_index(el, elements.len())?;
        let element = &mut elements[idx];
        if element.tag != "select" {
            return Err(DomError::InvalidOperation(format!(
                "cannot select on a <{}>",
                element.tag
            )));
        }
        let exists = element.options.iter().any(|o| o.value == value);
        if !exists {
            return Err(DomError::InvalidOperation(format!(
                "no option with value '{}'",
                value
            )));
        }
        element.value = value.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::walk_breadth_first;

    fn page_with_frames() -> MemoryDom {
        let snapshot = PageSnapshot {
            root: ContextSnapshot {
                elements: vec![
                    ElementSnapshot::input("text").with_attr("name", "your_name"),
                    ElementSnapshot::new("iframe")
                        .with_attr("src", "https://forms.example.com/embed"),
                ],
                frames: vec![ContextSnapshot {
                    elements: vec![ElementSnapshot::input("email").with_attr("name", "mail")],
                    frames: Vec::new(),
                }],
            },
        };
        MemoryDom::from_snapshot(snapshot)
    }

    #[tokio::test]
    async fn frame_tree_enumerates_main_then_children() {
        let dom = page_with_frames();
        let tree = dom.frame_tree().await.unwrap();
        let order = walk_breadth_first(&tree);
        assert_eq!(order[0], ContextId::main());
        assert_eq!(order[1].0, "main.0");
    }

    #[tokio::test]
    async fn query_matches_in_dom_order() {
        let dom = page_with_frames();
        let hits = dom
            .query_all(&ContextId::main(), "input[name=\"your_name\"]")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let frame = ContextId("main.0".to_string());
        let hits = dom.query_all(&frame, "input[name=\"mail\"]").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn fill_and_read_back() {
        let dom = page_with_frames();
        let ctx = ContextId::main();
        let el = dom.query_all(&ctx, "input").await.unwrap()[0].clone();
        dom.fill(&ctx, &el, "テスト 太郎").await.unwrap();
        assert_eq!(dom.input_value(&ctx, &el).await.unwrap(), "テスト 太郎");
    }

    #[tokio::test]
    async fn radios_are_exclusive_within_a_name_group() {
        let snapshot = PageSnapshot {
            root: ContextSnapshot {
                elements: vec![
                    ElementSnapshot::input("radio")
                        .with_attr("name", "plan")
                        .with_value("a"),
                    ElementSnapshot::input("radio")
                        .with_attr("name", "plan")
                        .with_value("b"),
                ],
                frames: Vec::new(),
            },
        };
        let dom = MemoryDom::from_snapshot(snapshot);
        let ctx = ContextId::main();
        let els = dom.query_all(&ctx, "input[type=\"radio\"]").await.unwrap();

        dom.set_checked(&ctx, &els[0]).await.unwrap();
        dom.set_checked(&ctx, &els[1]).await.unwrap();
        assert!(!dom.is_checked(&ctx, &els[0]).await.unwrap());
        assert!(dom.is_checked(&ctx, &els[1]).await.unwrap());
    }

    #[tokio::test]
    async fn select_value_requires_known_option() {
        let snapshot = PageSnapshot {
            root: ContextSnapshot {
                elements: vec![ElementSnapshot::new("select").with_options(vec![
                    SelectChoice {
                        value: "1".to_string(),
                        text: "案件のご依頼".to_string(),
                        disabled: false,
                    },
                ])],
                frames: Vec::new(),
            },
        };
        let dom = MemoryDom::from_snapshot(snapshot);
        let ctx = ContextId::main();
        let el = dom.query_all(&ctx, "select").await.unwrap()[0].clone();

        assert!(dom.select_value(&ctx, &el, "2").await.is_err());
        dom.select_value(&ctx, &el, "1").await.unwrap();
        assert_eq!(dom.input_value(&ctx, &el).await.unwrap(), "1");
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let json = r#"{
            "elements": [
                {"tag": "input", "attrs": {"type": "text", "name": "your_name"}, "label": "お名前"}
            ],
            "frames": [
                {"elements": [{"tag": "textarea", "attrs": {"id": "msg"}}]}
            ]
        }"#;
        let dom = MemoryDom::from_json(json).unwrap();
        let order = walk_breadth_first(&dom.tree);
        assert_eq!(order.len(), 2);
    }
}
