//! The `DomPort` trait: the minimum browser-automation surface the engine
//! consumes.

use crate::errors::DomError;
use crate::frame::{ContextId, FrameNode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque element handle, valid within one document context for the
/// duration of a fill pass.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `<option>` of a select control.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SelectChoice {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Abstract page capability.
///
/// Implementations must return query results in DOM order; the engine's
/// documented tie-break for ambiguous substring matches is "first match in
/// DOM order". All operations are per-context; cross-frame search is the
/// engine's job via [`frame_tree`](DomPort::frame_tree) and
/// [`walk_breadth_first`](crate::frame::walk_breadth_first).
#[async_trait]
pub trait DomPort: Send + Sync {
    /// The tree of document contexts, main document at the root.
    async fn frame_tree(&self) -> Result<FrameNode, DomError>;

    /// Elements matching `selector` inside `ctx`, in DOM order.
    async fn query_all(
        &self,
        ctx: &ContextId,
        selector: &str,
    ) -> Result<Vec<ElementId>, DomError>;

    /// Lowercased tag name.
    async fn tag_name(&self, ctx: &ContextId, el: &ElementId) -> Result<String, DomError>;

    /// Attribute value, `None` when absent.
    async fn attr(
        &self,
        ctx: &ContextId,
        el: &ElementId,
        name: &str,
    ) -> Result<Option<String>, DomError>;

    async fn is_disabled(&self, ctx: &ContextId, el: &ElementId) -> Result<bool, DomError>;

    /// Rendered caption of the control: `label[for=id]` text, else the text
    /// of the closest enclosing `<label>`, else `""`.
    async fn label_text(&self, ctx: &ContextId, el: &ElementId) -> Result<String, DomError>;

    /// Current value of an input/textarea.
    async fn input_value(&self, ctx: &ContextId, el: &ElementId) -> Result<String, DomError>;

    /// Whether a checkbox/radio is currently checked.
    async fn is_checked(&self, ctx: &ContextId, el: &ElementId) -> Result<bool, DomError>;

    /// Write `value` into a text-like control, replacing its content.
    async fn fill(&self, ctx: &ContextId, el: &ElementId, value: &str) -> Result<(), DomError>;

    /// Set a checkbox/radio to checked. Never unchecks.
    async fn set_checked(&self, ctx: &ContextId, el: &ElementId) -> Result<(), DomError>;

    /// Options of a select control, in DOM order.
    async fn options(
        &self,
        ctx: &ContextId,
        el: &ElementId,
    ) -> Result<Vec<SelectChoice>, DomError>;

    /// Select the option with the given value attribute.
    async fn select_value(
        &self,
        ctx: &ContextId,
        el: &ElementId,
        value: &str,
    ) -> Result<(), DomError>;
}
