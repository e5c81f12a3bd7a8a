//! Type-specific fillers.
//!
//! All four share one state machine: try a candidate selector in a
//! context; if an element is found, match the desired choice (where
//! applicable), write, and record; otherwise move to the next selector,
//! then the next context; when everything is exhausted, record an explicit
//! failure. At most one write happens per logical field per pass, and any
//! per-attempt automation error is treated as a miss for that candidate.

pub mod checkbox;
pub mod radio;
pub mod select_box;
pub mod text;

use dom_port::{ContextId, DomPort, ElementId};
use tracing::debug;

/// One enabled choice control, with the data the matchers need.
pub(crate) struct ChoiceCandidate {
    pub el: ElementId,
    pub label: String,
    pub value_attr: String,
}

/// Enabled checkbox/radio elements for one selector in one context, in DOM
/// order, with labels and value attributes resolved. Per-element errors
/// drop that element only.
pub(crate) async fn choice_candidates(
    port: &dyn DomPort,
    ctx: &ContextId,
    selector: &str,
) -> Vec<ChoiceCandidate> {
    let elements = match port.query_all(ctx, selector).await {
        Ok(elements) => elements,
        Err(err) => {
            debug!(selector, context = %ctx, error = %err, "Selector miss");
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for el in elements {
        if port.is_disabled(ctx, &el).await.unwrap_or(true) {
            continue;
        }
        let label = port.label_text(ctx, &el).await.unwrap_or_default();
        let value_attr = port
            .attr(ctx, &el, "value")
            .await
            .ok()
            .flatten()
            .unwrap_or_default();
        out.push(ChoiceCandidate {
            el,
            label,
            value_attr,
        });
    }
    out
}
