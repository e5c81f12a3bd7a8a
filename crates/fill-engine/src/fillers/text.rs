//! Text/textarea filler.

use crate::summary::FillRecorder;
use crate::values::FieldValues;
use dom_port::{ContextId, DomPort};
use formreach_core_types::{FieldDescriptor, FillOutcome};
use tracing::{debug, info, warn};

/// Selector used by the system-wide last-resort sweep.
const SWEEP_SELECTOR: &str = "input, textarea";

fn is_text_input_type(t: &str) -> bool {
    matches!(t, "" | "text" | "email" | "tel" | "number")
}

/// Write the resolved string verbatim into the first matching, enabled
/// element. When no candidate selector matches anywhere, fall back to the
/// first unfilled text-like input on the page so an obviously required
/// field is not left empty; that write is recorded distinctly. An empty
/// resolved value is an unresolvable field.
pub(crate) async fn fill_text(
    port: &dyn DomPort,
    contexts: &[ContextId],
    field: &FieldDescriptor,
    values: &FieldValues,
    selectors: &[String],
    order: u32,
    recorder: &mut FillRecorder,
) {
    let value = &values.write_value;
    if value.is_empty() {
        debug!(label = %field.label, "No value resolved for text field");
        recorder.record_unresolved(field, order);
        return;
    }

    for ctx in contexts {
        for selector in selectors {
            let elements = match port.query_all(ctx, selector).await {
                Ok(elements) => elements,
                Err(err) => {
                    debug!(selector = %selector, context = %ctx, error = %err, "Selector miss");
                    continue;
                }
            };
            for el in elements {
                if port.is_disabled(ctx, &el).await.unwrap_or(true) {
                    continue;
                }
                match port.fill(ctx, &el, value).await {
                    Ok(()) => {
                        info!(selector = %selector, context = %ctx, "Filled text field");
                        recorder.record_write(
                            field,
                            &values.satisfied,
                            order,
                            selector,
                            value,
                            None,
                            FillOutcome::Matched,
                        );
                        return;
                    }
                    Err(err) => {
                        warn!(selector = %selector, context = %ctx, error = %err, "Fill attempt failed");
                    }
                }
            }
        }
    }

    // Last resort: first unfilled text-like input anywhere on the page.
    for ctx in contexts {
        let elements = match port.query_all(ctx, SWEEP_SELECTOR).await {
            Ok(elements) => elements,
            Err(_) => continue,
        };
        for el in elements {
            let tag = port.tag_name(ctx, &el).await.unwrap_or_default();
            if tag == "input" {
                let input_type = port
                    .attr(ctx, &el, "type")
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or_default();
                if !is_text_input_type(&input_type) {
                    continue;
                }
            }
            if port.is_disabled(ctx, &el).await.unwrap_or(true) {
                continue;
            }
            if !port.input_value(ctx, &el).await.unwrap_or_default().is_empty() {
                continue;
            }
            if port.fill(ctx, &el, value).await.is_ok() {
                warn!(
                    context = %ctx,
                    label = %field.label,
                    "No selector matched; filled first empty text input as last resort"
                );
                recorder.record_write(
                    field,
                    &values.satisfied,
                    order,
                    SWEEP_SELECTOR,
                    value,
                    None,
                    FillOutcome::Fallback,
                );
                return;
            }
        }
    }

    warn!(label = %field.label, name = %field.name_attr, id = %field.id_attr,
        "Could not fill text field with any selector");
    recorder.record_unresolved(field, order);
}
