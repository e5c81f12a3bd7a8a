//! Checkbox filler.

use crate::consent;
use crate::fillers::choice_candidates;
use crate::summary::FillRecorder;
use crate::values::FieldValues;
use dom_port::{ContextId, DomPort};
use formreach_core_types::{FieldDescriptor, FillOutcome, RoleTag};
use tracing::{debug, info, warn};

/// Value recorded for checked controls.
const CHECKED: &str = "checked";

/// Check at most one control for this field; never unchecks.
///
/// Desired text (preferredOption, else the resolved value) is matched
/// against each option's rendered label: exact, then substring, then the
/// first enabled option. Agreement roles run the consent-keyword scan
/// first, independent of the selector list, because consent controls are
/// frequently mis-scoped by the classifier.
pub(crate) async fn fill_checkbox(
    port: &dyn DomPort,
    contexts: &[ContextId],
    field: &FieldDescriptor,
    values: &FieldValues,
    selectors: &[String],
    order: u32,
    recorder: &mut FillRecorder,
) {
    if field.has_role(RoleTag::Agreement) {
        if let Some(control) = consent::find_consent_control(port, contexts).await {
            match port.set_checked(&control.ctx, &control.el).await {
                Ok(()) => {
                    info!(label = %control.label, context = %control.ctx,
                        "Checked consent control via keyword scan");
                    recorder.record_write(
                        field,
                        &values.satisfied,
                        order,
                        &control.selector,
                        CHECKED,
                        Some(control.label.as_str()),
                        FillOutcome::Matched,
                    );
                    return;
                }
                Err(err) => {
                    warn!(error = %err, "Consent control check failed");
                }
            }
        }
    }

    let desired = &values.write_value;

    for ctx in contexts {
        for selector in selectors {
            let candidates = choice_candidates(port, ctx, selector).await;
            if candidates.is_empty() {
                continue;
            }

            let (picked, matched) = if desired.is_empty() {
                (candidates.first(), false)
            } else if let Some(exact) = candidates
                .iter()
                .find(|c| c.label.trim() == desired.as_str())
            {
                (Some(exact), true)
            } else if let Some(partial) =
                candidates.iter().find(|c| c.label.contains(desired.as_str()))
            {
                (Some(partial), true)
            } else {
                // Match miss: fall back to the first enabled option.
                (candidates.first(), false)
            };

            if let Some(candidate) = picked {
                match port.set_checked(ctx, &candidate.el).await {
                    Ok(()) => {
                        info!(selector = %selector, context = %ctx, label = %candidate.label,
                            "Checked checkbox");
                        recorder.record_write(
                            field,
                            &values.satisfied,
                            order,
                            selector,
                            CHECKED,
                            Some(candidate.label.as_str()),
                            if matched {
                                FillOutcome::Matched
                            } else {
                                FillOutcome::Fallback
                            },
                        );
                        return;
                    }
                    Err(err) => {
                        debug!(selector = %selector, context = %ctx, error = %err, "Check attempt failed");
                    }
                }
            }
        }
    }

    warn!(label = %field.label, name = %field.name_attr, id = %field.id_attr,
        "Could not check any checkbox for field");
    recorder.record_unresolved(field, order);
}
