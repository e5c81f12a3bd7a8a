//! Radio filler.

use crate::consent;
use crate::fillers::{choice_candidates, ChoiceCandidate};
use crate::summary::FillRecorder;
use crate::values::FieldValues;
use dom_port::{ContextId, DomPort};
use formreach_core_types::{FieldDescriptor, FillOutcome, RoleTag};
use tracing::{debug, info, warn};

/// Match precedence within a radio group: exact label, substring label,
/// exact value attribute, substring value attribute. Substring ties break
/// to the first match in DOM order.
fn pick_radio<'a>(
    candidates: &'a [ChoiceCandidate],
    desired: &str,
) -> Option<&'a ChoiceCandidate> {
    if desired.is_empty() {
        return None;
    }
    candidates
        .iter()
        .find(|c| c.label.trim() == desired)
        .or_else(|| candidates.iter().find(|c| c.label.contains(desired)))
        .or_else(|| candidates.iter().find(|c| c.value_attr == desired))
        .or_else(|| candidates.iter().find(|c| c.value_attr.contains(desired)))
}

/// Toggle the checked state of exactly one radio in the group. A group
/// where nothing matches the desired text is left untouched and recorded
/// as unresolved; agreement roles get the consent-keyword scan as a final
/// chance.
pub(crate) async fn fill_radio(
    port: &dyn DomPort,
    contexts: &[ContextId],
    field: &FieldDescriptor,
    values: &FieldValues,
    selectors: &[String],
    order: u32,
    recorder: &mut FillRecorder,
) {
    let desired = &values.write_value;

    for ctx in contexts {
        for selector in selectors {
            let candidates = choice_candidates(port, ctx, selector).await;
            if candidates.is_empty() {
                continue;
            }

            if let Some(candidate) = pick_radio(&candidates, desired) {
                match port.set_checked(ctx, &candidate.el).await {
                    Ok(()) => {
                        let recorded_value = if candidate.value_attr.is_empty() {
                            candidate.label.clone()
                        } else {
                            candidate.value_attr.clone()
                        };
                        info!(selector = %selector, context = %ctx, label = %candidate.label,
                            "Checked radio");
                        recorder.record_write(
                            field,
                            &values.satisfied,
                            order,
                            selector,
                            &recorded_value,
                            Some(candidate.label.as_str()),
                            FillOutcome::Matched,
                        );
                        return;
                    }
                    Err(err) => {
                        debug!(selector = %selector, context = %ctx, error = %err, "Radio check failed");
                    }
                }
            }
        }
    }

    if field.has_role(RoleTag::Agreement) {
        if let Some(control) = consent::find_consent_control(port, contexts).await {
            if port.set_checked(&control.ctx, &control.el).await.is_ok() {
                info!(label = %control.label, "Checked consent radio via keyword scan");
                recorder.record_write(
                    field,
                    &values.satisfied,
                    order,
                    &control.selector,
                    "checked",
                    Some(control.label.as_str()),
                    FillOutcome::Matched,
                );
                return;
            }
        }
    }

    warn!(label = %field.label, name = %field.name_attr, id = %field.id_attr,
        "Could not select any radio for field");
    recorder.record_unresolved(field, order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_port::ElementId;

    fn candidate(label: &str, value: &str) -> ChoiceCandidate {
        ChoiceCandidate {
            el: ElementId("0".to_string()),
            label: label.to_string(),
            value_attr: value.to_string(),
        }
    }

    #[test]
    fn exact_label_beats_substring() {
        let candidates = vec![
            candidate("その他のご相談", "99"),
            candidate("その他", "3"),
        ];
        let picked = pick_radio(&candidates, "その他").unwrap();
        assert_eq!(picked.value_attr, "3");
    }

    #[test]
    fn substring_tie_breaks_to_first_in_dom_order() {
        let candidates = vec![
            candidate("案件のご依頼について", "a"),
            candidate("案件のご依頼（その他）", "b"),
        ];
        let picked = pick_radio(&candidates, "ご依頼").unwrap();
        assert_eq!(picked.value_attr, "a");
    }

    #[test]
    fn value_attribute_is_matched_after_labels() {
        let candidates = vec![candidate("", "sales"), candidate("", "support")];
        let picked = pick_radio(&candidates, "support").unwrap();
        assert_eq!(picked.value_attr, "support");
    }

    #[test]
    fn empty_desired_matches_nothing() {
        let candidates = vec![candidate("はい", "yes")];
        assert!(pick_radio(&candidates, "").is_none());
    }
}
