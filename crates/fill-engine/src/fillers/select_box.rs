//! Select (dropdown) filler.

use crate::summary::FillRecorder;
use crate::values::FieldValues;
use dom_port::{ContextId, DomPort, SelectChoice};
use formreach_core_types::{FieldDescriptor, FillOutcome};
use tracing::{debug, info, warn};

/// Placeholder phrases that must never be "selected" as a real answer.
fn is_placeholder_text(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() {
        return true;
    }
    let lower = t.to_lowercase();
    t.contains("選択してください") || lower.contains("please select")
}

/// Option matched by text: exact (trimmed), then substring. First match in
/// DOM order wins.
fn pick_option<'a>(options: &'a [SelectChoice], desired: &str) -> Option<&'a SelectChoice> {
    if desired.is_empty() {
        return None;
    }
    options
        .iter()
        .find(|o| !o.disabled && o.text.trim() == desired)
        .or_else(|| options.iter().find(|o| !o.disabled && o.text.contains(desired)))
}

/// First enabled option that is not a placeholder phrase.
fn pick_fallback(options: &[SelectChoice]) -> Option<&SelectChoice> {
    options
        .iter()
        .find(|o| !o.disabled && !is_placeholder_text(&o.text))
}

/// Select the option whose text matches the desired value, falling back to
/// the first non-placeholder option. Records both the human-readable label
/// and the underlying value attribute.
pub(crate) async fn fill_select(
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
                let options = match port.options(ctx, &el).await {
                    Ok(options) => options,
                    Err(err) => {
                        debug!(selector = %selector, context = %ctx, error = %err, "Options unavailable");
                        continue;
                    }
                };
                if options.is_empty() {
                    continue;
                }

                let (choice, outcome) = match pick_option(&options, desired) {
                    Some(choice) => (choice, FillOutcome::Matched),
                    None => match pick_fallback(&options) {
                        Some(choice) => (choice, FillOutcome::Fallback),
                        None => continue,
                    },
                };

                match port.select_value(ctx, &el, &choice.value).await {
                    Ok(()) => {
                        let recorded_value = if choice.value.is_empty() {
                            choice.text.clone()
                        } else {
                            choice.value.clone()
                        };
                        info!(selector = %selector, context = %ctx, option = %choice.text,
                            "Selected option");
                        recorder.record_write(
                            field,
                            &values.satisfied,
                            order,
                            selector,
                            &recorded_value,
                            Some(choice.text.as_str()),
                            outcome,
                        );
                        return;
                    }
                    Err(err) => {
                        debug!(selector = %selector, context = %ctx, error = %err, "Select failed");
                    }
                }
            }
        }
    }

    warn!(label = %field.label, name = %field.name_attr, id = %field.id_attr,
        "Could not select any option for field");
    recorder.record_unresolved(field, order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(text: &str, value: &str) -> SelectChoice {
        SelectChoice {
            value: value.to_string(),
            text: text.to_string(),
            disabled: false,
        }
    }

    #[test]
    fn exact_text_match_wins() {
        let options = vec![
            choice("選択してください", ""),
            choice("案件のご依頼", "1"),
            choice("その他", "2"),
        ];
        let picked = pick_option(&options, "案件のご依頼").unwrap();
        assert_eq!(picked.value, "1");
    }

    #[test]
    fn fallback_skips_placeholder() {
        let options = vec![
            choice("選択してください", ""),
            choice("案件のご依頼", "1"),
            choice("その他", "2"),
        ];
        assert!(pick_option(&options, "存在しない選択肢").is_none());
        let fallback = pick_fallback(&options).unwrap();
        assert_eq!(fallback.text, "案件のご依頼");
    }

    #[test]
    fn placeholder_detection_is_case_insensitive_for_english() {
        assert!(is_placeholder_text("Please Select"));
        assert!(is_placeholder_text("-- 選択してください --"));
        assert!(is_placeholder_text("   "));
        assert!(!is_placeholder_text("東京都"));
    }
}
