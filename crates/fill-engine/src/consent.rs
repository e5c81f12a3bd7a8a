//! Consent-control heuristic.
//!
//! Privacy/terms agreement checkboxes are frequently mis-scoped by the
//! classifier (wrong name/id hints), so agreement roles get a dedicated
//! keyword scan over every checkbox/radio input on the page, independent
//! of the normal selector cascade.

use dom_port::{ContextId, DomPort, ElementId};
use tracing::debug;

/// Vocabulary that marks a control as a consent/agreement checkbox.
pub const CONSENT_KEYWORDS: &[&str] = &[
    "同意",
    "プライバシー",
    "個人情報",
    "利用規約",
    "agree",
    "consent",
    "privacy",
];

const CONSENT_PROBE: &str = "input[type=\"checkbox\"], input[type=\"radio\"]";

/// Whether a rendered label reads like a consent clause.
pub fn is_consent_label(label: &str) -> bool {
    if label.trim().is_empty() {
        return false;
    }
    let needle = label.to_lowercase();
    CONSENT_KEYWORDS.iter().any(|k| needle.contains(k))
}

/// A consent control located by the keyword scan.
#[derive(Clone, Debug)]
pub struct ConsentControl {
    pub ctx: ContextId,
    pub el: ElementId,
    pub label: String,
    pub selector: String,
}

/// Scan all checkbox/radio inputs across every context for a consent-like
/// label. First hit in context/DOM order wins; disabled controls are
/// skipped. Per-context errors are treated as misses.
pub async fn find_consent_control(
    port: &dyn DomPort,
    contexts: &[ContextId],
) -> Option<ConsentControl> {
    for ctx in contexts {
        let elements = match port.query_all(ctx, CONSENT_PROBE).await {
            Ok(elements) => elements,
            Err(err) => {
                debug!(context = %ctx, error = %err, "Consent scan skipped context");
                continue;
            }
        };
        for el in elements {
            if port.is_disabled(ctx, &el).await.unwrap_or(true) {
                continue;
            }
            let label = match port.label_text(ctx, &el).await {
                Ok(label) => label,
                Err(_) => continue,
            };
            if is_consent_label(&label) {
                return Some(ConsentControl {
                    ctx: ctx.clone(),
                    el,
                    label,
                    selector: CONSENT_PROBE.to_string(),
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_japanese_and_english_consent_labels() {
        assert!(is_consent_label("プライバシーポリシーに同意する"));
        assert!(is_consent_label("個人情報の取り扱いについて"));
        assert!(is_consent_label("I agree to the terms"));
        assert!(is_consent_label("Privacy Policy"));
    }

    #[test]
    fn rejects_ordinary_labels() {
        assert!(!is_consent_label("メルマガを受け取る"));
        assert!(!is_consent_label(""));
        assert!(!is_consent_label("その他"));
    }
}
