//! Anti-bot detection pass.
//!
//! Runs before filling: probes for reCAPTCHA-style widgets and scans for
//! image-captcha input fields. Detections are recorded in the summary with
//! role `captcha` and `manual_action_required`; the rows exist so the
//! caller can abort or route the contact to a human. Detection errors
//! never block the fill pass.

use crate::summary::FillRecorder;
use dom_port::{ContextId, DomPort};
use formreach_core_types::{FieldKind, FillOutcome, FilledEntry, RoleTag};
use tracing::{debug, info};

/// Value recorded for every detection row.
pub const MANUAL_ACTION_REQUIRED: &str = "manual_action_required";

/// Selector probes for "I'm not a robot" style widgets.
const RECAPTCHA_PROBES: &[&str] = &[
    "iframe[src*=\"google.com/recaptcha\"]",
    "div.g-recaptcha",
    "div.recaptcha",
    "input[aria-label*=\"ロボットではありません\"]",
];

/// Keywords marking an input as an image-captcha answer box.
const IMAGE_CAPTCHA_KEYWORDS: &[&str] = &[
    "captcha",
    "認証コード",
    "確認コード",
    "セキュリティコード",
    "画像認証",
    "画像の文字",
    "画像に表示",
];

/// Probe the page for anti-bot controls, recording one row per finding.
/// Returns true when anything was detected.
pub async fn detect(
    port: &dyn DomPort,
    contexts: &[ContextId],
    recorder: &mut FillRecorder,
) -> bool {
    let mut found = false;

    'probes: for probe in RECAPTCHA_PROBES {
        for ctx in contexts {
            match port.query_all(ctx, probe).await {
                Ok(elements) if !elements.is_empty() => {
                    info!(selector = %probe, context = %ctx, "Detected reCAPTCHA/anti-bot widget");
                    recorder.record_detection(FilledEntry {
                        role: RoleTag::Captcha,
                        roles: vec![RoleTag::Captcha],
                        kind: FieldKind::Checkbox,
                        label: "reCAPTCHA detected".to_string(),
                        name_attr: String::new(),
                        id_attr: String::new(),
                        selector: probe.to_string(),
                        value: MANUAL_ACTION_REQUIRED.to_string(),
                        option_label: None,
                        order: 0,
                        outcome: FillOutcome::Detected,
                    });
                    found = true;
                    break 'probes;
                }
                Ok(_) => {}
                Err(err) => debug!(selector = %probe, error = %err, "Captcha probe failed"),
            }
        }
    }

    found |= detect_image_captchas(port, contexts, recorder).await;
    found
}

/// Keyword scan over input/textarea identity hints for image-captcha answer
/// boxes. Values are never typed into them.
async fn detect_image_captchas(
    port: &dyn DomPort,
    contexts: &[ContextId],
    recorder: &mut FillRecorder,
) -> bool {
    let mut found = false;

    for ctx in contexts {
        let elements = match port.query_all(ctx, "input, textarea").await {
            Ok(elements) => elements,
            Err(err) => {
                debug!(context = %ctx, error = %err, "Image-captcha scan skipped context");
                continue;
            }
        };

        for el in elements {
            let tag = port.tag_name(ctx, &el).await.unwrap_or_default();
            let name_attr = port.attr(ctx, &el, "name").await.ok().flatten().unwrap_or_default();
            let id_attr = port.attr(ctx, &el, "id").await.ok().flatten().unwrap_or_default();
            let placeholder = port
                .attr(ctx, &el, "placeholder")
                .await
                .ok()
                .flatten()
                .unwrap_or_default();
            let aria = port
                .attr(ctx, &el, "aria-label")
                .await
                .ok()
                .flatten()
                .unwrap_or_default();
            let label = port.label_text(ctx, &el).await.unwrap_or_default();

            let combined = format!("{} {} {} {} {}", name_attr, id_attr, placeholder, aria, label)
                .to_lowercase();
            if !IMAGE_CAPTCHA_KEYWORDS.iter().any(|k| combined.contains(k)) {
                continue;
            }

            let selector = if !id_attr.is_empty() {
                format!("#{}", id_attr)
            } else if !name_attr.is_empty() {
                format!("{}[name=\"{}\"]", tag, name_attr)
            } else if !tag.is_empty() {
                tag.clone()
            } else {
                "input".to_string()
            };

            let display_label = if !label.is_empty() {
                label
            } else if !placeholder.is_empty() {
                placeholder
            } else {
                aria
            };

            info!(selector = %selector, context = %ctx, "Detected image-captcha input");
            recorder.record_detection(FilledEntry {
                role: RoleTag::Captcha,
                roles: vec![RoleTag::Captcha],
                kind: if tag == "textarea" {
                    FieldKind::Textarea
                } else {
                    FieldKind::Text
                },
                label: display_label,
                name_attr,
                id_attr,
                selector,
                value: MANUAL_ACTION_REQUIRED.to_string(),
                option_label: None,
                order: 0,
                outcome: FillOutcome::Detected,
            });
            found = true;
        }
    }

    found
}
