//! Role → value resolution.
//!
//! Pure functions from a semantic role plus the sender profile to the
//! string that should be typed or selected. Total: every role yields a
//! string for any profile, including an empty one.

use formreach_core_types::{FieldDescriptor, RoleTag, SenderProfile};

/// Separator used when one text input serves several roles at once
/// ("department / position" style fields).
pub const MULTI_ROLE_SEPARATOR: &str = " ・ ";

/// Resolve the value for one role.
///
/// `message` is the explicit message argument of the run; it takes
/// precedence over any `message` key in the profile. Unknown and sentinel
/// roles resolve to the empty string.
pub fn value_for_role(role: RoleTag, profile: &SenderProfile, message: Option<&str>) -> String {
    match role {
        // Name cluster: split fields fall back to the whole-name field.
        RoleTag::Name => profile.get("name").to_string(),
        RoleTag::LastName => profile.first_of(&["lastName", "name"]).to_string(),
        RoleTag::FirstName => profile.first_of(&["firstName", "name"]).to_string(),
        RoleTag::NameKana => profile.get("nameKana").to_string(),
        RoleTag::LastNameKana => profile.first_of(&["lastNameKana", "nameKana"]).to_string(),
        RoleTag::FirstNameKana => profile.first_of(&["firstNameKana", "nameKana"]).to_string(),
        RoleTag::NameHira => profile.first_of(&["nameHira", "nameKana"]).to_string(),
        RoleTag::LastNameHira => profile
            .first_of(&["lastNameHira", "nameHira", "lastNameKana", "nameKana"])
            .to_string(),
        RoleTag::FirstNameHira => profile
            .first_of(&["firstNameHira", "nameHira", "firstNameKana", "nameKana"])
            .to_string(),

        // Contact cluster.
        RoleTag::Email => profile.get("email").to_string(),
        RoleTag::ConfirmEmail => profile.get("email").to_string(),
        RoleTag::Phone => joined_phone(profile),
        RoleTag::Phone1 => profile.get("phone1").to_string(),
        RoleTag::Phone2 => profile.get("phone2").to_string(),
        RoleTag::Phone3 => profile.get("phone3").to_string(),
        RoleTag::PersonalPhone => {
            let personal = profile.get("personalPhone");
            if personal.is_empty() {
                joined_phone(profile)
            } else {
                personal.to_string()
            }
        }
        RoleTag::CorporateSiteUrl => profile.get("corporateSiteUrl").to_string(),

        // Organization cluster.
        RoleTag::CompanyName => profile.first_of(&["companyName", "company"]).to_string(),
        RoleTag::CompanyNameKana => profile.get("companyNameKana").to_string(),
        RoleTag::Department => profile.get("department").to_string(),
        RoleTag::Position => profile.get("position").to_string(),
        RoleTag::CompanyType => profile.get("companyType").to_string(),
        RoleTag::Industry => profile.get("industry").to_string(),

        // Address cluster.
        RoleTag::PostalCode => joined_postal_code(profile),
        RoleTag::PostalCode1 => profile.get("postalCode1").to_string(),
        RoleTag::PostalCode2 => profile.get("postalCode2").to_string(),
        RoleTag::Prefecture => profile.get("prefecture").to_string(),
        RoleTag::City => profile.get("city").to_string(),
        RoleTag::Town => profile.get("town").to_string(),
        RoleTag::Street => profile.get("street").to_string(),
        RoleTag::Building => profile.get("building").to_string(),
        RoleTag::Address => joined_address(profile),
        RoleTag::StreetAddress => joined_street_address(profile),
        RoleTag::Country => profile.get("country").to_string(),

        // Categorical / free-text cluster.
        RoleTag::Subject => profile.get("subject").to_string(),
        RoleTag::InquiryType => {
            let value = profile.first_of(&["inquiryType", "inquiryCategory"]);
            if value.is_empty() {
                profile.inquiry_label.clone()
            } else {
                value.to_string()
            }
        }
        RoleTag::Message => message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(profile.get("message"))
            .to_string(),
        RoleTag::Gender => profile.get("gender").to_string(),
        RoleTag::Age => profile.get("age").to_string(),
        RoleTag::Referral => profile.get("referral").to_string(),

        // Sentinels and controls with no typed value.
        RoleTag::Agreement | RoleTag::Captcha | RoleTag::Other => String::new(),
    }
}

/// `phone1..3` joined with the profile delimiter when any part exists,
/// else the flat `phone` field. Decomposition is never attempted.
fn joined_phone(profile: &SenderProfile) -> String {
    let parts: Vec<&str> = ["phone1", "phone2", "phone3"]
        .iter()
        .map(|k| profile.get(k))
        .filter(|v| !v.is_empty())
        .collect();
    if parts.is_empty() {
        profile.get("phone").to_string()
    } else {
        parts.join(&profile.phone_delimiter)
    }
}

/// `postalCode1-postalCode2` when parts exist, else the flat `postalCode`.
fn joined_postal_code(profile: &SenderProfile) -> String {
    let parts: Vec<&str> = ["postalCode1", "postalCode2"]
        .iter()
        .map(|k| profile.get(k))
        .filter(|v| !v.is_empty())
        .collect();
    if parts.is_empty() {
        profile.get("postalCode").to_string()
    } else {
        parts.join("-")
    }
}

/// `city + town + street + building` concatenated (Japanese addresses carry
/// no separators) when any part exists, else the flat `address`.
fn joined_address(profile: &SenderProfile) -> String {
    let joined: String = ["city", "town", "street", "building"]
        .iter()
        .map(|k| profile.get(k))
        .collect();
    if joined.is_empty() {
        profile.get("address").to_string()
    } else {
        joined
    }
}

/// Town and street only, for forms that ask for "町名番地" separate from
/// the municipality.
fn joined_street_address(profile: &SenderProfile) -> String {
    let joined: String = ["town", "street"].iter().map(|k| profile.get(k)).collect();
    if joined.is_empty() {
        profile.get("streetAddress").to_string()
    } else {
        joined
    }
}

/// Keyword table behind the label-text fallback: when none of a text
/// field's roles resolve to a value, its human label is scanned for these
/// hints and the mapped role is tried instead.
const LABEL_HINTS: &[(&[&str], RoleTag)] = &[
    (&["メール", "mail", "email", "e-mail"], RoleTag::Email),
    (&["フリガナ", "カナ", "kana"], RoleTag::NameKana),
    (&["ふりがな"], RoleTag::NameHira),
    (&["会社", "企業", "法人", "団体", "company"], RoleTag::CompanyName),
    (&["部署", "department"], RoleTag::Department),
    (&["役職", "position"], RoleTag::Position),
    (&["電話", "tel", "phone"], RoleTag::Phone),
    (&["郵便", "〒", "zip", "postal"], RoleTag::PostalCode),
    (&["都道府県", "prefecture"], RoleTag::Prefecture),
    (&["住所", "address"], RoleTag::Address),
    (&["件名", "subject", "title"], RoleTag::Subject),
    (
        &["内容", "本文", "メッセージ", "お問い合わせ", "message", "inquiry"],
        RoleTag::Message,
    ),
    (&["url", "サイト", "ホームページ"], RoleTag::CorporateSiteUrl),
    (&["名前", "氏名", "担当", "name"], RoleTag::Name),
];

/// Best-effort role inferred from a field's rendered label.
pub fn role_hint_for_label(label: &str) -> Option<RoleTag> {
    let needle = label.to_lowercase();
    if needle.trim().is_empty() {
        return None;
    }
    for (keywords, role) in LABEL_HINTS {
        if keywords.iter().any(|k| needle.contains(k)) {
            return Some(*role);
        }
    }
    None
}

/// Everything the fillers need to know about one field's values.
#[derive(Clone, Debug)]
pub struct FieldValues {
    /// Value computed for every declared role, in role order.
    pub per_role: Vec<(RoleTag, String)>,
    /// The single string handed to the write operation.
    pub write_value: String,
    /// Roles the write satisfies: the roles whose value is non-empty, or
    /// the primary role when none are (choice-type fallback selections).
    pub satisfied: Vec<RoleTag>,
}

/// Resolve the per-role values and the write value for one field.
///
/// Multi-role write precedence: the classifier's `preferredOption` if
/// present; else, for text-like fields, every non-empty per-role value
/// joined with [`MULTI_ROLE_SEPARATOR`] so one input serving two questions
/// drops nothing; else the first non-empty per-role value.
pub fn resolve_field_values(
    field: &FieldDescriptor,
    profile: &SenderProfile,
    message: Option<&str>,
) -> FieldValues {
    let per_role: Vec<(RoleTag, String)> = field
        .roles
        .iter()
        .map(|&role| (role, value_for_role(role, profile, message)))
        .collect();

    let non_empty: Vec<&(RoleTag, String)> =
        per_role.iter().filter(|(_, v)| !v.is_empty()).collect();

    let mut write_value = if let Some(preferred) = field
        .preferred_option
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        preferred.to_string()
    } else if field.kind.is_text_like() && non_empty.len() > 1 {
        non_empty
            .iter()
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(MULTI_ROLE_SEPARATOR)
    } else {
        non_empty
            .first()
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    };

    // Label-text fallback: nothing resolved, but the caption gives the
    // field's meaning away.
    if write_value.is_empty() && field.kind.is_text_like() {
        if let Some(hint) = role_hint_for_label(&field.label) {
            write_value = value_for_role(hint, profile, message);
        }
    }

    let satisfied: Vec<RoleTag> = if non_empty.is_empty() {
        field.primary_role().into_iter().collect()
    } else {
        non_empty.iter().map(|(role, _)| *role).collect()
    };

    FieldValues {
        per_role,
        write_value,
        satisfied,
    }
}
