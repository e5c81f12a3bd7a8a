//! Semantic role vocabulary shared with the external field classifier.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Semantic category assigned to one logical form field.
///
/// Wire strings follow the classifier vocabulary. Anything the engine does
/// not recognize collapses to [`RoleTag::Other`]: such fields are still
/// recorded in the fill summary but are never written to the page.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RoleTag {
    // Name cluster
    Name,
    LastName,
    FirstName,
    NameKana,
    LastNameKana,
    FirstNameKana,
    NameHira,
    LastNameHira,
    FirstNameHira,
    // Contact cluster
    Email,
    ConfirmEmail,
    Phone,
    Phone1,
    Phone2,
    Phone3,
    PersonalPhone,
    CorporateSiteUrl,
    // Organization cluster
    CompanyName,
    CompanyNameKana,
    Department,
    Position,
    CompanyType,
    Industry,
    // Address cluster
    PostalCode,
    PostalCode1,
    PostalCode2,
    Prefecture,
    City,
    Town,
    Street,
    Building,
    Address,
    StreetAddress,
    Country,
    // Categorical / free-text cluster
    Subject,
    InquiryType,
    Message,
    Gender,
    Age,
    Referral,
    /// Privacy-policy / terms consent control.
    Agreement,
    /// Audit-only: emitted by anti-bot detection, never assigned by the
    /// classifier and never written.
    Captcha,
    /// No resolvable semantic meaning. Recorded, never written.
    Other,
}

impl RoleTag {
    /// Wire/audit representation (classifier vocabulary).
    pub fn as_str(self) -> &'static str {
        match self {
            RoleTag::Name => "name",
            RoleTag::LastName => "lastName",
            RoleTag::FirstName => "firstName",
            RoleTag::NameKana => "nameKana",
            RoleTag::LastNameKana => "lastNameKana",
            RoleTag::FirstNameKana => "firstNameKana",
            RoleTag::NameHira => "nameHira",
            RoleTag::LastNameHira => "lastNameHira",
            RoleTag::FirstNameHira => "firstNameHira",
            RoleTag::Email => "email",
            RoleTag::ConfirmEmail => "confirmEmail",
            RoleTag::Phone => "phone",
            RoleTag::Phone1 => "phone1",
            RoleTag::Phone2 => "phone2",
            RoleTag::Phone3 => "phone3",
            RoleTag::PersonalPhone => "personalPhone",
            RoleTag::CorporateSiteUrl => "corporateSiteUrl",
            RoleTag::CompanyName => "company-name",
            RoleTag::CompanyNameKana => "companyNameKana",
            RoleTag::Department => "department",
            RoleTag::Position => "position",
            RoleTag::CompanyType => "companyType",
            RoleTag::Industry => "industry",
            RoleTag::PostalCode => "postalCode",
            RoleTag::PostalCode1 => "postalCode1",
            RoleTag::PostalCode2 => "postalCode2",
            RoleTag::Prefecture => "prefecture",
            RoleTag::City => "city",
            RoleTag::Town => "town",
            RoleTag::Street => "street",
            RoleTag::Building => "building",
            RoleTag::Address => "address",
            RoleTag::StreetAddress => "streetAddress",
            RoleTag::Country => "country",
            RoleTag::Subject => "subject",
            RoleTag::InquiryType => "inquiryType",
            RoleTag::Message => "message",
            RoleTag::Gender => "gender",
            RoleTag::Age => "age",
            RoleTag::Referral => "referral",
            RoleTag::Agreement => "agreement",
            RoleTag::Captcha => "captcha",
            RoleTag::Other => "other",
        }
    }

    /// Parse a classifier wire string. Unknown tags collapse to `Other`.
    pub fn from_wire(s: &str) -> Self {
        match s.trim() {
            "name" => RoleTag::Name,
            "lastName" => RoleTag::LastName,
            "firstName" => RoleTag::FirstName,
            "nameKana" => RoleTag::NameKana,
            "lastNameKana" => RoleTag::LastNameKana,
            "firstNameKana" => RoleTag::FirstNameKana,
            "nameHira" => RoleTag::NameHira,
            "lastNameHira" => RoleTag::LastNameHira,
            "firstNameHira" => RoleTag::FirstNameHira,
            "email" => RoleTag::Email,
            "confirmEmail" => RoleTag::ConfirmEmail,
            "phone" => RoleTag::Phone,
            "phone1" => RoleTag::Phone1,
            "phone2" => RoleTag::Phone2,
            "phone3" => RoleTag::Phone3,
            "personalPhone" => RoleTag::PersonalPhone,
            "corporateSiteUrl" => RoleTag::CorporateSiteUrl,
            // The classifier emits "company-name"; tolerate the camelCase form.
            "company-name" | "companyName" => RoleTag::CompanyName,
            "companyNameKana" => RoleTag::CompanyNameKana,
            "department" => RoleTag::Department,
            "position" => RoleTag::Position,
            "companyType" => RoleTag::CompanyType,
            "industry" => RoleTag::Industry,
            "postalCode" => RoleTag::PostalCode,
            "postalCode1" => RoleTag::PostalCode1,
            "postalCode2" => RoleTag::PostalCode2,
            "prefecture" => RoleTag::Prefecture,
            "city" => RoleTag::City,
            "town" => RoleTag::Town,
            "street" => RoleTag::Street,
            "building" => RoleTag::Building,
            "address" => RoleTag::Address,
            "streetAddress" => RoleTag::StreetAddress,
            "country" => RoleTag::Country,
            "subject" => RoleTag::Subject,
            "inquiryType" => RoleTag::InquiryType,
            "message" => RoleTag::Message,
            "gender" => RoleTag::Gender,
            "age" => RoleTag::Age,
            "referral" => RoleTag::Referral,
            "agreement" | "consent" | "privacyPolicy" => RoleTag::Agreement,
            "captcha" => RoleTag::Captcha,
            _ => RoleTag::Other,
        }
    }

    /// Roles the engine records but never writes.
    pub fn is_sentinel(self) -> bool {
        matches!(self, RoleTag::Other | RoleTag::Captcha)
    }

    /// Consent/terms-agreement role, handled by the consent heuristic.
    pub fn is_agreement(self) -> bool {
        matches!(self, RoleTag::Agreement)
    }

    /// Every known tag, in declaration order.
    pub fn all() -> &'static [RoleTag] {
        &[
            RoleTag::Name,
            RoleTag::LastName,
            RoleTag::FirstName,
            RoleTag::NameKana,
            RoleTag::LastNameKana,
            RoleTag::FirstNameKana,
            RoleTag::NameHira,
            RoleTag::LastNameHira,
            RoleTag::FirstNameHira,
            RoleTag::Email,
            RoleTag::ConfirmEmail,
            RoleTag::Phone,
            RoleTag::Phone1,
            RoleTag::Phone2,
            RoleTag::Phone3,
            RoleTag::PersonalPhone,
            RoleTag::CorporateSiteUrl,
            RoleTag::CompanyName,
            RoleTag::CompanyNameKana,
            RoleTag::Department,
            RoleTag::Position,
            RoleTag::CompanyType,
            RoleTag::Industry,
            RoleTag::PostalCode,
            RoleTag::PostalCode1,
            RoleTag::PostalCode2,
            RoleTag::Prefecture,
            RoleTag::City,
            RoleTag::Town,
            RoleTag::Street,
            RoleTag::Building,
            RoleTag::Address,
            RoleTag::StreetAddress,
            RoleTag::Country,
            RoleTag::Subject,
            RoleTag::InquiryType,
            RoleTag::Message,
            RoleTag::Gender,
            RoleTag::Age,
            RoleTag::Referral,
            RoleTag::Agreement,
            RoleTag::Captcha,
            RoleTag::Other,
        ]
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RoleTag::from_wire(s))
    }
}

impl Serialize for RoleTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoleTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RoleTag::from_wire(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for role in RoleTag::all() {
            assert_eq!(RoleTag::from_wire(role.as_str()), *role);
        }
    }

    #[test]
    fn unknown_collapses_to_other() {
        assert_eq!(RoleTag::from_wire("favouriteColour"), RoleTag::Other);
        assert_eq!(RoleTag::from_wire(""), RoleTag::Other);
    }

    #[test]
    fn company_name_aliases() {
        assert_eq!(RoleTag::from_wire("company-name"), RoleTag::CompanyName);
        assert_eq!(RoleTag::from_wire("companyName"), RoleTag::CompanyName);
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&RoleTag::CompanyName).unwrap();
        assert_eq!(json, "\"company-name\"");
        let parsed: RoleTag = serde_json::from_str("\"inquiryType\"").unwrap();
        assert_eq!(parsed, RoleTag::InquiryType);
    }
}
