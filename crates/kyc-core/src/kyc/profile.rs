//! Verification profile snapshot.
//!
//! Supplied by the profile provider when a flow starts and treated as
//! read-only by the coordinator for the lifetime of that flow.

use serde::{Deserialize, Serialize};

use crate::ids::ProfileId;
use crate::kyc::country::CountryCode;

/// Identity verification status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum VerificationStatus {
    #[default]
    None,
    Pending,
    UnderReview,
    Approved,
    Failed,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: String,
    /// State or region code, only meaningful for countries with a state step.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: String,
    pub country_code: CountryCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileNumber {
    pub number: String,
    #[serde(default)]
    pub verified: bool,
}

/// Everything the backend already knows about the user's verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationProfile {
    pub id: ProfileId,
    #[serde(default)]
    pub personal_details: Option<PersonalDetails>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub mobile: Option<MobileNumber>,
    #[serde(default)]
    pub status: VerificationStatus,
}

impl VerificationProfile {
    /// An empty profile for a user who has never entered the flow.
    pub fn blank(id: ProfileId) -> Self {
        Self {
            id,
            personal_details: None,
            address: None,
            mobile: None,
            status: VerificationStatus::None,
        }
    }

    /// Personal details count as present only once a first name is on file.
    pub fn has_personal_details(&self) -> bool {
        self.personal_details
            .as_ref()
            .and_then(|details| details.first_name.as_deref())
            .is_some_and(|name| !name.trim().is_empty())
    }

    pub fn has_address(&self) -> bool {
        self.address.is_some()
    }

    pub fn has_mobile(&self) -> bool {
        self.mobile
            .as_ref()
            .is_some_and(|mobile| !mobile.number.trim().is_empty())
    }

    pub fn address_country(&self) -> Option<&CountryCode> {
        self.address.as_ref().map(|address| &address.country_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_profile() {
        let json = r#"{
            "id": "user-1",
            "personalDetails": { "firstName": "Ada", "lastName": "Lovelace" },
            "address": {
                "line1": "1 Main St",
                "city": "Springfield",
                "state": "IL",
                "postalCode": "62701",
                "countryCode": "US"
            },
            "mobile": { "number": "+15555550100" },
            "status": "underReview"
        }"#;

        let profile: VerificationProfile = serde_json::from_str(json).unwrap();
        assert!(profile.has_personal_details());
        assert!(profile.has_address());
        assert!(profile.has_mobile());
        assert_eq!(profile.status, VerificationStatus::UnderReview);
        assert_eq!(profile.address_country().map(|c| c.as_str()), Some("US"));
    }

    #[test]
    fn missing_sections_default_to_absent() {
        let profile: VerificationProfile = serde_json::from_str(r#"{ "id": "user-2" }"#).unwrap();
        assert_eq!(profile, VerificationProfile::blank(ProfileId::from("user-2")));
    }

    #[test]
    fn blank_first_name_is_not_personal_details() {
        let mut profile = VerificationProfile::blank(ProfileId::from("user-3"));
        profile.personal_details = Some(PersonalDetails {
            first_name: Some("  ".to_string()),
            last_name: Some("Hopper".to_string()),
        });
        assert!(!profile.has_personal_details());
    }
}
