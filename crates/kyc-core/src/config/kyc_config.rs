//! KYC flow configuration domain model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::kyc::StateSelectionPolicy;

/// Application configuration for the verification flow.
///
/// Every section is optional in the source file; missing values fall back to
/// [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KycConfig {
    /// Flow behaviour settings
    pub flow: FlowConfig,

    /// Storage settings
    pub storage: StorageConfig,
}

/// Flow behaviour configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Opened by the primary button of the failed/expired status screens
    pub support_url: String,

    /// Countries whose users pick a state/region after the country page
    pub state_selection_countries: Vec<String>,

    /// Upper bound for the initial profile fetch
    pub profile_fetch_timeout_secs: u64,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where "notify me when available" registrations are kept
    pub interest_registry_path: PathBuf,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            support_url: "https://support.blockchain.com".to_string(),
            state_selection_countries: vec!["US".to_string()],
            profile_fetch_timeout_secs: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            interest_registry_path: PathBuf::from("kyc_interest.json"),
        }
    }
}

impl KycConfig {
    pub fn state_selection_policy(&self) -> StateSelectionPolicy {
        StateSelectionPolicy::new(self.flow.state_selection_countries.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyc::CountryCode;

    #[test]
    fn default_policy_matches_default_countries() {
        let config = KycConfig::default();
        let policy = config.state_selection_policy();
        assert!(policy.requires_state_selection(&CountryCode::from("US")));
        assert_eq!(policy.countries().count(), 1);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: KycConfig =
            serde_json::from_str(r#"{ "flow": { "support_url": "https://help.example" } }"#)
                .unwrap();
        assert_eq!(config.flow.support_url, "https://help.example");
        assert_eq!(config.flow.profile_fetch_timeout_secs, 30);
        assert_eq!(config.storage, StorageConfig::default());
    }
}
