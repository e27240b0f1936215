//! Country and state selections made during the flow.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// ISO 3166 alpha-2 country code, normalized to trimmed upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for CountryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CountryCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

/// Country picked by the user on the country page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySelection {
    pub code: CountryCode,
    pub name: String,
    /// Whether verification is currently offered for this country.
    pub supported: bool,
}

impl CountrySelection {
    pub fn new(code: impl Into<CountryCode>, name: impl Into<String>, supported: bool) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            supported,
        }
    }
}

/// State or region picked on the states page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSelection {
    pub code: String,
    pub name: String,
}

impl StateSelection {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Decides which countries get a state/region step after the country page.
///
/// The set comes from configuration so that the successor table and the
/// lookup it depends on are tested together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSelectionPolicy {
    countries: BTreeSet<CountryCode>,
}

impl StateSelectionPolicy {
    pub fn new<I, C>(countries: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CountryCode>,
    {
        Self {
            countries: countries
                .into_iter()
                .map(Into::into)
                .filter(|code: &CountryCode| !code.is_empty())
                .collect(),
        }
    }

    /// A policy under which no country has a state step.
    pub fn none() -> Self {
        Self {
            countries: BTreeSet::new(),
        }
    }

    pub fn requires_state_selection(&self, country: &CountryCode) -> bool {
        self.countries.contains(country)
    }

    pub fn countries(&self) -> impl Iterator<Item = &CountryCode> {
        self.countries.iter()
    }
}

impl Default for StateSelectionPolicy {
    fn default() -> Self {
        Self::new(["US"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_code_is_normalized() {
        assert_eq!(CountryCode::new(" us "), CountryCode::from("US"));
    }

    #[test]
    fn country_code_deserializes_through_normalization() {
        let code: CountryCode = serde_json::from_str("\"gb\"").unwrap();
        assert_eq!(code.as_str(), "GB");
    }

    #[test]
    fn default_policy_requires_states_for_us_only() {
        let policy = StateSelectionPolicy::default();
        assert!(policy.requires_state_selection(&CountryCode::from("us")));
        assert!(!policy.requires_state_selection(&CountryCode::from("DE")));
    }

    #[test]
    fn policy_ignores_blank_entries() {
        let policy = StateSelectionPolicy::new(["", "CA"]);
        assert_eq!(policy.countries().count(), 1);
        assert!(!policy.requires_state_selection(&CountryCode::from("")));
    }
}
