//! Inputs the coordinator reacts to and the page models it hands out.

use serde::{Deserialize, Serialize};

use crate::kyc::country::{CountryCode, CountrySelection, StateSelection};
use crate::kyc::page::PageType;
use crate::kyc::profile::{MobileNumber, VerificationProfile};

/// Data a screen attaches when asking for the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum PagePayload {
    CountrySelected { country: CountrySelection },
    /// Consumed by the phone screens themselves; the coordinator passes it through.
    PhoneNumberUpdated { mobile: MobileNumber },
}

/// Domain failures that redirect to a dead-end screen instead of advancing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum PageError {
    #[error("country not supported: {}", .country.code)]
    CountryNotSupported { country: CountrySelection },
    #[error("state not supported: {}", .state.code)]
    StateNotSupported { state: StateSelection },
}

/// Screen lifecycle signals, the coordinator's only input surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum FlowEvent {
    PageWillAppear {
        page: PageType,
    },
    NextPageFromPageType {
        page: PageType,
        payload: Option<PagePayload>,
    },
    FailurePageForPageType {
        page: PageType,
        error: PageError,
    },
}

/// Pre-population data pushed to the delegate before a page appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageModel {
    PersonalDetails(VerificationProfile),
    Address {
        profile: VerificationProfile,
        country: Option<CountrySelection>,
    },
    Phone(VerificationProfile),
    VerifyIdentity {
        country_code: CountryCode,
    },
}
