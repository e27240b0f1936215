//! Page ordering rules.
//!
//! Two functions decide where the user goes: [`FlowNavigator::advance`], a
//! static successor table used while the user moves forward, and
//! [`FlowNavigator::resume_point`], a completeness cascade used once when a
//! flow starts. Both must agree on page order; [`FlowNavigator::replay_path`]
//! walks the former up to the latter.

use crate::kyc::country::{CountryCode, CountrySelection, StateSelectionPolicy};
use crate::kyc::page::PageType;
use crate::kyc::profile::{VerificationProfile, VerificationStatus};

/// Pure navigation rules, parameterized by the state-selection lookup.
#[derive(Debug, Clone, Default)]
pub struct FlowNavigator {
    policy: StateSelectionPolicy,
}

impl FlowNavigator {
    pub fn new(policy: StateSelectionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &StateSelectionPolicy {
        &self.policy
    }

    /// Successor of `current`, or `None` once the flow has nowhere left to go.
    pub fn advance(
        &self,
        current: PageType,
        profile: Option<&VerificationProfile>,
        country: Option<&CountrySelection>,
    ) -> Option<PageType> {
        let next = match current {
            PageType::Welcome => PageType::Country,
            PageType::Country => {
                let needs_state = Self::resolve_country(profile, country)
                    .is_some_and(|code| self.policy.requires_state_selection(code));
                if needs_state {
                    PageType::States
                } else {
                    PageType::Profile
                }
            }
            PageType::States => PageType::Profile,
            PageType::Profile => PageType::Address,
            PageType::Address => PageType::EnterPhone,
            PageType::EnterPhone => PageType::ConfirmPhone,
            PageType::ConfirmPhone => PageType::VerifyIdentity,
            PageType::VerifyIdentity => PageType::AccountStatus,
            PageType::AccountStatus => PageType::ApplicationComplete,
            PageType::ApplicationComplete => return None,
        };
        Some(next)
    }

    /// Where a returning user lands; the most upstream missing data wins.
    pub fn resume_point(profile: &VerificationProfile) -> PageType {
        if !profile.has_personal_details() {
            return PageType::Welcome;
        }
        if !profile.has_address() {
            return PageType::Country;
        }
        if !profile.has_mobile() {
            return PageType::EnterPhone;
        }
        if profile.status == VerificationStatus::None {
            return PageType::VerifyIdentity;
        }
        PageType::AccountStatus
    }

    /// Explicit selection first, then the country already on the profile.
    pub fn resolve_country<'a>(
        profile: Option<&'a VerificationProfile>,
        country: Option<&'a CountrySelection>,
    ) -> Option<&'a CountryCode> {
        country
            .map(|selection| &selection.code)
            .or_else(|| profile.and_then(VerificationProfile::address_country))
            .filter(|code| !code.is_empty())
    }

    /// Pages making up the back stack of a user resuming at `target`.
    ///
    /// Always starts at `Welcome` and ends at `target` inclusive. Stops early
    /// if the successor table runs out before `target` is reached.
    pub fn replay_path(
        &self,
        target: PageType,
        profile: Option<&VerificationProfile>,
        country: Option<&CountrySelection>,
    ) -> Vec<PageType> {
        let mut path = vec![PageType::Welcome];
        let mut current = PageType::Welcome;

        while current != target && path.len() < PageType::ALL.len() {
            match self.advance(current, profile, country) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }

        path
    }
}
