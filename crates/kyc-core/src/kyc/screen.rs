//! Screen handles and the read-only screen models the coordinator presents.

use serde::{Deserialize, Serialize};

use crate::ids::{FlowId, HostViewId, ScreenId};
use crate::kyc::country::{CountryCode, CountrySelection, StateSelection};
use crate::kyc::page::PageType;
use crate::kyc::profile::VerificationStatus;

/// What a user can register interest in when the flow dead-ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "code")]
pub enum InterestTarget {
    Country(CountryCode),
    State(String),
}

impl std::fmt::Display for InterestTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterestTarget::Country(code) => write!(f, "country:{code}"),
            InterestTarget::State(code) => write!(f, "state:{code}"),
        }
    }
}

/// Action bound to the primary button of a status or information screen.
///
/// The UI hands it back to the coordinator through `perform` when tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryAction {
    None,
    /// Dismiss the flow, then enter the exchange from the original presenter.
    EnterExchange { host: HostViewId },
    RequestStatusNotifications,
    OpenSupport { url: String },
    /// Dismiss the dead-end screen and its container, then register interest.
    NotifyWhenAvailable { target: InterestTarget },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatusModel {
    pub status: VerificationStatus,
    pub title: String,
    pub body: String,
    pub button_title: Option<String>,
    pub primary_action: PrimaryAction,
}

impl AccountStatusModel {
    pub fn for_status(status: VerificationStatus, host: &HostViewId, support_url: &str) -> Self {
        let (title, body, button_title, primary_action) = match status {
            VerificationStatus::Approved => (
                "Account Approved",
                "Your identity has been verified. You can start trading now.",
                Some("Get Started"),
                PrimaryAction::EnterExchange { host: host.clone() },
            ),
            VerificationStatus::Pending => (
                "Verification Pending",
                "We are verifying your identity. We can let you know when it is done.",
                Some("Notify Me"),
                PrimaryAction::RequestStatusNotifications,
            ),
            VerificationStatus::Failed => (
                "Verification Failed",
                "We could not verify your identity. Contact support for help.",
                Some("Contact Support"),
                PrimaryAction::OpenSupport {
                    url: support_url.to_string(),
                },
            ),
            VerificationStatus::Expired => (
                "Verification Expired",
                "Your verification documents have expired. Contact support to continue.",
                Some("Contact Support"),
                PrimaryAction::OpenSupport {
                    url: support_url.to_string(),
                },
            ),
            VerificationStatus::UnderReview => (
                "Under Review",
                "Your application is being reviewed. This usually takes a few days.",
                None,
                PrimaryAction::None,
            ),
            VerificationStatus::None => (
                "Verification Incomplete",
                "Finish verifying your identity to unlock your account.",
                None,
                PrimaryAction::None,
            ),
        };

        Self {
            status,
            title: title.to_string(),
            body: body.to_string(),
            button_title: button_title.map(str::to_string),
            primary_action,
        }
    }
}

/// Dead-end screen shown for an unsupported country or state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationModel {
    pub title: String,
    pub body: String,
    pub button_title: String,
    pub primary_action: PrimaryAction,
}

impl InformationModel {
    pub fn country_not_supported(country: &CountrySelection) -> Self {
        Self {
            title: "Coming Soon".to_string(),
            body: format!(
                "Verification is not yet available in {}. We can let you know when it is.",
                country.name
            ),
            button_title: "Notify Me".to_string(),
            primary_action: PrimaryAction::NotifyWhenAvailable {
                target: InterestTarget::Country(country.code.clone()),
            },
        }
    }

    pub fn state_not_supported(state: &StateSelection) -> Self {
        Self {
            title: "Coming Soon".to_string(),
            body: format!(
                "Verification is not yet available in {}. We can let you know when it is.",
                state.name
            ),
            button_title: "Notify Me".to_string(),
            primary_action: PrimaryAction::NotifyWhenAvailable {
                target: InterestTarget::State(state.code.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenKind {
    Page(PageType),
    AccountStatus(AccountStatusModel),
    Information(InformationModel),
}

/// A screen instance produced by the screen factory, ready to be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenHandle {
    pub id: ScreenId,
    pub flow: Option<FlowId>,
    pub kind: ScreenKind,
    pub hides_back_button: bool,
}

impl ScreenHandle {
    pub fn page(flow: &FlowId, page: PageType) -> Self {
        Self {
            id: ScreenId::new(),
            flow: Some(flow.clone()),
            kind: ScreenKind::Page(page),
            hides_back_button: false,
        }
    }

    pub fn detached(kind: ScreenKind) -> Self {
        Self {
            id: ScreenId::new(),
            flow: None,
            kind,
            hides_back_button: false,
        }
    }

    pub fn with_back_button_hidden(mut self, hidden: bool) -> Self {
        self.hides_back_button = hidden;
        self
    }

    pub fn page_type(&self) -> Option<PageType> {
        match self.kind {
            ScreenKind::Page(page) => Some(page),
            _ => None,
        }
    }
}
