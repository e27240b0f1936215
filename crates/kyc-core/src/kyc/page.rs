use serde::{Deserialize, Serialize};

/// Screens of the verification flow.
///
/// Declaration order is the order of the happy path; the actual successor of a
/// page is decided by [`crate::kyc::FlowNavigator::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageType {
    Welcome,
    Country,
    States,
    Profile,
    Address,
    EnterPhone,
    ConfirmPhone,
    VerifyIdentity,
    AccountStatus,
    ApplicationComplete,
}

impl PageType {
    pub const ALL: [PageType; 10] = [
        PageType::Welcome,
        PageType::Country,
        PageType::States,
        PageType::Profile,
        PageType::Address,
        PageType::EnterPhone,
        PageType::ConfirmPhone,
        PageType::VerifyIdentity,
        PageType::AccountStatus,
        PageType::ApplicationComplete,
    ];

    /// Terminal pages cannot be navigated back from.
    pub fn allows_back_navigation(self) -> bool {
        !matches!(self, PageType::ApplicationComplete)
    }
}
