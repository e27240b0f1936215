//! KYC domain module.
//!
//! Verification profile snapshot, country/state selections, the page set and
//! the pure navigation rules the flow coordinator is built on.

pub mod country;
pub mod event;
pub mod navigation;
pub mod page;
pub mod profile;
pub mod screen;

pub use country::{CountryCode, CountrySelection, StateSelection, StateSelectionPolicy};
pub use event::{FlowEvent, PageError, PageModel, PagePayload};
pub use navigation::FlowNavigator;
pub use page::PageType;
pub use profile::{
    Address, MobileNumber, PersonalDetails, VerificationProfile, VerificationStatus,
};
pub use screen::{
    AccountStatusModel, InformationModel, InterestTarget, PrimaryAction, ScreenHandle,
    ScreenKind,
};
