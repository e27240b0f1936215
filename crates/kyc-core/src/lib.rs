//! # kyc-core
//!
//! Core domain models and navigation rules for the KYC verification flow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Everything the flow coordinator talks to is expressed as a port in [`ports`].

// Public module exports
pub mod config;
pub mod ids;
pub mod kyc;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::KycConfig;
pub use ids::{FlowId, HostViewId, ProfileId, ScreenId};
pub use kyc::{
    CountryCode, CountrySelection, FlowEvent, FlowNavigator, PageError, PageModel, PagePayload,
    PageType, StateSelection, StateSelectionPolicy, VerificationProfile, VerificationStatus,
};
