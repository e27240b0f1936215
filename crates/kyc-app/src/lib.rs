//! KYC Flow Application Layer
//!
//! This crate contains the flow coordinator that drives the verification
//! journey on top of the ports defined in `kyc-core`.

pub mod usecases;

pub use usecases::kyc_flow::{FlowState, KycFlowCoordinator, KycFlowDeps, KycFlowError};
