//! Business logic use cases

pub mod kyc_flow;

pub use kyc_flow::{KycFlowCoordinator, KycFlowDeps, KycFlowError};
