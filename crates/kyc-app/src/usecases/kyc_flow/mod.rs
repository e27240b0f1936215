//! KYC flow use cases.
//!
//! This module exposes the flow coordinator.

mod context;
pub mod coordinator;
mod outcome;
mod task_scope;

pub use context::FlowState;
pub use coordinator::{KycFlowCoordinator, KycFlowDeps, KycFlowError};
