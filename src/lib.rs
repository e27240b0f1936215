//! Command-line host for the KYC verification flow.
//!
//! Wires the coordinator from `kyc-app` to file-backed adapters from
//! `kyc-infra` and an in-memory console presentation host.

pub mod adapters;
pub mod bootstrap;
pub mod walkthrough;

pub use walkthrough::{run_walkthrough, WalkthroughOptions, WalkthroughSummary};
