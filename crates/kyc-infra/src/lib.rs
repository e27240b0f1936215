//! File-backed implementations of the KYC flow ports.

pub mod interest;
pub mod profile;

pub use interest::{FileInterestRegistry, InterestRecord};
pub use profile::{FileProfileProvider, ProfileLoadError};
