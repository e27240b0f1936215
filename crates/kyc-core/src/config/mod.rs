//! Configuration domain models

pub mod kyc_config;

pub use kyc_config::{FlowConfig, KycConfig, StorageConfig};
