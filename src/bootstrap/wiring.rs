//! Dependency assembly.
//!
//! The only place that depends on `kyc-app`, `kyc-infra` and the console
//! adapters at once. It assembles; it makes no flow decisions.

use std::path::Path;
use std::sync::Arc;

use kyc_app::{KycFlowCoordinator, KycFlowDeps};
use kyc_core::KycConfig;
use kyc_infra::{FileInterestRegistry, FileProfileProvider};

use crate::adapters::{ConsoleHost, ConsoleScreenFactory, LoggingOutcomes};

/// A coordinator together with the concrete adapters a caller may inspect.
pub struct WiredFlow {
    pub coordinator: KycFlowCoordinator,
    pub host: Arc<ConsoleHost>,
    pub interest_registry: Arc<FileInterestRegistry>,
}

pub fn wire_flow(config: &KycConfig, profile_path: &Path) -> WiredFlow {
    let host = Arc::new(ConsoleHost::new());
    let interest_registry = Arc::new(FileInterestRegistry::new(
        config.storage.interest_registry_path.clone(),
    ));
    let outcomes = Arc::new(LoggingOutcomes);

    let coordinator = KycFlowCoordinator::new(
        config,
        KycFlowDeps {
            profile_provider: Arc::new(FileProfileProvider::new(profile_path)),
            screen_factory: Arc::new(ConsoleScreenFactory),
            host: host.clone(),
            interest_registry: interest_registry.clone(),
            exchange: outcomes.clone(),
            notifications: outcomes.clone(),
            links: outcomes,
        },
    );

    WiredFlow {
        coordinator,
        host,
        interest_registry,
    }
}
