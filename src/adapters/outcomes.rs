//! Log-only implementations of the platform services a status screen can
//! hand off to, plus a delegate that logs page models.

use async_trait::async_trait;
use tracing::info;

use kyc_core::ports::{
    ExchangeEntryPort, ExternalLinkPort, NotificationPermissionPort, PageModelDelegate,
};
use kyc_core::{HostViewId, PageModel};

#[derive(Debug, Default)]
pub struct LoggingOutcomes;

#[async_trait]
impl ExchangeEntryPort for LoggingOutcomes {
    async fn enter_exchange(&self, host: &HostViewId) -> anyhow::Result<()> {
        info!(host = %host, "entering exchange");
        Ok(())
    }
}

#[async_trait]
impl NotificationPermissionPort for LoggingOutcomes {
    async fn request_status_notifications(&self) -> anyhow::Result<()> {
        info!("status notification permission requested");
        Ok(())
    }
}

#[async_trait]
impl ExternalLinkPort for LoggingOutcomes {
    async fn open(&self, url: &str) -> anyhow::Result<()> {
        info!(url, "opening external link");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct LoggingDelegate;

impl PageModelDelegate for LoggingDelegate {
    fn apply(&self, model: PageModel) {
        match model {
            PageModel::PersonalDetails(profile) => {
                info!(profile_id = %profile.id, "prefilling personal details")
            }
            PageModel::Address { profile, country } => info!(
                profile_id = %profile.id,
                country = ?country.map(|c| c.code),
                "prefilling address"
            ),
            PageModel::Phone(profile) => info!(
                profile_id = %profile.id,
                has_mobile = profile.has_mobile(),
                "prefilling phone"
            ),
            PageModel::VerifyIdentity { country_code } => {
                info!(country = %country_code, "identity verification configured")
            }
        }
    }
}
