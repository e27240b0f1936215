use async_trait::async_trait;

use crate::kyc::InterestTarget;

/// Records that the user wants to hear when a region becomes supported.
#[async_trait]
pub trait InterestRegistrationPort: Send + Sync {
    async fn register_interest(
        &self,
        target: &InterestTarget,
        notify_when_available: bool,
    ) -> anyhow::Result<()>;
}
