use async_trait::async_trait;

use crate::kyc::VerificationProfile;

/// Source of the user's current verification data.
///
/// Called once per flow start. Implementations must be cancel-safe: the
/// coordinator drops the future when the flow is torn down mid-fetch.
#[async_trait]
pub trait ProfileProviderPort: Send + Sync {
    async fn fetch_profile(&self) -> anyhow::Result<VerificationProfile>;
}
