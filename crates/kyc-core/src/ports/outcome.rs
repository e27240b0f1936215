//! Collaborators reached from the account status screen.

use async_trait::async_trait;

use crate::ids::HostViewId;

/// Hands control to the exchange once the account is approved.
#[async_trait]
pub trait ExchangeEntryPort: Send + Sync {
    async fn enter_exchange(&self, host: &HostViewId) -> anyhow::Result<()>;
}

#[async_trait]
pub trait NotificationPermissionPort: Send + Sync {
    /// Ask the user to allow a notification when their status changes.
    async fn request_status_notifications(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ExternalLinkPort: Send + Sync {
    async fn open(&self, url: &str) -> anyhow::Result<()>;
}
