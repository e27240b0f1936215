use async_trait::async_trait;

use crate::ids::{FlowId, HostViewId};
use crate::kyc::ScreenHandle;

/// Navigation and modal presentation, as provided by the UI layer.
///
/// The coordinator never inspects rendering results; every call is fire and
/// forget from its point of view.
///
/// Calls are made while the coordinator holds its dispatch lock, which is not
/// reentrant. Implementations must not call back into the coordinator from
/// inside a call (for example `handle(PageWillAppear)` from `push`); queue
/// such events and deliver them after the call returns.
#[async_trait]
pub trait PresentationHostPort: Send + Sync {
    async fn show_busy(&self, message: &str);

    async fn hide_busy(&self);

    async fn show_error_alert(&self, message: &str);

    /// Present a new navigation stack over `host`, rooted at `root`.
    async fn present_stack(&self, host: &HostViewId, flow: &FlowId, root: ScreenHandle);

    async fn push(&self, flow: &FlowId, screen: ScreenHandle, animated: bool);

    /// Present a screen modally over whatever is currently on top of `host`.
    async fn present_modally(&self, host: &HostViewId, screen: ScreenHandle);

    /// Dismiss `levels` presentation levels from the top.
    async fn dismiss(&self, levels: usize);

    async fn dismiss_stack(&self, flow: &FlowId);
}
