use tokio::sync::Mutex;

use kyc_core::{CountrySelection, FlowId, HostViewId, VerificationProfile};
use crate::usecases::kyc_flow::task_scope::TaskId;

/// Mutable state of one coordinator instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowState {
    /// Profile snapshot fetched by the last successful `start`.
    pub profile: Option<VerificationProfile>,
    /// Country picked on the country page during this flow.
    pub country: Option<CountrySelection>,
    /// The active navigation stack, if one is presented.
    pub flow: Option<FlowId>,
    /// Presenting context passed to `start` or `present_account_status`.
    pub host: Option<HostViewId>,
    /// Whether a status screen is presented outside of any stack.
    pub status_presented: bool,
    pub(crate) pending_fetch: Option<TaskId>,
}

impl FlowState {
    pub fn fetch_in_flight(&self) -> bool {
        self.pending_fetch.is_some()
    }
}

/// Shared flow context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: serializes every state transition, including async
///   completions that report back after a fetch.
/// - `state`: used for both reading (`get_state`) and writing.
pub(crate) struct FlowContext {
    state: Mutex<FlowState>,
    dispatch_lock: Mutex<()>,
}

impl FlowContext {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FlowState::default()),
            dispatch_lock: Mutex::new(()),
        }
    }

    /// Returns a copy of the current state.
    ///
    /// This does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> FlowState {
        self.state.lock().await.clone()
    }

    /// Acquires the dispatch lock; the returned guard releases it when dropped.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Mutates the state in place.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn update<R>(&self, f: impl FnOnce(&mut FlowState) -> R) -> R {
        let mut guard = self.state.lock().await;
        f(&mut guard)
    }
}
