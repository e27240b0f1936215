//! Presentation host and screen factory for the command-line host.
//!
//! There is no real UI: presentations are kept in memory as a list of levels
//! and every operation is logged, so a walkthrough can be followed in the
//! output and inspected afterwards.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::{info, warn};

use kyc_core::kyc::{AccountStatusModel, InformationModel, ScreenHandle, ScreenKind};
use kyc_core::ports::{PresentationHostPort, ScreenFactoryPort};
use kyc_core::{FlowId, HostViewId, PagePayload, PageType};

/// One presentation level above the host view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Stack {
        flow: FlowId,
        screens: Vec<ScreenHandle>,
    },
    Modal(ScreenHandle),
}

#[derive(Debug, Default)]
struct ConsoleState {
    levels: Vec<Presentation>,
    busy: Option<String>,
    alerts: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ConsoleHost {
    state: Mutex<ConsoleState>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn levels(&self) -> Vec<Presentation> {
        self.with_state(|state| state.levels.clone())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.with_state(|state| state.alerts.clone())
    }

    pub fn is_busy(&self) -> bool {
        self.with_state(|state| state.busy.is_some())
    }

    /// Page on top of the frontmost stack, if a stack is frontmost.
    pub fn top_page(&self) -> Option<PageType> {
        self.with_state(|state| match state.levels.last() {
            Some(Presentation::Stack { screens, .. }) => {
                screens.last().and_then(ScreenHandle::page_type)
            }
            _ => None,
        })
    }

    /// Frontmost modal screen, if a modal is frontmost.
    pub fn top_modal(&self) -> Option<ScreenHandle> {
        self.with_state(|state| match state.levels.last() {
            Some(Presentation::Modal(screen)) => Some(screen.clone()),
            _ => None,
        })
    }
}

fn describe(screen: &ScreenHandle) -> String {
    match &screen.kind {
        ScreenKind::Page(page) => format!("{page:?}"),
        ScreenKind::AccountStatus(model) => format!("AccountStatus({:?})", model.status),
        ScreenKind::Information(model) => format!("Information({})", model.title),
    }
}

#[async_trait]
impl PresentationHostPort for ConsoleHost {
    async fn show_busy(&self, message: &str) {
        self.with_state(|state| state.busy = Some(message.to_string()));
        info!(message, "busy indicator shown");
    }

    async fn hide_busy(&self) {
        self.with_state(|state| state.busy = None);
        info!("busy indicator hidden");
    }

    async fn show_error_alert(&self, message: &str) {
        self.with_state(|state| state.alerts.push(message.to_string()));
        warn!(message, "error alert shown");
    }

    async fn present_stack(&self, host: &HostViewId, flow: &FlowId, root: ScreenHandle) {
        info!(host = %host, flow = %flow, root = %describe(&root), "stack presented");
        self.with_state(|state| {
            state.levels.push(Presentation::Stack {
                flow: flow.clone(),
                screens: vec![root],
            })
        });
    }

    async fn push(&self, flow: &FlowId, screen: ScreenHandle, animated: bool) {
        let label = describe(&screen);
        let hides_back = screen.hides_back_button;
        let pushed = self.with_state(|state| {
            state.levels.iter_mut().rev().find_map(|level| match level {
                Presentation::Stack { flow: f, screens } if f == flow => {
                    screens.push(screen.clone());
                    Some(screens.len())
                }
                _ => None,
            })
        });
        match pushed {
            Some(depth) => info!(flow = %flow, screen = %label, animated, hides_back, depth, "screen pushed"),
            None => warn!(flow = %flow, screen = %label, "push onto unknown stack ignored"),
        }
    }

    async fn present_modally(&self, host: &HostViewId, screen: ScreenHandle) {
        info!(host = %host, screen = %describe(&screen), "screen presented modally");
        self.with_state(|state| state.levels.push(Presentation::Modal(screen)));
    }

    async fn dismiss(&self, levels: usize) {
        let removed = self.with_state(|state| {
            let keep = state.levels.len().saturating_sub(levels);
            state.levels.drain(keep..).count()
        });
        info!(requested = levels, removed, "presentation levels dismissed");
    }

    async fn dismiss_stack(&self, flow: &FlowId) {
        let removed = self.with_state(|state| {
            let position = state.levels.iter().position(|level| {
                matches!(level, Presentation::Stack { flow: f, .. } if f == flow)
            })?;
            Some(state.levels.drain(position..).count())
        });
        match removed {
            Some(removed) => info!(flow = %flow, removed, "stack dismissed"),
            None => warn!(flow = %flow, "dismiss of unknown stack ignored"),
        }
    }
}

/// Screen factory producing plain handles; rendering is left to the host.
#[derive(Debug, Default)]
pub struct ConsoleScreenFactory;

impl ScreenFactoryPort for ConsoleScreenFactory {
    fn create(&self, page: PageType, flow: &FlowId, payload: Option<&PagePayload>) -> ScreenHandle {
        if let Some(payload) = payload {
            tracing::debug!(page = ?page, payload = ?payload, "screen created with payload");
        }
        ScreenHandle::page(flow, page)
    }

    fn create_account_status(&self, model: AccountStatusModel) -> ScreenHandle {
        ScreenHandle::detached(ScreenKind::AccountStatus(model))
    }

    fn create_information(&self, model: InformationModel) -> ScreenHandle {
        ScreenHandle::detached(ScreenKind::Information(model))
    }
}
