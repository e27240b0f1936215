//! KYC flow coordinator.
//!
//! This module drives the verification page sequence: it fetches the
//! profile, rebuilds the back stack for returning users and reacts to the
//! lifecycle events screens send back.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tracing::{debug, error, info, info_span, warn, Instrument};

use kyc_core::{
    kyc::PageModel,
    ports::{
        ExchangeEntryPort, ExternalLinkPort, InterestRegistrationPort, NotificationPermissionPort,
        PageModelDelegate, PresentationHostPort, ProfileProviderPort, ScreenFactoryPort,
    },
    FlowEvent, FlowId, FlowNavigator, HostViewId, KycConfig, PagePayload, PageType,
    VerificationProfile, VerificationStatus,
};

use crate::usecases::kyc_flow::context::{FlowContext, FlowState};
use crate::usecases::kyc_flow::task_scope::TaskScope;

const LOADING_MESSAGE: &str = "Loading...";
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors produced by the flow coordinator.
#[derive(Debug, thiserror::Error)]
pub enum KycFlowError {
    #[error("a verification profile fetch is already in flight")]
    FetchInFlight,
    #[error("flow {0} is already active")]
    FlowAlreadyActive(FlowId),
    #[error("fetch verification profile failed: {0}")]
    ProfileFetch(#[source] anyhow::Error),
    #[error("fetch verification profile timed out after {0:?}")]
    ProfileFetchTimedOut(Duration),
}

/// Collaborators the coordinator is wired with.
pub struct KycFlowDeps {
    pub profile_provider: Arc<dyn ProfileProviderPort>,
    pub screen_factory: Arc<dyn ScreenFactoryPort>,
    pub host: Arc<dyn PresentationHostPort>,
    pub interest_registry: Arc<dyn InterestRegistrationPort>,
    pub exchange: Arc<dyn ExchangeEntryPort>,
    pub notifications: Arc<dyn NotificationPermissionPort>,
    pub links: Arc<dyn ExternalLinkPort>,
}

/// State and collaborators shared with spawned tasks.
pub(crate) struct FlowInner {
    pub(crate) context: FlowContext,
    pub(crate) navigator: FlowNavigator,
    pub(crate) support_url: String,
    pub(crate) fetch_timeout: Duration,
    pub(crate) delegate: Mutex<Option<Weak<dyn PageModelDelegate>>>,

    pub(crate) profile_provider: Arc<dyn ProfileProviderPort>,
    pub(crate) screen_factory: Arc<dyn ScreenFactoryPort>,
    pub(crate) host: Arc<dyn PresentationHostPort>,
    pub(crate) interest_registry: Arc<dyn InterestRegistrationPort>,
    pub(crate) exchange: Arc<dyn ExchangeEntryPort>,
    pub(crate) notifications: Arc<dyn NotificationPermissionPort>,
    pub(crate) links: Arc<dyn ExternalLinkPort>,
}

/// Coordinator that drives the KYC page sequence and its side effects.
///
/// Every entry point takes the context's dispatch lock, so screen events and
/// the completion of the profile fetch are applied one at a time. Work that
/// outlives a call runs in a task scope which is aborted when the coordinator
/// is dropped.
pub struct KycFlowCoordinator {
    pub(crate) inner: Arc<FlowInner>,
    pub(crate) tasks: TaskScope,
}

impl KycFlowCoordinator {
    pub fn new(config: &KycConfig, deps: KycFlowDeps) -> Self {
        let KycFlowDeps {
            profile_provider,
            screen_factory,
            host,
            interest_registry,
            exchange,
            notifications,
            links,
        } = deps;

        Self {
            inner: Arc::new(FlowInner {
                context: FlowContext::new(),
                navigator: FlowNavigator::new(config.state_selection_policy()),
                support_url: config.flow.support_url.clone(),
                fetch_timeout: Duration::from_secs(config.flow.profile_fetch_timeout_secs),
                delegate: Mutex::new(None),
                profile_provider,
                screen_factory,
                host,
                interest_registry,
                exchange,
                notifications,
                links,
            }),
            tasks: TaskScope::new(),
        }
    }

    /// Fetches the profile and either rebuilds the page stack or shows the
    /// account status, depending on how far the user already got.
    ///
    /// An account status screen left over from an earlier run is dismissed
    /// first.
    ///
    /// Returns once the fetch has been dispatched; the outcome is reported
    /// through the presentation host.
    pub async fn start(&self, host: HostViewId) -> Result<(), KycFlowError> {
        let span = info_span!("usecase.kyc_flow.start", host = %host);
        async {
            let _dispatch_guard = self.inner.context.acquire_dispatch_lock().await;

            let state = self.inner.context.get_state().await;
            if state.fetch_in_flight() {
                warn!("start requested while a profile fetch is in flight");
                return Err(KycFlowError::FetchInFlight);
            }
            if let Some(flow) = state.flow {
                warn!(flow = %flow, "start requested while a flow is active");
                return Err(KycFlowError::FlowAlreadyActive(flow));
            }
            if state.status_presented {
                // A restart replaces the status screen instead of stacking on it.
                info!("dismissing account status before restarting");
                self.inner.finish_locked().await;
            }

            self.inner.host.show_busy(LOADING_MESSAGE).await;

            let inner = Arc::clone(&self.inner);
            let task_host = host.clone();
            let fetch_span = info_span!("usecase.kyc_flow.fetch_profile", host = %host);
            let task_id = self.tasks.spawn(
                "fetch_profile",
                async move { inner.complete_start(task_host).await }.instrument(fetch_span),
            );

            self.inner
                .context
                .update(|state| {
                    state.profile = None;
                    state.country = None;
                    state.status_presented = false;
                    state.host = Some(host);
                    state.pending_fetch = Some(task_id);
                })
                .await;
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Cancels outstanding work, dismisses whatever the flow presents and
    /// clears the delegate. No-op if nothing is active.
    pub async fn finish(&self) {
        let span = info_span!("usecase.kyc_flow.finish");
        async {
            let _dispatch_guard = self.inner.context.acquire_dispatch_lock().await;
            let pending_fetch = self
                .inner
                .context
                .update(|state| state.pending_fetch.take())
                .await;
            let fetch_cancelled = pending_fetch.is_some_and(|task_id| self.tasks.cancel(task_id));
            let cancelled = self.tasks.cancel_all();
            if cancelled > 0 {
                debug!(cancelled, "outstanding flow work cancelled");
            }
            if fetch_cancelled {
                self.inner.host.hide_busy().await;
            }
            self.inner.finish_locked().await;
            self.clear_delegate();
        }
        .instrument(span)
        .await
    }

    /// Applies one screen lifecycle signal.
    pub async fn handle(&self, event: FlowEvent) {
        let span = info_span!("usecase.kyc_flow.handle", event = ?event);
        async {
            let _dispatch_guard = self.inner.context.acquire_dispatch_lock().await;
            match event {
                FlowEvent::PageWillAppear { page } => self.inner.page_will_appear(page).await,
                FlowEvent::NextPageFromPageType { page, payload } => {
                    self.inner.next_page(page, payload).await
                }
                FlowEvent::FailurePageForPageType { page, error } => {
                    debug!(page = ?page, "page reported failure");
                    self.inner.present_failure(error).await
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Presents the read-only status screen for `status` over `host`.
    pub async fn present_account_status(&self, status: VerificationStatus, host: HostViewId) {
        let span = info_span!("usecase.kyc_flow.present_account_status", status = ?status);
        async {
            let _dispatch_guard = self.inner.context.acquire_dispatch_lock().await;
            self.inner.present_account_status_locked(status, &host).await;
        }
        .instrument(span)
        .await
    }

    /// Registers the delegate that receives page models. Held weakly.
    pub fn set_delegate(&self, delegate: &Arc<dyn PageModelDelegate>) {
        *self
            .inner
            .delegate
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::downgrade(delegate));
    }

    pub fn clear_delegate(&self) {
        self.inner
            .delegate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Returns a copy of the coordinator state.
    pub async fn snapshot(&self) -> FlowState {
        self.inner.context.get_state().await
    }

    /// Waits until every asynchronous operation started by the coordinator
    /// has completed or been cancelled.
    pub async fn wait_for_pending(&self) {
        self.tasks.wait_idle().await;
    }

    /// Number of asynchronous operations still tracked.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending()
    }
}

impl FlowInner {
    async fn fetch_profile(&self) -> Result<VerificationProfile, KycFlowError> {
        match tokio::time::timeout(self.fetch_timeout, self.profile_provider.fetch_profile()).await
        {
            Ok(Ok(profile)) => Ok(profile),
            Ok(Err(err)) => Err(KycFlowError::ProfileFetch(err)),
            Err(_) => Err(KycFlowError::ProfileFetchTimedOut(self.fetch_timeout)),
        }
    }

    /// Completion of the fetch dispatched by `start`.
    async fn complete_start(self: Arc<Self>, host: HostViewId) {
        let result = self.fetch_profile().await;

        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.context
            .update(|state| state.pending_fetch = None)
            .await;
        self.host.hide_busy().await;

        let profile = match result {
            Ok(profile) => profile,
            Err(err) => {
                error!(error = %err, "failed to load verification profile");
                self.host.show_error_alert(GENERIC_ERROR_MESSAGE).await;
                return;
            }
        };

        let resume_point = FlowNavigator::resume_point(&profile);
        info!(
            profile_id = %profile.id,
            status = ?profile.status,
            resume_point = ?resume_point,
            "verification profile loaded"
        );
        self.context
            .update(|state| state.profile = Some(profile.clone()))
            .await;

        if resume_point == PageType::AccountStatus {
            self.present_account_status_locked(profile.status, &host)
                .await;
        } else {
            self.open_stack_and_replay(&host, &profile, resume_point)
                .await;
        }
    }

    /// Opens a fresh stack at `Welcome` and pushes every page up to and
    /// including `resume_point` without animation.
    async fn open_stack_and_replay(
        &self,
        host: &HostViewId,
        profile: &VerificationProfile,
        resume_point: PageType,
    ) {
        let path = self
            .navigator
            .replay_path(resume_point, Some(profile), None);
        if path.last() != Some(&resume_point) {
            warn!(
                resume_point = ?resume_point,
                reached = ?path.last(),
                "replay stopped before reaching resume point"
            );
        }

        let flow = FlowId::new();
        let mut pages = path.into_iter();
        let root_page = pages.next().unwrap_or(PageType::Welcome);
        let root = self.screen_factory.create(root_page, &flow, None);

        self.context
            .update(|state| state.flow = Some(flow.clone()))
            .await;
        self.host.present_stack(host, &flow, root).await;

        let mut replayed = 0usize;
        for page in pages {
            let screen = self
                .screen_factory
                .create(page, &flow, None)
                .with_back_button_hidden(!page.allows_back_navigation());
            self.host.push(&flow, screen, false).await;
            replayed += 1;
        }
        info!(flow = %flow, replayed, resume_point = ?resume_point, "flow stack restored");
    }

    fn current_delegate(&self) -> Option<Arc<dyn PageModelDelegate>> {
        self.delegate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade)
    }

    async fn page_will_appear(&self, page: PageType) {
        let Some(delegate) = self.current_delegate() else {
            debug!(page = ?page, "no page model delegate registered");
            return;
        };
        let state = self.context.get_state().await;

        let model = match (page, state.profile) {
            (PageType::Profile, Some(profile)) => PageModel::PersonalDetails(profile),
            (PageType::Address, Some(profile)) => PageModel::Address {
                profile,
                country: state.country,
            },
            (PageType::EnterPhone | PageType::ConfirmPhone, Some(profile)) => {
                PageModel::Phone(profile)
            }
            (PageType::VerifyIdentity, profile) => {
                match FlowNavigator::resolve_country(profile.as_ref(), state.country.as_ref()) {
                    Some(code) => PageModel::VerifyIdentity {
                        country_code: code.clone(),
                    },
                    None => {
                        debug!("no country available for identity verification");
                        return;
                    }
                }
            }
            (page, _) => {
                debug!(page = ?page, "no page model for page");
                return;
            }
        };

        delegate.apply(model);
    }

    async fn next_page(&self, page: PageType, payload: Option<PagePayload>) {
        if let Some(PagePayload::CountrySelected { country }) = &payload {
            let previous = self
                .context
                .update(|state| state.country.replace(country.clone()))
                .await;
            match previous {
                Some(previous) if previous.code != country.code => {
                    info!(from = %previous.code, to = %country.code, "country selection changed");
                }
                _ => info!(country = %country.code, "country selected"),
            }
        }

        let state = self.context.get_state().await;
        let Some(next) = self
            .navigator
            .advance(page, state.profile.as_ref(), state.country.as_ref())
        else {
            debug!(page = ?page, "no page after current page");
            return;
        };
        let Some(flow) = state.flow else {
            debug!(page = ?page, next = ?next, "no active stack to push onto");
            return;
        };

        let screen = self
            .screen_factory
            .create(next, &flow, payload.as_ref())
            .with_back_button_hidden(!next.allows_back_navigation());
        info!(from = ?page, to = ?next, flow = %flow, "advancing flow");
        self.host.push(&flow, screen, true).await;
    }

    /// Tears down whatever the flow currently presents.
    pub(crate) async fn finish_locked(&self) {
        let (flow, status_presented) = self
            .context
            .update(|state| {
                let flow = state.flow.take();
                let status_presented = std::mem::take(&mut state.status_presented);
                state.profile = None;
                state.country = None;
                (flow, status_presented)
            })
            .await;

        if let Some(flow) = flow {
            self.host.dismiss_stack(&flow).await;
            info!(flow = %flow, "flow dismissed");
        }
        if status_presented {
            self.host.dismiss(1).await;
            debug!("status screen dismissed");
        }
    }
}
