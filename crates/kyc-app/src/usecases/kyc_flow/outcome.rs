//! Terminal screens: the account status view and the dead-end information
//! screens, plus the primary actions bound to their buttons.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use kyc_core::{
    kyc::{AccountStatusModel, InformationModel, InterestTarget, PrimaryAction},
    HostViewId, PageError, VerificationStatus,
};

use crate::usecases::kyc_flow::coordinator::{FlowInner, KycFlowCoordinator};

/// Presentation levels closed by a dead-end screen's primary action: the
/// information screen and the flow container presenting it.
const DEAD_END_DISMISS_LEVELS: usize = 2;

impl FlowInner {
    pub(crate) async fn present_account_status_locked(
        &self,
        status: VerificationStatus,
        host: &HostViewId,
    ) {
        let model = AccountStatusModel::for_status(status, host, &self.support_url);
        let screen = self.screen_factory.create_account_status(model);
        self.context
            .update(|state| {
                state.host = Some(host.clone());
                state.status_presented = true;
            })
            .await;
        self.host.present_modally(host, screen).await;
        info!(status = ?status, "account status presented");
    }

    pub(crate) async fn present_failure(&self, error: PageError) {
        let model = match &error {
            PageError::CountryNotSupported { country } => {
                InformationModel::country_not_supported(country)
            }
            PageError::StateNotSupported { state } => InformationModel::state_not_supported(state),
        };
        let Some(host) = self.context.get_state().await.host else {
            debug!(error = %error, "no host to present the dead-end screen over");
            return;
        };
        let screen = self.screen_factory.create_information(model);
        self.host.present_modally(&host, screen).await;
        info!(error = %error, "dead-end screen presented");
    }

    async fn register_interest(self: Arc<Self>, target: InterestTarget) {
        match self
            .interest_registry
            .register_interest(&target, true)
            .await
        {
            Ok(()) => info!(target = %target, "interest registered"),
            Err(err) => warn!(target = %target, error = %err, "failed to register interest"),
        }
    }
}

impl KycFlowCoordinator {
    /// Runs the primary action of a status or information screen.
    pub async fn perform(&self, action: PrimaryAction) {
        let span = info_span!("usecase.kyc_flow.perform", action = ?action);
        async {
            let _dispatch_guard = self.inner.context.acquire_dispatch_lock().await;
            match action {
                PrimaryAction::None => debug!("primary action is a no-op"),
                PrimaryAction::EnterExchange { host } => {
                    self.inner.finish_locked().await;
                    if let Err(err) = self.inner.exchange.enter_exchange(&host).await {
                        warn!(error = %err, host = %host, "failed to enter exchange");
                    }
                }
                PrimaryAction::RequestStatusNotifications => {
                    if let Err(err) = self.inner.notifications.request_status_notifications().await
                    {
                        warn!(error = %err, "failed to request status notifications");
                    }
                }
                PrimaryAction::OpenSupport { url } => {
                    if let Err(err) = self.inner.links.open(&url).await {
                        warn!(error = %err, url = %url, "failed to open support link");
                    }
                }
                PrimaryAction::NotifyWhenAvailable { target } => {
                    self.inner.host.dismiss(DEAD_END_DISMISS_LEVELS).await;
                    // The dismissed container was the flow's stack.
                    self.inner.context.update(|state| state.flow = None).await;

                    let inner = Arc::clone(&self.inner);
                    let register_span =
                        info_span!("usecase.kyc_flow.register_interest", target = %target);
                    self.tasks.spawn(
                        "register_interest",
                        inner.register_interest(target).instrument(register_span),
                    );
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::{mock, predicate::eq, Sequence};

    use kyc_core::{
        kyc::{ScreenHandle, ScreenKind},
        ports::{
            ExchangeEntryPort, ExternalLinkPort, InterestRegistrationPort,
            NotificationPermissionPort, PresentationHostPort, ProfileProviderPort,
            ScreenFactoryPort,
        },
        CountryCode, CountrySelection, FlowEvent, FlowId, KycConfig, PagePayload, PageType,
        VerificationProfile,
    };

    use crate::usecases::kyc_flow::coordinator::KycFlowDeps;

    mock! {
        pub Host {}

        #[async_trait]
        impl PresentationHostPort for Host {
            async fn show_busy(&self, message: &str);
            async fn hide_busy(&self);
            async fn show_error_alert(&self, message: &str);
            async fn present_stack(&self, host: &HostViewId, flow: &FlowId, root: ScreenHandle);
            async fn push(&self, flow: &FlowId, screen: ScreenHandle, animated: bool);
            async fn present_modally(&self, host: &HostViewId, screen: ScreenHandle);
            async fn dismiss(&self, levels: usize);
            async fn dismiss_stack(&self, flow: &FlowId);
        }
    }

    mock! {
        pub Profiles {}

        #[async_trait]
        impl ProfileProviderPort for Profiles {
            async fn fetch_profile(&self) -> anyhow::Result<VerificationProfile>;
        }
    }

    mock! {
        pub Interest {}

        #[async_trait]
        impl InterestRegistrationPort for Interest {
            async fn register_interest(
                &self,
                target: &InterestTarget,
                notify_when_available: bool,
            ) -> anyhow::Result<()>;
        }
    }

    mock! {
        pub Exchange {}

        #[async_trait]
        impl ExchangeEntryPort for Exchange {
            async fn enter_exchange(&self, host: &HostViewId) -> anyhow::Result<()>;
        }
    }

    mock! {
        pub Notifications {}

        #[async_trait]
        impl NotificationPermissionPort for Notifications {
            async fn request_status_notifications(&self) -> anyhow::Result<()>;
        }
    }

    mock! {
        pub Links {}

        #[async_trait]
        impl ExternalLinkPort for Links {
            async fn open(&self, url: &str) -> anyhow::Result<()>;
        }
    }

    struct DetachedScreens;

    impl ScreenFactoryPort for DetachedScreens {
        fn create(
            &self,
            page: PageType,
            flow: &FlowId,
            _payload: Option<&PagePayload>,
        ) -> ScreenHandle {
            ScreenHandle::page(flow, page)
        }

        fn create_account_status(&self, model: AccountStatusModel) -> ScreenHandle {
            ScreenHandle::detached(ScreenKind::AccountStatus(model))
        }

        fn create_information(&self, model: InformationModel) -> ScreenHandle {
            ScreenHandle::detached(ScreenKind::Information(model))
        }
    }

    struct Mocks {
        host: MockHost,
        interest: MockInterest,
        exchange: MockExchange,
        notifications: MockNotifications,
        links: MockLinks,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                host: MockHost::new(),
                interest: MockInterest::new(),
                exchange: MockExchange::new(),
                notifications: MockNotifications::new(),
                links: MockLinks::new(),
            }
        }

        fn into_coordinator(self) -> KycFlowCoordinator {
            KycFlowCoordinator::new(
                &KycConfig::default(),
                KycFlowDeps {
                    profile_provider: Arc::new(MockProfiles::new()),
                    screen_factory: Arc::new(DetachedScreens),
                    host: Arc::new(self.host),
                    interest_registry: Arc::new(self.interest),
                    exchange: Arc::new(self.exchange),
                    notifications: Arc::new(self.notifications),
                    links: Arc::new(self.links),
                },
            )
        }
    }

    #[tokio::test]
    async fn approved_action_dismisses_status_before_entering_exchange() {
        let host = HostViewId::from("wallet-home");
        let mut mocks = Mocks::new();
        let mut seq = Sequence::new();

        mocks
            .host
            .expect_present_modally()
            .withf(|_, screen| matches!(screen.kind, ScreenKind::AccountStatus(_)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        mocks
            .host
            .expect_dismiss()
            .with(eq(1usize))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        mocks
            .exchange
            .expect_enter_exchange()
            .with(eq(host.clone()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let coordinator = mocks.into_coordinator();
        coordinator
            .present_account_status(VerificationStatus::Approved, host.clone())
            .await;
        assert!(coordinator.snapshot().await.status_presented);

        coordinator
            .perform(PrimaryAction::EnterExchange { host })
            .await;

        let state = coordinator.snapshot().await;
        assert!(!state.status_presented);
        assert!(state.flow.is_none());
    }

    #[tokio::test]
    async fn notify_when_available_dismisses_two_levels_and_registers_once() {
        let mut mocks = Mocks::new();
        mocks
            .host
            .expect_dismiss()
            .with(eq(2usize))
            .times(1)
            .return_const(());
        mocks
            .interest
            .expect_register_interest()
            .withf(|target, notify| {
                *target == InterestTarget::Country(CountryCode::new("XX")) && *notify
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let coordinator = mocks.into_coordinator();
        coordinator
            .perform(PrimaryAction::NotifyWhenAvailable {
                target: InterestTarget::Country(CountryCode::new("xx")),
            })
            .await;
        coordinator.wait_for_pending().await;

        assert!(coordinator.snapshot().await.flow.is_none());
    }

    #[tokio::test]
    async fn failing_registration_is_logged_not_surfaced() {
        let mut mocks = Mocks::new();
        mocks.host.expect_dismiss().return_const(());
        mocks
            .interest
            .expect_register_interest()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("backend unavailable")));

        let coordinator = mocks.into_coordinator();
        coordinator
            .perform(PrimaryAction::NotifyWhenAvailable {
                target: InterestTarget::State("NY".to_string()),
            })
            .await;
        coordinator.wait_for_pending().await;
    }

    #[tokio::test]
    async fn support_and_notification_actions_reach_their_ports() {
        let mut mocks = Mocks::new();
        mocks
            .links
            .expect_open()
            .withf(|url| url == "https://support.example.com")
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("no browser")));
        mocks
            .notifications
            .expect_request_status_notifications()
            .times(1)
            .returning(|| Ok(()));

        let coordinator = mocks.into_coordinator();
        coordinator
            .perform(PrimaryAction::OpenSupport {
                url: "https://support.example.com".to_string(),
            })
            .await;
        coordinator
            .perform(PrimaryAction::RequestStatusNotifications)
            .await;
    }

    #[tokio::test]
    async fn none_action_touches_nothing() {
        // Mocks without expectations panic on any call.
        let coordinator = Mocks::new().into_coordinator();
        coordinator.perform(PrimaryAction::None).await;
        assert_eq!(coordinator.snapshot().await, Default::default());
    }

    #[tokio::test]
    async fn failure_without_a_host_presents_nothing() {
        // No start, so there is nothing to present over.
        let coordinator = Mocks::new().into_coordinator();
        coordinator
            .handle(FlowEvent::FailurePageForPageType {
                page: PageType::Country,
                error: PageError::CountryNotSupported {
                    country: CountrySelection::new("XX", "Nowhere", false),
                },
            })
            .await;
        assert!(coordinator.snapshot().await.host.is_none());
    }
}
