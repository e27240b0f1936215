//! Scripted user for the command-line host.
//!
//! Starts the flow, then behaves like a user tapping "continue" on whatever
//! page is on top of the stack, choosing the configured country on the
//! country page. Terminal screens get their primary button tapped once.

use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use kyc_core::kyc::{PrimaryAction, ScreenKind};
use kyc_core::ports::PageModelDelegate;
use kyc_core::{CountrySelection, FlowEvent, HostViewId, PageError, PagePayload, PageType};

use crate::adapters::{LoggingDelegate, Presentation};
use crate::bootstrap::WiredFlow;

#[derive(Debug, Clone)]
pub struct WalkthroughOptions {
    pub host: HostViewId,
    /// Picked on the country page; `None` keeps whatever the profile has.
    pub country: Option<CountrySelection>,
    /// Upper bound on "continue" taps.
    pub steps: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WalkthroughSummary {
    /// Pages the user continued from, in order.
    pub pages: Vec<PageType>,
    /// Primary action tapped on a terminal screen, if any.
    pub tapped: Option<PrimaryAction>,
    /// Presentations left on screen when the walkthrough stopped.
    pub levels: Vec<Presentation>,
    pub alerts: Vec<String>,
}

fn primary_action(kind: &ScreenKind) -> Option<PrimaryAction> {
    match kind {
        ScreenKind::AccountStatus(model) if model.button_title.is_some() => {
            Some(model.primary_action.clone())
        }
        ScreenKind::Information(model) => Some(model.primary_action.clone()),
        _ => None,
    }
}

pub async fn run_walkthrough(
    flow: &WiredFlow,
    options: WalkthroughOptions,
) -> anyhow::Result<WalkthroughSummary> {
    let span = info_span!("walkthrough", host = %options.host, steps = options.steps);
    async {
        let coordinator = &flow.coordinator;
        let delegate: Arc<dyn PageModelDelegate> = Arc::new(LoggingDelegate);
        coordinator.set_delegate(&delegate);

        coordinator.start(options.host.clone()).await?;
        coordinator.wait_for_pending().await;

        let mut summary = WalkthroughSummary::default();

        for _ in 0..options.steps {
            let Some(page) = flow.host.top_page() else {
                break;
            };
            coordinator
                .handle(FlowEvent::PageWillAppear { page })
                .await;

            let mut payload = None;
            if page == PageType::Country {
                if let Some(country) = &options.country {
                    if !country.supported {
                        coordinator
                            .handle(FlowEvent::FailurePageForPageType {
                                page,
                                error: PageError::CountryNotSupported {
                                    country: country.clone(),
                                },
                            })
                            .await;
                        summary.pages.push(page);
                        break;
                    }
                    payload = Some(PagePayload::CountrySelected {
                        country: country.clone(),
                    });
                }
            }

            coordinator
                .handle(FlowEvent::NextPageFromPageType { page, payload })
                .await;
            summary.pages.push(page);

            if flow.host.top_page() == Some(page) {
                info!(page = ?page, "flow did not advance, stopping");
                break;
            }
        }

        if let Some(action) = flow
            .host
            .top_modal()
            .and_then(|screen| primary_action(&screen.kind))
        {
            info!(action = ?action, "tapping primary button");
            coordinator.perform(action.clone()).await;
            summary.tapped = Some(action);
        }
        coordinator.wait_for_pending().await;

        summary.levels = flow.host.levels();
        summary.alerts = flow.host.alerts();
        Ok(summary)
    }
    .instrument(span)
    .await
}
