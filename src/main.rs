use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use kyc_core::{CountrySelection, HostViewId};
use kyc_flow::adapters::Presentation;
use kyc_flow::bootstrap::{self, tracing::init_tracing_subscriber};
use kyc_flow::{run_walkthrough, WalkthroughOptions};

/// Walk a verification profile through the KYC flow
#[derive(Parser, Debug)]
#[command(name = "kyc-flow")]
#[command(about = "Drive the KYC verification flow against a local profile", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file; defaults apply when absent
    #[arg(short, long, env = "KYC_FLOW_CONFIG")]
    config: Option<PathBuf>,

    /// JSON verification profile to load
    #[arg(short, long, default_value = "profile.json")]
    profile: PathBuf,

    /// Country code to pick on the country page
    #[arg(long)]
    country: Option<String>,

    /// Treat the picked country as unsupported
    #[arg(long, requires = "country")]
    unsupported: bool,

    /// Maximum number of "continue" taps
    #[arg(long, default_value_t = 3)]
    steps: usize,

    /// Host view the flow is presented over
    #[arg(long, default_value = "wallet-home")]
    host: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = bootstrap::load_config_or_default(cli.config.as_deref())?;
    info!(
        support_url = %config.flow.support_url,
        state_countries = ?config.flow.state_selection_countries,
        "configuration loaded"
    );

    let flow = bootstrap::wire_flow(&config, &cli.profile);
    let options = WalkthroughOptions {
        host: HostViewId::from(cli.host),
        country: cli
            .country
            .map(|code| CountrySelection::new(code.as_str(), code.as_str(), !cli.unsupported)),
        steps: cli.steps,
    };

    let summary = match run_walkthrough(&flow, options).await {
        Ok(summary) => summary,
        Err(err) => {
            error!(error = %err, "walkthrough failed");
            return Err(err);
        }
    };

    println!("pages continued: {:?}", summary.pages);
    if let Some(action) = &summary.tapped {
        println!("tapped: {action:?}");
    }
    for level in &summary.levels {
        match level {
            Presentation::Stack { flow, screens } => {
                let pages: Vec<_> = screens.iter().filter_map(|s| s.page_type()).collect();
                println!("stack {flow}: {pages:?}");
            }
            Presentation::Modal(screen) => println!("modal: {:?}", screen.kind),
        }
    }
    for alert in &summary.alerts {
        println!("alert: {alert}");
    }
    let registrations = flow.interest_registry.list().await?;
    if !registrations.is_empty() {
        println!(
            "interest registrations in {}: {}",
            flow.interest_registry.path().display(),
            registrations.len()
        );
    }

    flow.coordinator.finish().await;
    Ok(())
}
