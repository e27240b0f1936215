//! Tracing configuration for the command-line host.
//!
//! - **Environment-aware**: debug builds log at `debug`, release builds at `info`
//! - **Environment filter**: `RUST_LOG` overrides the defaults entirely
//! - **Format**: `2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message`

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives when `RUST_LOG` is not set.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("kyc_app={level}"),
        format!("kyc_infra={level}"),
        "kyc_flow=info".to_string(),
    ]
}

/// Installs the global subscriber. Call once, before the coordinator is built.
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_development()).join(",")));

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(std::io::stderr);

    registry().with(env_filter).with(stdout_layer).try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_directives_follow_build_profile() {
        let dev = build_filter_directives(true);
        assert!(dev.contains(&"debug".to_string()));
        assert!(dev.contains(&"kyc_app=debug".to_string()));
        assert!(dev.contains(&"kyc_infra=debug".to_string()));

        let prod = build_filter_directives(false);
        assert!(prod.contains(&"info".to_string()));
        assert!(prod.contains(&"kyc_app=info".to_string()));
    }

    #[test]
    fn default_directives_parse_as_env_filter() {
        for is_dev in [true, false] {
            let directives = build_filter_directives(is_dev).join(",");
            assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
        }
    }
}
