//! Configuration loader.
//!
//! Reads TOML into [`KycConfig`]. Sections and keys missing from the file keep
//! their defaults; no further validation happens here.

use std::path::Path;

use anyhow::Context;
use kyc_core::KycConfig;
use tracing::info;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML for
/// [`KycConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<KycConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config as TOML: {}", config_path.display()))
}

/// Like [`load_config`], but a missing file (or no path at all) yields defaults.
pub fn load_config_or_default(config_path: Option<&Path>) -> anyhow::Result<KycConfig> {
    match config_path {
        Some(path) if path.exists() => load_config(path),
        Some(path) => {
            info!(path = %path.display(), "config file not found, using defaults");
            Ok(KycConfig::default())
        }
        None => Ok(KycConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn load_config_reads_all_sections() {
        let toml_content = r#"
            [flow]
            support_url = "https://help.example.com"
            state_selection_countries = ["US", "ca"]
            profile_fetch_timeout_secs = 5

            [storage]
            interest_registry_path = "/var/lib/kyc/interest.json"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.flow.support_url, "https://help.example.com");
        assert_eq!(config.flow.profile_fetch_timeout_secs, 5);
        assert_eq!(
            config.storage.interest_registry_path,
            PathBuf::from("/var/lib/kyc/interest.json")
        );
        let policy = config.state_selection_policy();
        assert!(policy.requires_state_selection(&"CA".into()));
        assert!(policy.requires_state_selection(&"us".into()));
        assert!(!policy.requires_state_selection(&"DE".into()));
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[flow]\nprofile_fetch_timeout_secs = 10\n")
            .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        let defaults = KycConfig::default();

        assert_eq!(config.flow.profile_fetch_timeout_secs, 10);
        assert_eq!(config.flow.support_url, defaults.flow.support_url);
        assert_eq!(
            config.flow.state_selection_countries,
            defaults.flow.state_selection_countries
        );
        assert_eq!(config.storage, defaults.storage);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[flow\nsupport_url = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("kyc.toml");

        assert_eq!(
            load_config_or_default(Some(&missing)).unwrap(),
            KycConfig::default()
        );
        assert_eq!(load_config_or_default(None).unwrap(), KycConfig::default());
        assert!(load_config(&missing).is_err());
    }
}
