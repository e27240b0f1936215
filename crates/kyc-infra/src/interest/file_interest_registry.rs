use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::info;

use kyc_core::{kyc::InterestTarget, ports::InterestRegistrationPort};

/// One "notify me when available" registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRecord {
    pub target: InterestTarget,
    pub notify: bool,
    pub registered_at: DateTime<Utc>,
}

/// Keeps interest registrations in a JSON array on disk.
///
/// Each registration rewrites the whole file through a temporary sibling
/// followed by a rename, so readers see either the old or the new list.
pub struct FileInterestRegistry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileInterestRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All registrations in insertion order; empty when the file is missing.
    pub async fn list(&self) -> Result<Vec<InterestRecord>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read interest registry failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse interest registry failed: {}", self.path.display()))
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create interest dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp interest registry failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp interest registry to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl InterestRegistrationPort for FileInterestRegistry {
    async fn register_interest(
        &self,
        target: &InterestTarget,
        notify_when_available: bool,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.list().await?;
        records.push(InterestRecord {
            target: target.clone(),
            notify: notify_when_available,
            registered_at: Utc::now(),
        });

        let content =
            serde_json::to_string_pretty(&records).context("serialize interest registry failed")?;
        self.atomic_write(&content).await?;

        info!(target = %target, total = records.len(), "interest registration stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_core::CountryCode;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn list_is_empty_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let registry = FileInterestRegistry::new(temp_dir.path().join("interest.json"));

        assert!(registry.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn registrations_accumulate_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("interest.json");
        let registry = FileInterestRegistry::new(&path);

        registry
            .register_interest(&InterestTarget::Country(CountryCode::new("xx")), true)
            .await
            .unwrap();
        registry
            .register_interest(&InterestTarget::State("NY".to_string()), true)
            .await
            .unwrap();

        let records = registry.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].target,
            InterestTarget::Country(CountryCode::new("XX"))
        );
        assert_eq!(records[1].target, InterestTarget::State("NY".to_string()));
        assert!(records.iter().all(|record| record.notify));
        assert!(records[0].registered_at <= records[1].registered_at);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn concurrent_registrations_are_not_lost() {
        let temp_dir = TempDir::new().unwrap();
        let registry = Arc::new(FileInterestRegistry::new(
            temp_dir.path().join("interest.json"),
        ));

        let mut handles = Vec::new();
        for code in ["AA", "BB", "CC", "DD"] {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry
                    .register_interest(&InterestTarget::Country(CountryCode::new(code)), true)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(registry.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn corrupt_registry_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("interest.json");
        fs::write(&path, "[{").await.unwrap();

        let registry = FileInterestRegistry::new(&path);
        let err = registry.list().await.unwrap_err();

        assert!(err.to_string().contains("parse interest registry failed"));
        assert!(registry
            .register_interest(&InterestTarget::State("CA".to_string()), false)
            .await
            .is_err());
    }
}
