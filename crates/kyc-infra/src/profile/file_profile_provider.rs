//! Verification profile read from a local JSON file.
//!
//! Stands in for the backend session in the command-line host: the file holds
//! one camelCase `VerificationProfile` document and is re-read on every fetch.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use kyc_core::{ports::ProfileProviderPort, VerificationProfile};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("profile file not found: {0}")]
    NotFound(PathBuf),

    #[error("read profile failed: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse profile failed: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub struct FileProfileProvider {
    path: PathBuf,
}

impl FileProfileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<VerificationProfile, ProfileLoadError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProfileLoadError::NotFound(self.path.clone()));
            }
            Err(source) => {
                return Err(ProfileLoadError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ProfileLoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl ProfileProviderPort for FileProfileProvider {
    async fn fetch_profile(&self) -> anyhow::Result<VerificationProfile> {
        let profile = self.load().await?;
        debug!(path = %self.path.display(), profile_id = %profile.id, "profile loaded from file");
        Ok(profile)
    }
}
