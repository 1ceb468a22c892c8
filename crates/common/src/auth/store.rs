//! File-backed token store
//!
//! Persists the current [`TokenPair`] as pretty-printed JSON at a fixed,
//! configurable path. Writes go to a unique sibling temp file which is
//! fsynced and then renamed over the target, so a concurrent reader sees
//! either the previous record or the new one, never a partial write.
//!
//! The file's modification time is the reference point for access token
//! expiry. It is surfaced as [`PersistedTokens::persisted_at`] so that the
//! expiry check itself stays a pure function.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use psnlink_domain::{PersistedTokens, PsnError, TokenPair};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use super::traits::TokenStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Error type for token persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write token record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode token record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StoreError> for PsnError {
    fn from(err: StoreError) -> Self {
        Self::IoFailure(err.to_string())
    }
}

/// Token store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self.path.file_name().map_or_else(
            || "tokens".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        let unique = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path.with_file_name(format!(".{file_name}.{}.{unique}.tmp", std::process::id()))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Option<PersistedTokens> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no persisted token record");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "failed to read token record");
                return None;
            }
        };

        let pair: TokenPair = match serde_json::from_slice(&bytes) {
            Ok(pair) => pair,
            Err(err) => {
                warn!(error = %err, "token record is malformed; treating as absent");
                return None;
            }
        };

        let persisted_at = self.last_write_time().await?;
        Some(PersistedTokens::new(pair, persisted_at))
    }

    #[instrument(skip(self, pair), fields(path = %self.path.display()))]
    async fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(pair)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        let write_result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, &self.path).await
        }
        .await;

        if let Err(err) = write_result {
            let _ = fs::remove_file(&temp_path).await;
            return Err(err.into());
        }

        debug!(bytes = data.len(), "token record persisted");
        Ok(())
    }

    async fn last_write_time(&self) -> Option<DateTime<Utc>> {
        let metadata = fs::metadata(&self.path).await.ok()?;
        metadata.modified().ok().map(DateTime::<Utc>::from)
    }
}
