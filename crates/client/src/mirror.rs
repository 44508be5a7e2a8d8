use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use crate::errors::ClientError;

/// JSON file-per-key store mirroring the last fetched collection for a few
/// resources, so a fresh process can show data before the first fetch
/// resolves. Best-effort: callers treat every failure as a cache miss.
///
/// Format is the raw JSON array under `{dir}/{key}.json`.
#[derive(Clone, Debug)]
pub struct MirrorCache {
    dir: PathBuf,
}

impl MirrorCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ClientError> {
        match fs::read(self.path(key)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| ClientError::Cache(format!("{key}: {e}"))),
            Err(_) => Ok(None),
        }
    }

    /// Persist `value` under `key` unless the stored copy is already
    /// identical. Returns whether a write happened.
    pub async fn store_if_changed<T: Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<bool, ClientError> {
        let data =
            serde_json::to_vec(value).map_err(|e| ClientError::Cache(format!("{key}: {e}")))?;
        if let Ok(existing) = fs::read(self.path(key)).await {
            if existing == data {
                return Ok(false);
            }
        }
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ClientError::Cache(e.to_string()))?;
        fs::write(self.path(key), data)
            .await
            .map_err(|e| ClientError::Cache(format!("{key}: {e}")))?;
        Ok(true)
    }
}
