// crates/core/src/store.rs
//! On-disk persistence for the cluster list.
//!
//! Passwords cross this boundary encrypted — plaintext only ever lives in
//! memory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::ConfigError;
use crate::paths;
use crate::secret::SecretCodec;
use crate::types::ConfigFile;

/// Loads and persists the [`ConfigFile`], applying the secret codec to
/// passwords on the way in and out.
#[derive(Clone)]
pub struct ConfigStore {
    path: PathBuf,
    codec: Arc<dyn SecretCodec>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>, codec: Arc<dyn SecretCodec>) -> Self {
        Self {
            path: path.into(),
            codec,
        }
    }

    /// Store at the well-known location `~/joint.json`.
    pub fn open_default(codec: Arc<dyn SecretCodec>) -> Result<Self, ConfigError> {
        let path = paths::config_path().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::new(path, codec))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full config file. A missing file is an empty cluster list,
    /// not an error; a present-but-malformed file is fatal to the read.
    pub async fn load(&self) -> Result<ConfigFile, ConfigError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "config file absent, starting empty");
                return Ok(ConfigFile::default());
            }
            Err(e) => return Err(ConfigError::io(&self.path, e)),
        };

        let mut file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        for cluster in &mut file.clusters {
            if let Some(password) = cluster.password.as_deref().filter(|p| !p.is_empty()) {
                let plaintext =
                    self.codec
                        .decrypt(password)
                        .map_err(|source| ConfigError::Secret {
                            name: cluster.name.clone(),
                            source,
                        })?;
                cluster.password = Some(plaintext);
            }
        }

        Ok(file)
    }

    /// Overwrite the config file with `file`, encrypting passwords first.
    ///
    /// Writes to a sibling temp file and renames it into place, so a failed
    /// write leaves the previous content intact.
    pub async fn save(&self, file: &ConfigFile) -> Result<(), ConfigError> {
        let mut on_disk = file.clone();
        for cluster in &mut on_disk.clusters {
            if let Some(password) = cluster.password.as_deref().filter(|p| !p.is_empty()) {
                let ciphertext =
                    self.codec
                        .encrypt(password)
                        .map_err(|source| ConfigError::Secret {
                            name: cluster.name.clone(),
                            source,
                        })?;
                cluster.password = Some(ciphertext);
            }
        }

        let json = serde_json::to_string_pretty(&on_disk).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: format!("serialize: {e}"),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| ConfigError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| ConfigError::io(&self.path, e))?;

        debug!(path = %self.path.display(), clusters = on_disk.clusters.len(), "config saved");
        Ok(())
    }
}
