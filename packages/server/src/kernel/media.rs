//! Disk-backed media store.
//!
//! Keys map to paths under a configured directory; URLs resolve under a
//! configured public base URL. Keys are slash-separated (e.g.
//! `party_images/<file>`), so parent directories are created on demand.

use anyhow::{bail, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use crate::kernel::BaseMediaStore;

pub struct DiskMediaStore {
    dir: PathBuf,
    base_url: String,
}

impl DiskMediaStore {
    pub async fn new(dir: PathBuf, base_url: impl Into<String>) -> Result<Self> {
        fs::create_dir_all(&dir).await?;
        info!("Media storage directory: {}", dir.display());
        Ok(Self {
            dir,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are server-derived, but refuse traversal anyway.
        if key.split('/').any(|part| part.is_empty() || part == "..") {
            bail!("invalid media key: {key}");
        }
        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl BaseMediaStore for DiskMediaStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, &bytes).await?;
        Ok(())
    }

    async fn download_url(&self, key: &str) -> Result<String> {
        let path = self.path_for(key)?;
        if fs::metadata(&path).await.is_err() {
            bail!("no stored media for key: {key}");
        }
        Ok(format!("{}/{}", self.base_url, key))
    }
}
