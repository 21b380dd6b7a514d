//! File-based local storage
//!
//! Each key is stored as `<key>.json` in one directory. Writes go to a
//! temporary sibling first and are renamed into place.

use std::path::PathBuf;

use async_trait::async_trait;
use intake_core::ports::LocalStoragePort;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub struct FileLocalStorage {
    dir: PathBuf,
}

impl FileLocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Keys are mapped to file names; anything outside `[A-Za-z0-9._-]`
    /// becomes `_` so a key can never escape the directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = name.trim_start_matches('.');
        self.dir.join(format!("{name}.json"))
    }

    async fn ensure_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            anyhow::anyhow!("Failed to create storage dir {}: {}", self.dir.display(), e)
        })
    }
}

#[async_trait]
impl LocalStoragePort for FileLocalStorage {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::anyhow!(
                "Failed to read {}: {}",
                path.display(),
                e
            )),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.ensure_dir().await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", tmp.display(), e))?;
        file.write_all(value.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", tmp.display(), e))?;
        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync {}: {}", tmp.display(), e))?;
        drop(file);

        fs::rename(&tmp, &path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to replace {}: {}", path.display(), e))?;
        debug!(key, bytes = value.len(), "local storage item written");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!(
                "Failed to remove {}: {}",
                path.display(),
                e
            )),
        }
    }
}
