use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// One JSON file per local storage key.
    pub storage_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_data_root(data_root: &Path) -> Self {
        Self {
            storage_dir: data_root.join("storage"),
            logs_dir: data_root.join("logs"),
        }
    }
}
