//! Platform-aware data directory management
//!
//! | Windows | macOS | Linux |
//! |---------|-------|-------|
//! | `%APPDATA%\RecipeBox\` | `~/Library/Application Support/RecipeBox/` | `$XDG_DATA_HOME/recipebox/` |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::constants::{APP_DOT_FOLDER, APP_NAME, ENV_DATA_DIR, SQLITE_DB_FILENAME};
use crate::utils::file::expand_path;

/// Data subdirectories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSubdir {
    Sqlite,
}

impl DataSubdir {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataSubdir::Sqlite => "sqlite",
        }
    }

    pub const fn all() -> &'static [DataSubdir] {
        &[DataSubdir::Sqlite]
    }
}

/// Application storage manager
#[derive(Debug, Clone)]
pub struct AppStorage {
    data_dir: PathBuf,
}

impl AppStorage {
    /// Resolve the data directory and create it with its subdirectories
    pub async fn init() -> Result<Self> {
        Self::init_at(Self::resolve_data_dir()).await
    }

    pub async fn init_at(data_dir: PathBuf) -> Result<Self> {
        for subdir in DataSubdir::all() {
            let path = data_dir.join(subdir.as_str());
            tokio::fs::create_dir_all(&path).await.with_context(|| {
                format!(
                    "Failed to create {} directory: {}",
                    subdir.as_str(),
                    path.display()
                )
            })?;
        }

        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);
        tracing::debug!(data_dir = %data_dir.display(), "Storage initialized");
        Ok(Self { data_dir })
    }

    /// Env var override, then the platform data dir, then `./.recipebox`
    pub fn resolve_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            return expand_path(&dir);
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            return proj_dirs.data_dir().to_path_buf();
        }

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        cwd.join(APP_DOT_FOLDER)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn subdir_path(&self, subdir: DataSubdir, filename: &str) -> PathBuf {
        self.data_dir.join(subdir.as_str()).join(filename)
    }

    /// SQLite database file
    pub fn sqlite_path(&self) -> PathBuf {
        self.subdir_path(DataSubdir::Sqlite, SQLITE_DB_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_subdirectories() {
        let temp = tempfile::tempdir().unwrap();
        let storage = AppStorage::init_at(temp.path().join("data")).await.unwrap();

        assert!(storage.data_dir().join("sqlite").is_dir());
        assert!(storage.sqlite_path().ends_with("sqlite/recipebox.db"));
    }

    #[test]
    fn test_resolve_data_dir_is_not_empty() {
        assert!(!AppStorage::resolve_data_dir().as_os_str().is_empty());
    }
}
