use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{NotebookError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory where the storage keys live
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolves the data directory from an explicit override or the
    /// platform's per-user data location.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = data_dir {
            return Ok(Self { data_dir: dir });
        }

        let dirs = ProjectDirs::from("", "", "notebook").ok_or_else(|| {
            NotebookError::ConfigError {
                message: "Could not determine a data directory for this platform".to_string(),
            }
        })?;

        Ok(Self {
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/notes"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/notes"));
    }

    #[test]
    fn default_resolution_yields_some_directory() {
        let config = Config::resolve(None).unwrap();
        assert!(!config.data_dir.as_os_str().is_empty());
    }
}
