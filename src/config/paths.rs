//! Path management for spendscope
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDSCOPE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/spendscope` on Linux)

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::error::{SpendscopeError, SpendscopeResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SPENDSCOPE_DATA_DIR";

/// Manages all paths used by spendscope
#[derive(Debug, Clone)]
pub struct SpendscopePaths {
    base_dir: PathBuf,
}

impl SpendscopePaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> SpendscopeResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => ProjectDirs::from("", "", "spendscope")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SpendscopeError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted filter configuration
    pub fn filters_file(&self) -> PathBuf {
        self.base_dir.join("filters.json")
    }

    /// Snapshot read when neither the command line nor the settings name one
    pub fn default_snapshot(&self) -> PathBuf {
        self.base_dir.join("ledger.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> SpendscopeResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            SpendscopeError::Io(format!(
                "Failed to create {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}
