//! Persisted filter configuration
//!
//! The engine treats a `FilterConfiguration` as an opaque input; this store
//! only keeps one between CLI invocations.

use std::path::PathBuf;

use super::file_io::{read_json_optional, write_json_atomic};
use crate::engine::{Dimension, FilterConfiguration};
use crate::error::SpendscopeResult;

/// File-backed store for a single filter configuration
#[derive(Debug, Clone)]
pub struct FilterStore {
    path: PathBuf,
    seed: Dimension,
}

impl FilterStore {
    /// `seed` is the dimension of the configuration handed out when nothing
    /// has been saved yet
    pub fn new(path: impl Into<PathBuf>, seed: Dimension) -> Self {
        Self {
            path: path.into(),
            seed,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the saved configuration, or the seeded default
    pub fn load(&self) -> SpendscopeResult<FilterConfiguration> {
        match read_json_optional::<FilterConfiguration, _>(&self.path)? {
            Some(mut config) => {
                // A hand-edited empty file still has to hold one dimension
                config.ensure_seeded(self.seed);
                Ok(config)
            }
            None => Ok(FilterConfiguration::seeded(self.seed)),
        }
    }

    pub fn save(&self, config: &FilterConfiguration) -> SpendscopeResult<()> {
        write_json_atomic(&self.path, config)?;
        tracing::debug!(path = %self.path.display(), dimensions = config.len(), "saved filters");
        Ok(())
    }

    /// Load, apply `edit`, and save only if the edit succeeded
    pub fn update<T>(
        &self,
        edit: impl FnOnce(&mut FilterConfiguration) -> SpendscopeResult<T>,
    ) -> SpendscopeResult<(FilterConfiguration, T)> {
        let mut config = self.load()?;
        let outcome = edit(&mut config)?;
        self.save(&config)?;
        Ok((config, outcome))
    }

    /// Replace the saved configuration with the seeded default
    pub fn reset(&self) -> SpendscopeResult<FilterConfiguration> {
        let config = FilterConfiguration::seeded(self.seed);
        self.save(&config)?;
        Ok(config)
    }
}
