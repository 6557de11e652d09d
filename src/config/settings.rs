//! User settings for spendscope

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::SpendscopePaths;
use crate::engine::{Dimension, FilterConfiguration};
use crate::error::{SpendscopeError, SpendscopeResult};

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Dimension a fresh filter configuration starts with
    #[serde(default = "default_dimension")]
    pub default_dimension: Dimension,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Aggregate transactions of archived sources too
    #[serde(default)]
    pub include_archived_sources: bool,

    /// Ledger snapshot to read when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_dimension() -> Dimension {
    Dimension::Category
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_dimension: default_dimension(),
            currency_symbol: default_currency(),
            include_archived_sources: false,
            snapshot_path: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendscopePaths) -> SpendscopeResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SpendscopeError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SpendscopeError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendscopePaths) -> SpendscopeResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SpendscopeError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SpendscopeError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Filter configuration used when none has been saved
    pub fn seed_filters(&self) -> FilterConfiguration {
        FilterConfiguration::seeded(self.default_dimension)
    }

    /// Snapshot path: explicit argument, then settings, then the default file
    pub fn resolve_snapshot(&self, explicit: Option<PathBuf>, paths: &SpendscopePaths) -> PathBuf {
        explicit
            .or_else(|| self.snapshot_path.clone())
            .unwrap_or_else(|| paths.default_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_dimension, Dimension::Category);
        assert_eq!(settings.currency_symbol, "$");
        assert!(!settings.include_archived_sources);
        assert!(settings.snapshot_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendscopePaths::with_base_dir(temp_dir.path());

        let settings = Settings {
            default_dimension: Dimension::Month,
            include_archived_sources: true,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.seed_filters().ordered_dimensions(), vec![Dimension::Month]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.default_dimension, Dimension::Category);
    }

    #[test]
    fn test_resolve_snapshot() {
        let paths = SpendscopePaths::with_base_dir("/data");
        let mut settings = Settings::default();
        assert_eq!(
            settings.resolve_snapshot(None, &paths),
            PathBuf::from("/data/ledger.json")
        );

        settings.snapshot_path = Some(PathBuf::from("/ledgers/home.json"));
        assert_eq!(
            settings.resolve_snapshot(None, &paths),
            PathBuf::from("/ledgers/home.json")
        );
        assert_eq!(
            settings.resolve_snapshot(Some(PathBuf::from("x.json")), &paths),
            PathBuf::from("x.json")
        );
    }
}
