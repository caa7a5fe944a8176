//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tl_core::TableConfig;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the activity log.
    pub log_path: PathBuf,

    /// Substring marking organized work in event descriptions.
    pub organized_marker: String,

    /// Number of most recent days `tl table` shows when no window is given.
    /// All days when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_days: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_path: data_dir.join("timelog.txt"),
            organized_marker: TableConfig::default().organized_marker,
            recent_days: None,
        }
    }
}

impl Config {
    /// Loads configuration from default locations, then the given file if any.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TL_*)
        figment = figment.merge(Env::prefixed("TL_"));

        figment.extract()
    }

    /// Aggregation settings derived from this configuration.
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            organized_marker: self.organized_marker.clone(),
            ..TableConfig::default()
        }
    }
}

/// Returns the platform-specific config directory for tl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tl"))
}

/// Returns the platform-specific data directory for tl.
///
/// On Linux: `~/.local/share/tl`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("tl"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_tl() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "tl");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_log() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.log_path, data_dir.join("timelog.txt"));
        assert_eq!(config.organized_marker, "orgz");
        assert_eq!(config.recent_days, None);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"log_path = "/tmp/my-log.txt""#).unwrap();
        writeln!(file, r#"organized_marker = "plan""#).unwrap();
        writeln!(file, "recent_days = 7").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.log_path, PathBuf::from("/tmp/my-log.txt"));
        assert_eq!(config.organized_marker, "plan");
        assert_eq!(config.recent_days, Some(7));
    }

    #[test]
    fn test_table_config_uses_marker() {
        let config = Config {
            organized_marker: "focus".to_string(),
            ..Config::default()
        };
        let table_config = config.table_config();
        assert_eq!(table_config.organized_marker, "focus");
        assert_eq!(table_config.ignored, TableConfig::default().ignored);
    }
}
