//! Global daybook configuration.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};
use crate::grid::{GridPadding, MonthGridProjector};
use crate::slot::FileSlot;
use crate::store::{DEFAULT_SLOT_KEY, EventStore};

static DEFAULT_DATA_DIR: &str = "~/.local/share/daybook";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

fn is_default_slot_key(key: &String) -> bool {
    key == DEFAULT_SLOT_KEY
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}

/// Configuration at ~/.config/daybook/config.toml, overridable with
/// `DAYBOOK_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DaybookConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_slot_key", skip_serializing_if = "is_default_slot_key")]
    pub slot_key: String,

    /// Weekday that opens each grid row, e.g. "sunday", "mon", "Saturday"
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,

    #[serde(default)]
    pub grid_padding: GridPadding,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            data_dir: default_data_dir(),
            slot_key: default_slot_key(),
            week_start: default_week_start(),
            grid_padding: GridPadding::default(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// none exists.
    pub fn load() -> DaybookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("DAYBOOK"))
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))
    }

    /// Save the current config to ~/.config/daybook/config.toml
    pub fn save(&self) -> DaybookResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> DaybookResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DaybookError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaybookResult<()> {
        let contents = format!(
            "\
# daybook configuration

# Where events are stored:
# data_dir = \"{}\"

# Name of the stored event list (file <data_dir>/<slot_key>.json):
# slot_key = \"{}\"

# First column of the month grid, any weekday (\"sunday\", \"monday\", ...):
# week_start = \"sunday\"

# Stop the grid at the end of the month (\"month-end\") or pad the last
# row to a full week (\"full-weeks\"):
# grid_padding = \"month-end\"
",
            DEFAULT_DATA_DIR, DEFAULT_SLOT_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn slot(&self) -> FileSlot {
        FileSlot::new(self.data_path())
    }

    pub fn open_store(&self) -> EventStore<FileSlot> {
        EventStore::open(self.slot(), self.slot_key.clone())
    }

    pub fn projector(&self) -> MonthGridProjector {
        MonthGridProjector::new(self.week_start).with_padding(self.grid_padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DaybookConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.slot_key, "events");
        assert_eq!(config.week_start, Weekday::Sun);
        assert_eq!(config.grid_padding, GridPadding::MonthEnd);
        assert_eq!(config.data_dir, PathBuf::from("~/.local/share/daybook"));
    }

    #[test]
    fn test_commented_default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daybook/config.toml");

        DaybookConfig::create_default_config(&path).unwrap();
        let config = DaybookConfig::load_from(&path).unwrap();

        assert_eq!(config.slot_key, DEFAULT_SLOT_KEY);
        assert_eq!(config.week_start, Weekday::Sun);
    }

    #[test]
    fn test_reads_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let contents = "\
data_dir = \"/tmp/daybook-data\"
week_start = \"monday\"
grid_padding = \"full-weeks\"
";
        std::fs::write(&path, contents).unwrap();

        let config = DaybookConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/tmp/daybook-data"));
        assert_eq!(config.week_start, Weekday::Mon);
        assert_eq!(config.projector().padding, GridPadding::FullWeeks);
        assert_eq!(config.projector().week_start, Weekday::Mon);
    }

    #[test]
    fn test_week_start_accepts_any_weekday() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for (raw, expected) in [
            ("saturday", Weekday::Sat),
            ("Wed", Weekday::Wed),
            ("Friday", Weekday::Fri),
        ] {
            std::fs::write(&path, format!("week_start = \"{}\"\n", raw)).unwrap();
            let config = DaybookConfig::load_from(&path).unwrap();
            assert_eq!(config.projector().week_start, expected, "{}", raw);
        }

        std::fs::write(&path, "week_start = \"someday\"\n").unwrap();
        assert!(DaybookConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = DaybookConfig {
            week_start: Weekday::Sat,
            ..DaybookConfig::default()
        };
        config.save_to(&path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("data_dir"));
        assert_eq!(DaybookConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_tilde_is_expanded() {
        let config = DaybookConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
        assert!(config.slot().path_for("events").ends_with(".local/share/daybook/events.json"));
    }
}
