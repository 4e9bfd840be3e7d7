//! User configuration stored at `~/.habitgrid/config.json`

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::calendar::ViewMode;
use crate::types::{HabitgridError, Result};

/// Environment variable overriding the completion data path
pub const DATA_ENV_VAR: &str = "HABITGRID_DATA";

const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "calendar.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Completion export to display; defaults to `~/.habitgrid/calendar.json`
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// View shown on startup
    #[serde(default)]
    pub default_view: ViewMode,
}

impl Config {
    /// `~/.habitgrid`
    pub fn home_dir() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| HabitgridError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".habitgrid"))
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::home_dir()?.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| HabitgridError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Data file path: explicit flag, then `HABITGRID_DATA`, then config,
    /// then `~/.habitgrid/calendar.json`
    pub fn resolve_data_file(&self, flag: Option<&Path>) -> Result<PathBuf> {
        let env = std::env::var_os(DATA_ENV_VAR).map(PathBuf::from);
        self.resolve_data_file_with(flag, env)
    }

    fn resolve_data_file_with(&self, flag: Option<&Path>, env: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(path);
        }
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        Ok(Self::home_dir()?.join(DEFAULT_DATA_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_view, ViewMode::Month);
    }

    #[test]
    fn test_load_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{"data_file": "/tmp/habits.json", "default_view": "year"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/habits.json")));
        assert_eq!(config.default_view, ViewMode::Year);
    }

    #[test]
    fn test_load_malformed_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"default_view": "decade"}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, HabitgridError::Config(_)));
    }

    #[test]
    fn test_resolve_precedence() {
        let config = Config {
            data_file: Some(PathBuf::from("/from/config.json")),
            default_view: ViewMode::Month,
        };
        let flag = PathBuf::from("/from/flag.json");
        let env = Some(PathBuf::from("/from/env.json"));

        assert_eq!(
            config.resolve_data_file_with(Some(&flag), env.clone()).unwrap(),
            flag
        );
        assert_eq!(
            config.resolve_data_file_with(None, env).unwrap(),
            PathBuf::from("/from/env.json")
        );
        assert_eq!(
            config.resolve_data_file_with(None, None).unwrap(),
            PathBuf::from("/from/config.json")
        );
    }

    #[test]
    fn test_resolve_ignores_empty_env() {
        let config = Config {
            data_file: Some(PathBuf::from("/from/config.json")),
            default_view: ViewMode::Month,
        };
        assert_eq!(
            config
                .resolve_data_file_with(None, Some(PathBuf::new()))
                .unwrap(),
            PathBuf::from("/from/config.json")
        );
    }
}
