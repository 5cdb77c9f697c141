//! Configuration management for Starlist

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default listing API
pub const DEFAULT_BASE_URL: &str = "https://swapi.tech/api";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Event loop tick in milliseconds; also the animation frame interval
    pub tick_rate_ms: u64,
    pub colors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: String,
    pub level: String,
    /// Log file; `None` means `{data_dir}/starlist/starlist.log`
    pub file: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: 33,
            colors: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error: the defaults are used instead.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default().with_env_overrides());
        }
        Ok(Self::load_from_path(&config_path)?.with_env_overrides())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Apply `NO_COLOR`, `STARLIST_NO_COLOR` and `STARLIST_TICK_MS`
    pub fn with_env_overrides(mut self) -> Self {
        if env_flag_set("NO_COLOR") || env_flag_set("STARLIST_NO_COLOR") {
            self.ui.colors = false;
        }

        if let Some(tick) = std::env::var("STARLIST_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.ui.tick_rate_ms = tick;
        }

        self
    }

    /// Resolved log file path, with `~` expanded
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match self.logging.file {
            Some(ref file) => Ok(PathBuf::from(shellexpand::tilde(file).to_string())),
            None => Ok(resolve_data_path()?.join("starlist.log")),
        }
    }
}

/// Set to a non-empty value; `NO_COLOR=` does not count
fn env_flag_set(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| !value.is_empty())
}

/// Resolve the configuration file path following XDG Base Directory conventions
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("STARLIST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("starlist").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory conventions
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("starlist"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://swapi.tech/api");
        assert_eq!(config.ui.tick_rate_ms, 33);
        assert!(config.ui.colors);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:9000/api\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api");
        assert_eq!(config.ui, UiSettings::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let result = Config::load_from_path(file.path());
        assert!(matches!(
            result,
            Err(crate::StarlistError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_load_missing_path_is_read_error() {
        let result = Config::load_from_path(Path::new("/nonexistent/starlist.toml"));
        assert!(matches!(
            result,
            Err(crate::StarlistError::Config(ConfigError::ReadError(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_load_uses_starlist_config_env() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\ntick_rate_ms = 50").unwrap();

        std::env::set_var("STARLIST_CONFIG", file.path());
        let config = Config::load().unwrap();
        std::env::remove_var("STARLIST_CONFIG");

        assert_eq!(config.ui.tick_rate_ms, 50);
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        std::env::set_var("STARLIST_CONFIG", "/nonexistent/starlist/config.toml");
        let config = Config::load().unwrap();
        std::env::remove_var("STARLIST_CONFIG");

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("STARLIST_NO_COLOR", "1");
        std::env::set_var("STARLIST_TICK_MS", "16");
        let config = Config::default().with_env_overrides();
        std::env::remove_var("STARLIST_NO_COLOR");
        std::env::remove_var("STARLIST_TICK_MS");

        assert!(!config.ui.colors);
        assert_eq!(config.ui.tick_rate_ms, 16);
    }

    #[test]
    fn test_log_file_path_expands_tilde() {
        let mut config = Config::default();
        config.logging.file = Some("~/starlist.log".to_string());

        let path = config.log_file_path().unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("starlist.log"));
    }

    #[test]
    #[serial]
    fn test_empty_no_color_keeps_colors() {
        std::env::set_var("NO_COLOR", "");
        std::env::remove_var("STARLIST_NO_COLOR");
        let config = Config::default().with_env_overrides();
        std::env::remove_var("NO_COLOR");

        assert!(config.ui.colors);
    }

    #[test]
    #[serial]
    fn test_non_empty_no_color_disables_colors() {
        std::env::set_var("NO_COLOR", "1");
        let config = Config::default().with_env_overrides();
        std::env::remove_var("NO_COLOR");

        assert!(!config.ui.colors);
    }
}
