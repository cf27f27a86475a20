use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::forecast::OPENWEATHER_STRIDE;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
pub const DEFAULT_CITY: &str = "London";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "http://api.openweathermap.org/data/2.5"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Applied to each outbound request separately.
    pub timeout_secs: u64,
    /// Forecast samples per day; depends on the provider's sampling interval.
    pub forecast_stride: usize,
    pub default_city: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            forecast_stride: OPENWEATHER_STRIDE,
            default_city: DEFAULT_CITY.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay environment variables on top of the file values.
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`; tests pass a map.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("BASE_URL") {
            self.base_url = url;
        }
        if let Some(secs) = lookup("WEATHER_TIMEOUT_SECS") {
            self.timeout_secs = secs
                .parse()
                .with_context(|| format!("WEATHER_TIMEOUT_SECS is not a number: {secs}"))?;
        }
        if let Some(stride) = lookup("WEATHER_FORECAST_STRIDE") {
            self.forecast_stride = stride
                .parse()
                .with_context(|| format!("WEATHER_FORECAST_STRIDE is not a number: {stride}"))?;
        }
        if let Some(city) = lookup("WEATHER_DEFAULT_CITY") {
            self.default_city = city;
        }

        Ok(self)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_openweather() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.forecast_stride, 8);
        assert_eq!(cfg.default_city, "London");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml("api_key = \"OPEN_KEY\"\ntimeout_secs = 3\n").unwrap();

        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn env_overrides_file_values() {
        let cfg = Config::default()
            .apply_env(env(&[
                ("API_KEY", "ENV_KEY"),
                ("BASE_URL", "http://localhost:9000"),
                ("WEATHER_FORECAST_STRIDE", "24"),
            ]))
            .unwrap();

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.forecast_stride, 24);
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn blank_env_key_does_not_clear_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.apply_env(env(&[("API_KEY", "  ")])).unwrap();
        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn bad_numeric_env_is_an_error() {
        let err = Config::default()
            .apply_env(env(&[("WEATHER_TIMEOUT_SECS", "soon")]))
            .unwrap_err();

        assert!(err.to_string().contains("WEATHER_TIMEOUT_SECS"));
    }
}
