use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::services::hourly_curve::DEFAULT_NOISE_AMPLITUDE;

pub const CONFIG_ENV: &str = "SOLAR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

fn default_port() -> u16 { 8080 }
fn default_refresh_interval_s() -> u64 { 20 }
fn default_noise_amplitude() -> f64 { DEFAULT_NOISE_AMPLITUDE }
/// Indian Standard Time, UTC+05:30
fn default_utc_offset_minutes() -> i32 { 330 }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub live: LiveConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

/// Settings for the simulated live view.
#[derive(Debug, Deserialize, Clone)]
pub struct LiveConfig {
    /// Suggested client polling interval, echoed to the UI.
    #[serde(default = "default_refresh_interval_s")]
    pub refresh_interval_s: u64,
    /// Half-width of the multiplicative cloud noise band.
    #[serde(default = "default_noise_amplitude")]
    pub noise_amplitude: f64,
    /// Fixed seed for reproducible curves; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Wall-clock offset of the sites, decides the live window's hour and month.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            refresh_interval_s: default_refresh_interval_s(),
            noise_amplitude: default_noise_amplitude(),
            seed: None,
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// JSON file for saved locations; kept in memory only when absent.
    #[serde(default)]
    pub saved_locations_path: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Loads `$SOLAR_CONFIG` or `config.json`; a missing file yields defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        if !Path::new(&path).exists() {
            tracing::warn!(%path, "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let c = Config::parse("inline", "{}").unwrap();
        assert_eq!(c.server.port, 8080);
        assert_eq!(c.live.refresh_interval_s, 20);
        assert_eq!(c.live.noise_amplitude, 0.15);
        assert!(c.live.seed.is_none());
        assert_eq!(c.live.utc_offset_minutes, 330);
        assert!(c.storage.saved_locations_path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let c = Config::parse(
            "inline",
            r#"{"server":{"port":3000},"live":{"seed":7},"storage":{"saved_locations_path":"data/saved.json"}}"#,
        )
        .unwrap();
        assert_eq!(c.server.port, 3000);
        assert_eq!(c.live.seed, Some(7));
        assert_eq!(c.live.noise_amplitude, 0.15);
        assert_eq!(c.storage.saved_locations_path.as_deref(), Some("data/saved.json"));
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(matches!(Config::parse("x.json", "{port:"), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load("/nonexistent/solar/config.json"),
            Err(ConfigError::Read { .. })
        ));
    }
}
