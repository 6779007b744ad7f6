//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `scenepad.toml` in the working directory, or at the path in
//! `SCENEPAD_CONFIG`. Every field has a sensible default so the file is
//! optional; without a `[catalog]` the demo catalog is served. Environment
//! variables take precedence over file values.

use std::path::Path;

use serde::Deserialize;

use scenepad_adapter_notify_http::config::NotifyConfig;
use scenepad_domain::catalog::Catalog;
use scenepad_domain::configuration::Configuration;
use scenepad_domain::error::ValidationError;
use scenepad_domain::press::{PressTimings, DOUBLE_WINDOW, LONG_PRESS, QUICK_PRESS};
use scenepad_domain::scene::OverlapPolicy;

const DEFAULT_PATH: &str = "scenepad.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Remote action notification.
    pub notify: NotifyConfig,
    /// Gesture classification thresholds.
    pub timing: TimingConfig,
    /// Scene execution settings.
    pub scenes: ScenesConfig,
    /// Buttons, lights and scenes. The demo catalog when absent.
    pub catalog: Option<Catalog>,
    /// Button bindings. When absent, the demo bindings go with the demo
    /// catalog and a custom catalog starts unbound.
    pub bindings: Option<Configuration>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Press classification thresholds, in milliseconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub long_press_ms: u64,
    pub quick_press_ms: u64,
    pub double_window_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScenesConfig {
    /// What happens when a scene is triggered while another one runs.
    pub overlap: OverlapPolicy,
}

impl Config {
    /// Load configuration from `scenepad.toml` (or `SCENEPAD_CONFIG`) if
    /// present, then apply environment-variable overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SCENEPAD_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides read through `lookup` (the process environment in
    /// production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("SCENEPAD_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("SCENEPAD_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = lookup("SCENEPAD_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("SCENEPAD_NOTIFY_URL") {
            self.notify.url = Some(val).filter(|url| !url.is_empty());
        }
        if let Some(val) = lookup("SCENEPAD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.notify.url.is_some() && self.notify.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "notify timeout must be non-zero".to_string(),
            ));
        }
        self.timing.timings().validate()?;
        let catalog = self.catalog();
        catalog.validate()?;
        catalog.validate_configuration(&self.bindings())?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The configured catalog, or the demo one.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone().unwrap_or_else(Catalog::demo)
    }

    /// The configured bindings; see [`Config::bindings`] field docs for the
    /// default.
    #[must_use]
    pub fn bindings(&self) -> Configuration {
        match (&self.bindings, &self.catalog) {
            (Some(bindings), _) => bindings.clone(),
            (None, None) => Configuration::demo(),
            (None, Some(_)) => Configuration::default(),
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn timings(&self) -> PressTimings {
        PressTimings::from_millis(
            self.long_press_ms,
            self.quick_press_ms,
            self.double_window_ms,
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "scenepadd=info,scenepad=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        let millis = |duration: std::time::Duration| {
            u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
        };
        Self {
            long_press_ms: millis(LONG_PRESS),
            quick_press_ms: millis(QUICK_PRESS),
            double_window_ms: millis(DOUBLE_WINDOW),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// The catalog, the bindings or the timings break a domain invariant.
    #[error("invalid configuration")]
    Domain(#[from] ValidationError),
}
