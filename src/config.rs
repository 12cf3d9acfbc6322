use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use validator::Validate;
use crate::models::Units;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub google: GoogleSettings,
    #[serde(default)]
    #[validate(nested)]
    pub popular_times: PopularTimesSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    #[validate(nested)]
    pub http: HttpSettings,
    #[serde(default)]
    #[validate(nested)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GoogleSettings {
    #[serde(default)]
    #[validate(length(min = 1, message = "set GOOGLE_MAPS_API_KEY or google.api_key"))]
    pub api_key: String,
    #[serde(default = "default_google_base_url")]
    #[validate(url)]
    pub base_url: String,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_google_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PopularTimesSettings {
    #[serde(default = "default_popular_times_base_url")]
    #[validate(url)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for PopularTimesSettings {
    fn default() -> Self {
        Self {
            base_url: default_popular_times_base_url(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSettings {
    /// Only return stores that are open right now
    #[serde(default)]
    pub open_now: bool,
    #[serde(default)]
    pub units: Units,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: default_timeout_secs() }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OutputSettings {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default = "default_map_path")]
    pub map_path: PathBuf,
    #[serde(default = "default_true")]
    pub open_browser: bool,
    #[serde(default = "default_zoom")]
    #[validate(range(min = 1, max = 19))]
    pub zoom: u8,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            map_path: default_map_path(),
            open_browser: true,
            zoom: default_zoom(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_google_base_url() -> String { "https://maps.googleapis.com/maps/api".to_string() }
fn default_popular_times_base_url() -> String { "http://127.0.0.1:8085".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_csv_path() -> PathBuf { PathBuf::from("stores.csv") }
fn default_map_path() -> PathBuf { PathBuf::from("local_map.html") }
fn default_zoom() -> u8 { 12 }
fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with NEAREST__)
    /// 4. Well-known variables such as GOOGLE_MAPS_API_KEY
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, SettingsError> {
        let settings: Settings = substitute_env_vars(settings)?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

/// e.g., NEAREST__OUTPUT__CSV_PATH -> output.csv_path
fn environment() -> Environment {
    Environment::with_prefix("NEAREST")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the conventional provider variables on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("GOOGLE_MAPS_API_KEY") {
        builder = builder.set_override("google.api_key", api_key)?;
    }
    if let Ok(base_url) = env::var("POPULAR_TIMES_URL") {
        builder = builder.set_override("popular_times.base_url", base_url)?;
    }
    if let Ok(api_key) = env::var("POPULAR_TIMES_API_KEY") {
        builder = builder.set_override("popular_times.api_key", api_key)?;
    }

    builder.build()
}
