use anyhow::{Context, Result, anyhow};
use chrono::FixedOffset;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{firestore::FirebaseConfig, model::Coordinates};

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_LOOKUP_URL: &str = "http://ip-api.com/json";

/// OpenWeatherMap access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_openweather_base_url")]
    pub base_url: String,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openweather_base_url(),
        }
    }
}

/// Where the user's position comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// When false the platform is treated as having no location capability.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Fixed position; takes precedence over `lookup_url` when both are set.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: None,
            longitude: None,
            lookup_url: default_lookup_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LocationConfig {
    pub fn fixed_position(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Offset labels are rendered in. Seoul by default.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl DisplayConfig {
    pub fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .ok_or_else(|| anyhow!("Invalid display.utc_offset_hours: {}", self.utc_offset_hours))
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [openweather]
/// api_key = "..."
///
/// [location]
/// latitude = 37.5665
/// longitude = 126.978
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub openweather: OpenWeatherConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load config from disk (or defaults on first run), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
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
        let dirs = ProjectDirs::from("dev", "dashboard", "dashboard-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override file values with whatever `lookup` returns for the known variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("OPENWEATHER_API_KEY") {
            self.openweather.api_key = Some(key);
        }
        if let Some(v) = non_empty("FIREBASE_API_KEY") {
            self.firebase.api_key = Some(v);
        }
        if let Some(v) = non_empty("FIREBASE_PROJECT_ID") {
            self.firebase.project_id = Some(v);
        }
        if let Some(v) = non_empty("FIREBASE_MESSAGING_SENDER_ID") {
            self.firebase.messaging_sender_id = Some(v);
        }
        if let Some(v) = non_empty("FIREBASE_APP_ID") {
            self.firebase.app_id = Some(v);
        }
    }

    /// Returns the OpenWeather API key, if present and non-blank.
    pub fn openweather_api_key(&self) -> Option<&str> {
        self.openweather.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_openweather_api_key(&mut self, api_key: String) {
        self.openweather.api_key = Some(api_key);
    }
}

fn default_openweather_base_url() -> String {
    DEFAULT_OPENWEATHER_BASE_URL.to_string()
}

fn default_lookup_url() -> String {
    DEFAULT_LOOKUP_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_utc_offset_hours() -> i32 {
    9
}

fn default_true() -> bool {
    true
}
