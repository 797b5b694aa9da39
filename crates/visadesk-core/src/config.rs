use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const MIN_MOUNT_DELAY_MS: u64 = 150;
pub const MAX_MOUNT_DELAY_MS: u64 = 300;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub model: ModelConfig,
    pub audio: AudioConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            model: ModelConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

impl ScrollBehavior {
    pub fn is_smooth(self) -> bool {
        matches!(self, Self::Smooth)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    pub brand: String,
    pub messaging_number: String,
    pub scroll: ScrollBehavior,
    pub mount_delay_ms: u64,
    pub features_screen: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            brand: "VISADESK".to_string(),
            messaging_number: "+15550100199".to_string(),
            scroll: ScrollBehavior::Smooth,
            mount_delay_ms: MIN_MOUNT_DELAY_MS,
            features_screen: false,
        }
    }
}

impl SiteConfig {
    pub fn effective_mount_delay_ms(&self) -> u64 {
        self.mount_delay_ms
            .clamp(MIN_MOUNT_DELAY_MS, MAX_MOUNT_DELAY_MS)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: String,
    pub model: Option<String>,
    pub temperature: f32,
    pub api_key_env: String,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: None,
            temperature: 0.7,
            api_key_env: "GEMINI_API_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_ms: 20_000,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
