use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub media: MediaSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 3001 }
    }
}

/// Where uploaded product photos are written and served from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    pub root: String,
    pub url: String,
    pub max_upload_bytes: usize,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            root: "media".to_string(),
            url: "/media/".to_string(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_pool_size() -> u32 {
    10
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Settings {
    /// Reads `appsettings.*` (optional), then `APP__SECTION__KEY` environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
