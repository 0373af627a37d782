use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::catalog::{DEFAULT_SORT_FIELD, DEFAULT_SORT_ORDER};
use crate::constants::provider::{OMDB_BASE_URL, REQUEST_TIMEOUT_SECONDS};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub omdb: OmdbConfig,

    pub server: ServerConfig,

    pub catalog: CatalogConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// `"pretty"` (default) or `"json"`
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/cinedex.db".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    pub base_url: String,

    pub api_key: String,

    pub request_timeout_seconds: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: OMDB_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout_seconds: REQUEST_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Listing defaults applied when a caller omits or garbles sort parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub default_sort_field: String,

    pub default_sort_order: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_sort_field: DEFAULT_SORT_FIELD.as_str().to_string(),
            default_sort_order: DEFAULT_SORT_ORDER.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            omdb: OmdbConfig::default(),
            server: ServerConfig::default(),
            catalog: CatalogConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads `.env`, the first config file found, then environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies `OMDB_URL`, `OMDB_KEY` and `DATABASE_URL` on top of file values.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("OMDB_URL").filter(|v| !v.is_empty()) {
            self.omdb.base_url = url;
        }
        if let Some(key) = lookup("OMDB_KEY").filter(|v| !v.is_empty()) {
            self.omdb.api_key = key;
        }
        if let Some(db) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.general.database_path = db;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cinedex").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cinedex").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    /// Checks settings every command needs. Provider credentials are checked
    /// separately by [`Config::validate_provider`].
    pub fn validate(&self) -> Result<()> {
        if self.omdb.request_timeout_seconds == 0 {
            anyhow::bail!("omdb.request_timeout_seconds must be > 0");
        }

        if self.general.max_db_connections == 0
            || self.general.min_db_connections > self.general.max_db_connections
        {
            anyhow::bail!(
                "Invalid database pool bounds: min {} / max {}",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        Ok(())
    }

    /// Checks the OMDb settings; only commands that call the provider need them.
    pub fn validate_provider(&self) -> Result<()> {
        url::Url::parse(&self.omdb.base_url)
            .with_context(|| format!("Invalid OMDb base URL: {}", self.omdb.base_url))?;

        if self.omdb.api_key.trim().is_empty() {
            anyhow::bail!("OMDb API key is empty; set omdb.api_key or OMDB_KEY");
        }

        Ok(())
    }
}
