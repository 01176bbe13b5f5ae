use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::credentials::CredentialStore;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";
pub const API_KEY_ENV: &str = "RATEIT_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Connection settings for the movie catalog (OMDb).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this (in characters) never reach the catalog
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Quiet period before a search request is sent; 0 sends immediately
    #[serde(default)]
    pub debounce_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_min_query_len() -> usize {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
            debounce_ms: 0,
        }
    }
}

impl CatalogConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Like `load_from_file`, but a missing file yields the defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Fill in the API key from the environment or the credential store.
    /// Precedence: `RATEIT_API_KEY`, then `credentials.toml`, then the config file.
    pub fn apply_api_key_overrides(&mut self, credentials: &CredentialStore) {
        let from_env = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        self.apply_api_key_sources(from_env, credentials.get_omdb_api_key().cloned());
    }

    fn apply_api_key_sources(&mut self, from_env: Option<String>, from_credentials: Option<String>) {
        if let Some(key) = from_env.or(from_credentials) {
            self.catalog.api_key = key;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.catalog.has_api_key() {
            return Err(anyhow::anyhow!(
                "catalog api_key is not configured (run `rateit config set-key` or set {})",
                API_KEY_ENV
            ));
        }

        if self.catalog.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("catalog base_url cannot be empty"));
        }

        if !self.catalog.base_url.starts_with("http://") && !self.catalog.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("catalog base_url must be an http(s) URL: {}", self.catalog.base_url));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(anyhow::anyhow!("catalog timeout_secs must be greater than zero"));
        }

        if self.search.min_query_len == 0 {
            return Err(anyhow::anyhow!("search min_query_len must be at least 1"));
        }

        Ok(())
    }
}
