use std::io::ErrorKind;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Origin of the PipeCraft backend, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Directory for the collection mirror files.
    #[serde(default = "default_cache_dir")]
    pub dir: String,
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            enabled: default_cache_enabled(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_cache_dir() -> String {
    ".pipecraft-cache".into()
}
fn default_cache_enabled() -> bool {
    true
}

impl AppConfig {
    /// Load the config file if present, fall back to defaults otherwise,
    /// then normalize and validate. A missing file is not an error so the
    /// CLI can run against `PIPECRAFT_API_URL` alone; a file that exists
    /// but cannot be read or parsed is.
    pub fn load_and_validate() -> Result<Self> {
        let path =
            std::env::var("PIPECRAFT_CONFIG").unwrap_or_else(|_| "pipecraft.toml".to_string());
        Self::load_and_validate_from(&path)
    }

    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str::<AppConfig>(&content).with_context(|| format!("parsing {path}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => AppConfig::default(),
            Err(e) => return Err(anyhow!(e).context(format!("reading {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.validate()?;
        self.cache.normalize();
        Ok(())
    }
}

impl ApiConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML value wins; env var fills the gap; localhost as last resort.
        if self.base_url.trim().is_empty() {
            if let Ok(url) = std::env::var("PIPECRAFT_API_URL") {
                self.base_url = url;
            }
        }
        if self.base_url.trim().is_empty() {
            self.base_url = "http://localhost:3000/api".to_string();
        }
        // The client joins paths onto this, so keep it slash-free.
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl CacheConfig {
    fn normalize(&mut self) {
        if self.dir.trim().is_empty() {
            self.dir = default_cache_dir();
        }
    }
}
