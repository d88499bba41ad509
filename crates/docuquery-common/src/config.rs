//! Configuration loading for DocuQuery.
//! Reads docuquery.toml from the current directory or the path in DOCUQUERY_CONFIG,
//! then applies DOCUQUERY_* environment overrides (a `.env` file is honoured).

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DocuQueryError, Result};

const DEFAULT_CONFIG_PATH: &str = "docuquery.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/hackrx/run` endpoint is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent in the Authorization header.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url()     -> String { "http://localhost:8000/api/v1".to_string() }
fn default_timeout_secs() -> u64    { 120 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3001".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    /// Lower-case extensions without the leading dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_bytes() -> u64 { 25 * 1024 * 1024 }
fn default_allowed_extensions() -> Vec<String> {
    ["pdf", "docx", "doc", "eml", "msg"].iter().map(|e| e.to_string()).collect()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}


impl Config {
    /// Load configuration from the environment.
    /// A missing docuquery.toml falls back to defaults; a missing file named by
    /// DOCUQUERY_CONFIG is an error.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }

        let explicit = std::env::var("DOCUQUERY_CONFIG").ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            info!(path = %path, "Reading configuration");
            Self::from_path(&path)?
        } else if explicit.is_some() {
            return Err(DocuQueryError::Config(format!(
                "Config file not found: {path}\nCopy docuquery.example.toml to {path} and edit it."
            )));
        } else {
            debug!("No docuquery.toml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DocuQueryError::Config(e.to_string()))
    }

    /// Apply DOCUQUERY_* overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DOCUQUERY_API_URL") {
            self.api.base_url = url;
        }
        if let Some(token) = lookup("DOCUQUERY_API_TOKEN") {
            self.api.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(bind) = lookup("DOCUQUERY_BIND") {
            self.server.bind = bind;
        }
        if let Some(raw) = lookup("DOCUQUERY_TIMEOUT_SECS") {
            self.api.timeout_secs = raw.trim().parse().map_err(|_| {
                DocuQueryError::Config(format!("DOCUQUERY_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(DocuQueryError::Config("api.base_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DocuQueryError::Config(format!(
                "api.base_url must start with http:// or https://, got {url}"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(DocuQueryError::Config("api.timeout_secs must be positive".into()));
        }
        if self.upload.max_bytes == 0 {
            return Err(DocuQueryError::Config("upload.max_bytes must be positive".into()));
        }
        if self.upload.allowed_extensions.is_empty() {
            return Err(DocuQueryError::Config("upload.allowed_extensions must not be empty".into()));
        }
        Ok(())
    }
}
