//! Client configuration.
//!
//! Resolves the diary service endpoint and HTTP settings from, in order of
//! precedence: an explicit override, `CHATDIARY_*` environment variables and
//! an optional JSON config file.

use std::env;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::util::{normalize_base_url, normalize_text_option};
use crate::{Error, Result};

pub const ENV_API_BASE_URL: &str = "CHATDIARY_API_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "CHATDIARY_HTTP_TIMEOUT_SECS";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const CONFIG_FILE_VERSION: u32 = 1;

/// On-disk client configuration (`config.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: CONFIG_FILE_VERSION,
            api_base_url: None,
            http_timeout_secs: None,
        }
    }
}

const fn default_config_version() -> u32 {
    CONFIG_FILE_VERSION
}

impl ConfigFile {
    /// Parse a config file payload.
    pub fn parse(raw: &str) -> Result<Self> {
        let config = serde_json::from_str::<Self>(raw)
            .map_err(|error| Error::Config(format!("invalid config JSON: {error}")))?;
        if config.version != CONFIG_FILE_VERSION {
            return Err(Error::Config(format!(
                "unsupported config version {} (expected {CONFIG_FILE_VERSION})",
                config.version
            )));
        }
        Ok(config)
    }

    /// Load from `path`; a missing file yields the default configuration.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }
}

/// Resolved settings for talking to the diary service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for an explicit base URL with default HTTP settings.
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url).map_err(Error::Config)?,
            request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        })
    }

    /// Load configuration from the process environment only.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, |key| env::var(key).ok(), &ConfigFile::default())
    }

    /// Merge an explicit base URL, environment lookups and a config file.
    pub fn resolve<F>(
        explicit_base_url: Option<String>,
        lookup: F,
        file: &ConfigFile,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = normalize_text_option(explicit_base_url)
            .or_else(|| normalize_text_option(lookup(ENV_API_BASE_URL)))
            .or_else(|| normalize_text_option(file.api_base_url.clone()))
            .ok_or_else(|| {
                Error::Config(format!(
                    "diary service URL is not configured; \
                     set {ENV_API_BASE_URL} or run `chatdiary config init`"
                ))
            })?;

        let timeout_secs = match normalize_text_option(lookup(ENV_HTTP_TIMEOUT_SECS)) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                Error::Config(format!("{ENV_HTTP_TIMEOUT_SECS} must be a whole number of seconds"))
            })?,
            None => file.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(Error::Config("HTTP timeout must be positive".to_string()));
        }

        let mut config = Self::new(&api_base_url)?;
        config.request_timeout = Duration::from_secs(timeout_secs);
        Ok(config)
    }

    /// Build the reqwest client used by [`crate::service::HttpDiaryService`].
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|error| Error::Config(format!("failed to build HTTP client: {error}")))
    }
}

fn default_user_agent() -> String {
    format!("chatdiary/{}", env!("CARGO_PKG_VERSION"))
}
