use crate::constants::{
    DEFAULT_ACCEPT, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT, MEBELSHARA_URL, TUI_OFFICES_QUERY, TUI_OFFICES_URL,
};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_path: PathBuf,
    pub http: HttpConfig,
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub accept: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub mebelshara: SourceConfig,
    pub tui: SourceConfig,
}

/// Endpoint of a single source. Query pairs are sent in the given order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SourceConfig {
    pub url: String,
    #[serde(default)]
    pub query: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            http: HttpConfig::default(),
            sources: SourcesConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            mebelshara: SourceConfig {
                url: MEBELSHARA_URL.to_string(),
                query: Vec::new(),
            },
            tui: SourceConfig {
                url: TUI_OFFICES_URL.to_string(),
                query: TUI_OFFICES_QUERY
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `config.toml` when no path is given.
    ///
    /// A missing default file falls back to built-in defaults; a missing
    /// explicitly requested file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        if !explicit && !config_path.exists() {
            debug!("No {} found, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.http.timeout_seconds == 0 {
            return Err(ScraperError::Config(
                "http.timeout_seconds must be greater than zero".into(),
            ));
        }
        Ok(config)
    }
}
