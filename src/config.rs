use std::collections::BTreeMap;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{Result, TrackerError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const BASE_URL_ENV: &str = "PAGTRACK_API_BASE_URL";

#[derive(Deserialize, Default, Debug, Clone)]
pub struct Config {
    pub base_url: Option<String>,
    /// Extra headers sent with every request, on top of the JSON defaults.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(skip)]
    base_url_override: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| TrackerError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| TrackerError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "pagtrack")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(TrackerError::NoConfigDir)
    }

    /// Get base URL: command-line override, then env var, then config file
    pub fn base_url(&self) -> String {
        let env = std::env::var(BASE_URL_ENV).ok();
        resolve_base_url(
            self.base_url_override.as_deref(),
            env.as_deref(),
            self.base_url.as_deref(),
        )
    }

    pub fn with_base_url(mut self, explicit: Option<String>) -> Self {
        self.base_url_override = explicit;
        self
    }
}

/// Base URL precedence. A blank env value counts as unset.
pub fn resolve_base_url(explicit: Option<&str>, env: Option<&str>, file: Option<&str>) -> String {
    explicit
        .or(env.filter(|url| !url.trim().is_empty()))
        .or(file)
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}
