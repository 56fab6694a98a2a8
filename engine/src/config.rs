use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Env var naming a JSON settings file that overrides the defaults.
pub const CONF_JSON_PATH_ENV: &str = "CONF_JSON_PATH";

/// Process-level settings: transport and logging, plus the engine block.
///
/// Keys are camelCase in the JSON file; missing keys keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub server_address: String,
    pub log_level: String,
    #[serde(flatten)]
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8080".to_string(),
            log_level: "debug".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

/// Settings fixed for the lifetime of a [`crate::SearchEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub index_data_dir: PathBuf,
    pub max_search_results: usize,
    pub min_token_length: usize,
    pub max_token_length: usize,
    /// Sweep tombstones at the end of every delete. When off, call
    /// `SearchEngine::purge` to reclaim them.
    pub purge_on_delete: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_data_dir: std::env::temp_dir().join("data"),
            max_search_results: 10,
            min_token_length: 3,
            max_token_length: 20,
            purge_on_delete: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_token_length == 0 {
            return Err(Error::InvalidConfig("minTokenLength must be at least 1".into()));
        }
        if self.min_token_length > self.max_token_length {
            return Err(Error::InvalidConfig(format!(
                "minTokenLength ({}) exceeds maxTokenLength ({})",
                self.min_token_length, self.max_token_length
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Defaults, or the file named by `CONF_JSON_PATH` when that is set.
    pub fn load() -> Result<Self> {
        match std::env::var(CONF_JSON_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.engine.validate()?;
        Ok(config)
    }
}
