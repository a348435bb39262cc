//! Configuration management (`waste_management.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "waste_management.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Milliseconds per tick.  0 waits for one keystroke per tick instead.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Fixed RNG seed; a fresh one per run when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory of replacement art; the built-in art when absent.
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
    /// Where records, the encyclopedia and the log file go.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_tick_ms() -> u64 {
    60
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            seed: None,
            assets_dir: None,
            data_dir: default_data_dir(),
        }
    }
}

/// A missing file means defaults; an unreadable or malformed one is an error.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
