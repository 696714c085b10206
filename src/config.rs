//! YAML configuration.
//!
//! Looked up at `<config dir>/grindtrack/config.yaml` unless a path is given explicitly. Every
//! field is optional, a missing file means all defaults.

use crate::error::{Result, TrackerError};
use crate::store::Template;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "grindtrack";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// The problem document.
    pub data_file: PathBuf,

    /// Starter document copied into place on first run, the built-in curriculum if unset.
    pub template_file: Option<PathBuf>,

    /// Number of entries in the recently completed view.
    pub recent_limit: usize,

    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: default_data_file(),
            template_file: None,
            recent_limit: 5,
            log_level: "warn".to_owned(),
        }
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("problems.json")
}

/// Where the configuration lives if no path is given.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.yaml"))
}

impl Config {
    /// Read the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| TrackerError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_yaml::from_reader(file).map_err(|source| TrackerError::Config {
            path: path.to_owned(),
            source,
        })
    }

    /// Read an explicitly requested file, or the default location if it exists, or defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Config::load(path),
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Config::load(&path),
                None => Ok(Config::default()),
            },
        }
    }

    pub fn template(&self) -> Template {
        match &self.template_file {
            Some(path) => Template::File(path.clone()),
            None => Template::Builtin,
        }
    }
}
