//! Configuration management

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE_NAME: &str = "tsreport.toml";

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "TSREPORT_CONFIG";

const DEFAULT_WORKSPACE: u64 = 125712;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Account email the workspace export must belong to
    pub email: String,
    /// Workspace export file, relative to the config file
    pub source: PathBuf,
    #[serde(default = "default_workspace")]
    pub workspace: u64,
    /// Report directory, relative to the config file
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_workspace() -> u64 {
    DEFAULT_WORKSPACE
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReportError::ConfigNotFound(path.to_path_buf())
            } else {
                ReportError::Io(e)
            }
        })?;

        let mut config: Config = toml::from_str(&contents).map_err(|e| {
            ReportError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        if config.email.trim().is_empty() {
            return Err(ReportError::Config(format!(
                "Missing account email in {}",
                path.display()
            )));
        }

        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Locate and load the config.
    /// First checks TSREPORT_CONFIG environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load(Path::new(&path));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` looking for tsreport.toml
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = Some(start);

        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
            current = dir.parent();
        }

        Err(ReportError::ConfigNotFound(start.to_path_buf()))
    }

    /// Workspace export path, resolved against the config file's directory
    pub fn source_path(&self) -> PathBuf {
        self.base_dir.join(&self.source)
    }

    /// Report directory, resolved against the config file's directory
    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output_dir)
    }
}
