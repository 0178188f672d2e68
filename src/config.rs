use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs_next as dirs;
use serde::Deserialize;

use crate::error::AppError;
use crate::runtime::{DEFAULT_REMOVE_SUBCOMMAND, DEFAULT_RUNTIME};
use crate::scanner::DEFAULT_SCANNER;

/// Settings read from `config.toml`. Every field is optional; command-line
/// flags take precedence via [`Config::merge`].
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub runtime: Option<String>,
    pub scanner: Option<String>,
    pub remove_subcommand: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load from an explicit path (which must exist) or from the default
    /// location (which may be absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::config(format!(
                        "configuration file {} does not exist",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let path = config_file_path()?;
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, AppError> {
        let config: Config = toml::from_str(contents)?;
        if config.timeout_secs == Some(0) {
            return Err(AppError::config("timeout_secs must be at least 1"));
        }
        Ok(config)
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            runtime: overrides.runtime.or(self.runtime),
            scanner: overrides.scanner.or(self.scanner),
            remove_subcommand: overrides.remove_subcommand.or(self.remove_subcommand),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    pub fn runtime(&self) -> &str {
        self.runtime.as_deref().unwrap_or(DEFAULT_RUNTIME)
    }

    pub fn scanner(&self) -> &str {
        self.scanner.as_deref().unwrap_or(DEFAULT_SCANNER)
    }

    pub fn remove_subcommand(&self) -> &str {
        self.remove_subcommand.as_deref().unwrap_or(DEFAULT_REMOVE_SUBCOMMAND)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("vulnsweep").join("config.toml"))
}
