//! Store configuration
//!
//! Configuration loaded from a `.statehouse.toml` file. It only selects how a
//! store reports its dispatches; reducers and subscribers are always set up in
//! code.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::{env, fs, iter};

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::ConfigError;
use crate::logger::{DiagnosticLogger, Logger, NoopLogger};

pub const CONFIG_FILE: &str = ".statehouse.toml";

/// Logger presets a store can be built with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerPreset {
    Noop,
    #[default]
    Diagnostic,
}

/// Store configuration loaded from `.statehouse.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which logger the store reports dispatches to
    #[serde(default)]
    pub logger: LoggerPreset,

    /// Level the diagnostic logger writes at (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dump prev/next state on every dispatch
    #[serde(default = "default_log_state")]
    pub log_state: bool,
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_log_state() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            logger: LoggerPreset::default(),
            log_level: default_log_level(),
            log_state: default_log_state(),
        }
    }
}

impl StoreConfig {
    /// Quiet configuration, e.g. for tests
    pub fn noop() -> Self {
        Self {
            logger: LoggerPreset::Noop,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a specific config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Config from the first `.statehouse.toml` found, or the defaults
    ///
    /// A file that fails to parse is reported and ignored.
    pub fn load() -> Self {
        let Some(content) = load_config_file() else {
            log::debug!("No {} found, using default store config", CONFIG_FILE);
            return Self::default();
        };

        Self::from_toml_str(&content).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid {}: {}", CONFIG_FILE, e);
            Self::default()
        })
    }

    /// Parsed `log_level`
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::UnknownLevel(self.log_level.clone()))
    }

    /// Build the configured logger
    ///
    /// An unknown `log_level` falls back to debug with a warning.
    pub fn logger<S, A>(&self) -> Box<dyn Logger<S, A>>
    where
        S: Debug + 'static,
        A: Action + 'static,
    {
        match self.logger {
            LoggerPreset::Noop => Box::new(NoopLogger),
            LoggerPreset::Diagnostic => {
                let level = self.level().unwrap_or_else(|e| {
                    log::warn!("{}, using debug", e);
                    log::Level::Debug
                });
                let logger = DiagnosticLogger::new(level);
                if self.log_state {
                    Box::new(logger)
                } else {
                    Box::new(logger.without_state())
                }
            }
        }
    }
}

/// Places searched for `.statehouse.toml`, working directory first
fn config_candidates() -> impl Iterator<Item = PathBuf> {
    let home = env::var_os("HOME").map(|home| Path::new(&home).join(CONFIG_FILE));
    iter::once(PathBuf::from(CONFIG_FILE)).chain(home)
}

/// Content of the first readable `.statehouse.toml` in the working directory
/// or `$HOME`
pub fn load_config_file() -> Option<String> {
    config_candidates().find_map(|path| {
        let content = fs::read_to_string(&path).ok()?;
        log::debug!("Reading store config from {}", path.display());
        Some(content)
    })
}
