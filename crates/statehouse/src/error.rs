use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading store configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has fields of the wrong type.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `log_level` is not one of error, warn, info, debug, trace.
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),
}
