//! Error types for configuration and setup parsing

use std::path::PathBuf;

use enigma_core::EnigmaError;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file truncated")]
    Truncated,

    #[error("Bad configuration header: {0}")]
    BadHeader(String),

    #[error("Bad rotor description for {name}: {reason}")]
    BadRotorDescription { name: String, reason: String },

    #[error("Bad setup line: {0}")]
    BadSetup(String),

    #[error("Could not open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Engine(#[from] EnigmaError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
