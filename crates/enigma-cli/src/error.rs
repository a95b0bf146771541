//! Error types for the command-line program

use std::path::PathBuf;

use enigma_config::ConfigError;
use enigma_core::EnigmaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Missing setting: message on line {0} before any '*' line")]
    MissingSetting(usize),

    #[error("Could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EnigmaError),
}

pub type CliResult<T> = Result<T, CliError>;
