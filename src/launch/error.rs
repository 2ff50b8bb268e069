use std::io;

use thiserror::Error;

/// Errors returned by the launcher for its own inputs and environment
///
/// Failures of the launched processes themselves never surface here.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
