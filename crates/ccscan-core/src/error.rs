//! Error types for ccscan

use thiserror::Error;

/// ccscan error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No C compiler found (tried: {})", tried.join(", "))]
    NoCompiler { tried: Vec<String> },

    #[error("Failed to execute {command} ({attempts} attempts produced no output)")]
    NoOutput { command: String, attempts: u32 },

    #[error("Preprocessing failed: {0}")]
    Preprocess(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for ccscan
pub type Result<T> = std::result::Result<T, Error>;
