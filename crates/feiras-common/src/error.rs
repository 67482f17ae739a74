//! Error types shared across the feiras crates

use thiserror::Error;

/// Result type alias for feiras operations
pub type Result<T> = std::result::Result<T, FeirasError>;

/// Main error type for feiras
#[derive(Error, Debug)]
pub enum FeirasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid environment '{0}', expected 'development' or 'production'")]
    InvalidEnvironment(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
