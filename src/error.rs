//! Error types for the docsite-search library.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while parsing HTML markup.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("Missing closing tag for <{tag}>")]
    UnterminatedRawText { tag: String },
}

/// Errors that occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(String),

    #[error("Minimum query length must be at least 1, got {0}")]
    InvalidThreshold(usize),

    #[error("Configuration value `{0}` must not be empty")]
    EmptyName(&'static str),
}
