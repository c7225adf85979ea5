//! Error types for the teleprompter.

use std::io;

/// Errors produced by the teleprompter crates.
#[derive(Debug, thiserror::Error)]
pub enum PrompterError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PrompterError>;
