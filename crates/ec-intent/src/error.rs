//! Intent engine error types.
//!
//! Resolution itself never fails; these only surface while building an
//! engine from configuration or caller-supplied vocabulary.

use thiserror::Error;

/// Errors that can occur while configuring the intent engine.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {message}")]
    Config { field: &'static str, message: String },

    #[error("invalid vocabulary entry {entry:?}: {message}")]
    Vocabulary { entry: String, message: String },
}

/// Convenience alias for engine configuration results.
pub type IntentResult<T> = Result<T, IntentError>;
