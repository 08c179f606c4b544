//! Chat front-end error type.

use ec_intent::IntentError;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {message}")]
    Config { field: &'static str, message: String },

    #[error("intent engine: {0}")]
    Engine(#[from] IntentError),
}

/// Convenience alias.
pub type ChatResult<T> = Result<T, ChatError>;
