//! Chat front-end configuration, loadable from TOML.

use serde::Deserialize;

use ec_intent::EngineConfig;

use crate::error::{ChatError, ChatResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Intent engine settings (`[engine]`, `[engine.spell]`, `[engine.ambiguity]`).
    pub engine: EngineConfig,
    /// Turns kept per conversation; older turns are dropped first.
    pub history_limit: usize,
    /// Log the full resolution breakdown for every turn.
    pub explain: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            history_limit: 50,
            explain: false,
        }
    }
}

impl ChatConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> ChatResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ChatResult<Self> {
        let config: Self = toml::from_str(contents)?;
        if config.history_limit == 0 {
            return Err(ChatError::Config {
                field: "history_limit",
                message: "must be at least 1".into(),
            });
        }
        config.engine.validate()?;
        Ok(config)
    }
}
