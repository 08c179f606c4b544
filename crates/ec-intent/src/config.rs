//! Engine configuration, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::{IntentError, IntentResult};

/// Top-level configuration for an [`IntentEngine`](crate::IntentEngine).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Spell-correction settings.
    pub spell: SpellConfig,
    /// Tokens beyond this count are dropped before scoring.
    pub max_tokens: usize,
    /// Intents within this absolute distance of the top score are near-tied.
    pub near_tie_delta: f64,
    /// Fraction of the top score a secondary intent needs to be a co-intent.
    pub co_intent_ratio: f64,
    /// How context-dependent greeting/farewell phrases are settled.
    pub ambiguity: AmbiguityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spell: SpellConfig::default(),
            max_tokens: 200,
            near_tie_delta: 0.5,
            co_intent_ratio: 0.6,
            ambiguity: AmbiguityConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> IntentResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> IntentResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> IntentResult<()> {
        if !matches!(self.spell.max_edit_distance, 1 | 2) {
            return Err(IntentError::Config {
                field: "spell.max_edit_distance",
                message: format!("must be 1 or 2, got {}", self.spell.max_edit_distance),
            });
        }
        if self.max_tokens == 0 {
            return Err(IntentError::Config {
                field: "max_tokens",
                message: "must be at least 1".into(),
            });
        }
        if !self.near_tie_delta.is_finite() || self.near_tie_delta < 0.0 {
            return Err(IntentError::Config {
                field: "near_tie_delta",
                message: format!("must be a non-negative number, got {}", self.near_tie_delta),
            });
        }
        if !(0.0..=1.0).contains(&self.co_intent_ratio) {
            return Err(IntentError::Config {
                field: "co_intent_ratio",
                message: format!("must be within 0..=1, got {}", self.co_intent_ratio),
            });
        }
        Ok(())
    }
}

/// Token-level spell-correction settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    pub enable_spell: bool,
    /// Damerau-Levenshtein bound; only 1 and 2 are accepted.
    pub max_edit_distance: usize,
    /// Collapse letter runs of 3+ to 2 before lookup.
    pub collapse_elongations: bool,
    pub protect_interrogatives: bool,
    pub protect_social_tokens: bool,
    /// Leave the first token alone when the utterance ends with '?'.
    pub protect_first_token_if_question: bool,
    /// Extra words that are always considered correctly spelled.
    pub whitelist: Vec<String>,
    /// Extra domain terms; also correction targets.
    pub domain_vocabulary: Vec<String>,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            enable_spell: true,
            max_edit_distance: 1,
            collapse_elongations: true,
            protect_interrogatives: true,
            protect_social_tokens: true,
            protect_first_token_if_question: true,
            whitelist: Vec::new(),
            domain_vocabulary: Vec::new(),
        }
    }
}

/// Which way a context-dependent phrase ("good evening", "night") falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lean {
    Greeting,
    Farewell,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AmbiguityConfig {
    /// Phrase is the whole utterance and no earlier user turn exists.
    pub standalone_first_turn: Lean,
    /// Phrase is the whole utterance later in the conversation.
    pub standalone_later_turn: Lean,
    /// Phrase sits mid-sentence with nothing else to go on.
    pub mid_utterance_default: Lean,
}

impl Default for AmbiguityConfig {
    fn default() -> Self {
        Self {
            standalone_first_turn: Lean::Greeting,
            standalone_later_turn: Lean::Farewell,
            mid_utterance_default: Lean::Farewell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert!(config.spell.enable_spell);
        assert_eq!(config.spell.max_edit_distance, 1);
        assert!(config.spell.collapse_elongations);
        assert!(config.spell.protect_interrogatives);
        assert!(config.spell.protect_social_tokens);
        assert!(config.spell.protect_first_token_if_question);
        assert_eq!(config.near_tie_delta, 0.5);
        assert_eq!(config.co_intent_ratio, 0.6);
        assert_eq!(config.ambiguity.standalone_first_turn, Lean::Greeting);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserialize_empty_document_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config.max_tokens, 200);
        assert!(config.spell.whitelist.is_empty());
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
max_tokens = 64
near_tie_delta = 0.25
co_intent_ratio = 0.5

[spell]
enable_spell = false
max_edit_distance = 2
whitelist = ["ktoe", "entso"]
domain_vocabulary = ["interconnector"]

[ambiguity]
standalone_first_turn = "farewell"
mid_utterance_default = "greeting"
"#;
        let config = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(config.max_tokens, 64);
        assert!(!config.spell.enable_spell);
        assert_eq!(config.spell.max_edit_distance, 2);
        assert_eq!(config.spell.whitelist, vec!["ktoe", "entso"]);
        assert!(config.spell.collapse_elongations); // default
        assert_eq!(config.ambiguity.standalone_first_turn, Lean::Farewell);
        assert_eq!(config.ambiguity.standalone_later_turn, Lean::Farewell);
        assert_eq!(config.ambiguity.mid_utterance_default, Lean::Greeting);
    }

    #[test]
    fn rejects_out_of_range_edit_distance() {
        let err = EngineConfig::from_toml("[spell]\nmax_edit_distance = 3\n").unwrap_err();
        assert!(err.to_string().contains("max_edit_distance"));
    }

    #[test]
    fn rejects_zero_token_cap() {
        assert!(EngineConfig::from_toml("max_tokens = 0").is_err());
    }

    #[test]
    fn rejects_bad_ratio() {
        assert!(EngineConfig::from_toml("co_intent_ratio = 1.5").is_err());
    }
}
