//! Deterministic intent resolution for chat utterances about energy statistics.
//!
//! Raw text is normalized, spell-corrected against a protected vocabulary,
//! scored by weighted per-intent pattern tables, adjusted by a fixed
//! pipeline of interaction rules and finally resolved into one primary
//! intent plus co-intents and modifiers.
//!
//! ```
//! use ec_intent::resolve_intents;
//! use ec_protocol::Intent;
//!
//! let r = resolve_intents("see you later", false);
//! assert_eq!(r.primary, Intent::Farewell);
//! ```

use std::sync::LazyLock;

use ec_protocol::{Resolution, ScoreVector};

pub mod ambiguity;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod pattern;
pub mod resolver;
pub mod rules;
pub mod scorer;
pub mod spell;

pub use config::{AmbiguityConfig, EngineConfig, Lean, SpellConfig};
pub use engine::{Analysis, IntentEngine};
pub use error::{IntentError, IntentResult};
pub use scorer::{PIPELINE, Stage};

static DEFAULT_ENGINE: LazyLock<IntentEngine> =
    LazyLock::new(|| IntentEngine::new(EngineConfig::default()).unwrap());

/// Resolve with the default configuration.
pub fn resolve_intents(text: &str, is_first: bool) -> Resolution {
    DEFAULT_ENGINE.resolve_intents(text, is_first)
}

/// Score with the default configuration, without resolving.
pub fn score(text: &str, is_first: bool) -> ScoreVector {
    DEFAULT_ENGINE.score(text, is_first)
}

/// Diagnostic breakdown with the default configuration.
pub fn explain(text: &str, is_first: bool) -> Analysis {
    DEFAULT_ENGINE.explain(text, is_first)
}
