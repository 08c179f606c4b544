//! The assembled pipeline: normalize, correct, score, resolve.

use serde::Serialize;

use ec_protocol::{CorrectionRecord, Resolution, ScoreVector};

use crate::config::EngineConfig;
use crate::error::IntentResult;
use crate::normalize::{normalize, truncate_to_tokens};
use crate::resolver::Resolver;
use crate::scorer::{ScoreTrace, Scorer};
use crate::spell::{Corrected, SpellCorrector};

/// Everything the engine derived from one utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Canonical form before spell correction.
    pub normalized: String,
    /// Text the patterns were run on.
    pub cleaned: String,
    pub corrections: Vec<CorrectionRecord>,
    pub trace: ScoreTrace,
    pub resolution: Resolution,
}

/// A configured, reusable intent engine.
///
/// Holds only immutable state; share it freely across threads.
pub struct IntentEngine {
    config: EngineConfig,
    speller: SpellCorrector,
    scorer: Scorer,
    resolver: Resolver,
}

impl IntentEngine {
    pub fn new(config: EngineConfig) -> IntentResult<Self> {
        config.validate()?;
        let speller = SpellCorrector::new(&config.spell)?;
        let scorer = Scorer::new(config.ambiguity.clone());
        let resolver = Resolver::new(config.near_tie_delta, config.co_intent_ratio);
        tracing::debug!(
            max_edit_distance = config.spell.max_edit_distance,
            whitelist = config.spell.whitelist.len(),
            domain_vocabulary = config.spell.domain_vocabulary.len(),
            "intent engine ready"
        );
        Ok(Self {
            config,
            speller,
            scorer,
            resolver,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalize, cap and spell-correct raw user text.
    pub fn clean(&self, raw: &str) -> Corrected {
        let normalized = normalize(raw);
        let capped = truncate_to_tokens(&normalized, self.config.max_tokens);
        self.speller.correct_text(capped)
    }

    /// Score vector for `raw` without resolving it.
    pub fn score(&self, raw: &str, is_first: bool) -> ScoreVector {
        let cleaned = self.clean(raw);
        self.scorer.score(&cleaned.text, is_first)
    }

    /// Resolve `raw` into a primary intent, co-intents and modifiers.
    ///
    /// Never fails: empty or unrecognizable input resolves to `invalid` or
    /// `statement`.
    pub fn resolve_intents(&self, raw: &str, is_first: bool) -> Resolution {
        let resolution = self.resolver.resolve(self.score(raw, is_first));
        tracing::debug!(
            primary = %resolution.primary,
            confidence = resolution.confidence(),
            co_intents = resolution.co_intents.len(),
            modifiers = resolution.modifiers.len(),
            "intent resolved"
        );
        resolution
    }

    /// Full diagnostic breakdown of how `raw` was resolved.
    pub fn explain(&self, raw: &str, is_first: bool) -> Analysis {
        let normalized = normalize(raw);
        let capped = truncate_to_tokens(&normalized, self.config.max_tokens);
        let Corrected { text, corrections } = self.speller.correct_text(capped);
        let (scores, trace) = self.scorer.score_traced(&text, is_first);
        let resolution = self.resolver.resolve(scores);
        Analysis {
            normalized,
            cleaned: text,
            corrections,
            trace,
            resolution,
        }
    }
}
