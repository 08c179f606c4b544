//! Scoring patterns: literal matchers and small scoring functions.

use regex::Regex;

use crate::error::IntentResult;
use crate::lexicon;

/// A pure function of the cleaned text contributing to one intent's score.
pub trait Pattern: Send + Sync {
    /// Stable identifier, reported by `IntentEngine::explain`.
    fn name(&self) -> &str;

    /// Contribution to the owning intent's score. Zero means no signal.
    fn evaluate(&self, text: &str) -> f64;
}

/// Adds a fixed weight whenever the regex matches.
pub struct RegexPattern {
    name: &'static str,
    regex: Regex,
    weight: f64,
}

impl RegexPattern {
    /// Compile a hand-written pattern. Only for static sources.
    pub fn new(name: &'static str, source: &str, weight: f64) -> Self {
        Self {
            name,
            regex: Regex::new(source).unwrap(),
            weight,
        }
    }

    pub fn from_regex(name: &'static str, regex: Regex, weight: f64) -> Self {
        Self {
            name,
            regex,
            weight,
        }
    }

    /// Whole-word matcher over a vocabulary list.
    pub fn words(name: &'static str, words: &[&str], weight: f64) -> IntentResult<Self> {
        Ok(Self::from_regex(name, lexicon::word_matcher(words)?, weight))
    }

    /// Whitespace-flexible matcher over a phrase list.
    pub fn phrases(name: &'static str, phrases: &[&str], weight: f64) -> IntentResult<Self> {
        Ok(Self::from_regex(name, lexicon::phrase_matcher(phrases)?, weight))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl Pattern for RegexPattern {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, text: &str) -> f64 {
        if self.regex.is_match(text) {
            self.weight
        } else {
            0.0
        }
    }
}

/// Scales the value of a scoring function by a weight.
///
/// Functions may return fractional values, or zero for "no signal".
pub struct FnPattern {
    name: &'static str,
    score: fn(&str) -> f64,
    weight: f64,
}

impl FnPattern {
    pub fn new(name: &'static str, score: fn(&str) -> f64, weight: f64) -> Self {
        Self {
            name,
            score,
            weight,
        }
    }
}

impl Pattern for FnPattern {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, text: &str) -> f64 {
        (self.score)(text) * self.weight
    }
}
