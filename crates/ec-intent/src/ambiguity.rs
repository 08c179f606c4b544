//! Settling phrases that greet or take leave depending on context.
//!
//! "good evening", "good day", "evening" and "night" can open or close a
//! conversation. The first applicable rule wins:
//!
//! 1. followed by a group address ("good evening everyone") → greeting
//! 2. followed by a farewell indicator ("night, bye") → farewell
//! 3. the phrase is the whole utterance → configured by turn position
//! 4. the phrase opens the utterance → greeting
//! 5. the phrase closes the utterance → farewell
//! 6. otherwise → configured mid-utterance default

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{AmbiguityConfig, Lean};
use crate::lexicon::{self, AMBIGUOUS_PHRASES, FAREWELL_INDICATORS, GROUP_ADDRESS};

static AMBIGUOUS: LazyLock<Regex> =
    LazyLock::new(|| lexicon::phrase_matcher(AMBIGUOUS_PHRASES).unwrap());

static GOOD_BEFORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bgood\s+$").unwrap());

static GROUP_AFTER: LazyLock<Regex> = LazyLock::new(|| {
    let words = alternation(GROUP_ADDRESS);
    Regex::new(&format!(r"^\s*,?\s*(?:{words})\b")).unwrap()
});

static FAREWELL_AFTER: LazyLock<Regex> = LazyLock::new(|| {
    let words = alternation(FAREWELL_INDICATORS);
    Regex::new(&format!(r"^\s*(?:[,.!;]\s*)?(?:and\s+)?(?:{words})\b")).unwrap()
});

fn alternation(list: &[&str]) -> String {
    list.iter()
        .map(|w| {
            w.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// An ambiguous phrase located in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbiguousMatch<'a> {
    pub phrase: &'a str,
    pub start: usize,
    pub end: usize,
}

/// First ambiguous phrase in `text`.
///
/// A bare "night"/"day"/"evening" right after "good" belongs to an
/// unambiguous fixed phrase ("good night") and is skipped.
pub fn find(text: &str) -> Option<AmbiguousMatch<'_>> {
    AMBIGUOUS
        .find_iter(text)
        .find(|m| m.as_str().starts_with("good") || !GOOD_BEFORE.is_match(&text[..m.start()]))
        .map(|m| AmbiguousMatch {
            phrase: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
}

/// Which rule settled the phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    GroupAddress,
    FarewellIndicator,
    Standalone,
    Opens,
    Closes,
    MidUtterance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub lean: Lean,
    pub rule: Rule,
}

/// Settle the phrase at `m` within `text`.
pub fn decide(
    text: &str,
    m: &AmbiguousMatch<'_>,
    is_first: bool,
    config: &AmbiguityConfig,
) -> Decision {
    let after = &text[m.end..];
    let lead = text.len() - text.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
    let tail = text.trim_end_matches(|c: char| !c.is_alphanumeric()).len();

    let (lean, rule) = if GROUP_AFTER.is_match(after) {
        (Lean::Greeting, Rule::GroupAddress)
    } else if FAREWELL_AFTER.is_match(after) {
        (Lean::Farewell, Rule::FarewellIndicator)
    } else if m.start == lead && m.end == tail {
        let lean = if is_first {
            config.standalone_first_turn
        } else {
            config.standalone_later_turn
        };
        (lean, Rule::Standalone)
    } else if m.start == lead {
        (Lean::Greeting, Rule::Opens)
    } else if m.end == tail {
        (Lean::Farewell, Rule::Closes)
    } else {
        (config.mid_utterance_default, Rule::MidUtterance)
    };

    Decision { lean, rule }
}

/// Locate and settle the first ambiguous phrase, if any.
pub fn resolve(text: &str, is_first: bool, config: &AmbiguityConfig) -> Option<Decision> {
    find(text).map(|m| decide(text, &m, is_first, config))
}
