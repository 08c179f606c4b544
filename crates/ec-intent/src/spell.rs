//! Token-level spell correction with a protected-word set.
//!
//! Plain nearest-word correction destroys short idiomatic words that sit one
//! edit away from a more common word ("see you" → "she you", "till
//! tomorrow" → "will tomorrow"). Those words are listed in
//! [`lexicon::PROTECTED_SOCIAL`] and are never touched.

use std::borrow::Cow;
use std::collections::HashSet;

use ec_protocol::{CorrectionReason, CorrectionRecord};

use crate::config::SpellConfig;
use crate::error::{IntentError, IntentResult};
use crate::lexicon;
use crate::normalize::{normalize, tokens};

/// Tokens longer than this are left alone (URLs, hashes, keyboard mashing).
const MAX_CORRECTABLE_LEN: usize = 32;

/// Result of correcting one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Corrected {
    pub text: String,
    pub corrections: Vec<CorrectionRecord>,
}

pub struct SpellCorrector {
    dictionary: HashSet<String>,
    /// Dictionary sorted by (length, text) so the first hit at the best
    /// distance is also the preferred tie-break.
    candidates: Vec<String>,
    protected: HashSet<&'static str>,
    stopwords: HashSet<&'static str>,
    config: SpellConfig,
}

impl SpellCorrector {
    /// Build a corrector over the built-in dictionary plus the configured
    /// whitelist and domain vocabulary.
    pub fn new(config: &SpellConfig) -> IntentResult<Self> {
        Self::with_dictionary(lexicon::dictionary_words().map(str::to_string), config)
    }

    /// Build a corrector over an explicit base dictionary.
    pub fn with_dictionary(
        words: impl IntoIterator<Item = String>,
        config: &SpellConfig,
    ) -> IntentResult<Self> {
        let mut dictionary: HashSet<String> = words.into_iter().collect();

        for entry in config.whitelist.iter().chain(&config.domain_vocabulary) {
            let normalized = normalize(entry);
            if normalized.is_empty() {
                return Err(IntentError::Vocabulary {
                    entry: entry.clone(),
                    message: "empty vocabulary entry".into(),
                });
            }
            dictionary.extend(tokens(&normalized).map(|t| t.text.to_string()));
        }

        let mut candidates: Vec<String> = dictionary.iter().cloned().collect();
        candidates.sort_by(|a, b| {
            a.chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b))
        });

        let mut protected: HashSet<&'static str> = HashSet::new();
        if config.protect_interrogatives {
            protected.extend(lexicon::INTERROGATIVES);
        }
        if config.protect_social_tokens {
            protected.extend(lexicon::PROTECTED_SOCIAL);
        }

        Ok(Self {
            dictionary,
            candidates,
            protected,
            stopwords: lexicon::STOPWORDS.iter().copied().collect(),
            config: config.clone(),
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    /// Correct every token of already-normalized text, keeping everything
    /// between tokens (punctuation, apostrophes, spacing) as it was.
    pub fn correct_text(&self, text: &str) -> Corrected {
        if !self.config.enable_spell {
            return Corrected {
                text: text.to_string(),
                corrections: Vec::new(),
            };
        }

        let protect_first =
            self.config.protect_first_token_if_question && text.trim_end().ends_with('?');

        let mut out = String::with_capacity(text.len());
        let mut corrections = Vec::new();
        let mut cursor = 0;

        for (i, token) in tokens(text).enumerate() {
            out.push_str(&text[cursor..token.start]);
            cursor = token.end;

            let correction = self.correct(token.text, !(protect_first && i == 0));

            match correction {
                Some(record) => {
                    tracing::trace!(from = %record.from, to = %record.to, reason = ?record.reason, "token corrected");
                    out.push_str(&record.to);
                    corrections.push(record);
                }
                None => out.push_str(token.text),
            }
        }
        out.push_str(&text[cursor..]);

        Corrected {
            text: out,
            corrections,
        }
    }

    /// Decide the fate of a single token. `None` means "leave it".
    ///
    /// Single pass: a token collapsed for elongation is not also spell-corrected.
    pub fn correct_token(&self, token: &str) -> Option<CorrectionRecord> {
        self.correct(token, true)
    }

    /// Elongation collapse always applies; `spelling` gates the
    /// dictionary substitution only.
    fn correct(&self, token: &str, spelling: bool) -> Option<CorrectionRecord> {
        if self.protected.contains(token) || self.stopwords.contains(token) {
            return None;
        }

        if self.config.collapse_elongations
            && let Cow::Owned(collapsed) = collapse_elongation(token)
        {
            return Some(CorrectionRecord::new(
                token,
                collapsed,
                CorrectionReason::Elongation,
            ));
        }

        let len = token.chars().count();
        if !spelling
            || len <= 2
            || len > MAX_CORRECTABLE_LEN
            || token.chars().any(|c| c.is_numeric())
            || self.dictionary.contains(token)
        {
            return None;
        }

        self.nearest(token)
            .map(|word| CorrectionRecord::new(token, word, CorrectionReason::Spelling))
    }

    /// Nearest dictionary word within the configured edit distance.
    fn nearest(&self, token: &str) -> Option<&str> {
        let max = self.config.max_edit_distance;
        let len = token.chars().count();
        let mut best: Option<(&str, usize)> = None;

        for candidate in &self.candidates {
            if candidate.chars().count().abs_diff(len) > max {
                continue;
            }
            let dist = strsim::osa_distance(token, candidate);
            if dist > max {
                continue;
            }
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((candidate, dist));
                if dist == 1 {
                    break;
                }
            }
        }

        best.map(|(word, _)| word)
    }
}

/// Collapse runs of three or more identical letters to exactly two.
///
/// Idempotent: "heyyyyy" and "heyyy" both become "heyy". Digits are never
/// touched so years like "2000" survive.
pub fn collapse_elongation(token: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(token.len());
    let mut changed = false;
    let mut prev: Option<char> = None;
    let mut run = 0;

    for c in token.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run > 2 && c.is_alphabetic() {
            changed = true;
            continue;
        }
        out.push(c);
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(token)
    }
}
