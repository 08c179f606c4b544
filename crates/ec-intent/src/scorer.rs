//! Raw pattern scoring followed by a fixed pipeline of adjustments.

use std::borrow::Cow;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use ec_protocol::{Intent, ScoreVector};

use crate::ambiguity::{self, Rule};
use crate::config::{AmbiguityConfig, Lean};
use crate::lexicon;
use crate::pattern::Pattern;
use crate::rules::{self, IntentRules};

static SOFT_IMPERATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:please\s+)?(?:can|could|would|will)\s+you\b|^please\b").unwrap()
});

static STOP_CANCEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:stop|cancel)\b").unwrap());

/// Score given to `statement` when nothing else scored.
const STATEMENT_FLOOR: f64 = 0.1;

/// One post-pattern adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// "can you …?" / "please …?" is a question-shaped request.
    SoftImperativeQuestion,
    /// Bare stop/cancel words are commands first.
    StopCancelCommand,
    /// A year hints at `time_change`, a country at `filter_change`.
    SeedModifiers,
    SmalltalkSuppressesQuestion,
    GreetingSuppressesQuestion,
    FarewellSuppressesGreeting,
    FarewellSuppressesQuestion,
    /// Move the `ambiguous` score onto greeting or farewell.
    ResolveAmbiguity,
    StatementFallback,
}

/// Adjustments in the order they run. Changing this order changes results.
pub const PIPELINE: [Stage; 9] = [
    Stage::SoftImperativeQuestion,
    Stage::StopCancelCommand,
    Stage::SeedModifiers,
    Stage::SmalltalkSuppressesQuestion,
    Stage::GreetingSuppressesQuestion,
    Stage::FarewellSuppressesGreeting,
    Stage::FarewellSuppressesQuestion,
    Stage::ResolveAmbiguity,
    Stage::StatementFallback,
];

/// A pattern that contributed a non-zero score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternHit {
    pub intent: Intent,
    pub pattern: String,
    pub score: f64,
}

/// Score change made by one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreChange {
    pub intent: Intent,
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageEffect {
    pub stage: Stage,
    pub changes: Vec<ScoreChange>,
}

/// Record of how a score vector came about.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreTrace {
    /// Text the patterns ran on, after question-mark insertion.
    pub scored_text: String,
    pub hits: Vec<PatternHit>,
    /// Patterns that panicked or returned an unusable value.
    pub skipped: Vec<String>,
    /// Only stages that changed something.
    pub stages: Vec<StageEffect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambiguity: Option<Rule>,
}

pub struct Scorer {
    rules: &'static [IntentRules],
    ambiguity: AmbiguityConfig,
}

impl Scorer {
    pub fn new(ambiguity: AmbiguityConfig) -> Self {
        Self {
            rules: rules::RULES.as_slice(),
            ambiguity,
        }
    }

    pub fn score(&self, text: &str, is_first: bool) -> ScoreVector {
        self.score_traced(text, is_first).0
    }

    /// Score cleaned text, recording every contribution.
    pub fn score_traced(&self, text: &str, is_first: bool) -> (ScoreVector, ScoreTrace) {
        let mut trace = ScoreTrace::default();

        if text.trim().is_empty() {
            return (ScoreVector::only(Intent::Invalid, 1.0), trace);
        }

        let text = implied_question(text);
        trace.scored_text = text.to_string();

        let mut scores = ScoreVector::new();
        for rules in self.rules {
            for pattern in &rules.patterns {
                match evaluate_guarded(pattern.as_ref(), &text) {
                    Some(value) if value > 0.0 => {
                        tracing::trace!(intent = %rules.intent, pattern = pattern.name(), score = value, "pattern hit");
                        scores.add(rules.intent, value);
                        trace.hits.push(PatternHit {
                            intent: rules.intent,
                            pattern: pattern.name().to_string(),
                            score: value,
                        });
                    }
                    Some(_) => {}
                    None => trace.skipped.push(pattern.name().to_string()),
                }
            }
        }

        for stage in PIPELINE {
            let before = scores.clone();
            if let Some(rule) = self.apply(stage, &text, is_first, &mut scores) {
                trace.ambiguity = Some(rule);
            }
            let changes = diff(&before, &scores);
            if !changes.is_empty() {
                trace.stages.push(StageEffect { stage, changes });
            }
        }

        (scores, trace)
    }

    fn apply(
        &self,
        stage: Stage,
        text: &str,
        is_first: bool,
        scores: &mut ScoreVector,
    ) -> Option<Rule> {
        match stage {
            Stage::SoftImperativeQuestion => {
                if text.trim_end().ends_with('?') && SOFT_IMPERATIVE.is_match(text) {
                    scores.add(Intent::Question, 0.3);
                }
            }
            Stage::StopCancelCommand => {
                if STOP_CANCEL.is_match(text) {
                    scores.add(Intent::Command, 0.5);
                }
            }
            Stage::SeedModifiers => {
                if lexicon::mentions_year(text) && !scores.is_active(Intent::TimeChange) {
                    scores.set(Intent::TimeChange, 1.0);
                }
                if lexicon::mentions_country(text) && !scores.is_active(Intent::FilterChange) {
                    scores.set(Intent::FilterChange, 1.0);
                }
            }
            Stage::SmalltalkSuppressesQuestion => {
                suppress(scores, Intent::Smalltalk, Intent::Question, 0.5)
            }
            Stage::GreetingSuppressesQuestion => {
                suppress(scores, Intent::Greeting, Intent::Question, 0.25)
            }
            Stage::FarewellSuppressesGreeting => {
                suppress(scores, Intent::Farewell, Intent::Greeting, 0.5)
            }
            Stage::FarewellSuppressesQuestion => {
                suppress(scores, Intent::Farewell, Intent::Question, 0.5)
            }
            Stage::ResolveAmbiguity => {
                let weight = scores.get(Intent::Ambiguous);
                if weight > 0.0 {
                    scores.set(Intent::Ambiguous, 0.0);
                    let (lean, rule) = match ambiguity::resolve(text, is_first, &self.ambiguity) {
                        Some(d) => (d.lean, d.rule),
                        None => (self.ambiguity.mid_utterance_default, Rule::MidUtterance),
                    };
                    let target = match lean {
                        Lean::Greeting => Intent::Greeting,
                        Lean::Farewell => Intent::Farewell,
                    };
                    scores.add(target, weight);
                    return Some(rule);
                }
            }
            Stage::StatementFallback => {
                if scores.is_empty() {
                    scores.set(Intent::Statement, STATEMENT_FLOOR);
                }
            }
        }
        None
    }
}

/// Interrogative openers imply a question even without '?', unless the
/// opener is really a greeting ("how are you").
fn implied_question(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim_end();
    if lexicon::starts_with_interrogative(trimmed)
        && !trimmed.ends_with('?')
        && !rules::looks_like_greeting(trimmed)
    {
        Cow::Owned(format!("{trimmed}?"))
    } else {
        Cow::Borrowed(text)
    }
}

fn suppress(scores: &mut ScoreVector, when: Intent, target: Intent, factor: f64) {
    if scores.is_active(when) && scores.is_active(target) {
        scores.scale(target, factor);
    }
}

/// Run one pattern, dropping panics and non-finite or negative output.
fn evaluate_guarded(pattern: &dyn Pattern, text: &str) -> Option<f64> {
    match catch_unwind(AssertUnwindSafe(|| pattern.evaluate(text))) {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        Ok(value) => {
            tracing::warn!(pattern = pattern.name(), value, "pattern returned unusable score, skipped");
            None
        }
        Err(_) => {
            tracing::warn!(pattern = pattern.name(), "pattern panicked, skipped");
            None
        }
    }
}

fn diff(before: &ScoreVector, after: &ScoreVector) -> Vec<ScoreChange> {
    Intent::ALL
        .iter()
        .filter_map(|&intent| {
            let (b, a) = (before.get(intent), after.get(intent));
            (b != a).then_some(ScoreChange {
                intent,
                before: b,
                after: a,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> ScoreVector {
        Scorer::new(AmbiguityConfig::default()).score(text, true)
    }

    #[test]
    fn pipeline_order_is_fixed() {
        assert_eq!(PIPELINE[0], Stage::SoftImperativeQuestion);
        assert_eq!(PIPELINE[2], Stage::SeedModifiers);
        let amb = PIPELINE.iter().position(|s| *s == Stage::ResolveAmbiguity).unwrap();
        let greet = PIPELINE
            .iter()
            .position(|s| *s == Stage::FarewellSuppressesGreeting)
            .unwrap();
        assert!(greet < amb, "ambiguity lands after suppression");
        assert_eq!(PIPELINE.last(), Some(&Stage::StatementFallback));
    }

    #[test]
    fn empty_text_is_invalid() {
        let s = score("   ");
        assert_eq!(s.get(Intent::Invalid), 1.0);
        assert_eq!(s.ranked().len(), 1);
    }

    #[test]
    fn interrogative_without_mark_gets_one() {
        assert_eq!(implied_question("what is the gas price"), "what is the gas price?");
        assert_eq!(implied_question("how are you"), "how are you");
        assert_eq!(implied_question("gas price"), "gas price");
    }

    #[test]
    fn stop_and_cancel_boost_command() {
        assert_eq!(score("stop").get(Intent::Command), 3.0);
    }

    #[test]
    fn soft_imperative_boosts_question() {
        let s = score("can you show me coal data?");
        assert!((s.get(Intent::Question) - 1.9).abs() < 1e-9);
    }

    #[test]
    fn year_and_country_seed_modifiers() {
        let s = score("coal in germany 2019");
        assert_eq!(s.get(Intent::TimeChange), 1.0);
        assert_eq!(s.get(Intent::FilterChange), 1.0);
    }

    #[test]
    fn greeting_suppresses_question() {
        let s = score("hello, how are you?");
        assert!(s.get(Intent::Question) < 0.2);
        assert!(s.get(Intent::Greeting) > 4.0);
    }

    #[test]
    fn farewell_halves_greeting() {
        let s = score("hi, bye");
        assert_eq!(s.get(Intent::Greeting), 1.25);
        assert_eq!(s.get(Intent::Farewell), 2.0);
    }

    #[test]
    fn ambiguous_weight_moves_by_turn() {
        let scorer = Scorer::new(AmbiguityConfig::default());
        let first = scorer.score("good evening", true);
        let later = scorer.score("good evening", false);
        assert_eq!(first.get(Intent::Greeting), 1.5);
        assert_eq!(later.get(Intent::Farewell), 1.5);
        assert_eq!(first.get(Intent::Ambiguous), 0.0);
        assert_eq!(later.get(Intent::Ambiguous), 0.0);
    }

    #[test]
    fn unmatched_text_falls_back_to_statement() {
        let s = score("zzz qqq");
        assert_eq!(s.get(Intent::Statement), STATEMENT_FLOOR);
    }

    #[test]
    fn trace_records_hits_and_stages() {
        let scorer = Scorer::new(AmbiguityConfig::default());
        let (_, trace) = scorer.score_traced("good evening", false);
        assert!(trace.hits.iter().any(|h| h.pattern == "ambiguous_phrase"));
        assert_eq!(trace.ambiguity, Some(Rule::Standalone));
        assert!(
            trace
                .stages
                .iter()
                .any(|e| e.stage == Stage::ResolveAmbiguity)
        );
    }

    struct Exploding;

    impl Pattern for Exploding {
        fn name(&self) -> &str {
            "exploding"
        }
        fn evaluate(&self, _text: &str) -> f64 {
            panic!("boom")
        }
    }

    struct NotANumber;

    impl Pattern for NotANumber {
        fn name(&self) -> &str {
            "nan"
        }
        fn evaluate(&self, _text: &str) -> f64 {
            f64::NAN
        }
    }

    #[test]
    fn failing_patterns_are_skipped() {
        assert_eq!(evaluate_guarded(&Exploding, "hi"), None);
        assert_eq!(evaluate_guarded(&NotANumber, "hi"), None);
    }
}
