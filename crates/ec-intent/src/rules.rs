//! Per-intent pattern tables.
//!
//! Every intent owns a list of weighted patterns; an intent's raw score is
//! the sum of its patterns' contributions over the cleaned text.

use std::sync::LazyLock;

use regex::Regex;

use ec_protocol::Intent;

use crate::ambiguity;
use crate::lexicon::{self, *};
use crate::pattern::{FnPattern, Pattern, RegexPattern};

/// The patterns scoring one intent.
pub struct IntentRules {
    pub intent: Intent,
    pub patterns: Vec<Box<dyn Pattern>>,
}

impl IntentRules {
    fn new(intent: Intent, patterns: Vec<Box<dyn Pattern>>) -> Self {
        Self { intent, patterns }
    }
}

fn re(name: &'static str, source: &str, weight: f64) -> Box<dyn Pattern> {
    Box::new(RegexPattern::new(name, source, weight))
}

fn words(name: &'static str, list: &[&str], weight: f64) -> Box<dyn Pattern> {
    Box::new(RegexPattern::words(name, list, weight).unwrap())
}

fn phrases(name: &'static str, list: &[&str], weight: f64) -> Box<dyn Pattern> {
    Box::new(RegexPattern::phrases(name, list, weight).unwrap())
}

fn func(name: &'static str, score: fn(&str) -> f64, weight: f64) -> Box<dyn Pattern> {
    Box::new(FnPattern::new(name, score, weight))
}

// ── Scoring functions ─────────────────────────────────────────

static HOW_MUCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bhow\s+(?:much|many)\b").unwrap());

static REQUEST_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:please\s+)?(?:{})\b",
        REQUEST_VERBS.join("|")
    ))
    .unwrap()
});

static REQUEST_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| lexicon::phrase_matcher(REQUEST_PHRASES).unwrap());

fn flag(hit: bool) -> f64 {
    if hit { 1.0 } else { 0.0 }
}

/// Strip leading/trailing punctuation and spacing.
fn core(text: &str) -> &str {
    text.trim_matches(|c: char| !c.is_alphanumeric())
}

fn ends_with_question_mark(text: &str) -> f64 {
    flag(text.trim_end().ends_with('?'))
}

fn opens_with_interrogative(text: &str) -> f64 {
    flag(lexicon::starts_with_interrogative(text))
}

/// Each domain term beyond the first adds one unit, capped at three.
fn domain_density(text: &str) -> f64 {
    let extra = lexicon::domain_term_count(text).saturating_sub(1);
    extra.min(3) as f64
}

fn asks_about_domain(text: &str) -> f64 {
    let asks = lexicon::starts_with_interrogative(text) || HOW_MUCH.is_match(text);
    flag(asks && lexicon::domain_term_count(text) > 0)
}

fn requests_domain(text: &str) -> f64 {
    let requests = REQUEST_OPENER.is_match(text) || REQUEST_PHRASE.is_match(text);
    flag(requests && lexicon::domain_term_count(text) > 0)
}

fn domain_in_place(text: &str) -> f64 {
    flag(lexicon::mentions_country(text) && lexicon::domain_term_count(text) > 0)
}

fn domain_in_time(text: &str) -> f64 {
    flag(lexicon::mentions_year(text) && lexicon::domain_term_count(text) > 0)
}

fn lone_affirmative(text: &str) -> f64 {
    flag(AFFIRMATIVE_WORDS.contains(&core(text)))
}

fn lone_negative(text: &str) -> f64 {
    flag(NEGATIVE_WORDS.contains(&core(text)))
}

fn declarative(text: &str) -> f64 {
    let long_enough = crate::normalize::tokens(text).nth(2).is_some();
    flag(long_enough && !text.contains('?'))
}

fn ambiguous_phrase(text: &str) -> f64 {
    flag(ambiguity::find(text).is_some())
}

// ── Tables ────────────────────────────────────────────────────

/// Elongation-tolerant greeting stems ("heyyy" arrives collapsed as "heyy").
const GREETING_STEMS: &str = r"he+y+a?|hi+|hel+o+|yo+|hai+|howdy+";
const FAREWELL_STEMS: &str = r"good\s*by+e+|by+e+\s*by+e+|by+e+";

/// Built-in rules, one entry per scored intent, in [`Intent::ALL`] order.
pub static RULES: LazyLock<Vec<IntentRules>> = LazyLock::new(|| {
    vec![
        IntentRules::new(
            Intent::Greeting,
            vec![
                re("greeting_stem", &format!(r"\b(?:{GREETING_STEMS})\b"), 2.0),
                words("greeting_word", GREETING_WORDS, 2.0),
                phrases("greeting_phrase", GREETING_PHRASES, 2.0),
                re("long_time_no_see", r"\blong\s+time\s+no\s+see\b", 3.0),
                re(
                    "greeting_opener",
                    &format!(r"^(?:{GREETING_STEMS}|good\s+(?:morning|afternoon)|greetings)\b"),
                    0.5,
                ),
            ],
        ),
        IntentRules::new(
            Intent::Farewell,
            vec![
                re("farewell_stem", &format!(r"\b(?:{FAREWELL_STEMS})\b"), 2.0),
                words("farewell_word", FAREWELL_WORDS, 2.0),
                phrases("farewell_phrase", FAREWELL_PHRASES, 2.0),
                re(
                    "departure",
                    r"\b(?:(?:i'm|im|i\s+am)\s+(?:out|off|leaving|heading\s+out|done)|(?:gotta|got\s+to|have\s+to|need\s+to|must)\s+(?:go|run|leave|bounce))\b",
                    2.5,
                ),
                re("lone_later", r"^(?:later|laters)\W*$", 2.0),
            ],
        ),
        IntentRules::new(
            Intent::Thanks,
            vec![
                words("thanks_word", THANKS_WORDS, 2.0),
                phrases("thanks_phrase", THANKS_PHRASES, 2.0),
            ],
        ),
        IntentRules::new(
            Intent::Affirmative,
            vec![
                words("affirmative_word", AFFIRMATIVE_WORDS, 1.5),
                phrases("affirmative_phrase", AFFIRMATIVE_PHRASES, 1.5),
                func("lone_affirmative", lone_affirmative, 1.0),
            ],
        ),
        IntentRules::new(
            Intent::Negative,
            vec![
                words("negative_word", NEGATIVE_WORDS, 1.0),
                phrases("negative_phrase", NEGATIVE_PHRASES, 1.5),
                func("lone_negative", lone_negative, 1.0),
            ],
        ),
        IntentRules::new(
            Intent::Help,
            vec![
                words("help_word", HELP_WORDS, 2.5),
                phrases("help_phrase", HELP_PHRASES, 2.0),
            ],
        ),
        IntentRules::new(
            Intent::Troubleshooting,
            vec![
                words("trouble_word", TROUBLE_WORDS, 3.0),
                re(
                    "not_working",
                    r"\b(?:(?:doesn't|does\s+not|doesnt|isn't|is\s+not|isnt|won't|wont|can't|cant|cannot|not|didn't|didnt|stopped)\s+(?:work|working|load|loading|open|respond|responding|update|updating|show|showing)|went\s+wrong)\b",
                    3.0,
                ),
                re("something_wrong", r"\bsomething(?:'s|\s+is)?\s+wrong\b", 2.0),
            ],
        ),
        IntentRules::new(
            Intent::DownloadRequest,
            vec![
                words("download_word", DOWNLOAD_WORDS, 2.5),
                phrases("download_phrase", DOWNLOAD_PHRASES, 1.5),
            ],
        ),
        IntentRules::new(
            Intent::VizRequest,
            vec![
                words("viz_word", VIZ_WORDS, 2.5),
                phrases("viz_phrase", VIZ_PHRASES, 0.5),
            ],
        ),
        IntentRules::new(
            Intent::DataQuery,
            vec![
                phrases("domain_term", DOMAIN_TERMS, 1.5),
                func("domain_density", domain_density, 0.5),
                func("asks_about_domain", asks_about_domain, 1.0),
                func("requests_domain", requests_domain, 1.0),
                func("domain_in_place", domain_in_place, 0.5),
                func("domain_in_time", domain_in_time, 0.5),
            ],
        ),
        IntentRules::new(
            Intent::FilterChange,
            vec![
                words("filter_word", FILTER_WORDS, 1.0),
                re("what_about", r"\b(?:what|how)\s+about\b", 1.5),
                re(
                    "switch_scope",
                    r"\b(?:switch|change)\s+(?:to|the\s+country|country|the\s+region|region)\b",
                    2.0,
                ),
                re("now_for", r"\bnow\s+(?:for|in|show)\b", 1.0),
            ],
        ),
        IntentRules::new(
            Intent::TimeChange,
            vec![
                re(
                    "relative_period",
                    r"\b(?:last|this|next|previous|past)\s+(?:\d+\s+)?(?:years?|months?|decades?|quarters?|weeks?)\b",
                    1.5,
                ),
                re(
                    "bounded_year",
                    r"\b(?:since|from|until|till|before|after)\s+(?:19|20)\d{2}\b",
                    1.5,
                ),
                re(
                    "year_span",
                    r"\b(?:19|20)\d{2}\s*(?:-|to|until|through)\s*(?:19|20)\d{2}\b",
                    1.5,
                ),
                words("time_word", TIME_WORDS, 1.0),
                re(
                    "change_period",
                    r"\b(?:change|switch|set)\s+(?:the\s+)?(?:year|period|date|time\s*range|timeframe)\b",
                    2.0,
                ),
                re("most_recent", r"\b(?:latest|most\s+recent)\b", 0.5),
            ],
        ),
        IntentRules::new(
            Intent::MetadataRequest,
            vec![
                words("metadata_word", METADATA_WORDS, 2.5),
                re(
                    "definition",
                    r"\b(?:what\s+does\s+.+\s+mean|define|meaning\s+of)\b",
                    2.5,
                ),
                re(
                    "provenance",
                    r"\b(?:come\s+from|comes\s+from|how\s+(?:is|are|was|were)\s+.+\s+(?:calculated|measured|computed|collected|estimated)|last\s+updated)\b",
                    2.5,
                ),
            ],
        ),
        IntentRules::new(
            Intent::CompareRequest,
            vec![
                words("compare_word", COMPARE_WORDS, 2.0),
                re(
                    "comparative_phrase",
                    r"\b(?:compared\s+(?:to|with)|difference\s+between|(?:higher|lower|bigger|smaller|greater|more|less)\s+than|which\s+.+\s+(?:most|least|highest|lowest))\b",
                    2.0,
                ),
                re("between_pair", r"\bbetween\s+\w+(?:\s+\w+)?\s+and\s+\w+", 1.0),
            ],
        ),
        IntentRules::new(
            Intent::Command,
            vec![
                words("command_word", COMMAND_WORDS, 2.5),
                phrases("command_phrase", COMMAND_PHRASES, 2.5),
            ],
        ),
        IntentRules::new(
            Intent::Question,
            vec![
                func("question_mark", ends_with_question_mark, 1.0),
                func("interrogative_opener", opens_with_interrogative, 0.8),
                re(
                    "auxiliary_opener",
                    r"^(?:is|are|was|were|can|could|do|does|did|will|would|should|may|shall|has|have)\b",
                    0.6,
                ),
                re(
                    "indirect_question",
                    r"\b(?:do\s+you\s+know|can\s+you\s+tell\s+me|i\s+wonder|i\s+was\s+wondering)\b",
                    0.8,
                ),
            ],
        ),
        IntentRules::new(
            Intent::Smalltalk,
            vec![
                phrases("smalltalk_phrase", SMALLTALK_PHRASES, 2.0),
                words("smalltalk_word", SMALLTALK_WORDS, 1.0),
            ],
        ),
        IntentRules::new(
            Intent::Ambiguous,
            vec![func("ambiguous_phrase", ambiguous_phrase, 1.5)],
        ),
        IntentRules::new(
            Intent::Statement,
            vec![
                re(
                    "declarative_opener",
                    r"^(?:i|i'm|im|i\s+am|my|it's|its|it\s+is|this\s+is|that's|thats|we|we're|there\s+is|there\s+are)\b",
                    0.5,
                ),
                func("declarative", declarative, 0.2),
            ],
        ),
    ]
});

/// Patterns owned by `intent`, empty when it has none.
pub fn patterns_for(intent: Intent) -> &'static [Box<dyn Pattern>] {
    RULES
        .iter()
        .find(|r| r.intent == intent)
        .map(|r| r.patterns.as_slice())
        .unwrap_or(&[])
}

/// True when any greeting pattern fires.
pub fn looks_like_greeting(text: &str) -> bool {
    patterns_for(Intent::Greeting)
        .iter()
        .any(|p| p.evaluate(text) > 0.0)
}
