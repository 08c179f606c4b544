//! Static vocabularies and the matchers compiled from them.
//!
//! Every list is lowercase and already normalized (straight apostrophes,
//! no diacritics). Words from every list also feed the spell dictionary, so
//! a keyword used by a rule can never be "corrected" away.

use regex::Regex;
use std::sync::LazyLock;

use ec_protocol::geo::{self, COUNTRIES};

use crate::error::{IntentError, IntentResult};

// ── Spell-corrector vocabularies ──────────────────────────────

pub const INTERROGATIVES: &[&str] = &[
    "what", "who", "whom", "whose", "which", "when", "where", "why", "how",
];

/// Short social/domain words one edit away from an unrelated common word
/// ("see" → "she", "till" → "will", "out" → "our"). Never corrected.
pub const PROTECTED_SOCIAL: &[&str] = &[
    "see", "till", "well", "one", "out", "off", "got", "gotta", "yo", "sup", "hey", "hi",
    "bye", "cya", "ttyl", "later", "thx", "ty", "ta", "ok", "okay", "yes", "yep", "yup",
    "nope", "nah", "night", "nite", "gn", "morning", "evening", "cheers", "hiya", "lol",
];

pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "so", "to", "of", "in", "on", "at",
    "by", "for", "with", "from", "as", "is", "am", "are", "was", "were", "be", "been",
    "being", "do", "does", "did", "have", "has", "had", "i", "me", "my", "we", "our", "us",
    "you", "your", "he", "she", "it", "its", "they", "them", "their", "this", "that",
    "these", "those", "there", "here", "not", "no", "can", "could", "would", "should",
    "will", "shall", "may", "might", "must", "just", "also", "very", "too", "about",
    "into", "over", "than", "up", "down", "all", "any", "some", "more", "most", "such",
    "only", "own", "same", "other", "s", "t", "m", "d", "ll", "re", "ve", "don", "doesn",
    "isn", "aren", "wasn", "weren", "didn", "couldn", "wouldn", "shouldn", "haven",
    "hasn", "hadn", "won", "ain", "im", "let", "lets", "u", "ur", "whats", "hows",
];

pub const BASE_VOCABULARY: &[&str] = &[
    "please", "want", "need", "like", "know", "think", "get", "give", "show", "tell",
    "make", "look", "find", "fetch", "list", "display", "time", "day", "today",
    "tomorrow", "yesterday", "tonight", "week", "month", "months", "year", "years",
    "decade", "quarter", "period", "date", "range", "now", "again", "good", "great",
    "bad", "new", "old", "first", "last", "next", "previous", "past", "much", "many",
    "way", "thing", "things", "something", "anything", "nothing", "everything", "work",
    "working", "works", "load", "loading", "open", "respond", "responding", "update",
    "updating", "updated", "use", "using", "used", "country", "countries", "region",
    "regions", "between", "across", "per", "each", "every", "total", "average", "value",
    "values", "table", "page", "file", "question", "answer", "chat", "bot", "assistant",
    "hello", "goodbye", "sure", "right", "thank", "sorry", "maybe", "really", "actually",
    "still", "already", "going", "go", "come", "comes", "coming", "back", "people",
    "world", "europe", "european", "union", "eu", "latest", "recent", "current",
    "currently", "since", "until", "before", "after", "during", "high", "low", "higher",
    "lower", "highest", "lowest", "increase", "decrease", "growth", "change", "changed",
    "switch", "set", "doing", "fine", "wrong", "difference", "compared", "wondering",
    "wonder", "leaving", "heading", "calculated", "measured", "computed", "collected",
    "estimated", "sourced", "meaning", "mean", "means", "meant", "run", "leave", "bounce",
    "soon", "talk", "catch", "take", "care", "have", "peace", "signing", "logging",
    "done", "meet", "pleased", "long", "afternoon", "raining", "rain", "bigger",
    "smaller", "greater", "less", "least", "biggest", "graphically",
    "draw", "send", "save", "raw", "ask", "started", "getting", "options", "able",
];

/// Energy-statistics terms; any of them signals a data query.
pub const DOMAIN_TERMS: &[&str] = &[
    "energy", "electricity", "electric", "power", "gas", "natural gas", "oil", "crude",
    "coal", "lignite", "nuclear", "renewable", "renewables", "wind", "solar",
    "photovoltaic", "hydro", "hydropower", "biomass", "biofuel", "biofuels",
    "geothermal", "emissions", "emission", "co2", "carbon", "greenhouse", "consumption",
    "production", "generation", "capacity", "imports", "exports", "price", "prices",
    "pricing", "cost", "costs", "tariff", "tariffs", "demand", "supply", "statistics",
    "stats", "data", "figures", "mix", "share", "intensity", "efficiency", "kwh", "mwh",
    "gwh", "twh", "ktoe", "mtoe", "petroleum", "fuel", "fuels", "heat", "heating",
    "grid", "households", "household", "industry", "industrial", "transport",
    "dependency", "storage", "battery", "batteries", "lng", "diesel", "petrol",
    "gasoline", "hydrogen",
];

// ── Social vocabularies ───────────────────────────────────────

/// Greeting words not covered by the elongation-tolerant greeting regex.
pub const GREETING_WORDS: &[&str] = &[
    "hiya", "howdy", "greetings", "hola", "bonjour", "hallo", "salut", "heya", "sup",
    "ciao", "hai", "wassup",
];

pub const GREETING_PHRASES: &[&str] = &[
    "good morning", "good afternoon", "morning", "hey there", "hi there", "hello there",
    "what's up", "whats up", "how are you", "how's it going", "hows it going",
    "how are things", "how do you do", "nice to meet you", "pleased to meet you",
];

/// Farewell words not covered by the elongation-tolerant farewell regex.
pub const FAREWELL_WORDS: &[&str] = &[
    "cya", "ttyl", "farewell", "adios", "cheerio", "goodnight", "gn", "nite",
];

pub const FAREWELL_PHRASES: &[&str] = &[
    "see you", "see ya", "see you later", "see you soon", "see you tomorrow",
    "talk to you later", "talk later", "catch you later", "good night", "take care",
    "have a good day", "have a nice day", "have a great day", "have a good one",
    "until next time", "till next time", "till tomorrow", "until tomorrow", "peace out",
    "bye for now", "signing off", "logging off", "that's all", "that's all for now",
    "that is all",
];

/// Context-dependent phrases, longest first.
pub const AMBIGUOUS_PHRASES: &[&str] = &["good evening", "good day", "evening", "night"];

/// Words addressing a group right after an ambiguous phrase ("good evening everyone").
pub const GROUP_ADDRESS: &[&str] = &[
    "everyone", "everybody", "all", "team", "folks", "guys", "yall", "y'all", "there",
    "friends", "people",
];

/// Words signalling departure right after an ambiguous phrase ("night, bye").
pub const FAREWELL_INDICATORS: &[&str] = &[
    "bye", "goodbye", "leaving", "going", "off", "out", "later", "see", "take care",
    "signing", "done", "heading", "sleep", "bed",
];

pub const THANKS_WORDS: &[&str] = &[
    "thanks", "thx", "thanx", "ty", "tysm", "cheers", "ta", "grateful", "thankyou",
];

pub const THANKS_PHRASES: &[&str] = &[
    "thank you", "thank u", "many thanks", "much appreciated", "appreciate it",
    "i appreciate", "thanks a lot", "thanks so much",
];

// ── Answer vocabularies ───────────────────────────────────────

pub const AFFIRMATIVE_WORDS: &[&str] = &[
    "yes", "yeah", "yep", "yup", "ya", "sure", "ok", "okay", "alright", "correct",
    "exactly", "absolutely", "definitely", "indeed", "affirmative", "yess", "k",
];

pub const AFFIRMATIVE_PHRASES: &[&str] = &[
    "of course", "sounds good", "go ahead", "please do", "that's right", "let's do it",
    "do it", "that works",
];

pub const NEGATIVE_WORDS: &[&str] = &["no", "nope", "nah", "nay", "negative", "never"];

pub const NEGATIVE_PHRASES: &[&str] = &[
    "not really", "no thanks", "no thank you", "never mind", "nevermind", "not now",
    "no way", "don't", "do not", "i don't think so",
];

// ── Task vocabularies ─────────────────────────────────────────

pub const HELP_WORDS: &[&str] = &[
    "help", "assist", "assistance", "support", "tutorial", "guide", "instructions",
    "manual", "faq",
];

pub const HELP_PHRASES: &[&str] = &[
    "how do i", "how does this work", "what can you do", "what can i ask", "how to use",
    "getting started", "show me how", "i need help", "can you help",
    "what are my options",
];

pub const TROUBLE_WORDS: &[&str] = &[
    "error", "errors", "bug", "bugs", "broken", "crash", "crashed", "crashes", "glitch",
    "failed", "failing", "fails", "failure", "issue", "issues", "problem", "problems",
    "stuck", "frozen", "freezes", "timeout", "exception",
];

pub const DOWNLOAD_WORDS: &[&str] = &[
    "download", "downloads", "export", "csv", "xlsx", "xls", "excel", "spreadsheet",
    "pdf",
];

pub const DOWNLOAD_PHRASES: &[&str] = &[
    "save as", "save the data", "get the file", "send me the file", "as a file",
    "raw data",
];

pub const VIZ_WORDS: &[&str] = &[
    "chart", "charts", "graph", "graphs", "plot", "plots", "visualize", "visualise",
    "visualization", "visualisation", "diagram", "histogram", "map", "heatmap",
    "dashboard", "infographic",
];

pub const VIZ_PHRASES: &[&str] = &[
    "bar chart", "line chart", "pie chart", "line graph", "bar graph", "draw me",
    "show it graphically",
];

pub const METADATA_WORDS: &[&str] = &[
    "source", "sources", "methodology", "methodologies", "definition", "definitions",
    "metadata", "documentation", "citation", "cite", "license", "licence", "provenance",
    "glossary", "unit", "units",
];

pub const COMPARE_WORDS: &[&str] = &[
    "compare", "comparing", "comparison", "versus", "vs", "contrast", "rank", "ranking",
    "rankings",
];

pub const COMMAND_WORDS: &[&str] = &[
    "reset", "clear", "restart", "stop", "cancel", "undo", "quit", "exit", "refresh",
];

pub const COMMAND_PHRASES: &[&str] = &[
    "start over", "go back", "new chat", "new conversation", "clear history",
    "clear the chat", "delete history", "show history", "main menu", "try again",
];

pub const FILTER_WORDS: &[&str] = &[
    "only", "exclude", "excluding", "include", "including", "instead", "filter",
    "without",
];

pub const TIME_WORDS: &[&str] = &[
    "monthly", "annual", "annually", "yearly", "quarterly", "daily", "weekly",
];

pub const SMALLTALK_PHRASES: &[&str] = &[
    "how are you", "how's it going", "hows it going", "how are things", "how's your day",
    "who are you", "what are you", "what's your name", "whats your name",
    "are you a bot", "are you human", "are you real", "tell me a joke",
    "tell me something", "how old are you", "where are you from", "do you like",
    "i'm bored", "im bored", "you're funny", "you are funny", "you're smart",
    "you are smart", "what's new", "whats new",
];

pub const SMALLTALK_WORDS: &[&str] = &[
    "joke", "jokes", "lol", "haha", "hahaha", "lmao", "weather", "bored", "funny", "cool",
    "nice", "awesome",
];

/// Openers that make a request out of whatever follows.
pub const REQUEST_VERBS: &[&str] = &[
    "show", "give", "get", "find", "fetch", "tell", "list", "display",
];

pub const REQUEST_PHRASES: &[&str] = &[
    "i want", "i need", "i'd like", "i would like", "can i see", "can i get",
    "can you show", "could you show", "can you give", "could you give", "let me see",
];

// ── Matcher construction ──────────────────────────────────────

fn check_entry(entry: &str) -> IntentResult<()> {
    let trimmed = entry.trim();
    let edges_ok = trimmed.chars().next().is_some_and(char::is_alphanumeric)
        && trimmed.chars().last().is_some_and(char::is_alphanumeric);
    if !edges_ok {
        return Err(IntentError::Vocabulary {
            entry: entry.to_string(),
            message: "must start and end with a letter or digit".into(),
        });
    }
    Ok(())
}

fn compile_alternation(alternatives: Vec<String>) -> IntentResult<Regex> {
    let source = format!(r"\b(?:{})\b", alternatives.join("|"));
    Regex::new(&source).map_err(|e| IntentError::Vocabulary {
        entry: source.clone(),
        message: e.to_string(),
    })
}

fn longest_first(entries: &[&str]) -> Vec<String> {
    let mut sorted: Vec<String> = entries.iter().map(|e| e.trim().to_string()).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted.dedup();
    sorted
}

/// Whole-word matcher over literal vocabulary entries.
///
/// Entries are regex-escaped, so caller-supplied words can never inject
/// syntax. An entry never matches inside a longer word.
pub fn word_matcher(words: &[&str]) -> IntentResult<Regex> {
    for w in words {
        check_entry(w)?;
    }
    compile_alternation(longest_first(words).iter().map(|w| regex::escape(w)).collect())
}

/// Like [`word_matcher`], but internal whitespace matches one or more
/// whitespace characters ("good   morning" == "good morning").
pub fn phrase_matcher(phrases: &[&str]) -> IntentResult<Regex> {
    for p in phrases {
        check_entry(p)?;
    }
    compile_alternation(
        longest_first(phrases)
            .iter()
            .map(|p| {
                p.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect(),
    )
}

/// Every vocabulary list that contributes to the spell dictionary.
const DICTIONARY_SOURCES: &[&[&str]] = &[
    INTERROGATIVES,
    PROTECTED_SOCIAL,
    STOPWORDS,
    BASE_VOCABULARY,
    DOMAIN_TERMS,
    GREETING_WORDS,
    GREETING_PHRASES,
    FAREWELL_WORDS,
    FAREWELL_PHRASES,
    AMBIGUOUS_PHRASES,
    GROUP_ADDRESS,
    FAREWELL_INDICATORS,
    THANKS_WORDS,
    THANKS_PHRASES,
    AFFIRMATIVE_WORDS,
    AFFIRMATIVE_PHRASES,
    NEGATIVE_WORDS,
    NEGATIVE_PHRASES,
    HELP_WORDS,
    HELP_PHRASES,
    TROUBLE_WORDS,
    DOWNLOAD_WORDS,
    DOWNLOAD_PHRASES,
    VIZ_WORDS,
    VIZ_PHRASES,
    METADATA_WORDS,
    COMPARE_WORDS,
    COMMAND_WORDS,
    COMMAND_PHRASES,
    FILTER_WORDS,
    TIME_WORDS,
    SMALLTALK_PHRASES,
    SMALLTALK_WORDS,
    REQUEST_VERBS,
    REQUEST_PHRASES,
];

/// Single tokens of every built-in vocabulary, country names included.
pub fn dictionary_words() -> impl Iterator<Item = &'static str> {
    let listed = DICTIONARY_SOURCES.iter().flat_map(|list| list.iter().copied());
    let countries = COUNTRIES.iter().flat_map(|c| c.spellings());
    listed
        .chain(countries)
        .flat_map(|entry| entry.split(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

// ── Shared compiled matchers ──────────────────────────────────

static INTERROGATIVE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^(?:{})\b", INTERROGATIVES.join("|"))).unwrap());

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| phrase_matcher(DOMAIN_TERMS).unwrap());

pub fn starts_with_interrogative(text: &str) -> bool {
    INTERROGATIVE_START.is_match(text)
}

pub fn mentions_year(text: &str) -> bool {
    YEAR.is_match(text)
}

/// Country by name/alias, or by an ISO-2 code that isn't also a common word.
pub fn mentions_country(text: &str) -> bool {
    geo::mentions_country(text)
}

/// Number of domain-term occurrences.
pub fn domain_term_count(text: &str) -> usize {
    DOMAIN.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_matcher_respects_word_boundaries() {
        let re = word_matcher(&["hi", "ok"]).unwrap();
        assert!(re.is_match("hi there"));
        assert!(re.is_match("well, ok."));
        assert!(!re.is_match("this"));
        assert!(!re.is_match("token"));
    }

    #[test]
    fn word_matcher_escapes_metacharacters() {
        let re = word_matcher(&["c.o2", "a+b"]).unwrap();
        assert!(re.is_match("c.o2 levels"));
        assert!(!re.is_match("cxo2 levels"));
        assert!(re.is_match("a+b"));
        assert!(!re.is_match("aab"));
    }

    #[test]
    fn word_matcher_rejects_malformed_entries() {
        assert!(word_matcher(&[""]).is_err());
        assert!(word_matcher(&["(oops"]).is_err());
        assert!(word_matcher(&["ok "]).is_ok());
    }

    #[test]
    fn phrase_matcher_is_whitespace_flexible() {
        let re = phrase_matcher(&["good morning"]).unwrap();
        assert!(re.is_match("good morning"));
        assert!(re.is_match("good   morning all"));
        assert!(!re.is_match("goodmorning"));
    }

    #[test]
    fn phrase_matcher_prefers_longest_alternative() {
        let re = phrase_matcher(&["see you", "see you later"]).unwrap();
        assert_eq!(re.find("see you later").unwrap().as_str(), "see you later");
    }

    #[test]
    fn dictionary_contains_split_phrases_and_countries() {
        let words: std::collections::HashSet<_> = dictionary_words().collect();
        assert!(words.contains("morning"));
        assert!(words.contains("electricity"));
        assert!(words.contains("germany"));
        assert!(words.contains("kingdom"));
        assert!(!words.contains("see you"));
    }

    #[test]
    fn country_detection_ignores_wordlike_codes() {
        assert!(mentions_country("prices in france"));
        assert!(mentions_country("what about fr"));
        assert!(!mentions_country("is it in there"));
    }

    #[test]
    fn year_detection() {
        assert!(mentions_year("back in 2020"));
        assert!(!mentions_year("about 12000 units"));
        assert!(!mentions_year("route 66"));
    }

    #[test]
    fn interrogative_start() {
        assert!(starts_with_interrogative("what is the price"));
        assert!(starts_with_interrogative("how"));
        assert!(!starts_with_interrogative("whatever"));
        assert!(!starts_with_interrogative("tell me what"));
    }
}
