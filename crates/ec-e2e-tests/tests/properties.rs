//! Property tests over arbitrary and templated utterances.

mod helpers;

use proptest::prelude::*;
use proptest::sample::select;

use ec_intent::lexicon::PROTECTED_SOCIAL;
use ec_intent::normalize::tokens;
use ec_protocol::Intent;

use helpers::{engine, resolve};

const GREETINGS: &[&str] = &["hi", "hello", "hey", "good morning", "howdy"];
const FAREWELLS: &[&str] = &["bye", "goodbye", "see you later", "take care", "cya"];
const JOINERS: &[&str] = &[", ", " and "];

const TROUBLE: &[&str] = &[
    "error loading",
    "it doesn't work for",
    "something is wrong with",
    "the chart is broken when showing",
];
const QUERIES: &[&str] = &[
    "electricity prices in germany",
    "coal production in 2019",
    "gas imports",
];

proptest! {
    #[test]
    fn resolution_is_deterministic(text in ".{0,80}", is_first in any::<bool>()) {
        let a = resolve(&text, is_first);
        let b = resolve(&text, is_first);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn resolution_is_well_formed(text in ".{0,80}", is_first in any::<bool>()) {
        let r = resolve(&text, is_first);

        prop_assert!(!r.primary.is_modifier());
        prop_assert_ne!(r.primary, Intent::Ambiguous);
        prop_assert!(!r.co_intents.contains(&r.primary));
        prop_assert!(r.co_intents.iter().all(|i| !i.is_modifier()));
        prop_assert!(r.modifiers.iter().all(|i| i.is_modifier()));

        for (_, score) in r.scores.iter() {
            prop_assert!(score.is_finite() && score >= 0.0);
        }

        let top = r.scores.top().map(|(_, s)| s).unwrap_or(0.0);
        for intent in &r.co_intents {
            prop_assert!(r.scores.get(*intent) >= 0.6 * top - 1e-9);
        }
    }

    #[test]
    fn blank_text_is_invalid(text in "[ \t\r\n]{0,12}", is_first in any::<bool>()) {
        prop_assert_eq!(resolve(&text, is_first).primary, Intent::Invalid);
    }

    #[test]
    fn protected_words_survive_correction(
        word in select(PROTECTED_SOCIAL),
        before in "[a-z]{1,8}",
        after in "[a-z]{1,8}",
    ) {
        let cleaned = engine().clean(&format!("{before} {word} {after}")).text;
        let kept: Vec<&str> = cleaned.split_whitespace().collect();
        prop_assert_eq!(kept.get(1).copied(), Some(word));
    }

    #[test]
    fn farewell_prevails_over_greeting(
        greeting in select(GREETINGS),
        farewell in select(FAREWELLS),
        joiner in select(JOINERS),
        farewell_first in any::<bool>(),
        is_first in any::<bool>(),
    ) {
        let text = if farewell_first {
            format!("{farewell}{joiner}{greeting}")
        } else {
            format!("{greeting}{joiner}{farewell}")
        };
        prop_assert_eq!(resolve(&text, is_first).primary, Intent::Farewell, "{}", text);
    }

    #[test]
    fn troubleshooting_dominates_queries(
        trouble in select(TROUBLE),
        query in select(QUERIES),
        is_first in any::<bool>(),
    ) {
        let text = format!("{trouble} {query}");
        prop_assert_eq!(resolve(&text, is_first).primary, Intent::Troubleshooting, "{}", text);
    }
}

#[test]
fn extremely_long_input_is_bounded() {
    let max_tokens = engine().config().max_tokens;
    let inputs = [
        "electricity ".repeat(100_000),
        "?!".repeat(500_000),
        "a".repeat(1_000_000),
    ];

    for text in &inputs {
        let a = engine().explain(text, true);
        let r = &a.resolution;
        let head = &text[..16];

        assert!(tokens(&a.cleaned).count() <= max_tokens, "{head:?}");
        assert!(!r.primary.is_modifier(), "{head:?}");
        assert_ne!(r.primary, Intent::Ambiguous, "{head:?}");
        assert!(!r.co_intents.contains(&r.primary), "{head:?}");
        for (_, score) in r.scores.iter() {
            assert!(score.is_finite() && score >= 0.0, "{head:?}");
        }
    }
}
