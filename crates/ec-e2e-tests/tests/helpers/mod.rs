//! Shared helpers for end-to-end tests.

#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use ec_chat::{Assistant, ChatConfig};
use ec_intent::{EngineConfig, IntentEngine};
use ec_protocol::{Intent, Resolution};

static ENGINE: LazyLock<Arc<IntentEngine>> =
    LazyLock::new(|| Arc::new(IntentEngine::new(EngineConfig::default()).unwrap()));

/// Engine with the default configuration, shared across tests.
pub fn engine() -> &'static IntentEngine {
    &ENGINE
}

pub fn resolve(text: &str, is_first: bool) -> Resolution {
    engine().resolve_intents(text, is_first)
}

/// Assert the primary intent of every `(text, is_first, expected)` case,
/// reporting all mismatches at once.
pub fn assert_primaries(cases: &[(&str, bool, Intent)]) {
    let failures: Vec<String> = cases
        .iter()
        .filter_map(|(text, is_first, expected)| {
            let got = resolve(text, *is_first).primary;
            (got != *expected).then(|| {
                format!("{text:?} (first={is_first}): expected {expected}, got {got}")
            })
        })
        .collect();
    assert!(failures.is_empty(), "misclassified:\n{}", failures.join("\n"));
}

/// Assistant sharing the default engine.
pub fn assistant() -> Assistant {
    Assistant::with_engine(ENGINE.clone(), &ChatConfig::default())
}
