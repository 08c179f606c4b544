//! Turning a score vector into a primary intent, co-intents and modifiers.

use ec_protocol::{Intent, Resolution, ScoreVector};

/// Scores closer than this are equal.
const EPSILON: f64 = 1e-9;

/// Tie-break order among near-tied candidates, most specific first.
pub const PRECEDENCE: [Intent; 17] = [
    Intent::Troubleshooting,
    Intent::DownloadRequest,
    Intent::VizRequest,
    Intent::CompareRequest,
    Intent::MetadataRequest,
    Intent::DataQuery,
    Intent::Command,
    Intent::Greeting,
    Intent::Question,
    Intent::Help,
    Intent::Affirmative,
    Intent::Negative,
    Intent::Thanks,
    Intent::Farewell,
    Intent::Smalltalk,
    Intent::Statement,
    Intent::Invalid,
];

/// Task intents that stay in contention whenever a data query is active.
const FORCED_WITH_DATA: [Intent; 3] = [
    Intent::Troubleshooting,
    Intent::CompareRequest,
    Intent::MetadataRequest,
];

#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    near_tie_delta: f64,
    co_intent_ratio: f64,
}

impl Resolver {
    pub fn new(near_tie_delta: f64, co_intent_ratio: f64) -> Self {
        Self {
            near_tie_delta,
            co_intent_ratio,
        }
    }

    pub fn resolve(&self, scores: ScoreVector) -> Resolution {
        let ranked = scores.ranked();
        let Some(&(_, top)) = ranked.first() else {
            return Resolution {
                primary: Intent::Invalid,
                co_intents: Vec::new(),
                modifiers: Vec::new(),
                scores,
            };
        };

        let modifiers: Vec<Intent> = ranked
            .iter()
            .map(|(i, _)| *i)
            .filter(|i| i.is_modifier())
            .collect();

        let mut pool: Vec<Intent> = ranked
            .iter()
            .filter(|(i, s)| !i.is_modifier() && *s >= top - self.near_tie_delta - EPSILON)
            .map(|(i, _)| *i)
            .collect();

        // Social niceties never outrank something the user wants done.
        if pool.iter().any(|i| i.is_actionable()) {
            pool.retain(|i| !i.is_social());
        }

        if scores.is_active(Intent::DataQuery) {
            for intent in FORCED_WITH_DATA {
                if scores.is_active(intent) && !pool.contains(&intent) {
                    pool.push(intent);
                }
            }
        }

        let any_actionable = ranked.iter().any(|(i, _)| i.is_actionable());

        // Mixed greeting and farewell with nothing else going on: leaving wins.
        if scores.is_active(Intent::Greeting) && scores.is_active(Intent::Farewell) && !any_actionable
        {
            pool.retain(|i| !i.is_social());
            if !pool.contains(&Intent::Farewell) {
                pool.push(Intent::Farewell);
            }
        }

        // Chit-chat phrased as a question is still chit-chat.
        let engaged = ranked
            .iter()
            .any(|(i, _)| i.is_actionable() && *i != Intent::Question);
        if scores.is_active(Intent::Smalltalk) && !engaged && pool.contains(&Intent::Question) {
            pool.retain(|i| *i != Intent::Question);
            if !pool.contains(&Intent::Smalltalk) {
                pool.push(Intent::Smalltalk);
            }
        }

        let primary = if pool.contains(&Intent::Troubleshooting) {
            Intent::Troubleshooting
        } else {
            PRECEDENCE
                .iter()
                .copied()
                .find(|i| pool.contains(i))
                .or_else(|| pool.first().copied())
                .unwrap_or_else(|| fallback(&ranked, &modifiers))
        };

        let floor = self.co_intent_ratio * top - EPSILON;
        let co_intents = ranked
            .iter()
            .filter(|(i, s)| *i != primary && !i.is_modifier() && *s >= floor)
            .map(|(i, _)| *i)
            .collect();

        Resolution {
            primary,
            co_intents,
            modifiers,
            scores,
        }
    }
}

/// Primary when nothing but modifiers reached the top.
fn fallback(ranked: &[(Intent, f64)], modifiers: &[Intent]) -> Intent {
    ranked
        .iter()
        .map(|(i, _)| *i)
        .find(|i| !i.is_modifier() && !i.is_social() && !i.is_fallback())
        .unwrap_or(if modifiers.is_empty() {
            ranked.first().map(|(i, _)| *i).unwrap_or(Intent::Invalid)
        } else {
            Intent::Statement
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(Intent, f64)]) -> ScoreVector {
        let mut v = ScoreVector::new();
        for (i, s) in entries {
            v.set(*i, *s);
        }
        v
    }

    fn resolve(entries: &[(Intent, f64)]) -> Resolution {
        Resolver::new(0.5, 0.6).resolve(vector(entries))
    }

    #[test]
    fn precedence_lists_every_non_modifier_once() {
        let mut seen = std::collections::HashSet::new();
        for i in PRECEDENCE {
            assert!(seen.insert(i));
            assert!(!i.is_modifier());
            assert_ne!(i, Intent::Ambiguous);
        }
    }

    #[test]
    fn all_zero_is_invalid() {
        let r = resolve(&[]);
        assert_eq!(r.primary, Intent::Invalid);
        assert!(r.co_intents.is_empty());
        assert!(r.modifiers.is_empty());
    }

    #[test]
    fn clear_winner() {
        let r = resolve(&[(Intent::Greeting, 2.5), (Intent::Question, 0.5)]);
        assert_eq!(r.primary, Intent::Greeting);
        assert!(r.co_intents.is_empty());
    }

    #[test]
    fn near_tie_uses_precedence() {
        let r = resolve(&[(Intent::MetadataRequest, 4.0), (Intent::DataQuery, 4.0)]);
        assert_eq!(r.primary, Intent::MetadataRequest);
        assert_eq!(r.co_intents, vec![Intent::DataQuery]);
    }

    #[test]
    fn modifiers_never_become_primary() {
        let r = resolve(&[(Intent::TimeChange, 1.0), (Intent::FilterChange, 1.0)]);
        assert_eq!(r.primary, Intent::Statement);
        assert_eq!(r.modifiers, vec![Intent::FilterChange, Intent::TimeChange]);
        assert!(r.co_intents.is_empty());
    }

    #[test]
    fn modifiers_ride_along_with_data() {
        let r = resolve(&[
            (Intent::DataQuery, 4.0),
            (Intent::TimeChange, 1.0),
            (Intent::FilterChange, 1.0),
        ]);
        assert_eq!(r.primary, Intent::DataQuery);
        assert!(r.has_modifier(Intent::TimeChange));
        assert!(r.has_modifier(Intent::FilterChange));
        assert!(!r.co_intents.contains(&Intent::TimeChange));
    }

    #[test]
    fn social_yields_to_actionable() {
        let r = resolve(&[(Intent::Greeting, 2.5), (Intent::DataQuery, 2.5)]);
        assert_eq!(r.primary, Intent::DataQuery);
        assert_eq!(r.co_intents, vec![Intent::Greeting]);
    }

    #[test]
    fn troubleshooting_forced_when_data_active() {
        let r = resolve(&[(Intent::DataQuery, 5.0), (Intent::Troubleshooting, 3.0)]);
        assert_eq!(r.primary, Intent::Troubleshooting);
        assert_eq!(r.co_intents, vec![Intent::DataQuery]);
    }

    #[test]
    fn compare_forced_when_data_active() {
        let r = resolve(&[(Intent::DataQuery, 5.0), (Intent::CompareRequest, 1.0)]);
        assert_eq!(r.primary, Intent::CompareRequest);
    }

    #[test]
    fn farewell_beats_greeting_when_idle() {
        let r = resolve(&[(Intent::Greeting, 3.0), (Intent::Farewell, 2.0)]);
        assert_eq!(r.primary, Intent::Farewell);
        assert_eq!(r.co_intents, vec![Intent::Greeting]);
    }

    #[test]
    fn farewell_beats_thanks_when_greeting_also_present() {
        let r = resolve(&[
            (Intent::Thanks, 2.0),
            (Intent::Greeting, 1.25),
            (Intent::Farewell, 2.0),
        ]);
        assert_eq!(r.primary, Intent::Farewell);
    }

    #[test]
    fn greeting_kept_when_task_present() {
        let r = resolve(&[(Intent::Greeting, 3.0), (Intent::Farewell, 2.0), (Intent::Help, 3.0)]);
        assert_eq!(r.primary, Intent::Help);
    }

    #[test]
    fn smalltalk_replaces_generic_question() {
        let r = resolve(&[(Intent::Question, 1.8), (Intent::Smalltalk, 1.5)]);
        assert_eq!(r.primary, Intent::Smalltalk);
    }

    #[test]
    fn smalltalk_loses_to_data() {
        let r = resolve(&[
            (Intent::DataQuery, 3.0),
            (Intent::Question, 1.8),
            (Intent::Smalltalk, 2.0),
        ]);
        assert_eq!(r.primary, Intent::DataQuery);
    }

    #[test]
    fn co_intents_are_sorted_and_bounded() {
        let r = resolve(&[
            (Intent::DataQuery, 5.0),
            (Intent::VizRequest, 2.5),
            (Intent::DownloadRequest, 3.0),
            (Intent::Question, 1.0),
        ]);
        assert_eq!(r.primary, Intent::DataQuery);
        assert_eq!(r.co_intents, vec![Intent::DownloadRequest]);
    }

    #[test]
    fn statement_floor_resolves_to_statement() {
        let r = resolve(&[(Intent::Statement, 0.1)]);
        assert_eq!(r.primary, Intent::Statement);
    }
}
