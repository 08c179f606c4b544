use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Accumulated score per intent for one utterance.
///
/// Every intent is always present; zero means "no signal". Scores are never
/// negative and never carry over between utterances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector(BTreeMap<Intent, f64>);

impl ScoreVector {
    pub fn new() -> Self {
        Self(Intent::ALL.iter().map(|i| (*i, 0.0)).collect())
    }

    /// Vector carrying a single signal, e.g. `invalid = 1` for empty input.
    pub fn only(intent: Intent, score: f64) -> Self {
        let mut v = Self::new();
        v.set(intent, score);
        v
    }

    pub fn get(&self, intent: Intent) -> f64 {
        self.0.get(&intent).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, intent: Intent, score: f64) {
        self.0.insert(intent, score.max(0.0));
    }

    pub fn add(&mut self, intent: Intent, delta: f64) {
        let current = self.get(intent);
        self.set(intent, current + delta);
    }

    /// Multiply one score in place (suppression rules).
    pub fn scale(&mut self, intent: Intent, factor: f64) {
        let current = self.get(intent);
        self.set(intent, current * factor);
    }

    pub fn is_active(&self, intent: Intent) -> bool {
        self.get(intent) > 0.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|s| *s <= 0.0)
    }

    /// Intents with a positive score, highest first. Ties keep declaration order.
    pub fn ranked(&self) -> Vec<(Intent, f64)> {
        let mut active: Vec<(Intent, f64)> = self
            .0
            .iter()
            .filter(|(_, s)| **s > 0.0)
            .map(|(i, s)| (*i, *s))
            .collect();
        active.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        active
    }

    pub fn top(&self) -> Option<(Intent, f64)> {
        self.ranked().into_iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Intent, f64)> + '_ {
        self.0.iter().map(|(i, s)| (*i, *s))
    }
}

impl Default for ScoreVector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vector_is_all_zero() {
        let v = ScoreVector::new();
        assert!(v.is_empty());
        assert_eq!(v.iter().count(), Intent::ALL.len());
        assert!(v.top().is_none());
    }

    #[test]
    fn scores_never_go_negative() {
        let mut v = ScoreVector::new();
        v.add(Intent::Question, -3.0);
        assert_eq!(v.get(Intent::Question), 0.0);
    }

    #[test]
    fn ranked_breaks_ties_by_declaration_order() {
        let mut v = ScoreVector::new();
        v.set(Intent::Farewell, 2.0);
        v.set(Intent::Greeting, 2.0);
        v.set(Intent::DataQuery, 3.5);
        let ranked = v.ranked();
        assert_eq!(ranked[0].0, Intent::DataQuery);
        assert_eq!(ranked[1].0, Intent::Greeting);
        assert_eq!(ranked[2].0, Intent::Farewell);
    }

    #[test]
    fn serializes_as_flat_map() {
        let v = ScoreVector::only(Intent::Invalid, 1.0);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["invalid"], 1.0);
        assert_eq!(json["greeting"], 0.0);
    }
}
