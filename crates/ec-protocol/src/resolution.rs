use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::scores::ScoreVector;

/// Outcome of resolving one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// The single prevailing intent.
    pub primary: Intent,
    /// Meaningfully supported secondary intents, highest score first.
    /// Never contains `primary` or a modifier.
    pub co_intents: Vec<Intent>,
    /// Active `time_change` / `filter_change` signals.
    pub modifiers: Vec<Intent>,
    /// The score vector the decision was made from.
    pub scores: ScoreVector,
}

impl Resolution {
    pub fn has_modifier(&self, intent: Intent) -> bool {
        self.modifiers.contains(&intent)
    }

    /// Score of the primary intent.
    pub fn confidence(&self) -> f64 {
        self.scores.get(self.primary)
    }
}

/// Why the spell corrector replaced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionReason {
    /// Nearest dictionary word within the edit-distance bound.
    Spelling,
    /// Letter runs of three or more collapsed to two.
    Elongation,
}

/// Diagnostic record of a single token substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    pub from: String,
    pub to: String,
    pub reason: CorrectionReason,
}

impl CorrectionRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, reason: CorrectionReason) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_serialization() {
        let mut scores = ScoreVector::new();
        scores.set(Intent::DataQuery, 4.0);
        scores.set(Intent::TimeChange, 1.0);
        let res = Resolution {
            primary: Intent::DataQuery,
            co_intents: vec![],
            modifiers: vec![Intent::TimeChange],
            scores,
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["primary"], "data_query");
        assert_eq!(json["modifiers"][0], "time_change");
        assert_eq!(json["scores"]["data_query"], 4.0);
        assert!(res.has_modifier(Intent::TimeChange));
        assert_eq!(res.confidence(), 4.0);
    }

    #[test]
    fn correction_reason_serialization() {
        let rec = CorrectionRecord::new("heyyyy", "heyy", CorrectionReason::Elongation);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""reason":"elongation""#));
    }
}
