use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Conversational purpose of a single user utterance.
///
/// The set is closed. Variant declaration order is also the tie-break order
/// used when two intents carry the same score, so it must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    Thanks,
    Affirmative,
    Negative,
    Help,
    Troubleshooting,
    DownloadRequest,
    VizRequest,
    DataQuery,
    FilterChange,
    TimeChange,
    MetadataRequest,
    CompareRequest,
    Command,
    Question,
    Smalltalk,
    /// Context-dependent greeting/farewell phrase. Always folded into
    /// `Greeting` or `Farewell` before a score vector leaves the scorer.
    Ambiguous,
    Statement,
    Invalid,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 20] = [
        Intent::Greeting,
        Intent::Farewell,
        Intent::Thanks,
        Intent::Affirmative,
        Intent::Negative,
        Intent::Help,
        Intent::Troubleshooting,
        Intent::DownloadRequest,
        Intent::VizRequest,
        Intent::DataQuery,
        Intent::FilterChange,
        Intent::TimeChange,
        Intent::MetadataRequest,
        Intent::CompareRequest,
        Intent::Command,
        Intent::Question,
        Intent::Smalltalk,
        Intent::Ambiguous,
        Intent::Statement,
        Intent::Invalid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Farewell => "farewell",
            Self::Thanks => "thanks",
            Self::Affirmative => "affirmative",
            Self::Negative => "negative",
            Self::Help => "help",
            Self::Troubleshooting => "troubleshooting",
            Self::DownloadRequest => "download_request",
            Self::VizRequest => "viz_request",
            Self::DataQuery => "data_query",
            Self::FilterChange => "filter_change",
            Self::TimeChange => "time_change",
            Self::MetadataRequest => "metadata_request",
            Self::CompareRequest => "compare_request",
            Self::Command => "command",
            Self::Question => "question",
            Self::Smalltalk => "smalltalk",
            Self::Ambiguous => "ambiguous",
            Self::Statement => "statement",
            Self::Invalid => "invalid",
        }
    }

    /// Refines another intent's query but never becomes primary.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::TimeChange | Self::FilterChange)
    }

    /// Social intents that yield to an equally strong actionable request.
    pub fn is_social(&self) -> bool {
        matches!(
            self,
            Self::Greeting | Self::Thanks | Self::Farewell | Self::Smalltalk
        )
    }

    /// Degraded outcomes used only when nothing else carries signal.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Statement | Self::Invalid)
    }

    /// Anything the user can act on: not a modifier, not social, not a fallback.
    pub fn is_actionable(&self) -> bool {
        !self.is_modifier() && !self.is_social() && !self.is_fallback() && *self != Self::Ambiguous
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name an intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent: {0}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| UnknownIntent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_variant_once() {
        let mut seen = std::collections::HashSet::new();
        for intent in Intent::ALL {
            assert!(seen.insert(intent), "{intent} listed twice");
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn serialization_matches_as_str() {
        for intent in Intent::ALL {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(json, format!("\"{}\"", intent.as_str()));
        }
    }

    #[test]
    fn parse_roundtrips_labels() {
        assert_eq!("viz_request".parse::<Intent>(), Ok(Intent::VizRequest));
        assert_eq!(
            "weather".parse::<Intent>(),
            Err(UnknownIntent("weather".into()))
        );
    }

    #[test]
    fn modifiers_are_not_actionable() {
        assert!(Intent::TimeChange.is_modifier());
        assert!(Intent::FilterChange.is_modifier());
        assert!(!Intent::TimeChange.is_actionable());
        assert!(!Intent::Greeting.is_actionable());
        assert!(!Intent::Statement.is_actionable());
        assert!(Intent::Question.is_actionable());
        assert!(Intent::Negative.is_actionable());
    }
}
