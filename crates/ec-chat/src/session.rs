//! Per-conversation state: history, query context and reply rotation.
//!
//! Nothing here is process-wide; every conversation owns its own counters,
//! so independent conversations can run side by side.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use ec_protocol::{CountryRef, Entities, Intent, Measure, YearRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub at: DateTime<Utc>,
    pub speaker: Speaker,
    pub text: String,
    /// Primary intent of a user turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

/// Cycles through alternative phrasings, independently per reply kind.
#[derive(Debug, Clone, Default)]
pub struct Rotation {
    next: HashMap<&'static str, usize>,
}

impl Rotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next option for `kind`, wrapping around. Empty when `options` is.
    pub fn pick<'a>(&mut self, kind: &'static str, options: &[&'a str]) -> &'a str {
        if options.is_empty() {
            return "";
        }
        let slot = self.next.entry(kind).or_insert(0);
        let choice = options[*slot % options.len()];
        *slot = (*slot + 1) % options.len();
        choice
    }
}

/// What the user has asked about so far. Later mentions replace earlier ones
/// field by field, so "what about spain?" keeps the measure and years.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryContext {
    pub measure: Option<Measure>,
    pub products: Vec<String>,
    pub countries: Vec<CountryRef>,
    pub years: Vec<u16>,
    pub year_range: Option<YearRange>,
}

impl QueryContext {
    pub fn absorb(&mut self, entities: &Entities) {
        if let Some(measure) = entities.measures.first() {
            self.measure = Some(measure.clone());
        }
        if !entities.products.is_empty() {
            self.products = entities.products.clone();
        }
        if !entities.countries.is_empty() {
            self.countries = entities.countries.clone();
        }
        if let Some(range) = entities.year_range {
            self.year_range = Some(range);
            self.years.clear();
        } else if !entities.years.is_empty() {
            self.years = entities.years.clone();
            self.year_range = None;
        }
    }

    pub fn has_period(&self) -> bool {
        self.year_range.is_some() || !self.years.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct Conversation {
    id: Uuid,
    started_at: DateTime<Utc>,
    turns: VecDeque<Turn>,
    history_limit: usize,
    user_turns: usize,
    pub context: QueryContext,
    pub rotation: Rotation,
}

impl Conversation {
    pub fn new(history_limit: usize) -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            turns: VecDeque::new(),
            history_limit: history_limit.max(1),
            user_turns: 0,
            context: QueryContext::default(),
            rotation: Rotation::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// True until the first user turn has been recorded.
    pub fn is_first_turn(&self) -> bool {
        self.user_turns == 0
    }

    pub fn user_turns(&self) -> usize {
        self.user_turns
    }

    pub fn push_user(&mut self, text: &str, intent: Intent) {
        self.user_turns += 1;
        self.push(Turn {
            at: Utc::now(),
            speaker: Speaker::User,
            text: text.to_string(),
            intent: Some(intent),
        });
    }

    pub fn push_assistant(&mut self, text: &str) {
        self.push(Turn {
            at: Utc::now(),
            speaker: Speaker::Assistant,
            text: text.to_string(),
            intent: None,
        });
    }

    fn push(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.history_limit {
            self.turns.pop_front();
        }
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Forget history and context. Turn position is kept, so a later
    /// "good evening" still reads as a mid-conversation phrase.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.context.clear();
    }
}
