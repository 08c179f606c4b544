//! One turn of the assistant: resolve, extract, update state, reply.

use std::sync::Arc;

use ec_intent::IntentEngine;
use ec_protocol::{Entities, Intent, Resolution};

use crate::config::ChatConfig;
use crate::error::ChatResult;
use crate::responder::compose_reply;
use crate::session::Conversation;

/// Outcome of one user turn.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub resolution: Resolution,
    pub entities: Entities,
}

/// Stateless turn handler; all conversation state lives in [`Conversation`].
#[derive(Clone)]
pub struct Assistant {
    engine: Arc<IntentEngine>,
    history_limit: usize,
    explain: bool,
}

impl Assistant {
    pub fn new(config: &ChatConfig) -> ChatResult<Self> {
        let engine = IntentEngine::new(config.engine.clone())?;
        Ok(Self::with_engine(Arc::new(engine), config))
    }

    pub fn with_engine(engine: Arc<IntentEngine>, config: &ChatConfig) -> Self {
        Self {
            engine,
            history_limit: config.history_limit,
            explain: config.explain,
        }
    }

    pub fn engine(&self) -> &IntentEngine {
        &self.engine
    }

    pub fn start(&self) -> Conversation {
        let conversation = Conversation::new(self.history_limit);
        tracing::info!(conversation = %conversation.id(), "conversation started");
        conversation
    }

    pub fn respond(&self, conversation: &mut Conversation, text: &str) -> Reply {
        let analysis = self.engine.explain(text, conversation.is_first_turn());
        if self.explain
            && let Ok(json) = serde_json::to_string(&analysis)
        {
            tracing::info!(conversation = %conversation.id(), analysis = %json, "turn explained");
        }

        let entities = ec_entities::extract(&analysis.cleaned);
        let resolution = analysis.resolution;

        conversation.push_user(text, resolution.primary);
        if resolution.primary == Intent::Command {
            conversation.reset();
        } else {
            conversation.context.absorb(&entities);
        }

        let reply = compose_reply(&resolution, &conversation.context, &mut conversation.rotation);
        conversation.push_assistant(&reply);

        tracing::debug!(
            conversation = %conversation.id(),
            turn = conversation.user_turns(),
            primary = %resolution.primary,
            confidence = resolution.confidence(),
            corrections = analysis.corrections.len(),
            "turn handled"
        );

        Reply {
            text: reply,
            resolution,
            entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> Assistant {
        Assistant::new(&ChatConfig::default()).unwrap()
    }

    #[test]
    fn follow_up_reuses_context() {
        let a = assistant();
        let mut c = a.start();
        let first = a.respond(&mut c, "What is the electricity price in France in 2020?");
        assert_eq!(first.resolution.primary, Intent::DataQuery);
        assert_eq!(first.text, "Looking up price of electricity in France for 2020.");

        let second = a.respond(&mut c, "and in Spain?");
        assert!(second.resolution.has_modifier(Intent::FilterChange));
        assert_eq!(c.context.countries[0].name, "Spain");
        assert_eq!(c.context.years, vec![2020]);
        assert_eq!(second.text, "Updated: price of electricity in Spain for 2020.");
    }

    #[test]
    fn command_resets_context() {
        let a = assistant();
        let mut c = a.start();
        a.respond(&mut c, "coal production in poland");
        assert!(!c.context.is_empty());
        let reply = a.respond(&mut c, "start over");
        assert_eq!(reply.resolution.primary, Intent::Command);
        assert!(c.context.is_empty());
    }

    #[test]
    fn ambiguous_phrase_depends_on_turn_position() {
        let a = assistant();
        let mut c = a.start();
        assert_eq!(a.respond(&mut c, "good evening").resolution.primary, Intent::Greeting);
        assert_eq!(a.respond(&mut c, "good evening").resolution.primary, Intent::Farewell);
    }

    #[test]
    fn history_records_both_speakers() {
        let a = assistant();
        let mut c = a.start();
        a.respond(&mut c, "hi");
        assert_eq!(c.turns().count(), 2);
        assert_eq!(c.turns().next().unwrap().intent, Some(Intent::Greeting));
    }
}
