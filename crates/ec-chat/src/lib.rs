//! Chat front end for the energy statistics assistant.
//!
//! Ties the intent engine and entity extractor to per-conversation state
//! and turns each resolved utterance into reply text.

pub mod assistant;
pub mod config;
pub mod error;
pub mod repl;
pub mod responder;
pub mod session;

pub use assistant::{Assistant, Reply};
pub use config::ChatConfig;
pub use error::{ChatError, ChatResult};
pub use session::{Conversation, QueryContext, Rotation};
