//! Core of the cvchat client: stream parsing, conversation state, the
//! submission cycle, the side panel state machine, config and logging.

pub mod attachments;
pub mod chat;
pub mod client;
pub mod config;
pub mod ids;
pub mod logging;
pub mod panel;

pub use cvchat_types as types;
