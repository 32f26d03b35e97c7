//! Shared wire and domain types for cvchat.

pub mod event;
pub mod message;
pub mod request;

pub use event::{ChatEvent, RawEvent};
pub use message::{Attachment, Message, MessageId, Role};
pub use request::{ChatRequest, RequestData, ResetRequest, WireMessage};
