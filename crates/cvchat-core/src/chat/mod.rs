//! Conversation state, event reduction and submission cycles.

pub mod reducer;
pub mod store;
pub mod submission;

pub use reducer::{Applied, apply_event};
pub use store::{Conversation, SideChannels};
pub use submission::{
    CycleId, CycleUpdate, PreparedCycle, SubmissionController, SubmitOutcome, UpdateOutcome,
    pump_events, stream_cycle,
};
