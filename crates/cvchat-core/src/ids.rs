//! Time-derived message ids.

use cvchat_types::MessageId;

/// Suffix that marks assistant placeholders.
const ASSISTANT_SUFFIX: &str = "-assistant";

/// Hands out `<unix-millis>` ids, strictly increasing within the process
/// even when two submissions land in the same millisecond.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last_ms: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the wall clock.
    pub fn next_id(&mut self) -> MessageId {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Next id given the current time in unix millis.
    pub fn next_at(&mut self, now_ms: i64) -> MessageId {
        let ms = now_ms.max(self.last_ms + 1);
        self.last_ms = ms;
        MessageId::new(ms.to_string())
    }
}

/// Placeholder id paired with a user message id.
pub fn assistant_id_for(user_id: &MessageId) -> MessageId {
    MessageId::new(format!("{user_id}{ASSISTANT_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_within_same_millisecond() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000).as_str(), "1000");
        assert_eq!(ids.next_at(1_000).as_str(), "1001");
        assert_eq!(ids.next_at(999).as_str(), "1002");
        assert_eq!(ids.next_at(5_000).as_str(), "5000");
    }

    #[test]
    fn assistant_id_appends_suffix() {
        assert_eq!(
            assistant_id_for(&MessageId::new("1700000000000")).as_str(),
            "1700000000000-assistant"
        );
    }
}
