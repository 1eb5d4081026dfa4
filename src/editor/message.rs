use bevy::prelude::*;

/// Transient status line. Timed against the app's monotonic clock in milliseconds.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDisplay {
    message: String,
    duration_ms: u64,
    started_at_ms: u64,
}

impl MessageDisplay {
    pub fn show(&mut self, message: &str, seconds: f32, now_ms: u64) {
        self.message = message.to_string();
        self.duration_ms = (seconds.max(0.0) * 1000.0).round() as u64;
        self.started_at_ms = now_ms;
    }

    /// Clears the message once strictly more than its duration has elapsed.
    pub fn update(&mut self, now_ms: u64) {
        if !self.message.is_empty() && now_ms.saturating_sub(self.started_at_ms) > self.duration_ms {
            self.message.clear();
        }
    }

    pub fn current(&self) -> Option<&str> {
        (!self.message.is_empty()).then_some(self.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_after_its_duration() {
        let mut display = MessageDisplay::default();
        display.show("Spout set", 1.0, 5_000);
        display.update(6_000);
        assert_eq!(display.current(), Some("Spout set"));
        display.update(6_001);
        assert_eq!(display.current(), None);
    }

    #[test]
    fn newer_message_restarts_the_clock() {
        let mut display = MessageDisplay::default();
        display.show("Bucket placed", 1.0, 0);
        display.show("Level saved", 2.0, 900);
        display.update(2_000);
        assert_eq!(display.current(), Some("Level saved"));
        display.update(2_901);
        assert_eq!(display.current(), None);
    }

    #[test]
    fn empty_message_shows_nothing() {
        let mut display = MessageDisplay::default();
        display.show("", 2.0, 0);
        assert_eq!(display.current(), None);
        display.update(10);
        assert_eq!(display.current(), None);
    }
}
