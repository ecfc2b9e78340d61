use std::time::{Duration, Instant};

use crate::shared::config::LivenessConfig;

/// What the debouncer did with a submitted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDecision {
    /// Scheduled for display once the debounce interval elapses.
    Scheduled,
    /// Another notification is still waiting to be shown.
    Throttled,
    /// The same message already reached its repeat cap.
    Suppressed,
}

#[derive(Debug)]
struct Pending {
    message: String,
    due: Instant,
}

/// Rate-limits user-facing warnings.
///
/// Two rules apply. A message identical to the previous one may be shown
/// at most `max_repeats` times in a row; a different message resets the
/// streak. Independently, an accepted message is held for `interval`
/// before display, and nothing else is accepted while it is pending.
///
/// Time is passed in explicitly so the owner's clock drives scheduling.
#[derive(Debug)]
pub struct NotificationDebouncer {
    interval: Duration,
    max_repeats: u32,
    last_message: Option<String>,
    repeat_count: u32,
    pending: Option<Pending>,
}

impl NotificationDebouncer {
    pub fn new(interval: Duration, max_repeats: u32) -> Self {
        Self {
            interval,
            max_repeats,
            last_message: None,
            repeat_count: 0,
            pending: None,
        }
    }

    pub fn from_config(config: &LivenessConfig) -> Self {
        Self::new(config.debounce_interval(), config.max_message_repeats)
    }

    pub fn submit(&mut self, message: &str, now: Instant) -> NoticeDecision {
        if self.pending.is_some() {
            return NoticeDecision::Throttled;
        }

        if self.last_message.as_deref() != Some(message) {
            self.last_message = Some(message.to_string());
            self.repeat_count = 0;
        } else if self.repeat_count >= self.max_repeats {
            return NoticeDecision::Suppressed;
        }

        self.repeat_count += 1;
        self.pending = Some(Pending {
            message: message.to_string(),
            due: now + self.interval,
        });
        NoticeDecision::Scheduled
    }

    /// Returns the pending message if its debounce interval has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.pending.take().map(|p| p.message)
        } else {
            None
        }
    }

    /// When the pending message becomes due, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any scheduled message. Repeat counters are kept.
    pub fn cancel(&mut self) {
        if let Some(p) = self.pending.take() {
            log::debug!("Cancelled pending notice: {}", p.message);
        }
    }
}

impl Default for NotificationDebouncer {
    fn default() -> Self {
        Self::from_config(&LivenessConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(200);

    /// Submits each message after the previous one has been shown and
    /// returns what reached the user.
    fn deliver(debouncer: &mut NotificationDebouncer, messages: &[&str]) -> Vec<String> {
        let mut now = Instant::now();
        let mut shown = Vec::new();
        for m in messages {
            debouncer.submit(m, now);
            now += INTERVAL;
            shown.extend(debouncer.poll(now));
        }
        shown
    }

    #[test]
    fn test_identical_messages_capped_at_two() {
        let mut debouncer = NotificationDebouncer::new(INTERVAL, 2);
        let shown = deliver(&mut debouncer, &["A", "A", "A", "A"]);
        assert_eq!(shown, vec!["A", "A"]);
    }

    #[test]
    fn test_different_message_resets_streak() {
        let mut debouncer = NotificationDebouncer::new(INTERVAL, 2);
        let shown = deliver(&mut debouncer, &["A", "A", "B", "A"]);
        assert_eq!(shown, vec!["A", "A", "B", "A"]);
    }

    #[test]
    fn test_suppressed_until_interrupted() {
        let mut debouncer = NotificationDebouncer::new(INTERVAL, 2);
        let shown = deliver(&mut debouncer, &["A", "A", "A", "B", "A", "A", "A"]);
        assert_eq!(shown, vec!["A", "A", "B", "A", "A"]);
    }

    #[test]
    fn test_message_waits_for_interval() {
        let mut debouncer = NotificationDebouncer::new(INTERVAL, 2);
        let t0 = Instant::now();

        assert_eq!(debouncer.submit("A", t0), NoticeDecision::Scheduled);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(199)), None);
        assert_eq!(debouncer.next_due(), Some(t0 + INTERVAL));
        assert_eq!(debouncer.poll(t0 + INTERVAL).as_deref(), Some("A"));
        assert_eq!(debouncer.poll(t0 + INTERVAL), None);
    }

    #[test]
    fn test_pending_message_throttles_everything() {
        let mut debouncer = NotificationDebouncer::new(INTERVAL, 2);
        let t0 = Instant::now();

        debouncer.submit("A", t0);
        assert_eq!(debouncer.submit("B", t0), NoticeDecision::Throttled);
        assert_eq!(debouncer.submit("A", t0), NoticeDecision::Throttled);
        assert_eq!(debouncer.poll(t0 + INTERVAL).as_deref(), Some("A"));
        assert_eq!(
            debouncer.submit("B", t0 + INTERVAL),
            NoticeDecision::Scheduled
        );
    }

    #[test]
    fn test_throttled_submissions_do_not_consume_budget() {
        let mut debouncer = NotificationDebouncer::new(INTERVAL, 2);
        let t0 = Instant::now();

        debouncer.submit("A", t0);
        for _ in 0..10 {
            debouncer.submit("A", t0);
        }
        debouncer.poll(t0 + INTERVAL);

        assert_eq!(
            debouncer.submit("A", t0 + INTERVAL),
            NoticeDecision::Scheduled
        );
    }

    #[test]
    fn test_cap_reports_suppressed() {
        let mut debouncer = NotificationDebouncer::new(Duration::ZERO, 1);
        let t0 = Instant::now();

        assert_eq!(debouncer.submit("A", t0), NoticeDecision::Scheduled);
        debouncer.poll(t0);
        assert_eq!(debouncer.submit("A", t0), NoticeDecision::Suppressed);
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debouncer = NotificationDebouncer::new(INTERVAL, 2);
        let t0 = Instant::now();

        debouncer.submit("A", t0);
        debouncer.cancel();

        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.poll(t0 + INTERVAL * 10), None);
        assert_eq!(debouncer.submit("B", t0), NoticeDecision::Scheduled);
    }

    #[test]
    fn test_default_uses_config_values() {
        let mut debouncer = NotificationDebouncer::default();
        let t0 = Instant::now();
        debouncer.submit("A", t0);
        assert_eq!(debouncer.next_due(), Some(t0 + Duration::from_millis(200)));
    }
}
