//! Rolling notification queue.
//!
//! A single-slot FIFO: messages queue up, but only one is ever presented.
//! An active message must finish its display lifecycle (expiry or
//! dismissal, then the exit hook) before the next pending message is
//! promoted. Publishing while a message is showing asks the active message
//! to close early, but promotion still waits for `exited()`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Presentation severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Warning,
    Info,
}

/// One queued message. Never mutated after creation; the key is unique even
/// when text and severity repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub text: String,
    pub severity: Severity,
    /// Monotonically increasing identity.
    pub key: u64,
}

/// FIFO single-slot presentation queue.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: VecDeque<NotificationMessage>,
    active: Option<NotificationMessage>,
    /// Whether the active message is currently showing (false while it is
    /// playing its exit transition).
    open: bool,
    next_key: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the pending queue.
    pub fn publish(&mut self, text: impl Into<String>, severity: Severity) {
        let key = self.next_key;
        self.next_key += 1;
        self.pending.push_back(NotificationMessage {
            text: text.into(),
            severity,
            key,
        });
    }

    /// One processing step. Promotes the next pending message when nothing
    /// is active; if something is showing and more messages are waiting,
    /// asks the active message to close early. Returns the newly promoted
    /// message, if any.
    pub fn poll(&mut self) -> Option<&NotificationMessage> {
        if self.active.is_none() {
            if let Some(next) = self.pending.pop_front() {
                self.active = Some(next);
                self.open = true;
                return self.active.as_ref();
            }
        } else if self.open && !self.pending.is_empty() {
            self.open = false;
        }
        None
    }

    /// The active message (showing or exiting), if any.
    pub fn active(&self) -> Option<&NotificationMessage> {
        self.active.as_ref()
    }

    /// Whether the active message is currently showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Close the active message (timer expiry or explicit dismissal). The
    /// slot stays occupied until `exited()` runs.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Exit-transition hook: the active message has fully left the screen.
    pub fn exited(&mut self) {
        self.active = None;
        self.open = false;
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages_shown_one_at_a_time_in_order() {
        let mut q = NotificationQueue::new();
        q.publish("A", Severity::Info);
        q.publish("B", Severity::Warning);
        q.publish("C", Severity::Success);

        assert_eq!(q.poll().unwrap().text, "A");
        // B must not appear while A occupies the slot
        q.dismiss();
        assert!(q.poll().is_none());
        assert_eq!(q.active().unwrap().text, "A");

        q.exited();
        assert_eq!(q.poll().unwrap().text, "B");
        q.dismiss();
        q.exited();
        assert_eq!(q.poll().unwrap().text, "C");
        q.dismiss();
        q.exited();
        assert!(q.poll().is_none());
    }

    #[test]
    fn test_publish_while_active_closes_current_first() {
        let mut q = NotificationQueue::new();
        q.publish("A", Severity::Info);
        q.poll();
        assert!(q.is_open());

        q.publish("B", Severity::Info);
        // Processing notices the backlog and begins closing A
        assert!(q.poll().is_none());
        assert!(!q.is_open());
        assert_eq!(q.active().unwrap().text, "A");

        // Only after A's exit hook does B become active
        q.exited();
        assert_eq!(q.poll().unwrap().text, "B");
    }

    #[test]
    fn test_keys_are_monotonic_even_for_identical_messages() {
        let mut q = NotificationQueue::new();
        q.publish("same", Severity::Warning);
        q.publish("same", Severity::Warning);

        let first_key = q.poll().unwrap().key;
        q.dismiss();
        q.exited();
        let second_key = q.poll().unwrap().key;
        assert!(second_key > first_key);
    }

    #[test]
    fn test_poll_idle_queue_is_noop() {
        let mut q = NotificationQueue::new();
        assert!(q.poll().is_none());
        assert!(q.active().is_none());
        assert!(!q.is_open());
    }
}
