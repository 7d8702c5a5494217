//! Dismissible user-facing messages (snackbars).
//!
//! One queue is shared by the screens of a session and injected into their
//! pipelines. A message stays queued until the UI acknowledges it by id;
//! `next_unshown` hands each message out at most once.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MessageId(Uuid);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub shown: bool,
}

#[derive(Clone, Default)]
pub struct MessageQueue {
    inner: Arc<Mutex<VecDeque<Message>>>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the queue.
    pub fn push(&self, text: impl Into<String>) -> MessageId {
        let id = MessageId(Uuid::new_v4());
        let text = text.into();
        tracing::debug!(%id, %text, "message queued");
        self.inner.lock().push_back(Message {
            id,
            text,
            shown: false,
        });
        id
    }

    /// Head of the queue if it has not been shown yet; marks it shown.
    ///
    /// Later messages wait until the head is acknowledged.
    pub fn next_unshown(&self) -> Option<Message> {
        let mut queue = self.inner.lock();
        let head = queue.front_mut()?;
        if head.shown {
            return None;
        }
        head.shown = true;
        Some(head.clone())
    }

    /// Remove a message. Returns false if it was not queued.
    pub fn acknowledge(&self, id: MessageId) -> bool {
        let mut queue = self.inner.lock();
        match queue.iter().position(|m| m.id == id) {
            Some(index) => {
                queue.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> Vec<Message> {
        self.inner.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_shown_once_in_order() {
        let queue = MessageQueue::new();
        let first = queue.push("Could not remove item");
        queue.push("Saved");

        let shown = queue.next_unshown().unwrap();
        assert_eq!(shown.id, first);
        assert!(queue.next_unshown().is_none());

        assert!(queue.acknowledge(first));
        assert_eq!(queue.next_unshown().unwrap().text, "Saved");
    }

    #[test]
    fn acknowledge_removes_by_id_anywhere() {
        let queue = MessageQueue::new();
        queue.push("a");
        let second = queue.push("b");
        assert!(queue.acknowledge(second));
        assert!(!queue.acknowledge(second));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pending()[0].text, "a");
    }

    #[test]
    fn clones_share_the_queue() {
        let queue = MessageQueue::new();
        let injected = queue.clone();
        injected.push("hello");
        assert!(!queue.is_empty());
    }
}
