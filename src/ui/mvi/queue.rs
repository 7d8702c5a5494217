//! Bounded drop-oldest queue used for actions and events.
//!
//! # Guarantees
//!
//! - **Never blocks the producer**: `send` always succeeds
//! - **Recency over completeness**: on overflow the oldest buffered item is
//!   discarded
//! - **FIFO**: surviving items are received in send order
//! - **Single consumer**: one [`QueueReceiver`] per queue

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Default capacity for action and event queues.
pub const DEFAULT_CAPACITY: usize = 20;

struct Shared<T> {
    buffer: Mutex<VecDeque<T>>,
    capacity: usize,
    notify: Notify,
    senders: AtomicUsize,
    dropped: AtomicU64,
}

/// Create a drop-oldest queue holding at most `capacity` items.
///
/// A capacity of zero is treated as one.
pub fn channel<T>(capacity: usize) -> (QueueSender<T>, QueueReceiver<T>) {
    let capacity = capacity.max(1);
    let shared = Arc::new(Shared {
        buffer: Mutex::new(VecDeque::with_capacity(capacity)),
        capacity,
        notify: Notify::new(),
        senders: AtomicUsize::new(1),
        dropped: AtomicU64::new(0),
    });
    (
        QueueSender {
            shared: Arc::clone(&shared),
        },
        QueueReceiver { shared },
    )
}

pub struct QueueSender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> QueueSender<T> {
    /// Push an item, evicting the oldest one when the buffer is full.
    ///
    /// Returns the evicted item, if any.
    pub fn send(&self, item: T) -> Option<T> {
        let evicted = {
            let mut buffer = self.shared.buffer.lock();
            let evicted = if buffer.len() >= self.shared.capacity {
                buffer.pop_front()
            } else {
                None
            };
            buffer.push_back(item);
            evicted
        };
        if evicted.is_some() {
            self.shared.dropped.fetch_add(1, Ordering::Relaxed);
        }
        self.shared.notify.notify_one();
        evicted
    }

    /// Number of items discarded by overflow so far.
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.shared.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.buffer.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        self.shared.senders.fetch_add(1, Ordering::SeqCst);
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for QueueSender<T> {
    fn drop(&mut self) {
        if self.shared.senders.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Wake the receiver so it can observe the close.
            self.shared.notify.notify_one();
        }
    }
}

pub struct QueueReceiver<T> {
    shared: Arc<Shared<T>>,
}

impl<T> QueueReceiver<T> {
    /// Wait for the next item.
    ///
    /// Returns `None` once every sender is gone and the buffer is drained.
    pub async fn recv(&self) -> Option<T> {
        loop {
            if let Some(item) = self.try_recv() {
                return Some(item);
            }
            if self.shared.senders.load(Ordering::SeqCst) == 0 {
                return None;
            }
            // notify_one stores a permit when nobody waits, so a send between
            // the check above and this await is not lost.
            self.shared.notify.notified().await;
        }
    }

    pub fn try_recv(&self) -> Option<T> {
        self.shared.buffer.lock().pop_front()
    }

    /// Take every buffered item in FIFO order.
    pub fn drain(&self) -> Vec<T> {
        self.shared.buffer.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.shared.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.buffer.lock().is_empty()
    }
}
