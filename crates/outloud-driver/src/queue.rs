//! The pending-utterance buffer.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::Notify;

use outloud_core::QueueItem;

/// Unbounded FIFO buffer between speech producers and the single worker.
///
/// `push` and `clear` may be called from any task or thread at any time
/// and never block. `pop` is reserved for the worker and suspends until
/// an item is available. No ordering is guaranteed between a `clear` and
/// a `push` racing from different callers; whichever takes the buffer
/// lock first wins.
pub struct UtteranceQueue {
    items: Mutex<VecDeque<QueueItem>>,
    available: Notify,
}

impl UtteranceQueue {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Notify::new(),
        }
    }

    /// Enqueue an item. Never blocks, never fails.
    pub fn push(&self, item: QueueItem) {
        self.items
            .lock()
            .expect("utterance queue lock poisoned")
            .push_back(item);
        self.available.notify_one();
    }

    /// Remove and return the oldest item, suspending until one exists.
    ///
    /// Single-consumer: only the worker calls this.
    pub async fn pop(&self) -> QueueItem {
        loop {
            // Register interest before checking so a push racing with the
            // check leaves a stored permit instead of a lost wakeup.
            let notified = self.available.notified();
            if let Some(item) = self
                .items
                .lock()
                .expect("utterance queue lock poisoned")
                .pop_front()
            {
                return item;
            }
            notified.await;
        }
    }

    /// Atomically drop everything currently buffered.
    ///
    /// Does not affect an item already handed to the worker.
    pub fn clear(&self) {
        self.items
            .lock()
            .expect("utterance queue lock poisoned")
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .expect("utterance queue lock poisoned")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UtteranceQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use outloud_core::Utterance;
    use tokio::time::timeout;

    use super::*;

    fn speak_item(text: &str) -> QueueItem {
        QueueItem::Speak(Utterance::from_text(text))
    }

    #[tokio::test]
    async fn pop_returns_items_in_push_order() {
        let queue = UtteranceQueue::new();
        queue.push(speak_item("a"));
        queue.push(speak_item("b"));
        queue.push(speak_item("c"));

        assert_eq!(queue.pop().await, speak_item("a"));
        assert_eq!(queue.pop().await, speak_item("b"));
        assert_eq!(queue.pop().await, speak_item("c"));
    }

    #[tokio::test]
    async fn pop_suspends_until_push() {
        let queue = Arc::new(UtteranceQueue::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.pop().await })
        };

        // Give the consumer a chance to park on the empty queue.
        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.push(QueueItem::Shutdown);

        let item = timeout(Duration::from_secs(2), consumer)
            .await
            .expect("pop never woke")
            .expect("consumer task panicked");
        assert_eq!(item, QueueItem::Shutdown);
    }

    #[tokio::test]
    async fn clear_drops_everything_buffered() {
        let queue = UtteranceQueue::new();
        queue.push(speak_item("a"));
        queue.push(speak_item("b"));
        assert_eq!(queue.len(), 2);

        queue.clear();
        assert!(queue.is_empty());

        // Clearing an empty queue is a no-op, not an error.
        queue.clear();
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn push_after_clear_is_observed() {
        let queue = UtteranceQueue::new();
        queue.push(speak_item("stale"));
        queue.clear();
        queue.push(speak_item("fresh"));

        assert_eq!(queue.pop().await, speak_item("fresh"));
    }
}
