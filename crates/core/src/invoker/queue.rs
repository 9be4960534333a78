//! Pending call queue
//!
//! Holds callables queued by any thread until the main thread drains them.
//! A single mutex covers both `push` and `drain_all`, so a drain is an atomic
//! snapshot: anything pushed after the swap lands in the next batch.

use parking_lot::Mutex;

/// A call to execute on the main thread
pub type PendingCall = Box<dyn FnOnce() + Send + 'static>;

/// FIFO queue of pending calls
#[derive(Default)]
pub struct InvocationQueue {
    calls: Mutex<Vec<PendingCall>>,
}

impl InvocationQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Append a call to the tail
    ///
    /// This is safe to call from any thread, including the main thread.
    pub fn push(&self, call: PendingCall) {
        self.calls.lock().push(call);
    }

    /// Remove and return every queued call in FIFO order
    ///
    /// Only the main-thread pump calls this; see [`super::MainThreadPump`].
    pub(crate) fn drain_all(&self) -> Vec<PendingCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    /// Number of calls currently queued
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// Check if no calls are queued
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> PendingCall) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let make = move |n: u32| -> PendingCall {
            let sink = Arc::clone(&sink);
            Box::new(move || sink.lock().push(n))
        };
        (log, make)
    }

    #[test]
    fn test_drain_preserves_order() {
        let queue = InvocationQueue::new();
        let (log, call) = recorder();

        for n in 0..5 {
            queue.push(call(n));
        }
        assert_eq!(queue.len(), 5);

        for pending in queue.drain_all() {
            pending();
        }

        assert_eq!(*log.lock(), vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drained_batch_not_returned_again() {
        let queue = InvocationQueue::new();
        let (_log, call) = recorder();

        queue.push(call(1));
        queue.push(call(2));

        assert_eq!(queue.drain_all().len(), 2);
        assert!(queue.drain_all().is_empty());
    }

    #[test]
    fn test_push_after_snapshot_goes_to_next_batch() {
        let queue = Arc::new(InvocationQueue::new());
        let (log, call) = recorder();

        // A call that enqueues more work while the batch is executing
        let requeue = Arc::clone(&queue);
        let late = call(2);
        queue.push(call(1));
        queue.push(Box::new(move || requeue.push(late)));

        let first = queue.drain_all();
        assert_eq!(first.len(), 2);
        for pending in first {
            pending();
        }
        assert_eq!(*log.lock(), vec![1]);

        let second = queue.drain_all();
        assert_eq!(second.len(), 1);
        for pending in second {
            pending();
        }
        assert_eq!(*log.lock(), vec![1, 2]);
    }

    #[test]
    fn test_unexecuted_calls_dropped_with_queue() {
        let marker = Arc::new(());
        let queue = InvocationQueue::new();

        let held = Arc::clone(&marker);
        queue.push(Box::new(move || drop(held)));
        assert_eq!(Arc::strong_count(&marker), 2);

        drop(queue);
        assert_eq!(Arc::strong_count(&marker), 1);
    }
}
