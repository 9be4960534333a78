//! Main thread invoker
//!
//! Lets any thread schedule work for the main thread. Calls are queued by
//! [`Invoker::invoke`] and executed in arrival order the next time the host
//! event loop calls [`Invoker::pump`] on the main thread.
//!
//! # Example
//!
//! ```ignore
//! use mufw_core::invoker::Invoker;
//!
//! let invoker = Invoker::setup();
//!
//! let worker = std::sync::Arc::clone(&invoker);
//! std::thread::spawn(move || {
//!     worker.invoke(|| tracing::info!("running on the main thread"));
//! });
//!
//! // Once per event-loop iteration, on the main thread
//! invoker.pump();
//! ```

pub mod pump;
pub mod queue;

use std::sync::{Arc, OnceLock};
use std::thread::ThreadId;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::dispatch::Dispatcher;

pub use pump::{CallFault, MainThreadPump, PumpReport};
pub use queue::{InvocationQueue, PendingCall};

/// Maximum pump rounds during a flush (calls may keep queueing more calls)
const FLUSH_MAX_ROUNDS: usize = 64;

/// Process-wide invoker storage
static GLOBAL: OnceLock<Arc<Invoker>> = OnceLock::new();

/// Queue plus pump, bound to one main thread
pub struct Invoker {
    queue: InvocationQueue,
    pump: MainThreadPump,
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker").finish_non_exhaustive()
    }
}

impl Invoker {
    /// Create an invoker whose main thread is the calling thread
    pub fn new() -> Self {
        Self {
            queue: InvocationQueue::new(),
            pump: MainThreadPump::new(),
        }
    }

    /// Forward faults from panicking calls to `reporter`
    pub fn with_fault_reporter(mut self, reporter: Sender<CallFault>) -> Self {
        self.pump.set_fault_reporter(reporter);
        self
    }

    /// Create the process-wide invoker
    ///
    /// Must run once, on the main thread, before any thread calls `invoke`
    /// and before the event loop starts ticking.
    ///
    /// # Panics
    /// Panics if called more than once, or if a different thread was already
    /// recorded as the main thread.
    pub fn setup() -> Arc<Invoker> {
        // Thread check first: a rejected setup must not leave an invoker behind
        if mufw_runtime::init_main_thread().is_err() {
            assert!(
                mufw_runtime::is_main_thread(),
                "Invoker::setup must run on the recorded main thread"
            );
        }

        let invoker = Arc::new(Invoker::new());
        if GLOBAL.set(Arc::clone(&invoker)).is_err() {
            panic!("Invoker::setup called more than once");
        }

        tracing::info!("Invoker set up on main thread {:?}", invoker.main_thread());
        invoker
    }

    /// Get the process-wide invoker
    ///
    /// # Panics
    /// Panics if called before `Invoker::setup`
    pub fn global() -> &'static Arc<Invoker> {
        GLOBAL.get().expect("Invoker not set up")
    }

    /// Try to get the process-wide invoker without panicking
    pub fn try_global() -> Option<&'static Arc<Invoker>> {
        GLOBAL.get()
    }

    /// Queue `f` to run on the main thread
    ///
    /// Returns immediately. The outcome of `f` is not reported back; use
    /// [`Invoker::invoke_with_reply`] when a result is needed.
    pub fn invoke<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.push(Box::new(f));
    }

    /// Queue `f` and receive its return value through a one-shot channel
    ///
    /// The receiver disconnects without a value if `f` panics or the call is
    /// discarded before it runs.
    pub fn invoke_with_reply<T, F>(&self, f: F) -> Receiver<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        self.invoke(move || {
            // Receiver may have been dropped by an uninterested caller
            let _ = tx.send(f());
        });
        rx
    }

    /// Run every call queued so far
    ///
    /// Called once per event-loop tick from the main thread.
    ///
    /// # Panics
    /// Panics if called off the main thread.
    pub fn pump(&self) -> PumpReport {
        self.pump.pump(&self.queue)
    }

    /// Run queued calls until the queue stays empty
    ///
    /// Used during orderly shutdown. Calls that keep re-queueing work are cut
    /// off after a bounded number of rounds and the rest is discarded.
    pub fn flush(&self) -> PumpReport {
        let mut total = PumpReport::default();

        for _ in 0..FLUSH_MAX_ROUNDS {
            if self.queue.is_empty() {
                break;
            }
            total.merge(self.pump());
        }

        let left = self.queue.len();
        if left > 0 {
            tracing::warn!(
                "Flush stopped after {} rounds with {} calls still queued",
                FLUSH_MAX_ROUNDS,
                left
            );
        } else if !total.is_empty() {
            tracing::debug!("Flushed {} main thread calls", total.executed);
        }

        total
    }

    /// Number of calls waiting for the next pump
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Thread that pumps this invoker
    pub fn main_thread(&self) -> ThreadId {
        self.pump.main_thread()
    }

    /// Get the number of pumps so far
    pub fn tick_count(&self) -> u64 {
        self.pump.tick_count()
    }

    /// Get the duration of the last non-empty pump in nanoseconds
    pub fn last_pump_time_ns(&self) -> u64 {
        self.pump.last_pump_time_ns()
    }
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for Invoker {
    fn submit(&self, call: PendingCall) {
        self.queue.push(call);
    }
}

impl Drop for Invoker {
    fn drop(&mut self) {
        let left = self.queue.len();
        if left > 0 {
            tracing::debug!("Discarding {} never-executed main thread calls", left);
        }
    }
}
