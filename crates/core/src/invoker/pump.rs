//! Main thread pump
//!
//! Drains the invocation queue once per event-loop tick and runs each call on
//! the calling thread. Every call runs under its own unwind guard, so a
//! panicking call is reported and the rest of the batch still runs.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::ThreadId;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;

use super::queue::InvocationQueue;

/// Pumps slower than this are logged as a warning (one 60Hz frame)
const SLOW_PUMP_THRESHOLD: Duration = Duration::from_millis(16);

/// A pending call that panicked while executing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFault {
    /// Position of the call within its batch
    pub index: usize,
    /// Panic message, if the payload was a string
    pub message: String,
}

impl fmt::Display for CallFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call #{} panicked: {}", self.index, self.message)
    }
}

/// Outcome of a single pump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Calls run, including the ones that faulted
    pub executed: usize,
    /// Calls that panicked
    pub faulted: usize,
    /// Wall time spent running the batch
    pub elapsed: Duration,
}

impl PumpReport {
    /// Check if nothing was executed
    pub fn is_empty(&self) -> bool {
        self.executed == 0
    }

    pub(crate) fn merge(&mut self, other: PumpReport) {
        self.executed += other.executed;
        self.faulted += other.faulted;
        self.elapsed += other.elapsed;
    }
}

/// Executes drained calls on the main thread
pub struct MainThreadPump {
    /// Thread allowed to pump
    main_thread: ThreadId,
    /// Optional channel receiving a copy of every fault
    fault_reporter: Option<Sender<CallFault>>,
    /// Pump counter (non-empty and empty pumps alike)
    tick_count: AtomicU64,
    /// Duration of the last non-empty pump (nanoseconds)
    last_pump_time_ns: AtomicU64,
}

impl MainThreadPump {
    /// Create a pump bound to the calling thread
    pub fn new() -> Self {
        Self::bound_to(std::thread::current().id())
    }

    /// Create a pump bound to a specific thread
    pub fn bound_to(main_thread: ThreadId) -> Self {
        Self {
            main_thread,
            fault_reporter: None,
            tick_count: AtomicU64::new(0),
            last_pump_time_ns: AtomicU64::new(0),
        }
    }

    /// Forward faults to `reporter` in addition to logging them
    pub fn with_fault_reporter(mut self, reporter: Sender<CallFault>) -> Self {
        self.set_fault_reporter(reporter);
        self
    }

    pub(crate) fn set_fault_reporter(&mut self, reporter: Sender<CallFault>) {
        self.fault_reporter = Some(reporter);
    }

    /// Thread this pump is bound to
    pub fn main_thread(&self) -> ThreadId {
        self.main_thread
    }

    /// Check if the current thread may pump
    pub fn is_main_thread(&self) -> bool {
        std::thread::current().id() == self.main_thread
    }

    /// Get the number of pumps so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    /// Get the duration of the last non-empty pump in nanoseconds
    pub fn last_pump_time_ns(&self) -> u64 {
        self.last_pump_time_ns.load(Ordering::Relaxed)
    }

    /// Drain `queue` and run every call in order
    ///
    /// Never blocks waiting for work: an empty queue returns immediately.
    ///
    /// # Panics
    /// Panics if called from any thread other than the bound main thread.
    pub fn pump(&self, queue: &InvocationQueue) -> PumpReport {
        assert!(
            self.is_main_thread(),
            "MainThreadPump::pump called from {:?}, expected main thread {:?}",
            std::thread::current().id(),
            self.main_thread
        );

        self.tick_count.fetch_add(1, Ordering::Relaxed);

        let batch = queue.drain_all();
        if batch.is_empty() {
            return PumpReport::default();
        }

        let start = Instant::now();
        let mut report = PumpReport::default();

        for (index, call) in batch.into_iter().enumerate() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(call)) {
                report.faulted += 1;
                self.report_fault(CallFault {
                    index,
                    message: panic_message(payload.as_ref()),
                });
            }
            report.executed += 1;
        }

        report.elapsed = start.elapsed();
        let elapsed_ns = report.elapsed.as_nanos() as u64;
        self.last_pump_time_ns.store(elapsed_ns, Ordering::Relaxed);

        if report.elapsed > SLOW_PUMP_THRESHOLD {
            tracing::warn!(
                "Main thread pump took {}ms for {} calls (tick {})",
                report.elapsed.as_millis(),
                report.executed,
                self.tick_count()
            );
        } else {
            tracing::trace!("Pumped {} main thread calls", report.executed);
        }

        report
    }

    fn report_fault(&self, fault: CallFault) {
        tracing::error!("Main thread {}", fault);

        if let Some(reporter) = &self.fault_reporter {
            if reporter.send(fault).is_err() {
                tracing::debug!("Fault reporter disconnected");
            }
        }
    }
}

impl Default for MainThreadPump {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a readable message from a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
