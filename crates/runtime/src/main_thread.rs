//! Main thread identity
//!
//! The main thread is the single thread that drives the host event loop. It is
//! recorded once during startup and used for runtime thread checks.

use std::sync::OnceLock;
use std::thread::ThreadId;

use crate::RuntimeError;

/// Main thread id storage
static MAIN_THREAD: OnceLock<ThreadId> = OnceLock::new();

/// Record the calling thread as the process main thread
///
/// Called once during startup. Returns error if already initialized.
pub fn init_main_thread() -> Result<ThreadId, RuntimeError> {
    let id = std::thread::current().id();
    MAIN_THREAD
        .set(id)
        .map_err(|_| RuntimeError::AlreadyInitialized)?;
    tracing::debug!("Main thread recorded: {:?}", id);
    Ok(id)
}

/// Get the main thread id
///
/// # Panics
/// Panics if called before `init_main_thread`
pub fn main_thread_id() -> ThreadId {
    *MAIN_THREAD.get().expect("Main thread not initialized")
}

/// Try to get the main thread id without panicking
pub fn try_main_thread_id() -> Option<ThreadId> {
    MAIN_THREAD.get().copied()
}

/// Check if current thread is the main thread
///
/// Returns `false` before `init_main_thread` has run.
pub fn is_main_thread() -> bool {
    MAIN_THREAD
        .get()
        .map(|id| std::thread::current().id() == *id)
        .unwrap_or(false)
}
