//! Main thread dispatch hook
//!
//! The asynchronous-API layer schedules main-thread work through a
//! [`DispatchHook`] instead of depending on [`Invoker`](crate::invoker::Invoker)
//! directly. Startup registers a [`Dispatcher`] once; after that the hook is
//! read without locking.
//!
//! # Example
//!
//! ```ignore
//! use mufw_core::{dispatch, invoker::Invoker};
//!
//! let invoker = Invoker::setup();
//! dispatch::on_main_thread_invoke(invoker);
//!
//! // From any thread
//! dispatch::invoke_on_main_thread(|| tracing::info!("on main"));
//! ```

use std::sync::{Arc, OnceLock};

use crate::invoker::PendingCall;

/// Something that can run calls on the main thread
pub trait Dispatcher: Send + Sync {
    /// Hand `call` over for main-thread execution
    fn submit(&self, call: PendingCall);
}

impl<F> Dispatcher for F
where
    F: Fn(PendingCall) + Send + Sync,
{
    fn submit(&self, call: PendingCall) {
        self(call)
    }
}

/// Set-once slot holding the registered dispatcher
pub struct DispatchHook {
    handler: OnceLock<Arc<dyn Dispatcher>>,
}

/// Process-wide hook used by the asynchronous-API layer
static HOOK: DispatchHook = DispatchHook::new();

/// Get the process-wide dispatch hook
pub fn hook() -> &'static DispatchHook {
    &HOOK
}

/// Register the process-wide main thread dispatcher
///
/// # Panics
/// Panics if a dispatcher was already registered
pub fn on_main_thread_invoke(dispatcher: Arc<dyn Dispatcher>) {
    HOOK.register(dispatcher);
}

/// Schedule `f` on the main thread through the process-wide hook
///
/// # Panics
/// Panics if called before `on_main_thread_invoke`
pub fn invoke_on_main_thread<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    HOOK.dispatch(f);
}

impl DispatchHook {
    /// Create an unregistered hook
    pub const fn new() -> Self {
        Self {
            handler: OnceLock::new(),
        }
    }

    /// Store the dispatcher
    ///
    /// # Panics
    /// Panics if a dispatcher was already registered
    pub fn register(&self, dispatcher: Arc<dyn Dispatcher>) {
        if self.handler.set(dispatcher).is_err() {
            panic!("Dispatch hook already registered");
        }
        tracing::debug!("Main thread dispatch hook registered");
    }

    /// Check if a dispatcher has been registered
    pub fn is_registered(&self) -> bool {
        self.handler.get().is_some()
    }

    /// Forward `f` to the registered dispatcher
    ///
    /// # Panics
    /// Panics if no dispatcher is registered. This is a startup-ordering bug.
    pub fn dispatch<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(Box::new(f));
    }
}

impl Default for DispatchHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for DispatchHook {
    fn submit(&self, call: PendingCall) {
        match self.handler.get() {
            Some(handler) => handler.submit(call),
            None => panic!("Dispatch hook used before a dispatcher was registered"),
        }
    }
}
