//! mufw Core - Main Thread Invocation and Framework Startup
//!
//! This crate contains the cross-thread invocation mechanism and the startup
//! logic of the framework-global module.
//!
//! Any thread can schedule a call for the main thread through an
//! [`Invoker`]; the host event loop pumps it once per tick. Higher-level
//! asynchronous code reaches the invoker through the [`dispatch`] hook so it
//! never depends on the concrete type.
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and runtime crates for convenience:
//! - [`sdk`] - Version metadata and capability names
//! - [`runtime`] - Main thread identity and the export registry

use tracing::info;

// Re-export SDK and runtime crates
pub use mufw_runtime as runtime;
pub use mufw_sdk as sdk;

pub mod config;
pub mod dispatch;
pub mod invoker;
pub mod logging;
pub mod module;
pub mod profiler;

// Re-export commonly used items
pub use config::{ConfigError, ConfigResult, GlobalConfig};
pub use dispatch::{invoke_on_main_thread, on_main_thread_invoke, DispatchHook, Dispatcher};
pub use invoker::{CallFault, InvocationQueue, Invoker, MainThreadPump, PendingCall, PumpReport};
pub use logging::{init_logging, LogSettings, LoggingError};
pub use module::{FrameworkContext, GlobalModule, InitError};
pub use profiler::{Profiler, ProfilerOptions, ProfilerPrinter, TracingPrinter};

/// Pump the process-wide invoker, if it has been set up
///
/// Called by the host event loop once per tick on the main thread.
pub fn on_event_loop_tick() -> PumpReport {
    match Invoker::try_global() {
        Some(invoker) => invoker.pump(),
        None => PumpReport::default(),
    }
}

/// Shutdown the framework
///
/// Flushes pending main thread calls of the process-wide invoker.
pub fn shutdown() {
    info!("mufw shutting down...");
    if let Some(invoker) = Invoker::try_global() {
        invoker.flush();
    }
}
