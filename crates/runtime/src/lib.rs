//! mufw Runtime - Process-Wide State
//!
//! This crate handles:
//! - Recording which thread is the process main thread
//! - The dependency-export registry modules publish their singletons into
//!
//! # Thread Safety
//!
//! The main thread id is stored once in a `OnceLock` and read without locking.
//! The export registry is guarded by a `parking_lot::RwLock`; lookups are
//! read-mostly and happen outside hot paths.

pub mod error;
pub mod exports;
pub mod main_thread;

pub use error::{ExportError, RuntimeError};
pub use exports::{exports, ExportRegistry};
pub use main_thread::{init_main_thread, is_main_thread, main_thread_id, try_main_thread_id};
