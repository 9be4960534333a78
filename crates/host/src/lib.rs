//! mufw Host Bridge - FFI Layer
//!
//! This crate provides the C ABI boundary between a host application that
//! owns the UI event loop and the Rust framework core. It compiles to a
//! cdylib (.so/.dll). The host calls `mufw_load` on its main thread, then
//! `mufw_on_event_loop_tick` once per event-loop iteration.

pub mod ffi;

pub use mufw_core::shutdown;
