//! Setup on a thread other than the recorded main thread
//!
//! Kept in its own test binary: the main thread and the invoker are set-once
//! per process.

use std::panic;

use mufw_core::runtime::{init_main_thread, is_main_thread};
use mufw_core::{on_event_loop_tick, Invoker};

#[test]
fn test_rejected_setup_leaves_no_invoker() {
    std::thread::spawn(|| init_main_thread().unwrap())
        .join()
        .unwrap();
    assert!(!is_main_thread());

    assert!(panic::catch_unwind(Invoker::setup).is_err());

    assert!(Invoker::try_global().is_none());
    assert!(on_event_loop_tick().is_empty());

    // Still rejected on retry, never as "called more than once"
    let retry = panic::catch_unwind(Invoker::setup).unwrap_err();
    let message = retry
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| retry.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap();
    assert!(message.contains("recorded main thread"));
    assert!(Invoker::try_global().is_none());
}
