//! Using the process-wide hook before startup registered a dispatcher

use mufw_core::{dispatch, invoke_on_main_thread, on_event_loop_tick};

#[test]
#[should_panic(expected = "before a dispatcher was registered")]
fn test_dispatch_before_register_is_fatal() {
    assert!(!dispatch::hook().is_registered());
    invoke_on_main_thread(|| {});
}

#[test]
fn test_tick_before_setup_is_noop() {
    assert!(on_event_loop_tick().is_empty());
}
