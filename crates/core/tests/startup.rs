//! Full startup sequence against the process-wide singletons
//!
//! Kept in its own test binary: the invoker and the dispatch hook are set-once
//! per process.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier};

use parking_lot::Mutex;

use mufw_core::runtime::ExportRegistry;
use mufw_core::sdk::capabilities::{GLOBAL_CONFIGURATION, INVOKER, MAIN_THREAD_DISPATCH};
use mufw_core::{
    dispatch, invoke_on_main_thread, on_event_loop_tick, DispatchHook, GlobalConfig,
    GlobalModule, Invoker,
};

#[test]
fn test_startup_dispatch_and_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().to_path_buf();
    let config_path = base.join("configs").join("global.toml");
    let config = GlobalConfig {
        debug: true,
        logs_path: Some(base.join("logs")),
        ..Default::default()
    };
    config.save_to(&config_path).unwrap();

    let module = GlobalModule::with_config_path(&config_path);
    assert_eq!(module.module_name(), "global");

    let registry = ExportRegistry::new();
    let ctx = module.on_init(&registry).unwrap();

    // Config, logging, and exports
    assert!(ctx.config.debug);
    let log_file = ctx.log_file.clone().unwrap();
    assert!(log_file.starts_with(base.join("logs")));
    assert!(log_file.exists());

    let published = registry.resolve::<GlobalConfig>(GLOBAL_CONFIGURATION).unwrap();
    assert!(Arc::ptr_eq(&published, &ctx.config));
    let invoker = registry.resolve::<Invoker>(INVOKER).unwrap();
    assert!(Arc::ptr_eq(&invoker, &ctx.invoker));
    assert!(Arc::ptr_eq(Invoker::global(), &ctx.invoker));
    let hook = registry
        .resolve::<&'static DispatchHook>(MAIN_THREAD_DISPATCH)
        .unwrap();
    assert!(hook.is_registered());

    // Workers reach the main thread through the hook
    const WORKERS: usize = 4;
    const PER_WORKER: usize = 50;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let barrier = Arc::new(Barrier::new(WORKERS));
    let handles: Vec<_> = (0..WORKERS)
        .map(|w| {
            let seen = Arc::clone(&seen);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_WORKER {
                    let seen = Arc::clone(&seen);
                    invoke_on_main_thread(move || {
                        assert!(mufw_core::runtime::is_main_thread());
                        seen.lock().push((w, i));
                    });
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(seen.lock().is_empty());
    let report = on_event_loop_tick();
    assert_eq!(report.executed, WORKERS * PER_WORKER);
    assert_eq!(report.faulted, 0);
    assert_eq!(seen.lock().len(), WORKERS * PER_WORKER);

    // Empty tick is a no-op
    assert!(on_event_loop_tick().is_empty());

    // Set-once singletons
    assert!(panic::catch_unwind(Invoker::setup).is_err());
    let again = Arc::new(Invoker::new());
    assert!(
        panic::catch_unwind(AssertUnwindSafe(|| dispatch::on_main_thread_invoke(again))).is_err()
    );

    // Pumping off the main thread is rejected
    let off_main = std::thread::spawn(|| panic::catch_unwind(on_event_loop_tick).is_err());
    assert!(off_main.join().unwrap());

    // Orderly shutdown runs what is still queued
    let flushed = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&flushed);
    invoke_on_main_thread(move || *flag.lock() = true);
    module.on_deinit(&ctx);
    assert!(*flushed.lock());
    assert_eq!(ctx.invoker.pending(), 0);

    // The invoker outlives shutdown, so a second load is refused
    assert!(Invoker::try_global().is_some());
    let reload = GlobalModule::with_config_path(&config_path);
    let result = panic::catch_unwind(AssertUnwindSafe(|| reload.on_init(&ExportRegistry::new())));
    assert!(result.is_err());
}
