//! C-compatible exports called by the host application

use std::ffi::{c_char, CStr, CString};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::LazyLock;

use parking_lot::Mutex;
use tracing::instrument;

use mufw_core::runtime::exports;
use mufw_core::sdk::version::{full_version, APP_NAME};
use mufw_core::{FrameworkContext, GlobalModule, Invoker};

/// Startup result kept alive until unload
static CONTEXT: Mutex<Option<(GlobalModule, FrameworkContext)>> = Mutex::new(None);

// Metadata - null-terminated for C compatibility
static NAME: LazyLock<CString> = LazyLock::new(|| c_string(APP_NAME));
static VERSION: LazyLock<CString> = LazyLock::new(|| c_string(&full_version()));

/// Called once by the host on its main thread, before the event loop runs
///
/// `config_path` may be null to use the default config location.
///
/// Loading is once per process: the invoker and the dispatch hook are
/// set-once, so a load after `mufw_unload` fails with "Framework already
/// loaded".
///
/// # Safety
/// - `config_path` must be a valid null-terminated C string, or null
/// - `error` must be a valid pointer to a buffer of at least `maxlen` bytes, or null
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn mufw_load(
    config_path: *const c_char,
    error: *mut c_char,
    maxlen: usize,
) -> bool {
    if Invoker::try_global().is_some() {
        write_error(error, maxlen, "Framework already loaded");
        return false;
    }

    let module = if config_path.is_null() {
        GlobalModule::new()
    } else {
        let path = CStr::from_ptr(config_path).to_string_lossy().into_owned();
        GlobalModule::with_config_path(PathBuf::from(path))
    };

    match panic::catch_unwind(AssertUnwindSafe(|| module.on_init(exports()))) {
        Ok(Ok(ctx)) => {
            tracing::info!("mufw loaded, main thread {:?}", ctx.invoker.main_thread());
            *CONTEXT.lock() = Some((module, ctx));
            true
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to initialize: {}", e);
            write_error(error, maxlen, &format!("Init error: {}", e));
            false
        }
        Err(_) => {
            write_error(error, maxlen, "Panic during load");
            false
        }
    }
}

/// Called by the host on its main thread after the event loop stopped
///
/// Runs every call still queued for the main thread. The invoker stays
/// installed afterwards, so the framework cannot be loaded again in this
/// process.
///
/// # Safety
/// - `error` must be a valid pointer to a buffer of at least `maxlen` bytes, or null
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn mufw_unload(error: *mut c_char, maxlen: usize) -> bool {
    let Some((module, ctx)) = CONTEXT.lock().take() else {
        tracing::warn!("mufw_unload called without a successful load");
        return true;
    };

    match panic::catch_unwind(AssertUnwindSafe(|| module.on_deinit(&ctx))) {
        Ok(()) => true,
        Err(_) => {
            write_error(error, maxlen, "Panic during shutdown");
            false
        }
    }
}

/// Called by the host on its main thread once per event-loop iteration
///
/// Returns the number of calls executed. A tick from any thread other than
/// the main thread aborts the process.
#[no_mangle]
pub extern "C" fn mufw_on_event_loop_tick() -> u32 {
    match panic::catch_unwind(mufw_core::on_event_loop_tick) {
        Ok(report) => u32::try_from(report.executed).unwrap_or(u32::MAX),
        Err(_) => {
            tracing::error!(
                "Event loop tick from {:?} off the main thread, aborting",
                std::thread::current().id()
            );
            std::process::abort()
        }
    }
}

/// Number of calls waiting for the next tick
#[no_mangle]
pub extern "C" fn mufw_pending_calls() -> usize {
    Invoker::try_global().map(|i| i.pending()).unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn mufw_get_name() -> *const c_char {
    NAME.as_ptr()
}

#[no_mangle]
pub extern "C" fn mufw_get_version() -> *const c_char {
    VERSION.as_ptr()
}

fn c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

/// Helper to write an error message to a C buffer
///
/// # Safety
/// - `error` must be a valid pointer or null
/// - `maxlen` must accurately reflect the buffer size
unsafe fn write_error(error: *mut c_char, maxlen: usize, msg: &str) {
    if !error.is_null() && maxlen > 0 {
        let bytes = msg.as_bytes();
        let len = bytes.len().min(maxlen - 1);
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), error as *mut u8, len);
        *error.add(len) = 0;
    }
}
