//! Capability names for the dependency-export registry
//!
//! Modules publish their singletons under these names so that other modules
//! can resolve them without a compile-time dependency on the concrete type.

/// Name of the module that owns the framework-global services
pub const GLOBAL_MODULE: &str = "global";

/// Framework-global configuration (`GlobalConfig`)
pub const GLOBAL_CONFIGURATION: &str = "IGlobalConfiguration";

/// Process-wide main-thread invoker
pub const INVOKER: &str = "IInvoker";

/// Main-thread dispatch hook used by the asynchronous-API layer
pub const MAIN_THREAD_DISPATCH: &str = "IMainThreadDispatch";

/// Profiler configured at startup
pub const PROFILER: &str = "IProfiler";

/// Collected capability names for iteration
pub const CAPABILITY_NAMES: &[&str] = &[
    GLOBAL_CONFIGURATION,
    INVOKER,
    MAIN_THREAD_DISPATCH,
    PROFILER,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names_unique() {
        for (i, a) in CAPABILITY_NAMES.iter().enumerate() {
            for b in &CAPABILITY_NAMES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
