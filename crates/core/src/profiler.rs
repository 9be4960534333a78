//! Profiler setup
//!
//! Holds the options the profiler runs with and the printer it reports
//! through. Step timers print their elapsed time when dropped.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Profiler options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerOptions {
    /// Print elapsed time of named steps
    pub step_time_enabled: bool,
    /// Collect per-function timings
    pub funcs_time_enabled: bool,
    /// Trace every function enter/leave
    pub funcs_trace_enabled: bool,
    /// Maximum threads tracked for function timings
    pub funcs_max_thread_count: usize,
    /// Number of entries kept when printing collected data
    pub data_top_count: usize,
}

impl Default for ProfilerOptions {
    fn default() -> Self {
        Self {
            step_time_enabled: true,
            funcs_time_enabled: true,
            funcs_trace_enabled: false,
            funcs_max_thread_count: 100,
            data_top_count: 150,
        }
    }
}

/// Output channel for profiler reports
pub trait ProfilerPrinter: Send + Sync {
    fn print_debug(&self, message: &str);
    fn print_info(&self, message: &str);
}

/// Routes profiler output into `tracing` under the `Profiler` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPrinter;

impl ProfilerPrinter for TracingPrinter {
    fn print_debug(&self, message: &str) {
        tracing::debug!(target: "Profiler", "{}", message);
    }

    fn print_info(&self, message: &str) {
        tracing::info!(target: "Profiler", "{}", message);
    }
}

/// Configured profiler
pub struct Profiler {
    options: ProfilerOptions,
    printer: Box<dyn ProfilerPrinter>,
}

impl Profiler {
    /// Create a profiler with `options`, reporting through `printer`
    pub fn setup<P>(options: ProfilerOptions, printer: P) -> Self
    where
        P: ProfilerPrinter + 'static,
    {
        tracing::debug!("Profiler configured: {:?}", options);
        Self {
            options,
            printer: Box::new(printer),
        }
    }

    /// Get the active options
    pub fn options(&self) -> &ProfilerOptions {
        &self.options
    }

    /// Start timing a named step
    ///
    /// The elapsed time is printed when the returned timer is dropped, if step
    /// timing is enabled.
    pub fn step(&self, name: &'static str) -> StepTimer<'_> {
        StepTimer {
            profiler: self,
            name,
            start: Instant::now(),
        }
    }

    /// Print an informational line through the configured printer
    pub fn print_info(&self, message: &str) {
        self.printer.print_info(message);
    }
}

/// RAII timer for one profiler step
pub struct StepTimer<'a> {
    profiler: &'a Profiler,
    name: &'static str,
    start: Instant,
}

impl Drop for StepTimer<'_> {
    fn drop(&mut self) {
        if self.profiler.options.step_time_enabled {
            let elapsed = self.start.elapsed();
            self.profiler.printer.print_debug(&format!(
                "step {}: {:.3} ms",
                self.name,
                elapsed.as_secs_f64() * 1000.0
            ));
        }
    }
}
