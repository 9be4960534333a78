//! Framework-global module
//!
//! Runs the startup sequence every other module depends on:
//!
//! 1. Load the global configuration
//! 2. Configure logging destinations
//! 3. Configure the profiler
//! 4. Set up the process-wide [`Invoker`]
//! 5. Wire the main thread dispatch hook to that invoker
//!
//! and publishes the resulting singletons to the export registry.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use mufw_runtime::{ExportError, ExportRegistry};
use mufw_sdk::capabilities::{
    GLOBAL_CONFIGURATION, GLOBAL_MODULE, INVOKER, MAIN_THREAD_DISPATCH, PROFILER,
};
use mufw_sdk::version::{full_version, APP_NAME};

use crate::config::{global_config_path, ConfigError, GlobalConfig};
use crate::dispatch::{self, DispatchHook};
use crate::invoker::Invoker;
use crate::logging::{init_logging, LogSettings, LoggingError};
use crate::profiler::{Profiler, TracingPrinter};

/// Startup errors
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Publishing a singleton to the export registry failed
    #[error("Failed to publish export: {0}")]
    Export(#[from] ExportError),
}

/// Singletons produced by startup
///
/// Hand this to every component that needs to schedule or pump main-thread
/// work instead of looking the singletons up globally.
#[derive(Clone)]
pub struct FrameworkContext {
    pub config: Arc<GlobalConfig>,
    pub profiler: Arc<Profiler>,
    pub invoker: Arc<Invoker>,
    pub dispatch: &'static DispatchHook,
    /// Log file in use, if any
    pub log_file: Option<PathBuf>,
}

/// The framework-global module
#[derive(Debug, Default, Clone)]
pub struct GlobalModule {
    config_path: Option<PathBuf>,
}

impl GlobalModule {
    /// Module using the default config path
    pub fn new() -> Self {
        Self::default()
    }

    /// Module loading its config from `path`
    pub fn with_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Module name used when publishing exports
    pub fn module_name(&self) -> &'static str {
        GLOBAL_MODULE
    }

    /// Publish the startup singletons
    pub fn register_exports(
        &self,
        registry: &ExportRegistry,
        ctx: &FrameworkContext,
    ) -> Result<(), ExportError> {
        let module = self.module_name();
        registry.register_export(module, GLOBAL_CONFIGURATION, Arc::clone(&ctx.config))?;
        registry.register_export(module, PROFILER, Arc::clone(&ctx.profiler))?;
        registry.register_export(module, INVOKER, Arc::clone(&ctx.invoker))?;
        registry.register_export(module, MAIN_THREAD_DISPATCH, Arc::new(ctx.dispatch))?;
        Ok(())
    }

    /// Run the startup sequence on the main thread
    ///
    /// A missing or unreadable config falls back to defaults, and a log file
    /// that cannot be opened falls back to console logging; the framework
    /// still comes up in both cases.
    ///
    /// # Panics
    /// Panics if called twice in one process (the invoker and the dispatch
    /// hook are set-once).
    pub fn on_init(&self, registry: &ExportRegistry) -> Result<FrameworkContext, InitError> {
        // Settings first: logging and profiler setup read them
        let (config, config_error) = match self.load_config() {
            Ok(config) => (config, None),
            Err(e) => (GlobalConfig::default(), Some(e)),
        };
        let config = Arc::new(config);

        let log_file = setup_logging(&config);
        if let Some(e) = config_error {
            warn!("Using default global config: {}", e);
        }
        info!("=== Started {} {} ===", APP_NAME, full_version());

        let profiler = Arc::new(Profiler::setup(config.profiler.clone(), TracingPrinter));
        let invoker = {
            let _step = profiler.step("invoker setup");
            Invoker::setup()
        };

        dispatch::on_main_thread_invoke(invoker.clone());

        let ctx = FrameworkContext {
            config,
            profiler,
            invoker,
            dispatch: dispatch::hook(),
            log_file,
        };
        self.register_exports(registry, &ctx)?;

        debug!("Module '{}' initialized", self.module_name());
        Ok(ctx)
    }

    /// Orderly shutdown: run everything still queued for the main thread
    pub fn on_deinit(&self, ctx: &FrameworkContext) {
        let report = ctx.invoker.flush();
        info!(
            "=== Stopped {} ({} calls flushed, {} faulted) ===",
            APP_NAME, report.executed, report.faulted
        );
    }

    fn load_config(&self) -> Result<GlobalConfig, ConfigError> {
        match &self.config_path {
            Some(path) => GlobalConfig::load_from(path),
            None => GlobalConfig::load_from(&global_config_path()?),
        }
    }
}

/// Install logging, falling back to console only if the file can't be opened
fn setup_logging(config: &GlobalConfig) -> Option<PathBuf> {
    let settings = match LogSettings::from_config(config) {
        Ok(settings) => settings,
        Err(e) => {
            let settings = LogSettings {
                level: crate::logging::default_level(config.debug),
                logs_dir: None,
                file_prefix: config.log_file_prefix.clone(),
            };
            install(&settings);
            warn!("Logs path unavailable, logging to console only: {}", e);
            return None;
        }
    };

    match init_logging(&settings) {
        Ok(path) => {
            if let Some(path) = &path {
                info!("logs path: {}", path.display());
            }
            path
        }
        Err(LoggingError::Io { path, source }) => {
            install(&settings.console_only());
            warn!(
                "Failed to open log file {}, logging to console only: {}",
                path.display(),
                source
            );
            None
        }
        Err(e @ LoggingError::AlreadyInstalled(_)) => {
            debug!("{}", e);
            None
        }
    }
}

fn install(settings: &LogSettings) {
    if let Err(e) = init_logging(settings) {
        debug!("{}", e);
    }
}
