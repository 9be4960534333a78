//! Dependency-export registry
//!
//! Modules publish shared singletons under a well-known capability name (the
//! `capabilities` module of the sdk crate) and other modules resolve them by name and
//! concrete type. The registry only stores and hands out `Arc`s; it never
//! constructs anything itself.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mufw_runtime::exports;
//!
//! exports().register_export("global", "IGlobalConfiguration", Arc::new(config))?;
//! let config = exports().resolve::<GlobalConfig>("IGlobalConfiguration")?;
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::ExportError;

/// A published export
struct Export {
    /// Module that published the export
    module: String,
    /// The shared instance
    instance: Arc<dyn Any + Send + Sync>,
}

/// Registry of exports keyed by capability name
#[derive(Default)]
pub struct ExportRegistry {
    exports: RwLock<HashMap<&'static str, Export>>,
}

/// Global export registry
static EXPORTS: LazyLock<ExportRegistry> = LazyLock::new(ExportRegistry::new);

/// Get the process-wide export registry
pub fn exports() -> &'static ExportRegistry {
    &EXPORTS
}

impl ExportRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            exports: RwLock::new(HashMap::new()),
        }
    }

    /// Publish an instance under a capability name
    ///
    /// # Errors
    /// `AlreadyRegistered` if another export already uses `name`
    pub fn register_export<T>(
        &self,
        module: &str,
        name: &'static str,
        instance: Arc<T>,
    ) -> Result<(), ExportError>
    where
        T: Send + Sync + 'static,
    {
        let mut exports = self.exports.write();

        if let Some(existing) = exports.get(name) {
            return Err(ExportError::AlreadyRegistered {
                name: name.to_string(),
                module: existing.module.clone(),
            });
        }

        exports.insert(
            name,
            Export {
                module: module.to_string(),
                instance,
            },
        );
        tracing::debug!("Module '{}' exported {}", module, name);
        Ok(())
    }

    /// Resolve an export by capability name
    ///
    /// # Errors
    /// - `NotFound` if nothing was published under `name`
    /// - `TypeMismatch` if the export is not a `T`
    pub fn resolve<T>(&self, name: &str) -> Result<Arc<T>, ExportError>
    where
        T: Send + Sync + 'static,
    {
        let instance = self
            .exports
            .read()
            .get(name)
            .map(|export| Arc::clone(&export.instance))
            .ok_or_else(|| ExportError::NotFound(name.to_string()))?;

        instance
            .downcast::<T>()
            .map_err(|_| ExportError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Module that published `name`, if any
    pub fn module_of(&self, name: &str) -> Option<String> {
        self.exports.read().get(name).map(|e| e.module.clone())
    }

    /// Check if a capability name has been published
    pub fn contains(&self, name: &str) -> bool {
        self.exports.read().contains_key(name)
    }

    /// Number of published exports
    pub fn len(&self) -> usize {
        self.exports.read().len()
    }

    /// Check if nothing has been published
    pub fn is_empty(&self) -> bool {
        self.exports.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Service {
        value: i32,
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = ExportRegistry::new();
        registry
            .register_export("global", "IService", Arc::new(Service { value: 42 }))
            .unwrap();

        let svc = registry.resolve::<Service>("IService").unwrap();
        assert_eq!(svc.value, 42);
        assert_eq!(registry.module_of("IService").as_deref(), Some("global"));
        assert!(registry.contains("IService"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_missing() {
        let registry = ExportRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.resolve::<Service>("IService"),
            Err(ExportError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_wrong_type() {
        let registry = ExportRegistry::new();
        registry
            .register_export("global", "IService", Arc::new(7u32))
            .unwrap();

        assert!(matches!(
            registry.resolve::<Service>("IService"),
            Err(ExportError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = ExportRegistry::new();
        registry
            .register_export("global", "IService", Arc::new(Service { value: 1 }))
            .unwrap();

        let err = registry
            .register_export("other", "IService", Arc::new(Service { value: 2 }))
            .unwrap_err();
        assert!(matches!(err, ExportError::AlreadyRegistered { ref module, .. } if module == "global"));

        // First export is untouched
        assert_eq!(registry.resolve::<Service>("IService").unwrap().value, 1);
    }
}
