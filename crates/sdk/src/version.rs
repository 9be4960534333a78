//! Application version metadata
//!
//! The version comes from the workspace package version. A build label can be
//! appended by setting `MUFW_BUILD_LABEL` at compile time.

/// Crate version (`major.minor.patch`)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Optional build label set at compile time
pub const BUILD_LABEL: Option<&str> = option_env!("MUFW_BUILD_LABEL");

/// Human-readable application name
pub const APP_NAME: &str = "mufw";

/// Full version string: `VERSION` or `VERSION-LABEL`
pub fn full_version() -> String {
    match BUILD_LABEL {
        Some(label) if !label.is_empty() => format!("{}-{}", VERSION, label),
        _ => VERSION.to_string(),
    }
}

/// Major version component
pub fn version_major() -> u32 {
    component(0)
}

/// Minor version component
pub fn version_minor() -> u32 {
    component(1)
}

/// Patch version component
pub fn version_patch() -> u32 {
    component(2)
}

fn component(index: usize) -> u32 {
    VERSION
        .split('.')
        .nth(index)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}
