//! mufw SDK - Shared Definitions
//!
//! This crate contains the plain definitions shared by every other crate in
//! the workspace. It has no dependencies and compiles quickly, allowing
//! parallel compilation of dependent crates.
//!
//! # Modules
//!
//! - [`capabilities`] - Well-known names under which exports are published
//! - [`version`] - Application version metadata
//! - [`layout`] - Log line layout constants

pub mod capabilities;
pub mod layout;
pub mod version;

pub use capabilities::CAPABILITY_NAMES;
pub use version::{full_version, VERSION};
