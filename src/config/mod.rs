//! Configuration
//!
//! Layered TOML configuration: defaults, global file, project file, then
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{Config, DetectorConfig, FingerprintConfig, RegistryConfig};
