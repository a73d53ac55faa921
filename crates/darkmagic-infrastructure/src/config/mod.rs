//! Configuration
//!
//! Layered with figment: defaults, then a TOML file, then `DARKMAGIC_`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, EngineConfig, LoggingConfig, OverrideConfig};
