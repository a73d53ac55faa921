//! Configuration types module

pub mod app;
pub mod engine;
pub mod logging;

pub use app::AppConfig;
pub use engine::{EngineConfig, OverrideConfig};
pub use logging::LoggingConfig;
