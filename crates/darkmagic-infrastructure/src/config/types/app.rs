//! Main application configuration

use serde::{Deserialize, Serialize};

use super::engine::EngineConfig;
use super::logging::LoggingConfig;

/// Root of `darkmagic.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Resolution engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}
