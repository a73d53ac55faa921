//! Infrastructure constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "darkmagic.toml";

/// Directory under the working directory searched for the configuration file
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Subdirectory of the user config directory
pub const USER_CONFIG_DIR: &str = "darkmagic";

/// Environment variable prefix
pub const CONFIG_ENV_PREFIX: &str = "DARKMAGIC";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// SEARCH PATH CONSTANTS
// ============================================================================

/// Preferred default search path
pub const DEFAULT_LIB_DIR: &str = "lib";

/// Fallback default search path
pub const FALLBACK_LIB_DIR: &str = "../lib";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV: &str = "DARKMAGIC_LOG";

/// File name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "darkmagic";
