//! Loader constants

/// Data file extensions tried under each search path, in order
pub const DATA_FILE_EXTENSIONS: &[&str] = &["json", "toml"];

/// Locator prefix for mounted modules
pub const MOUNT_LOCATOR_PREFIX: &str = "mount:";

/// Locator prefix for data files
pub const FILE_LOCATOR_PREFIX: &str = "file:";

/// Locator prefix for packages
pub const PACKAGE_LOCATOR_PREFIX: &str = "pkg:";

/// Name reported by [`crate::ModuleLoader`]
pub const MODULE_LOADER_NAME: &str = "module";
