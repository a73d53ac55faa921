//! # darkmagic providers
//!
//! Implementations of the [`ArtifactLoader`] port.
//!
//! | Loader | Local lookup | Global lookup |
//! |--------|--------------|---------------|
//! | [`ModuleLoader`] | Mounted modules, `.json` and `.toml` data files | Runtime packages, [`PACKAGES`] |
//!
//! ## Usage
//!
//! ```ignore
//! use darkmagic_providers::ModuleLoader;
//!
//! let loader = ModuleLoader::new();
//! loader.mount("./lib", "db", Callable::future("db", ["config"], connect));
//! ```

pub use darkmagic_domain::error::{Error, Result};
pub use darkmagic_domain::ports::ArtifactLoader;

/// Provider-specific constants
pub mod constants;

/// Module loader over mounts, data files and packages
pub mod module_loader;

/// Compile-time package registry
pub mod packages;

pub use module_loader::ModuleLoader;
pub use packages::{PACKAGES, PackageEntry};
