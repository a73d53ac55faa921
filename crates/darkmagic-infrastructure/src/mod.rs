//! # darkmagic infrastructure
//!
//! Cross-cutting concerns around the engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | figment-layered `darkmagic.toml` and `DARKMAGIC_` variables |
//! | [`constants`] | File names, prefixes and defaults |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`bootstrap`] | Injector construction from configuration |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{build_injector, build_injector_with_loader, default_injector};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
