//! # darkmagic
//!
//! Dependency injection by declared input names. A target lists the names
//! of its inputs; darkmagic finds each one, invokes producers for the ones
//! that must be produced (once per injector), and invokes the target with
//! every input in declared order.
//!
//! ## Example
//!
//! ```ignore
//! use darkmagic::{Arguments, Callable, Value};
//!
//! let port = darkmagic::inject(Callable::returning("main", ["config"], |args: Arguments| {
//!     let config = args.get::<serde_json::Value>("config")?;
//!     Ok(Some(Value::new(config["port"].clone())))
//! }))
//! .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, artifacts, callables and the loader port
//! - `application` - the injector and its resolution machinery
//! - `providers` - the module loader and package registry
//! - `infrastructure` - configuration, logging and bootstrap

/// Domain layer - errors, artifacts and the loader port
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use darkmagic_domain::*;
}

/// Application layer - the resolution engine
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use darkmagic_application::*;
}

/// Providers - artifact loaders
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use darkmagic_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use darkmagic_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{Descriptor, InjectPolicy, Injector, InjectorBuilder};
pub use infrastructure::{AppConfig, ConfigLoader, init_logging};
pub use providers::{ModuleLoader, PACKAGES, PackageEntry};

/// Injector configured from `darkmagic.toml` and `DARKMAGIC_` variables
///
/// Each call builds a new injector with its own registry.
pub fn injector() -> Result<Injector> {
    darkmagic_infrastructure::default_injector()
}

/// Inject `target` with an injector built from configuration
pub async fn inject<T: Into<Artifact>>(target: T) -> ProducerOutcome {
    injector()?.inject(target).await
}
