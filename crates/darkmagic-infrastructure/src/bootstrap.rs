//! Injector bootstrap
//!
//! Builds a ready-to-use [`Injector`] from configuration.

use std::sync::Arc;

use tracing::info;

use darkmagic_application::Injector;
use darkmagic_domain::error::Result;
use darkmagic_domain::ports::SharedArtifactLoader;
use darkmagic_providers::ModuleLoader;

use crate::config::{AppConfig, ConfigLoader};

/// Injector over a fresh [`ModuleLoader`]
pub fn build_injector(config: &AppConfig) -> Result<Injector> {
    build_injector_with_loader(config, Arc::new(ModuleLoader::new()))
}

/// Injector over a caller-supplied loader
pub fn build_injector_with_loader(
    config: &AppConfig,
    loader: SharedArtifactLoader,
) -> Result<Injector> {
    let injector = Injector::new(loader, config.engine.injector_options())?;
    info!(
        search_paths = ?injector.search_paths(),
        "injector bootstrapped from configuration"
    );
    Ok(injector)
}

/// Load configuration from the default sources and build an injector
pub fn default_injector() -> Result<Injector> {
    let config = ConfigLoader::new().load()?;
    build_injector(&config)
}
