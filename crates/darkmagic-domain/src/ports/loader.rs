//! Artifact loader port

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{LoadedArtifact, Locator};

/// Maps a dependency name to a raw artifact
///
/// Implementations must be deterministic for a given name and search path
/// list. "Not found" is `Ok(None)`; every `Err` is a genuine failure that the
/// engine propagates unmodified.
#[async_trait]
pub trait ArtifactLoader: Send + Sync {
    /// Look `name` up, trying `search_paths` in priority order before any
    /// global lookup
    async fn load(&self, name: &str, search_paths: &[PathBuf]) -> Result<Option<LoadedArtifact>>;

    /// Re-fetch the artifact behind a locator obtained from [`Self::load`]
    async fn fetch(&self, locator: &Locator) -> Result<Option<LoadedArtifact>>;

    /// Drop any loader-level cache kept for `locator`
    fn evict(&self, locator: &Locator);

    /// Loader name for diagnostics
    fn loader_name(&self) -> &str;
}

/// Shared loader handle
pub type SharedArtifactLoader = Arc<dyn ArtifactLoader>;
