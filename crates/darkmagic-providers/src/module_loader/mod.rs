//! Module loader
//!
//! Looks a name up under each search path (mounted modules first, then
//! `.json` and `.toml` data files), and falls back to packages. A camelCase
//! name is also tried in train-case. Every artifact handed out is cached by
//! locator until evicted.

mod data_file;
mod source;
pub mod train_case;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, trace};

use darkmagic_domain::error::Result;
use darkmagic_domain::ports::ArtifactLoader;
use darkmagic_domain::value_objects::{Artifact, LoadedArtifact, Locator};

use crate::constants::{DATA_FILE_EXTENSIONS, MODULE_LOADER_NAME};
use crate::packages::find_package;
use data_file::{is_data_file, read_data_file};
use source::Source;
use train_case::candidates;

/// Loader over mounted modules, data files and packages
#[derive(Default)]
pub struct ModuleLoader {
    mounts: DashMap<PathBuf, HashMap<String, Artifact>>,
    packages: DashMap<String, Artifact>,
    cache: DashMap<Locator, LoadedArtifact>,
    loads: AtomicUsize,
}

impl ModuleLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `artifact` as `<dir>/<name>`
    pub fn mount<P, S, A>(&self, dir: P, name: S, artifact: A)
    where
        P: Into<PathBuf>,
        S: Into<String>,
        A: Into<Artifact>,
    {
        let dir = dir.into();
        let name = name.into();
        debug!(dir = %dir.display(), name = %name, "module mounted");
        self.mounts
            .entry(dir)
            .or_default()
            .insert(name, artifact.into());
    }

    /// Remove the module mounted as `<dir>/<name>`
    pub fn unmount<P: AsRef<Path>>(&self, dir: P, name: &str) -> Option<Artifact> {
        self.mounts
            .get_mut(dir.as_ref())
            .and_then(|mut modules| modules.remove(name))
    }

    /// Provide a package at runtime; it shadows a compile-time package of
    /// the same name
    pub fn register_package<S: Into<String>, A: Into<Artifact>>(&self, name: S, artifact: A) {
        self.packages.insert(name.into(), artifact.into());
    }

    /// Number of uncached loads so far
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Whether an artifact is cached under `locator`
    pub fn is_cached(&self, locator: &Locator) -> bool {
        self.cache.contains_key(locator)
    }

    /// Runtime package names, sorted
    pub fn package_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.packages.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    fn mounted(&self, dir: &Path, name: &str) -> Option<Artifact> {
        self.mounts
            .get(dir)
            .and_then(|modules| modules.get(name).cloned())
    }

    fn has_package(&self, name: &str) -> bool {
        self.packages.contains_key(name) || find_package(name).is_some()
    }

    async fn locate(&self, name: &str, search_paths: &[PathBuf]) -> Result<Option<Source>> {
        let names = candidates(name);

        for dir in search_paths {
            for candidate in &names {
                if self.mounts.get(dir).is_some_and(|modules| modules.contains_key(candidate)) {
                    return Ok(Some(Source::Mount {
                        dir: dir.clone(),
                        name: candidate.clone(),
                    }));
                }
                for extension in DATA_FILE_EXTENSIONS {
                    let path = dir.join(format!("{candidate}.{extension}"));
                    if is_data_file(name, &path).await? {
                        return Ok(Some(Source::File(path)));
                    }
                }
            }
        }

        Ok(names
            .into_iter()
            .find(|candidate| self.has_package(candidate))
            .map(Source::Package))
    }

    async fn materialize(&self, name: &str, source: &Source) -> Result<Option<Artifact>> {
        match source {
            Source::Mount { dir, name } => Ok(self.mounted(dir, name)),
            Source::File(path) => read_data_file(name, path).await,
            Source::Package(package) => Ok(self
                .packages
                .get(package)
                .map(|entry| entry.value().clone())
                .or_else(|| find_package(package).map(|entry| (entry.export)()))),
        }
    }

    async fn obtain(&self, name: &str, source: Source) -> Result<Option<LoadedArtifact>> {
        let locator = source.locator();
        let cached = self.cache.get(&locator).map(|entry| entry.value().clone());
        if let Some(loaded) = cached {
            trace!(%locator, "loader cache hit");
            return Ok(Some(loaded));
        }

        let Some(artifact) = self.materialize(name, &source).await? else {
            return Ok(None);
        };
        self.loads.fetch_add(1, Ordering::SeqCst);
        debug!(dependency = name, %locator, origin = %source.origin(), "artifact loaded");

        let loaded = LoadedArtifact::new(artifact, locator.clone(), source.origin());
        Ok(Some(self.cache.entry(locator).or_insert(loaded).value().clone()))
    }
}

#[async_trait]
impl ArtifactLoader for ModuleLoader {
    async fn load(&self, name: &str, search_paths: &[PathBuf]) -> Result<Option<LoadedArtifact>> {
        match self.locate(name, search_paths).await? {
            Some(source) => self.obtain(name, source).await,
            None => {
                trace!(dependency = name, searched = search_paths.len(), "not found");
                Ok(None)
            }
        }
    }

    async fn fetch(&self, locator: &Locator) -> Result<Option<LoadedArtifact>> {
        match Source::parse(locator) {
            Some(source) => self.obtain(locator.as_str(), source).await,
            None => {
                debug!(%locator, "locator was not issued by this loader");
                Ok(None)
            }
        }
    }

    fn evict(&self, locator: &Locator) {
        if self.cache.remove(locator).is_some() {
            debug!(%locator, "loader cache entry evicted");
        }
    }

    fn loader_name(&self) -> &str {
        MODULE_LOADER_NAME
    }
}

impl std::fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("mounts", &self.mounts.len())
            .field("packages", &self.package_names())
            .field("cached", &self.cache.len())
            .field("loads", &self.loads())
            .finish()
    }
}
