//! Injector construction options

use std::collections::BTreeMap;
use std::path::PathBuf;

use darkmagic_domain::value_objects::{Artifact, Locator};

use crate::descriptor::InjectPolicy;

/// What an explicit override supplies for a name
#[derive(Debug, Clone)]
pub enum Override {
    /// Artifact used as-is, with explicit origin
    Artifact(Artifact),
    /// Locator handed to the loader instead of a search
    Locator(Locator),
}

/// Options an [`Injector`](crate::injector::Injector) is built from
#[derive(Debug, Clone, Default)]
pub struct InjectorOptions {
    /// Directories searched for local artifacts, highest priority first
    pub search_paths: Vec<PathBuf>,
    /// Auto-injection policy copied into every descriptor
    pub policy: InjectPolicy,
    /// Names resolved before any search takes place
    pub overrides: BTreeMap<String, Override>,
}

impl InjectorOptions {
    /// Options with the given search paths and defaults elsewhere
    pub fn with_search_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}
