//! Engine configuration types

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use darkmagic_application::descriptor::InjectPolicy;
use darkmagic_application::options::{InjectorOptions, Override};
use darkmagic_domain::value_objects::{Artifact, Locator, Value};

use crate::constants::{DEFAULT_LIB_DIR, FALLBACK_LIB_DIR};

/// What an override entry in `[engine.overrides]` supplies
///
/// `{ locator = "..." }` re-fetches through the loader; anything else is
/// injected as a JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideConfig {
    /// Loader locator
    Locator {
        /// Locator as issued by the loader
        locator: String,
    },
    /// Literal value
    Value(serde_json::Value),
}

impl OverrideConfig {
    /// Convert into the engine's override form
    pub fn to_override(&self) -> Override {
        match self {
            Self::Locator { locator } => Override::Locator(Locator::new(locator.as_str())),
            Self::Value(value) => Override::Artifact(Artifact::Value(Value::from(value.clone()))),
        }
    }
}

/// Resolution engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directories searched for local artifacts, highest priority first
    pub search_paths: Vec<PathBuf>,

    /// Invoke producers found under the search paths
    pub auto_inject_local_factories: bool,

    /// Invoke producers found through the package lookup
    pub auto_inject_external_factories: bool,

    /// Names resolved without searching
    pub overrides: BTreeMap<String, OverrideConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let policy = InjectPolicy::default();
        Self {
            search_paths: default_search_paths(),
            auto_inject_local_factories: policy.auto_inject_local_factories,
            auto_inject_external_factories: policy.auto_inject_external_factories,
            overrides: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Auto-injection policy described by this configuration
    pub fn policy(&self) -> InjectPolicy {
        InjectPolicy {
            auto_inject_local_factories: self.auto_inject_local_factories,
            auto_inject_external_factories: self.auto_inject_external_factories,
        }
    }

    /// Injector options described by this configuration
    pub fn injector_options(&self) -> InjectorOptions {
        InjectorOptions {
            search_paths: self.search_paths.clone(),
            policy: self.policy(),
            overrides: self
                .overrides
                .iter()
                .map(|(name, entry)| (name.clone(), entry.to_override()))
                .collect(),
        }
    }
}

/// `lib` when it is a directory, otherwise `../lib` when that is one
pub fn default_search_paths() -> Vec<PathBuf> {
    [DEFAULT_LIB_DIR, FALLBACK_LIB_DIR]
        .into_iter()
        .map(Path::new)
        .find(|dir| dir.is_dir())
        .map(|dir| vec![dir.to_path_buf()])
        .unwrap_or_default()
}
