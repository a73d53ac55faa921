//! Name registry
//!
//! One descriptor per name for the lifetime of the registry. Lookups accept
//! names with or without the optional marker.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use darkmagic_domain::error::{Error, Result};
use darkmagic_domain::value_objects::{LoadedArtifact, Origin, Value};

use crate::descriptor::{Descriptor, normalize_name};
use crate::gate::ProductionGates;

/// Descriptor store owned by one injector
#[derive(Default)]
pub struct Registry {
    descriptors: DashMap<String, Descriptor>,
    gates: ProductionGates,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor supplied by the caller
    ///
    /// Fails with `DuplicateRegistration` when the name is already known.
    pub fn add(&self, descriptor: Descriptor) -> Result<()> {
        match self.descriptors.entry(descriptor.name().to_string()) {
            Entry::Occupied(entry) => Err(Error::duplicate_registration(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(dependency = descriptor.name(), origin = %descriptor.origin(), "dependency registered");
                entry.insert(descriptor);
                Ok(())
            }
        }
    }

    /// Snapshot of the descriptor for `name`
    pub fn get(&self, name: &str) -> Option<Descriptor> {
        self.descriptors
            .get(normalize_name(name))
            .map(|entry| entry.value().clone())
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(normalize_name(name))
    }

    /// Remove and return the descriptor for `name`
    ///
    /// A production already running for `name` keeps its gate, so requests
    /// arriving meanwhile still wait for it.
    pub fn remove(&self, name: &str) -> Option<Descriptor> {
        let name = normalize_name(name);
        self.gates.forget(name);
        self.descriptors.remove(name).map(|(_, descriptor)| descriptor)
    }

    /// Bind the registered entry for `descriptor` to `loaded`
    ///
    /// An entry still unresolved is bound in place; a missing one is
    /// registered as `descriptor` bound to `loaded`. Returns the entry as
    /// registered afterwards.
    pub fn bind(&self, descriptor: Descriptor, loaded: &LoadedArtifact) -> Descriptor {
        let name = descriptor.name().to_string();
        self.descriptors
            .entry(name)
            .and_modify(|registered| {
                if registered.origin() == Origin::Unresolved {
                    registered.bind(loaded);
                }
            })
            .or_insert_with(|| {
                let mut fresh = descriptor;
                fresh.bind(loaded);
                fresh
            })
            .value()
            .clone()
    }

    /// Caching step: store a produced value under the descriptor's name
    pub fn cache(&self, descriptor: &Descriptor, value: Value) {
        self.descriptors
            .entry(descriptor.name().to_string())
            .and_modify(|registered| registered.cache(value.clone()))
            .or_insert_with(|| {
                let mut fresh = descriptor.clone();
                fresh.cache(value);
                fresh
            });
    }

    /// Cached value for `name`, if it has one
    pub fn cached(&self, name: &str) -> Option<Value> {
        self.descriptors
            .get(normalize_name(name))
            .and_then(|entry| entry.value().cached_artifact().cloned())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .descriptors
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Production gates for names in this registry
    pub fn gates(&self) -> &ProductionGates {
        &self.gates
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}
