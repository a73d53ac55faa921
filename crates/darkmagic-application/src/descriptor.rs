//! Dependency descriptors and the auto-injection policy

use serde::{Deserialize, Serialize};

use darkmagic_domain::constants::OPTIONAL_SUFFIX;
use darkmagic_domain::value_objects::{
    Artifact, Classification, LoadedArtifact, Locator, Origin, Value,
};

use crate::naming::{NamingVerdict, classify_exported_name};

/// Which producers the engine invokes on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectPolicy {
    /// Invoke producers found under the search paths
    pub auto_inject_local_factories: bool,
    /// Invoke producers found through the global package lookup
    pub auto_inject_external_factories: bool,
}

impl Default for InjectPolicy {
    fn default() -> Self {
        Self {
            auto_inject_local_factories: true,
            auto_inject_external_factories: false,
        }
    }
}

/// Strip the optional marker from a requested name
pub fn normalize_name(requested: &str) -> &str {
    requested.strip_suffix(OPTIONAL_SUFFIX).unwrap_or(requested)
}

/// Whether a requested name carries the optional marker
pub fn is_optional_request(requested: &str) -> bool {
    requested.len() > 1 && requested.ends_with(OPTIONAL_SUFFIX)
}

/// The engine's metadata record for one dependency name
#[derive(Debug, Clone)]
pub struct Descriptor {
    name: String,
    optional: bool,
    origin: Origin,
    locator: Option<Locator>,
    classification: Classification,
    forced: bool,
    cached: Option<Value>,
    policy: InjectPolicy,
}

impl Descriptor {
    /// Unresolved descriptor for a requested name
    pub fn new(requested: &str, policy: InjectPolicy) -> Self {
        Self {
            name: normalize_name(requested).to_string(),
            optional: is_optional_request(requested),
            origin: Origin::Unresolved,
            locator: None,
            classification: Classification::Value,
            forced: false,
            cached: None,
            policy,
        }
    }

    /// Descriptor for a value supplied directly by the caller
    pub fn explicit(name: &str, value: Value) -> Self {
        Self {
            origin: Origin::Explicit,
            cached: Some(value),
            ..Self::new(name, InjectPolicy::default())
        }
    }

    /// Same descriptor under another auto-injection policy
    pub fn with_policy(mut self, policy: InjectPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Record where an artifact was loaded from and how to treat it
    pub fn bind(&mut self, loaded: &LoadedArtifact) {
        let verdict = classify(&loaded.artifact);
        self.origin = loaded.origin;
        self.locator = match loaded.origin {
            Origin::Explicit => None,
            _ => Some(loaded.locator.clone()),
        };
        self.classification = verdict.classification;
        self.forced = verdict.forced;
    }

    /// Store a produced value; the descriptor becomes a plain value
    pub fn cache(&mut self, value: Value) {
        self.classification = Classification::Value;
        self.cached = Some(value);
    }

    /// Whether the engine should resolve and invoke this dependency itself
    pub fn is_injectable(&self) -> bool {
        if self.classification != Classification::Producer {
            return false;
        }
        self.forced
            || match self.origin {
                Origin::Local => self.policy.auto_inject_local_factories,
                Origin::External => self.policy.auto_inject_external_factories,
                Origin::Explicit | Origin::Unresolved => false,
            }
    }

    /// Logical name, optional marker stripped
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the first request carried the optional marker
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Provenance
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Loader handle, absent for explicit values
    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// Current classification
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Whether auto-injection is forced by the exported name
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// Produced or explicitly supplied value
    pub fn cached_artifact(&self) -> Option<&Value> {
        self.cached.as_ref()
    }

    /// Policy this descriptor was created under
    pub fn policy(&self) -> InjectPolicy {
        self.policy
    }
}

/// Decide how a raw artifact is treated
///
/// Values are values. A callable's explicit tag wins; otherwise its exported
/// name decides.
pub fn classify(artifact: &Artifact) -> NamingVerdict {
    match artifact {
        Artifact::Value(_) => NamingVerdict {
            classification: Classification::Value,
            forced: false,
        },
        Artifact::Callable(callable) => match callable.classification() {
            Some(classification) => NamingVerdict {
                classification,
                forced: false,
            },
            None => classify_exported_name(callable.name()),
        },
    }
}
