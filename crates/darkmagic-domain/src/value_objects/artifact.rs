//! Loaded artifacts and their provenance

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::callable::Callable;
use super::value::Value;

/// How an artifact is treated once loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Injected as-is
    Value,
    /// Resolved through the engine and invoked
    Producer,
    /// Callable that is never auto-invoked
    Class,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Value => "value",
            Self::Producer => "producer",
            Self::Class => "class",
        })
    }
}

/// Where a dependency came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Not loaded yet
    #[default]
    Unresolved,
    /// Found under one of the search paths
    Local,
    /// Found through the global package lookup
    External,
    /// Supplied directly by the caller
    Explicit,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unresolved => "unresolved",
            Self::Local => "local",
            Self::External => "external",
            Self::Explicit => "explicit",
        })
    }
}

/// Loader-specific handle that re-fetches the same artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Create a locator from its loader-specific form
    pub fn new<S: Into<String>>(locator: S) -> Self {
        Self(locator.into())
    }

    /// Loader-specific form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}

impl From<String> for Locator {
    fn from(locator: String) -> Self {
        Self(locator)
    }
}

/// Raw artifact produced by a loader
#[derive(Debug, Clone)]
pub enum Artifact {
    /// Plain value
    Value(Value),
    /// Invokable unit
    Callable(Arc<Callable>),
}

impl Artifact {
    /// Artifact wrapping an owned value
    pub fn value<T: std::any::Any + Send + Sync>(value: T) -> Self {
        Self::Value(Value::new(value))
    }

    /// Artifact wrapping a callable
    pub fn callable(callable: Callable) -> Self {
        Self::Callable(Arc::new(callable))
    }

    /// Whether the artifact can be invoked
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    /// The callable, if this artifact is one
    pub fn as_callable(&self) -> Option<&Arc<Callable>> {
        match self {
            Self::Callable(callable) => Some(callable),
            Self::Value(_) => None,
        }
    }

    /// Convert into an injectable value
    ///
    /// A callable injected without being invoked is handed over as
    /// `Arc<Callable>`.
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Callable(callable) => Value::from_arc(callable),
        }
    }
}

impl From<Callable> for Artifact {
    fn from(callable: Callable) -> Self {
        Self::callable(callable)
    }
}

impl From<Arc<Callable>> for Artifact {
    fn from(callable: Arc<Callable>) -> Self {
        Self::Callable(callable)
    }
}

impl From<Value> for Artifact {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Successful loader lookup
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    /// The artifact itself
    pub artifact: Artifact,
    /// Handle for idempotent re-loads and eviction
    pub locator: Locator,
    /// Where the loader found it
    pub origin: Origin,
}

impl LoadedArtifact {
    /// Bundle a loader result
    pub fn new(artifact: Artifact, locator: Locator, origin: Origin) -> Self {
        Self {
            artifact,
            locator,
            origin,
        }
    }
}
