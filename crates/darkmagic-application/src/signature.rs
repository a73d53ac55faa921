//! Signature introspection
//!
//! Callables declare their inputs as data; this module reads that
//! declaration, splits off the trailing continuation and rejects names the
//! engine reserves.

use darkmagic_domain::constants::{ANONYMOUS_TARGET, CONTINUATION_PARAM, OPTIONAL_SUFFIX};
use darkmagic_domain::error::{Error, Result};
use darkmagic_domain::value_objects::{Artifact, Body, Callable};

/// Ordered dependency names of one callable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    target: String,
    parameters: Vec<String>,
    continuation: bool,
}

impl Signature {
    /// Introspect a raw artifact
    ///
    /// Fails with `NotCallable` when the artifact is a plain value.
    pub fn introspect(artifact: &Artifact) -> Result<Self> {
        match artifact {
            Artifact::Callable(callable) => Self::of(callable),
            Artifact::Value(value) => Err(Error::not_callable(value.type_name())),
        }
    }

    /// Introspect a callable
    pub fn of(callable: &Callable) -> Result<Self> {
        let mut parameters = callable.parameters().to_vec();
        let continuation = parameters.last().map(String::as_str) == Some(CONTINUATION_PARAM);
        if continuation {
            parameters.pop();
        }

        match (continuation, callable.body()) {
            (true, Body::Deferred(_)) | (false, Body::Returning(_) | Body::Future(_)) => {}
            (true, _) => {
                return Err(Error::illegal_parameter_name(
                    CONTINUATION_PARAM,
                    format!(
                        "[{}] declares a continuation but does not complete through one",
                        callable.name()
                    ),
                ));
            }
            (false, Body::Deferred(_)) => {
                return Err(Error::illegal_parameter_name(
                    callable.name(),
                    "deferred callables must declare a trailing continuation",
                ));
            }
        }

        for name in &parameters {
            validate_parameter_name(name)?;
        }

        let target = match callable.name() {
            "" => ANONYMOUS_TARGET,
            name => name,
        };

        Ok(Self {
            target: target.to_string(),
            parameters,
            continuation,
        })
    }

    /// Name of the introspected callable
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Dependency names, continuation excluded
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Whether a continuation slot is reserved
    pub fn continuation(&self) -> bool {
        self.continuation
    }

    /// Number of dependencies to resolve
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether there is nothing to resolve
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// No dependencies and no continuation: the base case of recursion
    pub fn is_nullary(&self) -> bool {
        self.parameters.is_empty() && !self.continuation
    }
}

/// Reject names that cannot identify a dependency
///
/// Empty names, the continuation name outside the trailing position, and
/// names that would escape a search path.
pub fn validate_parameter_name(name: &str) -> Result<()> {
    let bare = name.strip_suffix(OPTIONAL_SUFFIX).unwrap_or(name);

    if bare.is_empty() {
        return Err(Error::illegal_parameter_name(name, "empty dependency name"));
    }
    if bare == CONTINUATION_PARAM {
        return Err(Error::illegal_parameter_name(
            name,
            "reserved for the trailing continuation",
        ));
    }
    if bare.contains(['/', '\\']) || bare.contains("..") {
        return Err(Error::illegal_parameter_name(
            name,
            "path separators are not allowed",
        ));
    }
    if bare.chars().any(char::is_whitespace) {
        return Err(Error::illegal_parameter_name(
            name,
            "whitespace is not allowed",
        ));
    }
    Ok(())
}
