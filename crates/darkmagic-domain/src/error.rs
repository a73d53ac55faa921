//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by pass-through variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for darkmagic
#[derive(Error, Debug)]
pub enum Error {
    /// A target, or a dependency about to be invoked, is not invokable
    #[error("{name} is not callable")]
    NotCallable {
        /// Name of the offending artifact
        name: String,
    },

    /// A required dependency could not be found by the loader
    #[error("{}", missing_dependency_message(.name, .requester, .requester_is_producer))]
    MissingDependency {
        /// The dependency that could not be resolved
        name: String,
        /// The callable that requested it, when known
        requester: Option<String>,
        /// Whether the requester is itself a producer being resolved
        requester_is_producer: bool,
    },

    /// A dependency requested itself through its own lineage
    #[error("circular dependency on [{name}], chain: {}", .chain.join(" -> "))]
    CircularDependency {
        /// The repeated name
        name: String,
        /// The in-flight lineage, outermost first
        chain: Vec<String>,
    },

    /// Loader failure other than "not found", passed through unmodified
    #[error("{source}")]
    Loader {
        /// The dependency being loaded
        name: String,
        /// The underlying loader error
        #[source]
        source: BoxError,
    },

    /// A reserved or malformed name used as a dependency identifier
    #[error("illegal parameter name [{name}]: {reason}")]
    IllegalParameterName {
        /// The offending name
        name: String,
        /// Why the name is rejected
        reason: String,
    },

    /// Explicit registration of a name that is already registered
    #[error("dependency [{name}] is already registered")]
    DuplicateRegistration {
        /// The name already present in the registry
        name: String,
    },

    /// A producer dropped its continuation without completing it
    #[error("producer [{name}] dropped its continuation without completing")]
    ContinuationDropped {
        /// The producer that abandoned the continuation
        name: String,
    },

    /// Failure raised by a producer or target body
    #[error("producer [{name}] failed: {message}")]
    Producer {
        /// The failing producer
        name: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal engine error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

fn missing_dependency_message(
    name: &str,
    requester: &Option<String>,
    requester_is_producer: &bool,
) -> String {
    match requester {
        Some(requester) if *requester_is_producer => {
            format!("missing dependency [{name}] required by producer [{requester}]")
        }
        Some(requester) => format!("missing dependency [{name}] required by [{requester}]"),
        None => format!("missing dependency [{name}]"),
    }
}

// Resolution error creation methods
impl Error {
    /// Create a not-callable error
    pub fn not_callable<S: Into<String>>(name: S) -> Self {
        Self::NotCallable { name: name.into() }
    }

    /// Create a missing dependency error
    pub fn missing_dependency<S: Into<String>>(
        name: S,
        requester: Option<String>,
        requester_is_producer: bool,
    ) -> Self {
        Self::MissingDependency {
            name: name.into(),
            requester,
            requester_is_producer,
        }
    }

    /// Create a circular dependency error
    pub fn circular_dependency<S: Into<String>>(name: S, chain: Vec<String>) -> Self {
        Self::CircularDependency {
            name: name.into(),
            chain,
        }
    }

    /// Wrap a loader failure without altering its message
    pub fn loader<S: Into<String>, E: Into<BoxError>>(name: S, source: E) -> Self {
        Self::Loader {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create an illegal parameter name error
    pub fn illegal_parameter_name<S: Into<String>, R: Into<String>>(name: S, reason: R) -> Self {
        Self::IllegalParameterName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate registration error
    pub fn duplicate_registration<S: Into<String>>(name: S) -> Self {
        Self::DuplicateRegistration { name: name.into() }
    }
}

// Producer and argument error creation methods
impl Error {
    /// Create a producer failure
    pub fn producer<S: Into<String>, M: Into<String>>(name: S, message: M) -> Self {
        Self::Producer {
            name: name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a producer failure with source
    pub fn producer_with_source<
        S: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        name: S,
        message: M,
        source: E,
    ) -> Self {
        Self::Producer {
            name: name.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Error {
    /// Whether this error is a circular dependency report
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Whether this error reports a missing dependency
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingDependency { .. })
    }
}
