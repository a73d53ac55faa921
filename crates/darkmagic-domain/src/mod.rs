//! # darkmagic domain
//!
//! Vocabulary shared by the resolution engine and its loaders: the error
//! type, artifacts and their provenance, callables with declared inputs, and
//! the [`ports::ArtifactLoader`] port.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | `Error` enum and `Result` alias |
//! | [`constants`] | Reserved names and markers |
//! | [`value_objects`] | `Value`, `Artifact`, `Callable`, `Arguments`, `Continuation` |
//! | [`ports`] | Loader trait |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{ArtifactLoader, SharedArtifactLoader};
pub use value_objects::{
    Arguments, Artifact, Body, Callable, Classification, Continuation, LoadedArtifact, Locator,
    Origin, ProducerOutcome, Value,
};
