//! Value objects shared by the engine and its loaders

pub mod arguments;
pub mod artifact;
pub mod callable;
pub mod continuation;
pub mod value;

pub use arguments::Arguments;
pub use artifact::{Artifact, Classification, LoadedArtifact, Locator, Origin};
pub use callable::{Body, Callable, DeferredFn, FutureFn, ProducerOutcome, ReturningFn};
pub use continuation::Continuation;
pub use value::Value;
