//! Ports implemented outside the domain

pub mod loader;

pub use loader::{ArtifactLoader, SharedArtifactLoader};
