//! # darkmagic application
//!
//! The resolution engine. An [`Injector`] reads a target's declared inputs,
//! loads or produces each one, and invokes the target once all are ready.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`signature`] | Declared inputs of a callable, trailing continuation |
//! | [`naming`] | Classification from exported names |
//! | [`descriptor`] | Per-name metadata and the auto-inject policy |
//! | [`registry`] | Descriptor store, one per injector |
//! | [`lineage`] | Producer chain of one resolution branch |
//! | [`waterfall`] | Ordered completion barrier |
//! | [`gate`] | Per-name production gates |
//! | [`options`] | Injector options and overrides |
//! | [`injector`] | The engine |

pub mod descriptor;
pub mod gate;
pub mod injector;
pub mod lineage;
pub mod naming;
pub mod options;
pub mod registry;
pub mod signature;
pub mod waterfall;

pub use descriptor::{Descriptor, InjectPolicy};
pub use injector::{Injector, InjectorBuilder};
pub use lineage::Lineage;
pub use options::{InjectorOptions, Override};
pub use registry::Registry;
pub use signature::Signature;
pub use waterfall::Waterfall;
