//! Package registry
//!
//! Packages are the global lookup of the module loader. Crates register them
//! at compile time through the [`PACKAGES`] distributed slice:
//!
//! ```ignore
//! #[linkme::distributed_slice(PACKAGES)]
//! static CLOCK: PackageEntry = PackageEntry {
//!     name: "clock",
//!     description: "Wall clock",
//!     export: || Artifact::callable(Callable::returning("clock", Vec::<String>::new(), now)),
//! };
//! ```

use darkmagic_domain::value_objects::Artifact;

/// Registry entry for one package
pub struct PackageEntry {
    /// Name the package is looked up by
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Builds the exported artifact; called on every uncached load
    pub export: fn() -> Artifact,
}

impl std::fmt::Debug for PackageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Every package linked into the binary
#[linkme::distributed_slice]
pub static PACKAGES: [PackageEntry] = [..];

/// Find a compile-time package by name
pub fn find_package(name: &str) -> Option<&'static PackageEntry> {
    PACKAGES.iter().find(|entry| entry.name == name)
}

/// Names of every compile-time package
pub fn list_packages() -> Vec<(&'static str, &'static str)> {
    PACKAGES
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
