//! Domain layer for the Reflection Registry module.
//!
//! Contains the registry aggregate, its derived package index, and the loader
//! that validates raw snapshots into registries.

pub mod loader;
pub mod package_index;
pub mod registry;

pub use loader::{SnapshotLoader, load_snapshot};
pub use package_index::PackageIndex;
pub use registry::Registry;
