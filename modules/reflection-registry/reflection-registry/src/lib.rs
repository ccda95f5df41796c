//! Reflection Registry Module Implementation
//!
//! Loads an immutable snapshot of a library's public surface (packages and the
//! types they export) and answers structural queries over it. The public
//! contract lives in `reflection-registry-sdk` and is re-exported here.
//!
//! ## Architecture
//!
//! - **All-or-nothing load**: shape → per-type → referential validation; the
//!   first failure aborts and nothing is constructed
//! - **Derived index**: the package index is rebuilt from the type list, never patched
//! - **Snapshot text**: `infra::source` accepts the JavaScript-assignment form
//!   real producers emit; `infra::serializer` re-emits it

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === PUBLIC API (from SDK) ===
pub use reflection_registry_sdk::{
    ModifierSet, QualifiedName, ReflectionRegistryApi, RegistryError, TypeDescriptor, TypeKind,
    ValidationError,
};

// === CONFIGURATION ===
pub mod config;

// === INTERNAL MODULES ===
pub mod domain;
pub mod infra;

pub use config::RegistryConfig;
pub use domain::{PackageIndex, Registry, SnapshotLoader, load_snapshot};
