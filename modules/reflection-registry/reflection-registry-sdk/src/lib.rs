//! Reflection Registry SDK
//!
//! This crate provides the public contract of the `reflection-registry` module:
//! - `TypeDescriptor`, `TypeKind` and `ModifierSet` describing a library's exported types
//! - `ReflectionRegistryApi` trait exposing the read-only query surface
//! - `RegistryError` / `ValidationError` for load failures
//!
//! ## Usage
//!
//! ```ignore
//! use reflection_registry_sdk::{ReflectionRegistryApi, TypeKind};
//!
//! let enums = registry.types_of_kind(TypeKind::Enum);
//! let color = registry.type_by_qualified_name("marionette.platform", "Color");
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root for convenience
pub use api::ReflectionRegistryApi;
pub use error::{RegistryError, ValidationError};
pub use models::{ModifierSet, PROVENANCE_TAG, QualifiedName, TypeDescriptor, TypeKind};
