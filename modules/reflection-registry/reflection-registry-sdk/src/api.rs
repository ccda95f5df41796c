//! `ReflectionRegistryApi` trait definition.
//!
//! This trait is the read-only query contract consumed by documentation
//! generators, API browsers and other downstream tools.

use crate::models::{TypeDescriptor, TypeKind};

/// Query surface of a loaded registry.
///
/// Implementations are immutable after construction, so every method is a pure
/// read and the trait requires `Send + Sync`.
pub trait ReflectionRegistryApi: Send + Sync {
    /// Looks up a type by its qualified name.
    ///
    /// `None` is the normal "not found" outcome, not a failure.
    fn type_by_qualified_name(&self, package_name: &str, name: &str) -> Option<&TypeDescriptor>;

    /// All types of `kind`, in snapshot order.
    fn types_of_kind(&self, kind: TypeKind) -> Vec<&TypeDescriptor>;

    /// The declared package list, in snapshot order.
    fn all_packages(&self) -> &[String];

    /// Types declared in `package_name`, in snapshot order.
    ///
    /// A declared package without types yields an empty list, as does an
    /// undeclared one; use [`ReflectionRegistryApi::package_exists`] to tell them apart.
    fn types_in(&self, package_name: &str) -> Vec<&TypeDescriptor>;

    /// Returns `true` if `package_name` is in the declared package list.
    fn package_exists(&self, package_name: &str) -> bool;

    /// Opaque top-level document entries, passed through untouched.
    fn documents(&self) -> &[serde_json::Value];

    /// Opaque top-level module entries, passed through untouched.
    fn modules(&self) -> &[serde_json::Value];
}
