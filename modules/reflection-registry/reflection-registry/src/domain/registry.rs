//! Registry aggregate: the immutable result of one snapshot load.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use reflection_registry_sdk::models::is_valid_package_name;
use reflection_registry_sdk::{
    ReflectionRegistryApi, RegistryError, TypeDescriptor, TypeKind, ValidationError,
};

use super::package_index::PackageIndex;

/// Owns every type descriptor of a snapshot together with its derived lookups.
///
/// A `Registry` is only ever produced fully validated: declared packages are
/// well-formed and unique, qualified names are unique, and every type's package
/// is declared. There is no mutation path after construction.
#[derive(Debug, Clone)]
pub struct Registry {
    documents: Vec<serde_json::Value>,
    modules: Vec<serde_json::Value>,
    types: Vec<TypeDescriptor>,
    index: PackageIndex,
    by_name: HashMap<String, HashMap<String, usize>>,
}

impl Registry {
    /// Assembles a registry from already-validated descriptors.
    ///
    /// Checks run in this order: declared package names, qualified-name
    /// uniqueness, referential integrity.
    ///
    /// # Errors
    ///
    /// - `Validation` if a declared package name is malformed or repeated
    /// - `DuplicateKey` if two types share package and name
    /// - `ReferentialIntegrity` if a type's package is not declared
    pub fn new(
        documents: Vec<serde_json::Value>,
        modules: Vec<serde_json::Value>,
        packages: Vec<String>,
        types: Vec<TypeDescriptor>,
    ) -> Result<Self, RegistryError> {
        check_declared_packages(&packages)?;

        let mut by_name: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for (pos, ty) in types.iter().enumerate() {
            let names = by_name.entry(ty.package_name().to_owned()).or_default();
            match names.entry(ty.name().to_owned()) {
                Entry::Occupied(first) => {
                    return Err(RegistryError::duplicate(
                        ty.package_name(),
                        ty.name(),
                        *first.get(),
                        pos,
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
            }
        }

        let index = PackageIndex::build(packages, &types);
        if let Some((pos, ty)) = types
            .iter()
            .enumerate()
            .find(|(_, ty)| !index.package_exists(ty.package_name()))
        {
            return Err(RegistryError::dangling_package(
                ty.package_name(),
                ty.name(),
                pos,
            ));
        }

        Ok(Self {
            documents,
            modules,
            types,
            index,
            by_name,
        })
    }

    /// All types, in snapshot order.
    #[must_use]
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The derived package index.
    #[must_use]
    pub const fn package_index(&self) -> &PackageIndex {
        &self.index
    }
}

fn check_declared_packages(packages: &[String]) -> Result<(), ValidationError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(packages.len());
    for (pos, package) in packages.iter().enumerate() {
        let location = format!("packages[{pos}]");
        if !is_valid_package_name(package) {
            return Err(
                ValidationError::new(format!("`{package}` is not a valid package name"))
                    .at(location),
            );
        }
        if let Some(first) = seen.insert(package, pos) {
            return Err(ValidationError::new(format!(
                "package `{package}` already declared at packages[{first}]"
            ))
            .at(location));
        }
    }
    Ok(())
}

impl ReflectionRegistryApi for Registry {
    fn type_by_qualified_name(&self, package_name: &str, name: &str) -> Option<&TypeDescriptor> {
        let pos = *self.by_name.get(package_name)?.get(name)?;
        self.types.get(pos)
    }

    fn types_of_kind(&self, kind: TypeKind) -> Vec<&TypeDescriptor> {
        self.types.iter().filter(|t| t.kind() == kind).collect()
    }

    fn all_packages(&self) -> &[String] {
        self.index.all_packages()
    }

    fn types_in(&self, package_name: &str) -> Vec<&TypeDescriptor> {
        self.index
            .positions_in(package_name)
            .iter()
            .filter_map(|&pos| self.types.get(pos))
            .collect()
    }

    fn package_exists(&self, package_name: &str) -> bool {
        self.index.package_exists(package_name)
    }

    fn documents(&self) -> &[serde_json::Value] {
        &self.documents
    }

    fn modules(&self) -> &[serde_json::Value] {
        &self.modules
    }
}
