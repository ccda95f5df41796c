//! Package index: package name → positions of its types in the registry.

use std::collections::{HashMap, HashSet};

use reflection_registry_sdk::TypeDescriptor;

/// Read-only lookup from package name to the types declared in it.
///
/// The index never owns descriptors: it stores positions into the type list it
/// was built from, so it must be rebuilt whenever that list changes.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    packages: Vec<String>,
    declared: HashSet<String>,
    members: HashMap<String, Vec<usize>>,
}

impl PackageIndex {
    /// Builds the index in a single pass over `types`.
    ///
    /// Every declared package gets an entry, so declared-but-empty packages
    /// resolve to an empty member list. Positions keep snapshot order.
    #[must_use]
    pub fn build(packages: Vec<String>, types: &[TypeDescriptor]) -> Self {
        let mut members: HashMap<String, Vec<usize>> = packages
            .iter()
            .map(|p| (p.clone(), Vec::new()))
            .collect();

        for (pos, ty) in types.iter().enumerate() {
            members
                .entry(ty.package_name().to_owned())
                .or_default()
                .push(pos);
        }

        let declared = packages.iter().cloned().collect();
        Self {
            packages,
            declared,
            members,
        }
    }

    /// Positions of the types in `package_name`, in snapshot order.
    #[must_use]
    pub fn positions_in(&self, package_name: &str) -> &[usize] {
        self.members
            .get(package_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if `name` is a declared package.
    #[must_use]
    pub fn package_exists(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// The declared package list, in snapshot order.
    #[must_use]
    pub fn all_packages(&self) -> &[String] {
        &self.packages
    }

    /// Number of types declared in `package_name`.
    #[must_use]
    pub fn type_count(&self, package_name: &str) -> usize {
        self.positions_in(package_name).len()
    }

    /// Declared packages exactly one segment below `name`, in snapshot order.
    #[must_use]
    pub fn sub_packages(&self, name: &str) -> Vec<&str> {
        self.packages
            .iter()
            .filter_map(|p| p.strip_prefix(name)?.strip_prefix('.').map(|rest| (p, rest)))
            .filter(|(_, rest)| !rest.is_empty() && !rest.contains('.'))
            .map(|(p, _)| p.as_str())
            .collect()
    }
}
