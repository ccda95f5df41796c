//! Snapshot loader: raw JSON snapshot → validated `Registry`.

use reflection_registry_sdk::{
    ModifierSet, PROVENANCE_TAG, RegistryError, TypeDescriptor, ValidationError,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::registry::Registry;
use crate::config::RegistryConfig;

const DOCUMENTS: &str = "documents";
const MODULES: &str = "modules";
const PACKAGES: &str = "packages";
const TYPES: &str = "types";

/// Top-level containers of a snapshot after shape validation.
struct SnapshotShape<'a> {
    documents: &'a [Value],
    modules: &'a [Value],
    packages: &'a [Value],
    types: &'a [Value],
}

/// Builds registries from raw snapshots.
///
/// Loading is all-or-nothing: the first failure is returned and nothing
/// partially built escapes.
#[derive(Debug, Clone, Default)]
pub struct SnapshotLoader {
    config: RegistryConfig,
}

impl SnapshotLoader {
    #[must_use]
    pub const fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Validates `snapshot` and builds a registry from it.
    ///
    /// # Errors
    ///
    /// - `MalformedSnapshot` if a top-level field is missing or mistyped
    /// - `Validation` for the first type (or declared package) failing its field rules
    /// - `DuplicateKey` if two types share package and name
    /// - `ReferentialIntegrity` if a type references an undeclared package
    pub fn load(&self, snapshot: &Value) -> Result<Registry, RegistryError> {
        let shape = self.check_shape(snapshot)?;
        debug!(
            documents = shape.documents.len(),
            modules = shape.modules.len(),
            packages = shape.packages.len(),
            types = shape.types.len(),
            "snapshot shape validated"
        );

        let packages = shape
            .packages
            .iter()
            .enumerate()
            .map(|(pos, value)| {
                value.as_str().map(ToOwned::to_owned).ok_or_else(|| {
                    RegistryError::malformed(format!("{PACKAGES}[{pos}]"), "must be a string")
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let types = shape
            .types
            .iter()
            .enumerate()
            .map(|(pos, entry)| self.build_type(pos, entry))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(types = types.len(), "type entries validated");

        let registry = Registry::new(
            shape.documents.to_vec(),
            shape.modules.to_vec(),
            packages,
            types,
        )?;

        info!(
            packages = registry.package_index().all_packages().len(),
            types = registry.len(),
            "snapshot loaded"
        );
        Ok(registry)
    }

    fn check_shape<'a>(&self, snapshot: &'a Value) -> Result<SnapshotShape<'a>, RegistryError> {
        let root = snapshot
            .as_object()
            .ok_or_else(|| RegistryError::malformed("$", "must be an object"))?;

        if self.config.reject_unknown_fields
            && let Some(key) = root.keys().find(|key| !self.is_known_field(key))
        {
            return Err(RegistryError::malformed(
                key.as_str(),
                "is not a recognized snapshot field",
            ));
        }

        let documents = self.documents_field(root)?;
        Ok(SnapshotShape {
            documents,
            modules: array_field(root, MODULES)?,
            packages: array_field(root, PACKAGES)?,
            types: array_field(root, TYPES)?,
        })
    }

    /// Resolves the document list from `documents` or one of its configured
    /// aliases. Exactly one of the accepted keys may be present.
    fn documents_field<'a>(
        &self,
        root: &'a Map<String, Value>,
    ) -> Result<&'a [Value], RegistryError> {
        let mut present = self.documents_keys().filter(|key| root.contains_key(*key));
        let Some(key) = present.next() else {
            return Err(RegistryError::malformed(DOCUMENTS, "is missing"));
        };
        if let Some(other) = present.next() {
            return Err(RegistryError::malformed(
                other,
                format!("duplicates the document list already given as `{key}`"),
            ));
        }

        if key != DOCUMENTS {
            warn!(
                field = %key,
                canonical = DOCUMENTS,
                "snapshot uses an alias for the document list"
            );
        }
        array_field(root, key)
    }

    fn documents_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(DOCUMENTS).chain(
            self.config
                .documents_field_aliases
                .iter()
                .map(String::as_str)
                .filter(|alias| *alias != DOCUMENTS),
        )
    }

    fn is_known_field(&self, key: &str) -> bool {
        matches!(key, MODULES | PACKAGES | TYPES) || self.documents_keys().any(|k| k == key)
    }

    fn build_type(&self, pos: usize, entry: &Value) -> Result<TypeDescriptor, RegistryError> {
        let location = format!("{TYPES}[{pos}]");
        let obj = entry
            .as_object()
            .ok_or_else(|| RegistryError::malformed(location.as_str(), "must be an object"))?;

        let name = string_field(obj, "name").map_err(|e| e.at(location.as_str()))?;
        let in_type = |e: ValidationError| e.for_type(name).at(location.as_str());

        let package_name = string_field(obj, "packageName").map_err(in_type)?;
        let kind = string_field(obj, "type").map_err(in_type)?;
        let modifiers = self.build_modifiers(obj.get("modifiers")).map_err(in_type)?;

        TypeDescriptor::parse(name, package_name, kind, modifiers)
            .map_err(|e| RegistryError::Validation(e.at(location.as_str())))
    }

    fn build_modifiers(&self, value: Option<&Value>) -> Result<ModifierSet, ValidationError> {
        let Some(value) = value else {
            return Ok(ModifierSet::default());
        };
        let obj = value
            .as_object()
            .ok_or_else(|| ValidationError::new("`modifiers` must be an object"))?;

        let provenance = match obj.get(PROVENANCE_TAG) {
            None => None,
            Some(Value::String(p)) => Some(p.clone()),
            Some(_) => {
                return Err(ValidationError::new(format!(
                    "modifier `{PROVENANCE_TAG}` must be a string"
                )));
            }
        };
        let tags = obj
            .keys()
            .filter(|key| key.as_str() != PROVENANCE_TAG)
            .map(String::as_str);

        ModifierSet::with_provenance(
            tags,
            provenance,
            self.config.immutable_provenance_markers.as_slice(),
        )
    }
}

/// Loads `snapshot` with the default configuration.
///
/// # Errors
///
/// See [`SnapshotLoader::load`].
pub fn load_snapshot(snapshot: &Value) -> Result<Registry, RegistryError> {
    SnapshotLoader::default().load(snapshot)
}

fn array_field<'a>(root: &'a Map<String, Value>, key: &str) -> Result<&'a [Value], RegistryError> {
    match root.get(key) {
        None => Err(RegistryError::malformed(key, "is missing")),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(RegistryError::malformed(key, "must be an array")),
    }
}

fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str, ValidationError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ValidationError::new(format!("`{key}` must be a string"))),
        None => Err(ValidationError::new(format!("`{key}` is missing"))),
    }
}
