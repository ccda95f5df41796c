//! Public models for the `reflection-registry` module.
//!
//! These are transport-agnostic data structures describing a library's exported
//! types. All of them are immutable once constructed: there are no setters and
//! no interior mutability, so a loaded registry can be shared freely.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Modifier key carrying the provenance of a type's modifier collection.
pub const PROVENANCE_TAG: &str = "#";

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("static regex should not panic")
});

/// Returns `true` if `name` is a valid simple type name.
#[must_use]
pub fn is_valid_type_name(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Returns `true` if `name` is a valid dot-segmented package name.
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

/// The kind of an exported type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    AbstractClass,
}

impl TypeKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Class,
        Self::Interface,
        Self::Enum,
        Self::AbstractClass,
    ];

    /// Returns the wire representation of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Enum => "Enum",
            Self::AbstractClass => "AbstractClass",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::new(format!("unknown type kind `{s}`")))
    }
}

/// An immutable set of modifier tags attached to a type.
///
/// Tags are kept sorted, so iteration and [`ModifierSet::to_sorted_vec`] are
/// deterministic. The provenance tag (`#`) additionally keeps its value, from
/// which the immutable-by-construction fact is derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifierSet {
    tags: BTreeSet<String>,
    provenance: Option<String>,
    immutable_by_construction: bool,
}

impl ModifierSet {
    /// Creates a modifier set from plain tags.
    ///
    /// Duplicate tags collapse into one.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if any tag is empty.
    pub fn new<I, S>(tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_provenance::<_, _, &str>(tags, None, &[])
    }

    /// Creates a modifier set whose `#` tag records where the collection came from.
    ///
    /// The set is immutable by construction when the provenance contains any of
    /// `immutable_markers`. A provenance always implies the `#` tag.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if any tag is empty.
    pub fn with_provenance<I, S, M>(
        tags: I,
        provenance: Option<String>,
        immutable_markers: &[M],
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        M: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for tag in tags {
            let tag = tag.into();
            if tag.is_empty() {
                return Err(ValidationError::new("modifier tag must be a non-empty string"));
            }
            set.insert(tag);
        }
        if provenance.is_some() {
            set.insert(PROVENANCE_TAG.to_owned());
        }

        let immutable_by_construction = provenance.as_deref().is_some_and(|p| {
            immutable_markers
                .iter()
                .any(|marker| p.contains(marker.as_ref()))
        });

        Ok(Self {
            tags: set,
            provenance,
            immutable_by_construction,
        })
    }

    /// Returns `true` if the set carries `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns the tags in lexicographic order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }

    /// Iterates the tags in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Value of the `#` tag, if present.
    #[must_use]
    pub fn provenance(&self) -> Option<&str> {
        self.provenance.as_deref()
    }

    /// Whether the producer reported this collection as unmodifiable.
    #[must_use]
    pub const fn is_immutable_by_construction(&self) -> bool {
        self.immutable_by_construction
    }
}

/// The `(package, name)` pair uniquely identifying a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QualifiedName {
    pub package: String,
    pub name: String,
}

impl QualifiedName {
    #[must_use]
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Splits `pkg.sub.Name` at its last dot.
    ///
    /// Returns `None` when there is no package part.
    #[must_use]
    pub fn parse(qualified: &str) -> Option<Self> {
        let (package, name) = qualified.rsplit_once('.')?;
        if package.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(package, name))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// One exported type of the described library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    name: String,
    package_name: String,
    kind: TypeKind,
    modifiers: ModifierSet,
}

impl TypeDescriptor {
    /// Creates a validated type descriptor.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the type if `name` is not an
    /// identifier or `package_name` is not a dot-segmented identifier path.
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        kind: TypeKind,
        modifiers: ModifierSet,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let package_name = package_name.into();

        if !is_valid_type_name(&name) {
            return Err(
                ValidationError::new(format!("`{name}` is not a valid type name")).for_type(name),
            );
        }
        if !is_valid_package_name(&package_name) {
            return Err(ValidationError::new(format!(
                "`{package_name}` is not a valid package name"
            ))
            .for_type(name));
        }

        Ok(Self {
            name,
            package_name,
            kind,
            modifiers,
        })
    }

    /// Like [`TypeDescriptor::new`], parsing the kind from its wire form.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the type if the kind is unknown or any
    /// other field is invalid.
    pub fn parse(
        name: impl Into<String>,
        package_name: impl Into<String>,
        kind: &str,
        modifiers: ModifierSet,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let kind = kind.parse::<TypeKind>().map_err(|e| e.for_type(&name))?;
        Self::new(name, package_name, kind, modifiers)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[must_use]
    pub const fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(&self.package_name, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNMODIFIABLE: &str = "java.util.Collections$UnmodifiableSet";

    #[test]
    fn test_type_kind_round_trips_wire_strings() {
        for kind in TypeKind::ALL {
            assert_eq!(kind.as_str().parse::<TypeKind>().unwrap(), kind);
        }
        assert_eq!(TypeKind::AbstractClass.to_string(), "AbstractClass");
    }

    #[test]
    fn test_type_kind_rejects_unknown_and_wrong_case() {
        assert!("Struct".parse::<TypeKind>().is_err());
        assert!("class".parse::<TypeKind>().is_err());
        assert!("".parse::<TypeKind>().is_err());
    }

    #[test]
    fn test_type_kind_serde_uses_wire_strings() {
        let json = serde_json::to_string(&TypeKind::AbstractClass).unwrap();
        assert_eq!(json, "\"AbstractClass\"");
        let kind: TypeKind = serde_json::from_str("\"Enum\"").unwrap();
        assert_eq!(kind, TypeKind::Enum);
    }

    #[test]
    fn test_modifier_set_collapses_duplicates() {
        let set = ModifierSet::new(["final", "public", "final"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("final"));
        assert!(!set.contains("static"));
    }

    #[test]
    fn test_modifier_set_sorted_output_is_deterministic() {
        let a = ModifierSet::new(["static", "abstract", "public"]).unwrap();
        let b = ModifierSet::new(["public", "static", "abstract"]).unwrap();
        assert_eq!(a.to_sorted_vec(), vec!["abstract", "public", "static"]);
        assert_eq!(a.to_sorted_vec(), b.to_sorted_vec());
        assert_eq!(a, b);
    }

    #[test]
    fn test_modifier_set_rejects_empty_tag() {
        let err = ModifierSet::new(["public", ""]).unwrap_err();
        assert!(err.reason.contains("non-empty"));
    }

    #[test]
    fn test_modifier_set_provenance() {
        let set = ModifierSet::with_provenance(
            Vec::<String>::new(),
            Some(UNMODIFIABLE.to_owned()),
            &["Unmodifiable"],
        )
        .unwrap();
        assert!(set.contains(PROVENANCE_TAG));
        assert_eq!(set.provenance(), Some(UNMODIFIABLE));
        assert!(set.is_immutable_by_construction());

        let set =
            ModifierSet::with_provenance(["#"], Some("U".to_owned()), &["Unmodifiable"]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_immutable_by_construction());

        let set = ModifierSet::new(["public"]).unwrap();
        assert_eq!(set.provenance(), None);
        assert!(!set.is_immutable_by_construction());
    }

    #[test]
    fn test_name_validation() {
        assert!(is_valid_type_name("Color"));
        assert!(is_valid_type_name("_private"));
        assert!(is_valid_type_name("Outer$Inner"));
        assert!(!is_valid_type_name(""));
        assert!(!is_valid_type_name("1Color"));
        assert!(!is_valid_type_name("Key Event"));
        assert!(!is_valid_type_name("a.B"));

        assert!(is_valid_package_name("marionette"));
        assert!(is_valid_package_name("marionette.platform"));
        assert!(!is_valid_package_name(""));
        assert!(!is_valid_package_name("marionette."));
        assert!(!is_valid_package_name(".marionette"));
        assert!(!is_valid_package_name("a..b"));
    }

    #[test]
    fn test_type_descriptor_accessors() {
        let modifiers = ModifierSet::new(["public"]).unwrap();
        let ty = TypeDescriptor::new("Color", "marionette.platform", TypeKind::Class, modifiers)
            .unwrap();

        assert_eq!(ty.name(), "Color");
        assert_eq!(ty.package_name(), "marionette.platform");
        assert_eq!(ty.kind(), TypeKind::Class);
        assert!(ty.modifiers().contains("public"));
        assert_eq!(ty.qualified_name().to_string(), "marionette.platform.Color");
    }

    #[test]
    fn test_type_descriptor_rejects_bad_fields() {
        let err = TypeDescriptor::new("", "a", TypeKind::Class, ModifierSet::default()).unwrap_err();
        assert!(err.reason.contains("type name"));

        let err =
            TypeDescriptor::new("X", "a..b", TypeKind::Class, ModifierSet::default()).unwrap_err();
        assert_eq!(err.type_name.as_deref(), Some("X"));
        assert!(err.reason.contains("package name"));
    }

    #[test]
    fn test_type_descriptor_parse_names_type_on_unknown_kind() {
        let err = TypeDescriptor::parse("Point", "a", "Struct", ModifierSet::default()).unwrap_err();
        assert_eq!(err.type_name.as_deref(), Some("Point"));
        assert!(err.reason.contains("Struct"));
    }

    #[test]
    fn test_qualified_name_parse() {
        let qn = QualifiedName::parse("marionette.platform.Color").unwrap();
        assert_eq!(qn.package, "marionette.platform");
        assert_eq!(qn.name, "Color");

        assert!(QualifiedName::parse("Color").is_none());
        assert!(QualifiedName::parse(".Color").is_none());
        assert!(QualifiedName::parse("a.").is_none());
    }
}
