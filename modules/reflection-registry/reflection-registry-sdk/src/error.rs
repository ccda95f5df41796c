//! Public error types for the `reflection-registry` module.
//!
//! Every variant is a load-time failure: a snapshot that produces any of them
//! is not usable. Query-time absence is not an error (see `ReflectionRegistryApi`).

use std::fmt;

use thiserror::Error;

/// A single snapshot entry failed its field-level rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Position of the offending entry in the snapshot (e.g. `types[3]`).
    /// Empty when the error was raised outside a snapshot load.
    pub location: String,
    /// Name of the offending type, when it could be read.
    pub type_name: Option<String>,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error with only a reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            location: String::new(),
            type_name: None,
            reason: reason.into(),
        }
    }

    /// Attaches the name of the type being validated.
    #[must_use]
    pub fn for_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Attaches the snapshot position of the entry being validated.
    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.location.is_empty(), &self.type_name) {
            (false, Some(name)) => write!(f, "{} (`{name}`): {}", self.location, self.reason),
            (false, None) => write!(f, "{}: {}", self.location, self.reason),
            (true, Some(name)) => write!(f, "`{name}`: {}", self.reason),
            (true, None) => f.write_str(&self.reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors returned when a snapshot cannot be turned into a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A top-level field or container has the wrong shape.
    #[error("Malformed snapshot: `{field}` {reason}")]
    MalformedSnapshot { field: String, reason: String },

    /// A single entry failed field-level validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    /// A type references a package that is not in the declared package list.
    #[error(
        "Referential integrity violated: `{type_name}` at types[{index}] references undeclared package `{package}`"
    )]
    ReferentialIntegrity {
        package: String,
        type_name: String,
        index: usize,
    },

    /// Two types share the same package and name.
    #[error(
        "Duplicate type `{package}.{name}` at types[{duplicate_index}] (first declared at types[{first_index}])"
    )]
    DuplicateKey {
        package: String,
        name: String,
        first_index: usize,
        duplicate_index: usize,
    },
}

impl RegistryError {
    /// Creates a `MalformedSnapshot` error.
    #[must_use]
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ReferentialIntegrity` error.
    #[must_use]
    pub fn dangling_package(
        package: impl Into<String>,
        type_name: impl Into<String>,
        index: usize,
    ) -> Self {
        Self::ReferentialIntegrity {
            package: package.into(),
            type_name: type_name.into(),
            index,
        }
    }

    /// Creates a `DuplicateKey` error.
    #[must_use]
    pub fn duplicate(
        package: impl Into<String>,
        name: impl Into<String>,
        first_index: usize,
        duplicate_index: usize,
    ) -> Self {
        Self::DuplicateKey {
            package: package.into(),
            name: name.into(),
            first_index,
            duplicate_index,
        }
    }

    /// Returns `true` if this is a shape violation.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedSnapshot { .. })
    }

    /// Returns `true` if this is a field-level validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` if this is a dangling package reference.
    #[must_use]
    pub const fn is_referential_integrity(&self) -> bool {
        matches!(self, Self::ReferentialIntegrity { .. })
    }

    /// Returns `true` if this is a duplicate qualified name.
    #[must_use]
    pub const fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}

impl From<ValidationError> for RegistryError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
