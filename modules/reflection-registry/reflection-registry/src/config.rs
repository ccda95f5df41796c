//! Configuration for the Reflection Registry module.

use serde::Deserialize;

/// Configuration for snapshot loading.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RegistryConfig {
    /// Top-level keys accepted for the document list. `documents` is accepted
    /// even when not listed; a snapshot may carry only one of them.
    /// Default: `["documents", "docs"]`
    pub documents_field_aliases: Vec<String>,

    /// Reject snapshots carrying top-level keys other than the four known ones.
    /// Default: `false`
    pub reject_unknown_fields: bool,

    /// Substrings of a `#` provenance value that mark a modifier collection as
    /// immutable by construction.
    /// Default: `["Unmodifiable", "Immutable"]`
    pub immutable_provenance_markers: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            documents_field_aliases: vec!["documents".to_owned(), "docs".to_owned()],
            reject_unknown_fields: false,
            immutable_provenance_markers: vec!["Unmodifiable".to_owned(), "Immutable".to_owned()],
        }
    }
}
