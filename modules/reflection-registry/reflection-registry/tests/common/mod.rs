#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for reflection-registry integration tests

use std::path::PathBuf;

use reflection_registry::{Registry, infra::read_snapshot_file, load_snapshot};
use serde_json::{Value, json};

/// Path of the snapshot captured from a real producer (JavaScript form).
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/marionette.js")
}

pub fn load_fixture() -> Registry {
    let value = read_snapshot_file(&fixture_path()).unwrap();
    load_snapshot(&value).unwrap()
}

/// Builds a snapshot with empty documents/modules.
pub fn snapshot(packages: &[&str], types: Value) -> Value {
    json!({
        "documents": [],
        "modules": [],
        "packages": packages,
        "types": types,
    })
}

pub fn type_entry(name: &str, package: &str, kind: &str) -> Value {
    json!({
        "name": name,
        "packageName": package,
        "type": kind,
        "modifiers": { "#": "java.util.Collections$UnmodifiableSet" }
    })
}
