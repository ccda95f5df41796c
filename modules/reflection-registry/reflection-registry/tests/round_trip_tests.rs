#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for re-serializing a registry and loading it again

mod common;

use common::{fixture_path, load_fixture, snapshot, type_entry};
use reflection_registry::infra::{
    parse_snapshot_text, read_snapshot_file, to_snapshot_js, to_snapshot_value,
};
use reflection_registry::{
    ReflectionRegistryApi, RegistryConfig, SnapshotLoader, load_snapshot,
};
use serde_json::json;

#[test]
fn test_fixture_round_trip() {
    let first = load_fixture();
    let second = load_snapshot(&to_snapshot_value(&first)).unwrap();

    assert_eq!(first.types(), second.types());
    assert_eq!(first.all_packages(), second.all_packages());
}

#[test]
fn test_serialization_is_stable() {
    let first = load_fixture();
    let once = to_snapshot_value(&first);
    let twice = to_snapshot_value(&load_snapshot(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn test_js_round_trip_through_file() {
    let registry = load_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.js");
    std::fs::write(&path, to_snapshot_js(&registry, "root").unwrap()).unwrap();

    let reloaded = load_snapshot(&read_snapshot_file(&path).unwrap()).unwrap();
    assert_eq!(registry.types(), reloaded.types());
}

#[test]
fn test_docs_alias_is_normalized() {
    let raw = std::fs::read_to_string(fixture_path()).unwrap();
    assert!(parse_snapshot_text(&raw).unwrap().get("docs").is_some());

    let value = to_snapshot_value(&load_fixture());
    assert!(value.get("documents").is_some());
    assert!(value.get("docs").is_none());
}

#[test]
fn test_round_trip_with_plain_tags() {
    let value = snapshot(
        &["a"],
        json!([
            type_entry("X", "a", "Enum"),
            { "name": "Y", "packageName": "a", "type": "Interface",
              "modifiers": { "static": 1, "public": null } }
        ]),
    );
    let first = load_snapshot(&value).unwrap();
    let second = load_snapshot(&to_snapshot_value(&first)).unwrap();
    assert_eq!(first.types(), second.types());

    let y = second.type_by_qualified_name("a", "Y").unwrap();
    assert_eq!(y.modifiers().to_sorted_vec(), vec!["public", "static"]);
    assert_eq!(y.modifiers().provenance(), None);
}

#[test]
fn test_round_trip_with_custom_document_alias() {
    let loader = SnapshotLoader::new(RegistryConfig {
        documents_field_aliases: vec!["docs".to_owned()],
        ..RegistryConfig::default()
    });
    let first = loader
        .load(&json!({
            "docs": [{"title": "Guide"}],
            "modules": [],
            "packages": ["a"],
            "types": [type_entry("X", "a", "Class")]
        }))
        .unwrap();

    let second = loader.load(&to_snapshot_value(&first)).unwrap();
    assert_eq!(first.documents(), second.documents());
    assert_eq!(first.types(), second.types());
}
