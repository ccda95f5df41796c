//! Re-emits a `Registry` in the snapshot schema it was loaded from.

use reflection_registry_sdk::{ModifierSet, PROVENANCE_TAG, ReflectionRegistryApi, TypeDescriptor};
use serde_json::{Map, Value, json};

use crate::domain::Registry;

/// Serializes `registry` back into the snapshot schema.
///
/// Documents are written under `documents`. Modifier values are not retained
/// on load, so `#` maps to the provenance and every other tag maps to itself.
#[must_use]
pub fn to_snapshot_value(registry: &Registry) -> Value {
    json!({
        "documents": registry.documents(),
        "modules": registry.modules(),
        "packages": registry.all_packages(),
        "types": registry.types().iter().map(type_value).collect::<Vec<_>>(),
    })
}

/// Serializes `registry` as a JavaScript assignment to `var_name`.
///
/// # Errors
///
/// Returns an error if the value cannot be rendered as JSON.
pub fn to_snapshot_js(registry: &Registry, var_name: &str) -> serde_json::Result<String> {
    let body = serde_json::to_string_pretty(&to_snapshot_value(registry))?;
    Ok(format!("const {var_name} = {body};\n"))
}

fn type_value(ty: &TypeDescriptor) -> Value {
    json!({
        "modifiers": modifiers_value(ty.modifiers()),
        "name": ty.name(),
        "packageName": ty.package_name(),
        "type": ty.kind().as_str(),
    })
}

fn modifiers_value(modifiers: &ModifierSet) -> Value {
    let map: Map<String, Value> = modifiers
        .iter()
        .map(|tag| {
            let value = match (tag, modifiers.provenance()) {
                (PROVENANCE_TAG, Some(provenance)) => provenance,
                _ => tag,
            };
            (tag.to_owned(), Value::from(value))
        })
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::load_snapshot;
    use crate::infra::source::parse_snapshot_text;

    fn sample() -> Value {
        json!({
            "documents": [],
            "modules": [{"name": "core"}],
            "packages": ["a", "b"],
            "types": [
                { "name": "X", "packageName": "a", "type": "Class",
                  "modifiers": { "#": "java.util.Collections$UnmodifiableSet", "final": true } },
                { "name": "Y", "packageName": "b", "type": "AbstractClass", "modifiers": {} }
            ]
        })
    }

    #[test]
    fn test_serialized_shape() {
        let registry = load_snapshot(&sample()).unwrap();
        let value = to_snapshot_value(&registry);

        assert_eq!(value["packages"], json!(["a", "b"]));
        assert_eq!(value["modules"], json!([{"name": "core"}]));
        assert_eq!(
            value["types"][0],
            json!({
                "modifiers": { "#": "java.util.Collections$UnmodifiableSet", "final": "final" },
                "name": "X",
                "packageName": "a",
                "type": "Class"
            })
        );
        assert_eq!(value["types"][1]["type"], "AbstractClass");
    }

    #[test]
    fn test_round_trip_preserves_types() {
        let first = load_snapshot(&sample()).unwrap();
        let second = load_snapshot(&to_snapshot_value(&first)).unwrap();
        assert_eq!(first.types(), second.types());
        assert_eq!(first.all_packages(), second.all_packages());
        assert_eq!(first.modules(), second.modules());
    }

    #[test]
    fn test_js_output_parses_back() {
        let registry = load_snapshot(&sample()).unwrap();
        let js = to_snapshot_js(&registry, "root").unwrap();
        assert!(js.starts_with("const root = {"));

        let reparsed = parse_snapshot_text(&js).unwrap();
        assert_eq!(reparsed, to_snapshot_value(&registry));
    }
}
