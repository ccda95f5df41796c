//! Human-readable and JSON rendering of query results.

use std::path::Path;

use colored::Colorize;
use reflection_registry::Registry;
use reflection_registry_sdk::{QualifiedName, ReflectionRegistryApi, TypeDescriptor, TypeKind};
use serde_json::json;

/// Renders results either as colored text or as JSON on stdout.
pub struct Output {
    json: bool,
}

impl Output {
    #[must_use]
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn check_ok(&self, path: &Path, registry: &Registry) {
        if self.json {
            let counts: serde_json::Map<_, _> = TypeKind::ALL
                .into_iter()
                .map(|k| (k.as_str().to_owned(), json!(registry.types_of_kind(k).len())))
                .collect();
            emit(&json!({
                "ok": true,
                "path": path.display().to_string(),
                "packages": registry.all_packages().len(),
                "types": registry.len(),
                "kinds": counts,
            }));
            return;
        }

        println!(
            "{}",
            format!("OK: {} is a usable snapshot", path.display()).green()
        );
        println!("  Packages: {}", registry.all_packages().len());
        println!("  Types:    {}", registry.len());
        for kind in TypeKind::ALL {
            println!("    {:<14}{}", kind.as_str(), registry.types_of_kind(kind).len());
        }
    }

    pub fn check_failed(&self, path: &Path, error: &anyhow::Error) {
        if self.json {
            emit(&json!({
                "ok": false,
                "path": path.display().to_string(),
                "error": format!("{error:#}"),
            }));
            return;
        }
        println!(
            "{}",
            format!("FAILED: {} is not usable", path.display()).red().bold()
        );
        println!("  {}", format!("{error:#}").red());
    }

    pub fn packages(&self, registry: &Registry) {
        let index = registry.package_index();
        if self.json {
            let packages: Vec<_> = index
                .all_packages()
                .iter()
                .map(|p| {
                    json!({
                        "name": p,
                        "types": index.type_count(p),
                        "subPackages": index.sub_packages(p),
                    })
                })
                .collect();
            emit(&json!(packages));
            return;
        }

        for package in index.all_packages() {
            let count = index.type_count(package);
            let label = if count == 1 { "type" } else { "types" };
            println!("{}  ({count} {label})", package.bold());
            for sub in index.sub_packages(package) {
                println!("  - {}", sub.dimmed());
            }
        }
    }

    pub fn types(&self, types: &[&TypeDescriptor]) {
        if self.json {
            emit(&json!(types));
            return;
        }
        for ty in types {
            println!("{:<14}{}", ty.kind().as_str().cyan(), ty.qualified_name());
        }
    }

    pub fn type_detail(&self, ty: &TypeDescriptor) {
        if self.json {
            emit(&json!(ty));
            return;
        }
        let modifiers = ty.modifiers();
        println!("{}", ty.qualified_name().to_string().bold());
        println!("  Kind:       {}", ty.kind().as_str().cyan());
        println!("  Package:    {}", ty.package_name());
        println!("  Modifiers:  {}", modifiers.to_sorted_vec().join(", "));
        if let Some(provenance) = modifiers.provenance() {
            println!("  Provenance: {provenance}");
        }
        println!(
            "  Immutable:  {}",
            if modifiers.is_immutable_by_construction() {
                "yes"
            } else {
                "no"
            }
        );
    }

    pub fn not_found(&self, qn: &QualifiedName) {
        if self.json {
            emit(&json!({ "found": false, "package": qn.package, "name": qn.name }));
            return;
        }
        println!("{}", format!("No type `{qn}` in this snapshot").yellow());
    }
}

fn emit(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Failed to serialize results: {e}"),
    }
}
