//! Extraction helpers and custom assertions

use serde_json::Value;

use extdoc_engine::{extract, EngineContext, Entity, EntityKind, Extraction};

/// Run the pipeline with the default context, panicking on failure
pub fn extract_ok(source: &str) -> Extraction {
    extract_with(source, &EngineContext::default())
}

pub fn extract_with(source: &str, engine: &EngineContext) -> Extraction {
    extract(source, engine).unwrap_or_else(|e| panic!("extraction failed: {}\n{}", e, source))
}

/// The merged entity with the given kind and name
pub fn find_entity<'a>(extraction: &'a Extraction, kind: EntityKind, name: &str) -> &'a Entity {
    extraction
        .entities
        .iter()
        .find(|e| e.kind == kind && e.name_str() == name)
        .unwrap_or_else(|| {
            panic!(
                "no {} named {:?} in {:#?}",
                kind.as_str(),
                name,
                extraction.entities
            )
        })
}

/// Names of a class's inline members
pub fn member_names(class: &Entity) -> Vec<&str> {
    class.members.iter().map(|m| m.name_str()).collect()
}

/// Assert that every docset carries a detected entity
pub fn assert_all_docsets_have_code(extraction: &Extraction) {
    for docset in &extraction.docsets {
        assert!(
            docset.code.is_some(),
            "docset at line {} has no code entity",
            docset.line
        );
    }
}

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that output contains expected substring
pub fn assert_contains(output: &str, expected: &str) {
    assert!(
        output.contains(expected),
        "Expected output to contain '{}'\nOutput:\n{}",
        expected,
        output
    );
}
