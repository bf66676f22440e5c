//! Syntax errors, the fallback guarantee and repeatable output

use extdoc_engine::{extract, EngineContext, EntityKind, ExtdocError};

use crate::common::{assert_all_docsets_have_code, extract_ok, find_entity};

#[test]
fn test_syntax_error_reports_line() {
    let engine = EngineContext::default();
    let err = extract("var x = 1;\nvar = ;\n", &engine).unwrap_err();
    assert!(matches!(err, ExtdocError::Syntax { .. }), "{:?}", err);
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().starts_with("invalid syntax at line 2"));
}

#[test]
fn test_unterminated_input() {
    let engine = EngineContext::default();
    let err = extract("/** Broken. */\nExt.define('App.X', {\n", &engine).unwrap_err();
    assert!(matches!(err, ExtdocError::Syntax { .. }), "{:?}", err);
}

#[test]
fn test_empty_source() {
    let extraction = extract_ok("");
    assert!(extraction.docsets.is_empty());
    assert!(extraction.entities.is_empty());
    assert!(extraction.warnings.is_empty());
}

#[test]
fn test_every_docset_gets_code() {
    let sources = [
        "/** a */\nif (x) { y(); }",
        "/** a */\nwhile (busy) {}",
        "/** a */\nreturnValue();",
        "// note\nvar x = 1;",
        "/** a */\n/** b */\nfoo = 1;",
        "x = {\n  a: 1\n  /** trailing */\n};",
        "/** @class */",
        "function f() {\n  /** inner */\n  return 1;\n}",
    ];
    for source in sources {
        let extraction = extract_ok(source);
        assert_all_docsets_have_code(&extraction);
    }
}

#[test]
fn test_unrecognized_statement_is_anonymous_property() {
    let extraction = extract_ok("/** Loop. */\nfor (;;) { break; }");
    assert_eq!(extraction.entities.len(), 1);
    assert_eq!(extraction.entities[0].kind, EntityKind::Property);
    assert_eq!(extraction.entities[0].name, None);
}

#[test]
fn test_output_is_repeatable() {
    let source = r#"/** The grid. */
Ext.define('App.Grid', {
    mixins: { sortable: 'App.mixin.Sortable', filterable: 'App.mixin.Filterable' },
    config: { title: 'x', width: 100 },
    /** @event refresh */
    refresh: function() { var me = this; me.fireEvent('refresh'); }
});
App.util = { Helper: function() {} };"#;
    let first = serde_json::to_string(&extract_ok(source)).expect("serialize");
    let second = serde_json::to_string(&extract_ok(source)).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn test_regexp_and_negative_defaults() {
    let source = "/** Pattern. */\nApp.pattern = /^[a-z]+$/i;\n/** Offset. */\nApp.offset = -5;";
    let extraction = extract_ok(source);

    let pattern = find_entity(&extraction, EntityKind::Property, "pattern");
    assert_eq!(pattern.value_type.as_deref(), Some("RegExp"));
    assert_eq!(pattern.default.as_deref(), Some("/^[a-z]+$/i"));

    let offset = find_entity(&extraction, EntityKind::Property, "offset");
    assert_eq!(offset.value_type.as_deref(), Some("Number"));
    assert_eq!(offset.default.as_deref(), Some("-5"));
}

#[test]
fn test_non_static_default_is_dropped() {
    let extraction = extract_ok("/** Size. */\nApp.size = compute();");
    let size = find_entity(&extraction, EntityKind::Property, "size");
    assert_eq!(size.default, None);
    assert_eq!(size.value_type, None);
}
