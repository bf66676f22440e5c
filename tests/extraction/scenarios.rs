//! End-to-end scenarios for detection, association and merge

use extdoc_engine::{EngineContext, EntityKind, NamespaceAliases, ScopeMode};

use crate::common::{extract_ok, extract_with, find_entity, member_names};

// ============================================================================
// UNDOCUMENTED DEFINE
// ============================================================================

#[test]
fn test_undocumented_define_call() {
    let extraction = extract_ok(
        r#"Ext.define("Foo.Bar", { extend: "Ext.Base", someMethod: function(a, b) { return this; } });"#,
    );

    assert_eq!(extraction.entities.len(), 1);
    let class = &extraction.entities[0];
    assert_eq!(class.kind, EntityKind::Class);
    assert_eq!(class.name.as_deref(), Some("Foo.Bar"));
    assert_eq!(class.extends.as_deref(), Some("Ext.Base"));
    assert!(class.autodetected);
    assert_eq!(member_names(class), vec!["someMethod"]);

    let method = &class.members[0];
    assert_eq!(method.kind, EntityKind::Method);
    assert!(method.autodetected);
    assert!(method.inheritdoc);
    assert!(!method.private);
    assert_eq!(method.line, Some(1));
    let params: Vec<_> = method.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["a", "b"]);
}

// ============================================================================
// MEMBER CLAIMED BY ITS DOC-COMMENT
// ============================================================================

#[test]
fn test_documented_member_is_not_listed_inline() {
    let source = r#"/** @class App.Tools */
App.Tools = {
    /** @method */
    foo: function() {},
    bar: 1
};"#;
    let extraction = extract_ok(source);

    let class = find_entity(&extraction, EntityKind::Class, "App.Tools");
    assert_eq!(member_names(class), vec!["bar"]);
    assert!(class.members[0].private);

    let docset = &extraction.docsets[1];
    assert_eq!(docset.line, 3);
    let code = docset.code.as_ref().unwrap();
    assert_eq!(code.kind, EntityKind::Method);
    assert_eq!(code.name.as_deref(), Some("foo"));

    let method = find_entity(&extraction, EntityKind::Method, "foo");
    assert!(!method.autodetected);
}

#[test]
fn test_documented_member_of_bare_object_literal() {
    let source = r#"({
    /** @method */
    foo: function() {}
});"#;
    let extraction = extract_ok(source);

    assert_eq!(extraction.entities.len(), 2);
    let class = &extraction.entities[0];
    assert_eq!(class.kind, EntityKind::Class);
    assert_eq!(class.name, None);
    assert!(class.members.is_empty());
    find_entity(&extraction, EntityKind::Method, "foo");
}

// ============================================================================
// FIRES THROUGH AN ALIAS
// ============================================================================

#[test]
fn test_fires_through_this_alias() {
    let source = r#"Ext.define('App.Button', {
    onClick: function() {
        var me = this;
        me.fireEvent('click');
    }
});"#;
    let extraction = extract_ok(source);
    let class = find_entity(&extraction, EntityKind::Class, "App.Button");
    assert_eq!(class.members[0].fires, vec!["click"]);
}

#[test]
fn test_scope_modes_on_alias_declared_in_block() {
    let source = r#"Ext.define('App.Lazy', {
    start: function() {
        if (ready) {
            var me = this;
        }
        me.fireEvent('started');
    }
});"#;

    let lexical = extract_ok(source);
    let class = find_entity(&lexical, EntityKind::Class, "App.Lazy");
    assert!(class.members[0].fires.is_empty());

    let engine = EngineContext {
        scope_mode: ScopeMode::Leaky,
        ..EngineContext::default()
    };
    let leaky = extract_with(source, &engine);
    let class = find_entity(&leaky, EntityKind::Class, "App.Lazy");
    assert_eq!(class.members[0].fires, vec!["started"]);
}

// ============================================================================
// NAMESPACE ALIASES
// ============================================================================

#[test]
fn test_custom_namespace_define() {
    let source = "MyApp.define('MyApp.Foo', { run: function() {} });";

    let engine = EngineContext::with_aliases(NamespaceAliases::new(["Ext", "MyApp"]));
    let extraction = extract_with(source, &engine);
    let class = find_entity(&extraction, EntityKind::Class, "MyApp.Foo");
    assert_eq!(class.extends.as_deref(), Some("Ext.Base"));
    assert_eq!(member_names(class), vec!["run"]);

    let extraction = extract_ok(source);
    assert!(extraction.entities.is_empty());
}

#[test]
fn test_unknown_namespace_falls_back_when_documented() {
    let extraction = extract_ok("/** Defines Foo. */\nMyApp.define('MyApp.Foo', {});");
    assert_eq!(extraction.entities.len(), 1);
    let entity = &extraction.entities[0];
    assert_eq!(entity.kind, EntityKind::Property);
    assert_eq!(entity.name, None);
    assert_eq!(entity.doc.as_deref(), Some("Defines Foo."));
}

// ============================================================================
// EXPLICIT EMPTY NAME
// ============================================================================

#[test]
fn test_empty_method_tag_keeps_detected_name() {
    let extraction = extract_ok("/** @method */\nfoo = function(x) {};");
    let method = find_entity(&extraction, EntityKind::Method, "foo");
    assert_eq!(method.params.len(), 1);
    assert_eq!(method.line, Some(1));
}

#[test]
fn test_explicit_name_wins() {
    let extraction = extract_ok("/** @method bar */\nfoo = function() {};");
    find_entity(&extraction, EntityKind::Method, "bar");
}

// ============================================================================
// COMMENT ON A CLASS BODY ARGUMENT
// ============================================================================

#[test]
fn test_comment_on_define_body_documents_the_class() {
    let extraction = extract_ok("Ext.define('A',\n/** Config docs */\n{ foo: 1 });");

    assert_eq!(extraction.entities.len(), 1);
    let class = find_entity(&extraction, EntityKind::Class, "A");
    assert_eq!(class.doc.as_deref(), Some("Config docs"));
    assert!(!class.autodetected);
    assert_eq!(member_names(class), vec!["foo"]);
}

#[test]
fn test_comment_on_body_of_documented_define() {
    let source = "/** Outer docs */\nExt.define('A',\n/** Inner docs */\n{ foo: 1 });";
    let extraction = extract_ok(source);

    let classes: Vec<_> = extraction
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Class)
        .collect();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].doc.as_deref(), Some("Outer docs"));
    assert_eq!(member_names(classes[0]), vec!["foo"]);

    let listed = extraction
        .entities
        .iter()
        .flat_map(|e| e.members.iter())
        .filter(|m| m.name.as_deref() == Some("foo"))
        .count();
    assert_eq!(listed, 1);
}

// ============================================================================
// CLASSES NESTED IN FUNCTIONS
// ============================================================================

#[test]
fn test_define_inside_immediately_invoked_function() {
    let source = "(function(){ Ext.define('A', { /** doc */ foo: function(){}, bar: 1 }); })();";
    let extraction = extract_ok(source);

    assert_eq!(extraction.entities.len(), 2);
    let class = find_entity(&extraction, EntityKind::Class, "A");
    assert!(class.autodetected);
    assert_eq!(member_names(class), vec!["bar"]);

    let foo = find_entity(&extraction, EntityKind::Method, "foo");
    assert_eq!(foo.doc.as_deref(), Some("doc"));
    assert!(!foo.autodetected);
}

#[test]
fn test_define_inside_on_ready_callback() {
    let source = r#"Ext.onReady(function() {
    Ext.define('App.Main', { run: function() {} });
});"#;
    let extraction = extract_ok(source);
    let class = find_entity(&extraction, EntityKind::Class, "App.Main");
    assert_eq!(member_names(class), vec!["run"]);
    assert_eq!(class.line, Some(2));
}

#[test]
fn test_nested_naming_convention_is_not_a_class() {
    let extraction = extract_ok("(function(){ var Foo = { a: 1 }; })();");
    assert!(extraction.entities.is_empty());
}
