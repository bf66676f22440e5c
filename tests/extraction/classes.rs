//! One test per class alternative, each through the full pipeline

use extdoc_engine::EntityKind;

use crate::common::{extract_ok, find_entity, member_names};

#[test]
fn test_define_call_with_doc_comment() {
    let source = r#"/**
 * A panel.
 * @singleton
 */
Ext.define('App.Panel', {
    extend: 'Ext.panel.Panel',
    requires: ['App.Store'],
    height: 200
});"#;
    let extraction = extract_ok(source);
    assert_eq!(extraction.entities.len(), 1);
    let class = find_entity(&extraction, EntityKind::Class, "App.Panel");
    assert_eq!(class.doc.as_deref(), Some("A panel."));
    assert!(class.singleton);
    assert!(!class.autodetected);
    assert_eq!(class.extends.as_deref(), Some("Ext.panel.Panel"));
    assert_eq!(class.requires, vec!["App.Store"]);
    assert_eq!(member_names(class), vec!["height"]);
    assert_eq!(class.line, Some(1));
}

#[test]
fn test_doc_extends_overrides_config() {
    let source = "/**\n * @class App.Grid\n * @extends App.Base\n */\nExt.define('App.Grid', { extend: 'Ext.Panel' });";
    let extraction = extract_ok(source);
    let class = find_entity(&extraction, EntityKind::Class, "App.Grid");
    assert_eq!(class.extends.as_deref(), Some("App.Base"));
}

#[test]
fn test_override_call() {
    let extraction = extract_ok("/** Patch. */\nExt.override(App.Grid, { refresh: function() {} });");
    let class = find_entity(&extraction, EntityKind::Class, "App.Grid");
    assert_eq!(member_names(class), vec!["refresh"]);
}

#[test]
fn test_extend_assignment() {
    let extraction = extract_ok("/** List. */\nApp.List = Ext.extend(Ext.Panel, { load: function() {} });");
    let class = find_entity(&extraction, EntityKind::Class, "App.List");
    assert_eq!(class.extends.as_deref(), Some("Ext.Panel"));
    assert_eq!(member_names(class), vec!["load"]);
}

#[test]
fn test_upper_case_assignment() {
    let extraction = extract_ok("/** Store. */\nApp.data.Store = function(config) {};");
    let class = find_entity(&extraction, EntityKind::Class, "App.data.Store");
    assert!(class.members.is_empty());
}

#[test]
fn test_extend_var() {
    let extraction = extract_ok("/** View. */\nvar view = Ext.extend(Ext.Component, {});");
    let class = find_entity(&extraction, EntityKind::Class, "view");
    assert_eq!(class.extends.as_deref(), Some("Ext.Component"));
}

#[test]
fn test_upper_case_var() {
    let extraction = extract_ok("/** Registry. */\nvar Registry = { items: [], add: function(item) {} };");
    let class = find_entity(&extraction, EntityKind::Class, "Registry");
    assert_eq!(member_names(class), vec!["items", "add"]);
    assert!(class.members[0].private);
    assert!(class.members[1].inheritdoc);
}

#[test]
fn test_upper_case_function_declaration() {
    let extraction = extract_ok("/** A widget. */\nfunction Widget(el) {}");
    let class = find_entity(&extraction, EntityKind::Class, "Widget");
    assert_eq!(class.doc.as_deref(), Some("A widget."));
}

#[test]
fn test_bare_object_literal() {
    let extraction = extract_ok("/** @class App.Util */\n({ trim: function(s) {} });");
    let class = find_entity(&extraction, EntityKind::Class, "App.Util");
    assert_eq!(member_names(class), vec!["trim"]);
}

#[test]
fn test_bare_array_literal_enum() {
    let extraction = extract_ok("/** @enum {String} App.Color */\n['red', 'green'];");
    let class = find_entity(&extraction, EntityKind::Class, "App.Color");
    assert!(class.doc_only_enum);
    assert_eq!(class.value_type.as_deref(), Some("String"));
    assert_eq!(member_names(class), vec!["red", "green"]);
    assert_eq!(class.members[1].default.as_deref(), Some("'green'"));
}

#[test]
fn test_class_detection_wins_over_property() {
    let extraction = extract_ok("/** Version. */\nApp.Version = '1.0';");
    let code = extraction.docsets[0].code.as_ref().unwrap();
    assert_eq!(code.kind, EntityKind::Class);
}

#[test]
fn test_lower_case_assignment_is_not_a_class() {
    let extraction = extract_ok("/** Version. */\nApp.version = '1.0';");
    let property = find_entity(&extraction, EntityKind::Property, "version");
    assert_eq!(property.default.as_deref(), Some("'1.0'"));
    assert_eq!(property.value_type.as_deref(), Some("String"));
}

#[test]
fn test_documented_constructor_stays_a_class() {
    let source = "/**\n * Widget.\n * @param {Object} config\n */\nApp.Widget = function(config) {};";
    let extraction = extract_ok(source);
    assert_eq!(extraction.entities.len(), 1);
    let class = find_entity(&extraction, EntityKind::Class, "App.Widget");
    assert_eq!(class.doc.as_deref(), Some("Widget."));
    assert_eq!(class.params.len(), 1);
    assert_eq!(class.params[0].type_hint.as_deref(), Some("Object"));
}

#[test]
fn test_return_tag_on_unrecognized_code_is_a_method() {
    let extraction = extract_ok("/** @return {Boolean} */\nif (ready) { go(); }");
    assert_eq!(extraction.entities.len(), 1);
    assert_eq!(extraction.entities[0].kind, EntityKind::Method);
}
