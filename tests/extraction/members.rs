//! Member flags, config blocks and merge warnings

use extdoc_engine::{EntityKind, WarningKind};

use crate::common::{assert_all_docsets_have_code, extract_ok, find_entity, member_names};

#[test]
fn test_config_block_members() {
    let source = r#"Ext.define('App.Grid', {
    config: {
        /** Grid title. */
        title: 'Untitled'
    },

    /**
     * Reloads the grid.
     * @param {Boolean} force
     */
    reload: function(force) {
        this.getStore().load();
    }
});"#;
    let extraction = extract_ok(source);
    assert!(extraction.warnings.is_empty(), "{:?}", extraction.warnings);
    assert_eq!(extraction.entities.len(), 3);

    let class = find_entity(&extraction, EntityKind::Class, "App.Grid");
    assert!(class.members.is_empty());
    assert!(class.autodetected);

    let title = find_entity(&extraction, EntityKind::Property, "title");
    assert!(title.config);
    assert!(title.accessor);
    assert!(!title.autodetected);
    assert_eq!(title.doc.as_deref(), Some("Grid title."));
    assert_eq!(title.default.as_deref(), Some("'Untitled'"));
    assert_eq!(title.value_type.as_deref(), Some("String"));
    assert_eq!(title.line, Some(3));

    let reload = find_entity(&extraction, EntityKind::Method, "reload");
    assert_eq!(reload.params.len(), 1);
    assert_eq!(reload.params[0].name, "force");
    assert_eq!(reload.params[0].type_hint.as_deref(), Some("Boolean"));
    assert_eq!(reload.calls, vec!["getStore"]);
    assert_eq!(reload.line, Some(7));
}

#[test]
fn test_inline_member_flags() {
    let source = r#"Ext.define('App.Counter', {
    config: { step: 1 },
    statics: { create: function() {} },
    privates: { bump: function() {} },
    count: 0
});"#;
    let extraction = extract_ok(source);
    let class = find_entity(&extraction, EntityKind::Class, "App.Counter");
    assert_eq!(member_names(class), vec!["step", "create", "bump", "count"]);

    let step = &class.members[0];
    assert!(step.config && step.inheritdoc && !step.private);

    let create = &class.members[1];
    assert!(create.is_static && create.inheritdoc);

    let bump = &class.members[2];
    assert!(bump.private);

    let count = &class.members[3];
    assert!(count.private && !count.inheritdoc);
    assert!(class.members.iter().all(|m| m.autodetected));
}

#[test]
fn test_class_keys_are_not_members() {
    let source = r#"Ext.define('App.Window', {
    extend: 'Ext.window.Window',
    xtype: 'appwindow',
    mixins: ['App.mixin.Draggable'],
    alternateClassName: 'App.Win',
    singleton: true
});"#;
    let extraction = extract_ok(source);
    let class = find_entity(&extraction, EntityKind::Class, "App.Window");
    assert!(class.members.is_empty());
    assert_eq!(class.aliases, vec!["widget.appwindow"]);
    assert_eq!(class.mixins, vec!["App.mixin.Draggable"]);
    assert_eq!(class.alternate_class_names, vec!["App.Win"]);
    assert!(class.singleton);
}

#[test]
fn test_documented_events_and_listeners() {
    let source = r#"/**
 * Fired on selection.
 * @event select
 */
this.fireEvent('select', this, record);

/** Refreshes on load. */
this.on('load', function(store, records) {});"#;
    let extraction = extract_ok(source);
    let event = find_entity(&extraction, EntityKind::Event, "select");
    assert_eq!(event.doc.as_deref(), Some("Fired on selection."));

    let listener = find_entity(&extraction, EntityKind::Listener, "load");
    let params: Vec<_> = listener.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["store", "records"]);
}

#[test]
fn test_deprecated_and_chainable() {
    let source = r#"/**
 * Old API.
 * @deprecated
 * @chainable
 */
App.legacy = function() {};"#;
    let extraction = extract_ok(source);
    let method = find_entity(&extraction, EntityKind::Method, "legacy");
    assert_eq!(method.deprecated.as_deref(), Some(""));
    assert!(method.chainable);
}

#[test]
fn test_doc_kind_blocks_code_fields() {
    let source = "/** @property */\nApp.handler = function(a) { this.fireEvent('x'); };";
    let extraction = extract_ok(source);
    let property = find_entity(&extraction, EntityKind::Property, "handler");
    assert!(property.params.is_empty());
    assert!(property.fires.is_empty());
}

// ============================================================================
// WARNINGS
// ============================================================================

#[test]
fn test_param_mismatch_warning() {
    let source = r#"/**
 * @param {String} url
 * @param {Object} opts
 */
App.util.load = function(url) {};"#;
    let extraction = extract_ok(source);
    assert_eq!(extraction.warnings.len(), 1);
    let warning = &extraction.warnings[0];
    assert_eq!(warning.kind, WarningKind::ParamMismatch);
    assert_eq!(warning.line, 1);

    let method = find_entity(&extraction, EntityKind::Method, "load");
    assert_eq!(method.params.len(), 2);
}

#[test]
fn test_unknown_tag_warning() {
    let extraction = extract_ok("/**\n * Does things.\n * @frobnicate\n */\nfoo = function() {};");
    assert_eq!(extraction.warnings.len(), 1);
    assert_eq!(extraction.warnings[0].kind, WarningKind::UnknownTag);
    assert_eq!(extraction.warnings[0].line, 3);
    find_entity(&extraction, EntityKind::Method, "foo");
}

// ============================================================================
// FALLBACK
// ============================================================================

#[test]
fn test_comment_only_docsets_get_anonymous_entities() {
    let source = r#"var x = 1;
/** Trailing notes. */
// and a plain remark"#;
    let extraction = extract_ok(source);
    assert_all_docsets_have_code(&extraction);
    assert_eq!(extraction.entities.len(), 1);
    assert_eq!(extraction.entities[0].name, None);
    assert_eq!(extraction.entities[0].doc.as_deref(), Some("Trailing notes."));
}
