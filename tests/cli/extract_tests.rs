//! Tests for output formats, options and exit codes

use crate::common::{assert_contains, assert_valid_json, TestRepo};

#[test]
fn test_json_output() {
    let repo = TestRepo::new();
    repo.add_define_class("grid.js", "App.Grid");

    let stdout = repo.run_cli_success(&["grid.js"]);
    let json = assert_valid_json(&stdout, "extdoc grid.js");

    let entities = json["entities"].as_array().expect("entities array");
    assert_eq!(entities.len(), 2);

    let class = &entities[0];
    assert_eq!(class["kind"], "class");
    assert_eq!(class["name"], "App.Grid");
    assert_eq!(class["extends"], "Ext.panel.Panel");
    assert_eq!(class["doc"], "The App.Grid class.");
    assert_eq!(class["members"][0]["name"], "reset");
    assert_eq!(class["members"][0]["chainable"], true);
    assert_eq!(class["members"][0]["inheritdoc"], true);

    let load = &entities[1];
    assert_eq!(load["kind"], "method");
    assert_eq!(load["name"], "load");
    assert_eq!(load["fires"][0], "load");
    assert_eq!(load["params"][0]["name"], "options");
    assert_eq!(load["params"][0]["type"], "Object");
    assert_eq!(load["line"], 7);

    assert_eq!(json["docsets"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["docsets"][0]["comment_kind"], "doc_comment");
}

#[test]
fn test_text_output() {
    let repo = TestRepo::new();
    repo.add_define_class("grid.js", "App.Grid");

    let stdout = repo.run_cli_success(&["--format", "text", "grid.js"]);
    assert_contains(&stdout, "class App.Grid extends Ext.panel.Panel");
    assert_contains(&stdout, "  method reset [chainable, autodetected, inheritdoc]");
    assert_contains(&stdout, "method load(options) (line 7)");
}

#[test]
fn test_namespace_option() {
    let repo = TestRepo::new();
    repo.add_file("app.js", "MyApp.define('MyApp.Foo', { run: function() {} });\n");

    let stdout = repo.run_cli_success(&["-n", "Ext", "-n", "MyApp", "app.js"]);
    let json = assert_valid_json(&stdout, "with namespace");
    assert_eq!(json["entities"][0]["name"], "MyApp.Foo");
    assert_eq!(json["entities"][0]["members"][0]["name"], "run");

    let stdout = repo.run_cli_success(&["app.js"]);
    let json = assert_valid_json(&stdout, "without namespace");
    assert_eq!(json["entities"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_config_file() {
    let repo = TestRepo::new();
    repo.add_file("app.js", "MyApp.define('MyApp.Foo', {});\n");
    repo.add_file(
        "extdoc.toml",
        "namespaces = [\"Ext\", \"MyApp\"]\n\n[logging]\nlevel = \"error\"\n",
    );

    let stdout = repo.run_cli_success(&["--config", "extdoc.toml", "app.js"]);
    let json = assert_valid_json(&stdout, "with config");
    assert_eq!(json["entities"][0]["name"], "MyApp.Foo");
}

#[test]
fn test_invalid_config_file() {
    let repo = TestRepo::new();
    repo.add_file("app.js", "var x = 1;\n");
    repo.add_file("extdoc.toml", "[logging]\nlevel = \"loud\"\n");

    let (_, stderr, code) = repo.run_cli_failure(&["--config", "extdoc.toml", "app.js"]);
    assert_eq!(code, Some(2));
    assert_contains(&stderr, "Invalid configuration");
}

#[test]
fn test_syntax_error_exit_code() {
    let repo = TestRepo::new();
    repo.add_file("broken.js", "var x = 1;\nvar = ;\n");

    let (stdout, stderr, code) = repo.run_cli_failure(&["broken.js"]);
    assert_eq!(code, Some(3));
    assert!(stdout.is_empty());
    assert_contains(&stderr, "broken.js");
    assert_contains(&stderr, "invalid syntax at line 2");
}

#[test]
fn test_missing_file() {
    let repo = TestRepo::new();
    let (_, stderr, code) = repo.run_cli_failure(&["nope.js"]);
    assert_eq!(code, Some(1));
    assert_contains(&stderr, "File not found");
}

#[test]
fn test_failing_file_does_not_stop_others() {
    let repo = TestRepo::new();
    repo.add_define_class("a.js", "App.A");
    repo.add_file("b.js", "function (\n");
    repo.add_define_class("c.js", "App.C");

    let (stdout, stderr, code) = repo.run_cli_failure(&["--format", "text", "a.js", "b.js", "c.js"]);
    assert_eq!(code, Some(3));
    assert_contains(&stdout, "== a.js");
    assert_contains(&stdout, "class App.A");
    assert_contains(&stdout, "== c.js");
    assert_contains(&stdout, "class App.C");
    assert!(!stdout.contains("== b.js"));
    assert_contains(&stderr, "b.js");
}

#[test]
fn test_unknown_tag_is_logged() {
    let repo = TestRepo::new();
    repo.add_file("odd.js", "/** @frobnicate */\nfoo = 1;\n");

    let output = repo.run_cli(&["odd.js"]).expect("run extdoc");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json = assert_valid_json(&stdout, "unknown tag");
    assert_eq!(json["warnings"][0]["kind"], "unknown_tag");
    assert_contains(&String::from_utf8_lossy(&output.stderr), "unknown tag @frobnicate");
}
