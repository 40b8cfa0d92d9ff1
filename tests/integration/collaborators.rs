//! Tests for the collaborator surfaces: writer, filter, default lookup, and
//! the debug dump.

use camino::Utf8PathBuf;
use trifle::{
    ConfigValue, MemorySource, Options, WriteFormat, default_for, filter_settings,
    init_with_source, render_session, write_settings,
};

use crate::common::paths;

fn definition() -> ConfigValue {
    serde_json::from_str(
        r#"{
            "port": {"default": 8080},
            "host": {"default": "localhost"},
            "timeout_secs": {"default": 30}
        }"#,
    )
    .unwrap()
}

fn source() -> MemorySource {
    MemorySource::from_pairs([(
        "/a.json",
        r#"{
            "defaults": {"port": 80, "host": "example.com", "secret": "hunter2"},
            "production": {"name": "prod", "port": 443}
        }"#,
    )])
}

#[test]
fn test_filter_settings_selects_defined_keys_only() {
    let session = init_with_source(
        "production",
        &paths(&["/a.json"]),
        Options::new().config_def(definition()),
        &source(),
    )
    .unwrap();

    let view = filter_settings(session.settings().unwrap(), session.config_def().unwrap());
    assert_eq!(view.get("port"), Some(&ConfigValue::Integer(443)));
    assert_eq!(view.get("host"), Some(&ConfigValue::String("example.com".into())));
    // defined but unresolved: not invented
    assert!(view.get("timeout_secs").is_none());
    // resolved but undefined: filtered out
    assert!(view.get("secret").is_none());
}

#[test]
fn test_default_lookup_reads_definition() {
    let def = definition();
    assert_eq!(default_for(&def, "port"), Some(&ConfigValue::Integer(8080)));
    assert_eq!(
        default_for(&def, "host"),
        Some(&ConfigValue::String("localhost".into()))
    );
    assert_eq!(default_for(&def, "secret"), None);
}

#[test]
fn test_write_settings_round_trips_through_json() {
    let session =
        init_with_source("production", &paths(&["/a.json"]), Options::new(), &source())
            .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = Utf8PathBuf::from_path_buf(dir.path().join("resolved.json")).unwrap();
    write_settings(&session, &target, WriteFormat::Json).unwrap();

    let written: ConfigValue =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written.get("port"), Some(&ConfigValue::Integer(443)));
    assert_eq!(written.get("secret"), Some(&ConfigValue::String("hunter2".into())));
}

#[test]
fn test_write_settings_applies_definition_filter() {
    let session = init_with_source(
        "production",
        &paths(&["/a.json"]),
        Options::new().config_def(definition()),
        &source(),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = Utf8PathBuf::from_path_buf(dir.path().join("resolved.yaml")).unwrap();
    write_settings(&session, &target, WriteFormat::Yaml).unwrap();

    let written: ConfigValue =
        serde_yaml::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written.get("port"), Some(&ConfigValue::Integer(443)));
    assert!(written.get("secret").is_none());
}

#[test]
fn test_dump_names_settings_and_files() {
    let session =
        init_with_source("production", &paths(&["/a.json"]), Options::new(), &source())
            .unwrap();

    let text = strip_ansi_escapes::strip_str(render_session(&session).unwrap());
    assert!(text.contains("Resolved settings (production)"));
    assert!(text.contains("port: 443"));
    assert!(text.contains("host: example.com"));
    assert!(text.contains("Loaded from:"));
    assert!(text.contains("/a.json (prod)"));
}
