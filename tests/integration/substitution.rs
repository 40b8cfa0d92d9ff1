//! End-to-end tests for `${TOKEN}` substitution during loading.

use trifle::{MemorySource, Options, init_with_source};

use crate::common::{get_nested, get_string, paths};

#[test]
fn test_token_substituted_in_both_tiers() {
    let source = MemorySource::from_pairs([(
        "/a.json",
        r#"{
            "defaults": {"data_dir": "${ROOT}/data"},
            "production": {"log_dir": "${ROOT}/log"}
        }"#,
    )]);
    let session = init_with_source(
        "production",
        &paths(&["/a.json"]),
        Options::new().replace([("root", "/var/app")]),
        &source,
    )
    .unwrap();

    let settings = session.settings().unwrap();
    assert_eq!(get_string(settings, &["data_dir"]), Some("/var/app/data"));
    assert_eq!(get_string(settings, &["log_dir"]), Some("/var/app/log"));
}

#[test]
fn test_token_substituted_in_nested_values() {
    let source = MemorySource::from_pairs([(
        "/a.json",
        r#"{"defaults": {"db": {"url": "postgres://${DB_HOST}/app", "replicas": ["${DB_HOST}", "spare"]}}}"#,
    )]);
    let session = init_with_source(
        "",
        &paths(&["/a.json"]),
        Options::new().replace([("db_host", "db.internal")]),
        &source,
    )
    .unwrap();

    let settings = session.settings().unwrap();
    assert_eq!(
        get_string(settings, &["db", "url"]),
        Some("postgres://db.internal/app")
    );
    let replicas = get_nested(settings, &["db", "replicas"]).unwrap().as_array().unwrap();
    assert_eq!(replicas[0].as_str(), Some("db.internal"));
}

#[test]
fn test_token_case_must_match_uppercased_rule() {
    let source = MemorySource::from_pairs([(
        "/a.json",
        r#"{"defaults": {"a": "${FOO}", "b": "${Foo}", "c": "${foo}"}}"#,
    )]);
    let session = init_with_source(
        "",
        &paths(&["/a.json"]),
        Options::new().replace([("foo", "X")]),
        &source,
    )
    .unwrap();

    let settings = session.settings().unwrap();
    assert_eq!(get_string(settings, &["a"]), Some("X"));
    assert_eq!(get_string(settings, &["b"]), Some("${Foo}"));
    assert_eq!(get_string(settings, &["c"]), Some("${foo}"));
}

#[test]
fn test_embedded_token_substituted() {
    let source = MemorySource::from_pairs([(
        "/a.json",
        r#"{"defaults": {"value": "prefix-${FOO}-suffix"}}"#,
    )]);
    let session = init_with_source(
        "",
        &paths(&["/a.json"]),
        Options::new().replace([("foo", "X")]),
        &source,
    )
    .unwrap();
    assert_eq!(
        get_string(session.settings().unwrap(), &["value"]),
        Some("prefix-X-suffix")
    );
}

#[test]
fn test_unmatched_tokens_survive() {
    let source = MemorySource::from_pairs([(
        "/a.json",
        r#"{"defaults": {"value": "${NEVER_DEFINED}"}}"#,
    )]);
    let session =
        init_with_source("", &paths(&["/a.json"]), Options::new(), &source).unwrap();
    assert_eq!(
        get_string(session.settings().unwrap(), &["value"]),
        Some("${NEVER_DEFINED}")
    );
}

#[test]
fn test_substitution_in_flat_mode() {
    let source = MemorySource::from_pairs([(
        "/flat.yaml",
        "bind: \"${HOST}:${PORT}\"\n",
    )]);
    let session = init_with_source(
        "",
        &paths(&["/flat.yaml"]),
        Options::new()
            .flat()
            .replace([("host", "0.0.0.0"), ("port", "8080")]),
        &source,
    )
    .unwrap();
    assert_eq!(
        get_string(session.settings().unwrap(), &["bind"]),
        Some("0.0.0.0:8080")
    );
}
