//! CLI integration tests
//!
//! Tests for the command-line interface using assert_cmd.
//!
//! These tests verify:
//! - Help and version flags
//! - Configuration validation
//! - Request plan output for GET and POST
//! - Error handling for malformed mappings

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a command for the rjmx-mapper binary
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("rjmx-mapper").expect("Failed to find rjmx-mapper binary");
    cmd.env_remove("RJMX_HTTP_METHOD")
        .env_remove("RJMX_JOLOKIA_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temporary config file with given content
fn create_temp_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file.flush().expect("Failed to flush");
    file
}

const RUNTIME_CONFIG: &str = r#"
jolokia:
  url: "http://localhost:8778/jolokia"

mappings:
  - mbean: "java.lang:type=Runtime"
    attributes:
      - attr: Uptime
        field: uptime
  - mbean: "java.lang:type=GarbageCollector,name=ConcurrentMarkSweep"
    attributes:
      - attr: CollectionTime
        field: gc.cms_collection_time
      - attr: CollectionCount
        field: gc.cms_collection_count
"#;

/// Test --help flag displays usage information
#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:").or(predicate::str::contains("usage:")))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--http-method"));
}

/// Test --version flag displays version
#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that a valid configuration is accepted via --validate flag
#[test]
fn test_validate_valid_config() {
    let file = create_temp_config(RUNTIME_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

/// Test that invalid YAML is rejected
#[test]
fn test_validate_invalid_config_bad_yaml() {
    let config = r#"
jolokia:
  url: [not valid yaml
"#;

    let file = create_temp_config(config);

    cmd().arg("-c").arg(file.path()).assert().failure();
}

/// Missing config file falls back to defaults, which have no mappings
#[test]
fn test_missing_config_file_uses_defaults() {
    cmd()
        .arg("-c")
        .arg("/nonexistent/path/config.yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Method: POST"))
        .stdout(predicate::str::contains("Mappings (0):"));
}

/// Test that a malformed mbean name aborts the build
#[test]
fn test_malformed_mbean_name() {
    let config = r#"
mappings:
  - mbean: "java.lang:type=Runtime,name"
    attributes:
      - attr: Uptime
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("java.lang:type=Runtime,name"));
}

/// Test that a mapping without attributes is rejected
#[test]
fn test_mapping_without_attributes() {
    let config = r#"
mappings:
  - mbean: "java.lang:type=Runtime"
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one attribute"));
}

/// Test GET plan output in text format
#[test]
fn test_get_plan_text() {
    let file = create_temp_config(RUNTIME_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--http-method")
        .arg("GET")
        .assert()
        .success()
        .stdout(predicate::str::contains("Requests (3):"))
        .stdout(predicate::str::contains(
            "GET http://localhost:8778/jolokia/read/java.lang:type=Runtime/Uptime?ignoreErrors=true&canonicalNaming=false",
        ))
        .stdout(predicate::str::contains("java.lang:type=Runtime Uptime -> uptime"));
}

/// Test POST plan output in JSON format
#[test]
fn test_post_plan_json() {
    let file = create_temp_config(RUNTIME_CONFIG);

    let output = cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--output-format")
        .arg("json")
        .output()
        .expect("Failed to run rjmx-mapper");

    assert!(output.status.success());
    let plan: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(plan["method"], "POST");
    assert_eq!(plan["requests"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        plan["requests"][0]["body"][1]["mbean"],
        "java.lang:name=ConcurrentMarkSweep,type=GarbageCollector"
    );
    assert_eq!(plan["mappings"].as_array().map(Vec::len), Some(3));
}

/// Test that proxy targets are rejected in GET mode
#[test]
fn test_get_rejects_proxy_target() {
    let config = r#"
jolokia:
  http_method: GET
mappings:
  - mbean: "java.lang:type=Runtime"
    attributes:
      - attr: Uptime
    target:
      url: "service:jmx:rmi:///jndi/rmi://targethost:9999/jmxrmi"
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("only valid when using POST"));
}

/// Test that the http method can be set via environment variable
#[test]
fn test_env_http_method_override() {
    let file = create_temp_config(RUNTIME_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .env("RJMX_HTTP_METHOD", "GET")
        .assert()
        .success()
        .stdout(predicate::str::contains("Method: GET"));
}

/// Test that an invalid Jolokia URL override is rejected
#[test]
fn test_invalid_jolokia_url_override() {
    let file = create_temp_config(RUNTIME_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--jolokia-url")
        .arg("not a url")
        .assert()
        .failure();
}

/// A --jolokia-url override replaces an invalid file URL before validation
#[test]
fn test_jolokia_url_override_fixes_invalid_file_url() {
    let config = r#"
jolokia:
  url: "localhost:8778"
mappings:
  - mbean: "java.lang:type=Runtime"
    attributes:
      - attr: Uptime
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--jolokia-url")
        .arg("http://good:8778/jolokia")
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

/// The same override works through the environment variable
#[test]
fn test_env_jolokia_url_override_fixes_invalid_file_url() {
    let config = r#"
jolokia:
  url: "localhost:8778"
mappings:
  - mbean: "java.lang:type=Runtime"
    attributes:
      - attr: Uptime
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .env("RJMX_JOLOKIA_URL", "http://good:8778/jolokia")
        .assert()
        .success()
        .stdout(predicate::str::contains("POST http://good:8778/jolokia"));
}

/// Without an override the invalid file URL is still rejected
#[test]
fn test_invalid_file_url_without_override() {
    let config = r#"
jolokia:
  url: "localhost:8778"
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must use http or https"));
}
