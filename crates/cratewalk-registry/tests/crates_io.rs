use cratewalk_core::config::RegistryConfig;
use cratewalk_registry::crates_io::RegistrySource;
use cratewalk_registry::source::DependencySource;
use mockito::Server;

fn config() -> RegistryConfig {
    RegistryConfig {
        retries: 1,
        timeout_secs: 5,
        ..RegistryConfig::default()
    }
}

const SERDE_DEPS: &str = r#"{"dependencies": [
    {"crate_id": "serde_derive", "kind": "normal", "req": "=1.0.210"},
    {"crate_id": "serde_derive", "kind": "dev", "req": "^1"},
    {"crate_id": "cc", "kind": "build", "req": "^1"}
]}"#;

#[test]
fn test_newest_version_is_looked_up_when_unpinned() {
    let mut server = Server::new();
    let info = server
        .mock("GET", "/serde")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"crate": {"name": "serde", "newest_version": "1.0.210"}}"#)
        .create();
    let deps = server
        .mock("GET", "/serde/1.0.210/dependencies")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SERDE_DEPS)
        .create();

    let source = RegistrySource::new(&server.url(), &config()).unwrap();
    let result = source.direct_dependencies("serde", None).unwrap();

    assert_eq!(result, vec!["serde_derive"]);
    info.assert();
    deps.assert();
}

#[test]
fn test_pinned_version_skips_crate_lookup() {
    let mut server = Server::new();
    let info = server.mock("GET", "/serde").expect(0).create();
    let deps = server
        .mock("GET", "/serde/1.0.100/dependencies")
        .with_status(200)
        .with_body(SERDE_DEPS)
        .create();

    let source = RegistrySource::new(&server.url(), &config()).unwrap();
    let result = source.direct_dependencies("serde", Some("1.0.100")).unwrap();

    assert_eq!(result, vec!["serde_derive"]);
    info.assert();
    deps.assert();
}

#[test]
fn test_unknown_crate_is_registry_error() {
    let mut server = Server::new();
    server.mock("GET", "/no-such-crate").with_status(404).create();

    let source = RegistrySource::new(&server.url(), &config()).unwrap();
    let err = source.direct_dependencies("no-such-crate", None).unwrap_err();
    assert!(err.to_string().contains("crate `no-such-crate` not found"), "got: {err}");
}

#[test]
fn test_server_error_is_network_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/serde/1.0.0/dependencies")
        .with_status(503)
        .create();

    let source = RegistrySource::new(&server.url(), &config()).unwrap();
    let err = source.direct_dependencies("serde", Some("1.0.0")).unwrap_err();
    assert!(err.to_string().contains("Network error"), "got: {err}");
}

#[test]
fn test_malformed_body_is_registry_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/serde/1.0.0/dependencies")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();

    let source = RegistrySource::new(&server.url(), &config()).unwrap();
    let err = source.direct_dependencies("serde", Some("1.0.0")).unwrap_err();
    assert!(err.to_string().contains("Malformed response"), "got: {err}");
}
