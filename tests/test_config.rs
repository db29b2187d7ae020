use paramserve::config::Config;

fn yaml(root: &std::path::Path, extra: &str) -> String {
    format!(
        "server:\n  port: 8080\n  max_threads: 4\n{}static_files:\n  root: {}\n  default_page: index.html\n",
        extra,
        root.display()
    )
}

#[test]
fn test_config_minimal_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::from_yaml(&yaml(dir.path(), "")).unwrap();

    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.max_threads, 4);
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.queue_capacity, 256);
    assert_eq!(cfg.static_files.default_page, "index.html");
    assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
}

#[test]
fn test_config_optional_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::from_yaml(&yaml(dir.path(), "  host: 127.0.0.1\n  queue_capacity: 8\n")).unwrap();

    assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
    assert_eq!(cfg.server.queue_capacity, 8);
}

#[test]
fn test_config_missing_value_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let raw = format!(
        "server:\n  port: 8080\nstatic_files:\n  root: {}\n  default_page: index.html\n",
        dir.path().display()
    );

    assert!(Config::from_yaml(&raw).is_err());
}

#[test]
fn test_config_malformed_number_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let raw = yaml(dir.path(), "").replace("max_threads: 4", "max_threads: many");

    assert!(Config::from_yaml(&raw).is_err());
}

#[test]
fn test_config_zero_threads_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let raw = yaml(dir.path(), "").replace("max_threads: 4", "max_threads: 0");

    assert!(Config::from_yaml(&raw).is_err());
}

#[test]
fn test_config_root_must_be_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    assert!(Config::from_yaml(&yaml(&missing, "")).is_err());
}

#[test]
fn test_config_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, yaml(dir.path(), "")).unwrap();

    let cfg = Config::from_path(&path).unwrap();
    assert_eq!(cfg.static_files.root, dir.path());
}

#[test]
fn test_config_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::from_path(dir.path().join("absent.yaml")).is_err());
}
