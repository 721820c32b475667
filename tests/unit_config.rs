use simprint_core::config::Config;
use simprint_core::error::SimprintError;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn loads_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(
        &path,
        r#"
languages = "python"
parallelism = 2
ignore = ["tests/**"]
include_hidden = true
timeout_secs = 5

[vendor]
name = "acme"
tool_version = "9.9.9"
"#,
    )
    .unwrap();

    let cfg = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(cfg.languages, "python");
    assert!(cfg.include_hidden);
    assert_eq!(cfg.vendor.tool_name, "simprint");

    let options = cfg.options();
    assert_eq!(options.parallelism, 2);
    assert_eq!(options.deadline, Some(Duration::from_secs(5)));
    assert_eq!(options.vendor.name, "acme");
    assert_eq!(options.vendor.tool_version, "9.9.9");
    assert_eq!(options.vendor.algo_name, "simhash");

    let ignore = cfg.ignore_matcher().unwrap();
    assert!(ignore.matches(std::path::Path::new("tests/a.py"), false));
    assert!(!ignore.matches(std::path::Path::new(".github/x.py"), false));
    assert!(ignore.matches(std::path::Path::new(".git/x.py"), false));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(matches!(err, SimprintError::Io { .. }));
}

#[test]
fn bad_glob_surfaces_when_building_the_matcher() {
    let cfg = Config::parse_toml("ignore = [\"src/[\"]").unwrap();
    assert!(cfg.ignore_matcher().is_err());
}
