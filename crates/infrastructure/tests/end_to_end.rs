//! End-to-end resolution through the real adapters.

use std::path::Path;

use envres_domain::{ErrorKind, ResolverSettings, Value};
use envres_infrastructure::{SettingsRepository, default_processor, default_resolver};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("envres_application=trace,envres_infrastructure=debug"))
        .with_test_writer()
        .try_init();
}

fn settings_with_path(name: &str, path: &Path) -> ResolverSettings {
    ResolverSettings::default().with_variable(name, path.display().to_string())
}

#[test]
fn test_file_modifier_reads_raw_contents() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("password.txt");
    std::fs::write(&path, "  hunter2\n").unwrap();

    let resolver = default_resolver(&settings_with_path("PASSWORD_FILE", &path));
    assert_eq!(
        resolver.resolve("file:env:PASSWORD_FILE").unwrap(),
        Value::from("  hunter2\n")
    );
    assert_eq!(
        resolver.resolve("trim:file:env:PASSWORD_FILE").unwrap(),
        Value::from("hunter2")
    );
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let resolver = default_resolver(&settings_with_path("MISSING", &dir.path().join("nope")));

    let error = resolver.resolve("file:env:MISSING").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::FileNotFound);
    assert_eq!(error.heap(), Some("file:env:MISSING"));

    let error = resolver.resolve("require:env:MISSING").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::FileNotFound);
}

#[test]
fn test_directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    let resolver = default_resolver(&settings_with_path("DIR", dir.path()));
    assert_eq!(
        resolver.resolve("file:env:DIR").unwrap_err().kind(),
        ErrorKind::FileNotFound
    );
}

#[test]
fn test_require_loads_document() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("database.yaml");
    std::fs::write(&path, "primary:\n  host: db.internal\n  port: 5432\n").unwrap();

    let processor = default_processor(&settings_with_path("DB_CONFIG", &path));
    assert_eq!(
        processor
            .process("%env(key:host:key:primary:require:env:DB_CONFIG)%:%env(key:port:key:primary:require:env:DB_CONFIG)%")
            .unwrap(),
        "db.internal:5432"
    );
}

#[test]
fn test_require_rejects_unknown_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.php");
    std::fs::write(&path, "<?php return 1;").unwrap();

    let resolver = default_resolver(&settings_with_path("CONFIG", &path));
    assert_eq!(
        resolver.resolve("require:env:CONFIG").unwrap_err().kind(),
        ErrorKind::Load
    );
}

#[test]
fn test_settings_drive_processor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("envres.json");
    std::fs::write(
        &path,
        r#"{"max_nesting_depth":1,"variables":{"INNER":"OUTER","OUTER":"value"}}"#,
    )
    .unwrap();

    let settings = SettingsRepository::new().load(&path).unwrap();
    let processor = default_processor(&settings);

    assert_eq!(processor.process("%env(OUTER)%").unwrap(), "value");
    assert_eq!(
        processor.process("%env(%env(INNER)%)%").unwrap_err().kind(),
        ErrorKind::NestingDepthExceeded
    );
}

#[test]
fn test_system_constants_are_available() {
    let resolver = default_resolver(&ResolverSettings::default());
    assert_eq!(
        resolver.resolve("const:OS").unwrap(),
        Value::from(std::env::consts::OS)
    );
}

#[test]
fn test_process_environment_fallback() {
    let processor = default_processor(&ResolverSettings::default());
    assert_eq!(
        processor.process("%env(CARGO_MANIFEST_DIR)%").unwrap(),
        env!("CARGO_MANIFEST_DIR")
    );
}

#[test]
fn test_url_from_settings_variable() {
    let settings = ResolverSettings::default()
        .with_variable("DATABASE_URL", "postgres://app:s%40fe@db:6543/main?sslmode=require");
    let resolver = default_resolver(&settings);

    assert_eq!(
        resolver.resolve("key:pass:url:DATABASE_URL").unwrap(),
        Value::from("s@fe")
    );
    assert_eq!(
        resolver.resolve("key:sslmode:query_string:DATABASE_URL").unwrap(),
        Value::from("require")
    );
    assert_eq!(
        resolver.resolve("int:key:port:url:DATABASE_URL").unwrap(),
        Value::Int(6543)
    );
}
