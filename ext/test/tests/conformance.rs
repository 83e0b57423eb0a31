//! Conformance tests that run YAML fixtures against reqmatch
//!
//! Run with: cargo test -p reqmatch-test --test conformance
//!
//! Set `RUST_LOG=reqmatch=debug` to see extractor diagnostics.

#![cfg(feature = "fixtures")]

use reqmatch_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Fixture directory inside this crate
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Load and run every fixture in one file
fn run_fixture_file(name: &str) {
    init_logging();

    let path = fixtures_dir().join(name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} has no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {} ({})", fixture.name, fixture.description);
        fixture.run_and_assert();
    }
}

#[test]
fn test_host() {
    run_fixture_file("01_host.yaml");
}

#[test]
fn test_path() {
    run_fixture_file("02_path.yaml");
}

#[test]
fn test_method_header_query() {
    run_fixture_file("03_method_header_query.yaml");
}

#[test]
fn test_ip() {
    run_fixture_file("04_ip.yaml");
}

#[test]
fn test_combinators() {
    run_fixture_file("05_combinators.yaml");
}

#[test]
fn test_every_fixture_file_is_run() {
    let mut files: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".yaml") || name.ends_with(".yml"))
        .collect();
    files.sort();
    assert_eq!(
        files,
        [
            "01_host.yaml",
            "02_path.yaml",
            "03_method_header_query.yaml",
            "04_ip.yaml",
            "05_combinators.yaml",
        ]
    );
}
