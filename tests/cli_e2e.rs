//! End-to-end CLI tests for the proceedings-downloader binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bin() -> Command {
    Command::cargo_bin("proceedings-downloader").unwrap()
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Harvest conference proceedings"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--year"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("proceedings-downloader"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    bin()
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_rejects_year_before_first_conference() {
    bin()
        .args(["--year", "1900"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1900"));
}

#[test]
fn test_binary_rejects_malformed_base_url() {
    let temp_dir = TempDir::new().unwrap();
    bin()
        .args(["-q", "-b", "not a url", "-o"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("base-url"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_run_writes_header_and_year_directory() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paper_files/paper/2020"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("papers");

    bin()
        .args(["-q", "-y", "2020", "-b", &mock_server.uri(), "-o"])
        .arg(&output_dir)
        .assert()
        .success();

    let csv = std::fs::read_to_string(output_dir.join("output.csv")).unwrap();
    assert_eq!(csv, "Year,Title,Authors,Paper Link,PDF Link\n");
    assert!(output_dir.join("2020").is_dir());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_quiet_run_prints_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paper_files/paper/2019"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>none</p>"))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();

    // An empty year logs a warning, which -q suppresses.
    bin()
        .env_remove("RUST_LOG")
        .args(["-q", "-y", "2019", "-b", &mock_server.uri(), "-o"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}
