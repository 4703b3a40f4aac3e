//! CLI behavior tests: exit codes, output formats, init.
//!
//! Network-dependent paths are exercised through the offline `analyze`
//! subcommand against data files written by the tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn seoscan_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_seoscan"))
}

/// The documented healthy-site record; scores 92.5 overall
const HEALTHY: &str = r#"{
  "url": "https://example.com",
  "timestamp": "2024-01-01T00:00:00Z",
  "domain": "example.com",
  "pageSpeed": {"performanceScore": 85, "seoScore": 90, "mobileFriendly": true},
  "onPage": {"titleLength": 55, "metaDescriptionLength": 150, "h1Count": 1, "totalImages": 5, "imagesWithoutAlt": 0, "wordCount": 1200, "internalLinksCount": 5},
  "technical": {"isHttps": true, "statusCode": 200, "responseTimeMs": 450, "hasRobotsTxt": true, "hasSitemap": true, "hasCompression": true}
}"#;

const BROKEN: &str = r#"{
  "url": "http://slow.example",
  "timestamp": "2024-01-01T00:00:00Z",
  "domain": "slow.example",
  "pageSpeed": {"error": "PageSpeed API error: 500"},
  "onPage": {"titleLength": 0, "metaDescriptionLength": 0, "h1Count": 0, "wordCount": 120},
  "technical": {"isHttps": false, "statusCode": 301, "responseTimeMs": 4200}
}"#;

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn no_urls_and_no_config_exits_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = seoscan_cmd();
    cmd.current_dir(dir.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No URLs"));
}

#[test]
fn analyze_json_output_is_valid() {
    let dir = tempfile::TempDir::new().unwrap();
    let data = write_fixture(dir.path(), "healthy.json", HEALTHY);

    let mut cmd = seoscan_cmd();
    cmd.arg("analyze").arg(&data).arg("--json");
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(parsed["url"], "https://example.com");
    assert_eq!(parsed["scores"]["overall"], 92.5);
    assert_eq!(parsed["scores"]["technicalSeo"], 90.0);
    assert_eq!(parsed["grade"], "A");
}

#[test]
fn analyze_below_threshold_exits_1() {
    let dir = tempfile::TempDir::new().unwrap();
    let data = write_fixture(dir.path(), "healthy.json", HEALTHY);

    let mut cmd = seoscan_cmd();
    cmd.arg("analyze")
        .arg(&data)
        .arg("--threshold")
        .arg("95")
        .arg("--quiet");
    cmd.assert().failure().code(1);
}

#[test]
fn analyze_above_threshold_exits_0() {
    let dir = tempfile::TempDir::new().unwrap();
    let data = write_fixture(dir.path(), "healthy.json", HEALTHY);

    let mut cmd = seoscan_cmd();
    cmd.arg("analyze").arg(&data).arg("--threshold").arg("50");
    cmd.assert().success();
}

#[test]
fn analyze_missing_file_exits_2() {
    let mut cmd = seoscan_cmd();
    cmd.arg("analyze").arg("nonexistent.json");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nonexistent.json"));
}

#[test]
fn analyze_invalid_json_exits_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let data = write_fixture(dir.path(), "broken.json", "{not json");

    let mut cmd = seoscan_cmd();
    cmd.arg("analyze").arg(&data);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn analyze_batch_reports_summary() {
    let dir = tempfile::TempDir::new().unwrap();
    let batch = format!("[{HEALTHY},{BROKEN}]");
    let data = write_fixture(dir.path(), "batch.json", &batch);

    let mut cmd = seoscan_cmd();
    cmd.arg("analyze").arg(&data).arg("--json");
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["summary"]["urlsAnalyzed"], 2);
    // (92.5 + 12.0) / 2
    assert_eq!(parsed["summary"]["averageScore"], 52.3);
}

#[test]
fn analyze_quiet_prints_one_line_per_url() {
    let dir = tempfile::TempDir::new().unwrap();
    let batch = format!("[{HEALTHY},{BROKEN}]");
    let data = write_fixture(dir.path(), "batch.json", &batch);

    let mut cmd = seoscan_cmd();
    cmd.arg("analyze").arg(&data).arg("--quiet");
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("https://example.com: 92.5"));
}

#[test]
fn analyze_console_output_shows_findings() {
    let dir = tempfile::TempDir::new().unwrap();
    let data = write_fixture(dir.path(), "broken.json", BROKEN);

    let mut cmd = seoscan_cmd();
    cmd.arg("analyze").arg(&data);
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SEO Analysis: http://slow.example"));
    assert!(stdout.contains("Missing title tag"));
    assert!(stdout.contains("Site not using HTTPS"));
}

#[test]
fn init_creates_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".seoscanrc.json");

    let mut cmd = seoscan_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert().success();

    assert!(config_path.exists(), ".seoscanrc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("targetUrls"));
    assert!(content.contains("threshold"));
}

#[test]
fn init_with_threshold_option() {
    let dir = tempfile::TempDir::new().unwrap();

    let mut cmd = seoscan_cmd();
    cmd.arg("init")
        .arg("--dir")
        .arg(dir.path())
        .arg("--threshold")
        .arg("85");
    cmd.assert().success();

    let content = fs::read_to_string(dir.path().join(".seoscanrc.json")).unwrap();
    assert!(content.contains("85"));
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempfile::TempDir::new().unwrap();

    seoscan_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();

    // Second init succeeds but warns instead of clobbering
    seoscan_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = seoscan_cmd();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("init"));
}
