//! Browser module tests
//!
//! These tests verify the browser configuration and artifact output paths.
//! Full browser integration requires a running Chrome/Chromium instance and
//! a target application on localhost:3000, so the live sequence is exercised
//! manually via the `sk-verify` binary.

use pretty_assertions::assert_eq;
use session_keeper_verify::browser::{BrowserConfig, PageCapture};
use std::path::Path;

#[test]
fn test_browser_config_default_is_mobile_viewport() {
    let config = BrowserConfig::default();
    assert!(config.headless);
    assert_eq!(config.width, 375);
    assert_eq!(config.height, 812);
    assert!(config.sandbox);
    assert!(config.chrome_path.is_none());
    assert!(config.extra_args.is_empty());
}

#[test]
fn test_browser_config_builder() {
    let config = BrowserConfig::builder()
        .headless(false)
        .viewport(1920, 1080)
        .sandbox(false)
        .chrome_path("/usr/bin/google-chrome")
        .arg("--disable-gpu")
        .arg("--no-first-run")
        .build();

    assert!(!config.headless);
    assert_eq!(config.width, 1920);
    assert_eq!(config.height, 1080);
    assert!(!config.sandbox);
    assert_eq!(
        config.chrome_path,
        Some("/usr/bin/google-chrome".to_string())
    );
    assert_eq!(config.extra_args.len(), 2);
}

#[test]
fn test_artifact_write_creates_verification_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verification").join("session_keeper_modal.png");

    PageCapture::write_artifact(&path, b"\x89PNG").unwrap();
    assert!(path.exists());
}

#[test]
fn test_artifact_write_is_idempotent() {
    // Two runs against an unchanged target overwrite the same path
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session_keeper_modal.png");

    PageCapture::write_artifact(&path, b"run-one").unwrap();
    PageCapture::write_artifact(&path, b"run-two").unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"run-two");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_artifact_write_fails_on_unwritable_path() {
    // A directory in place of the target file makes the write fail
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("occupied");
    std::fs::create_dir(&path).unwrap();

    let err = PageCapture::write_artifact(Path::new(&path), b"x").unwrap_err();
    assert!(err.to_string().contains("Failed to write artifact"));
}
