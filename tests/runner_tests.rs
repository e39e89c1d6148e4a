//! Verification runner tests
//!
//! Checks the run options, the literals the target contract depends on, and
//! the outcome reporting.

use pretty_assertions::assert_eq;
use session_keeper_verify::runner::{VerifyOptions, VerifyOutcome};
use session_keeper_verify::LocalStorage;
use std::path::PathBuf;

#[test]
fn test_default_options_reproduce_manual_pass() {
    let opts = VerifyOptions::default();

    assert_eq!(opts.url, "http://localhost:3000");
    assert_eq!(opts.storage_key, "jules-api-key");
    assert_eq!(opts.storage_value, "fake-api-key");
    assert_eq!(opts.selector, r#"button[title="Session Keeper Settings"]"#);
    assert_eq!(opts.modal_text, "Session Keeper (Auto-Pilot)");
    assert_eq!(
        opts.output,
        PathBuf::from("verification/session_keeper_modal.png")
    );
    assert_eq!(opts.error_output, PathBuf::from("verification/error.png"));
    assert_eq!(opts.element_timeout_ms, 5000);
}

#[test]
fn test_injection_script_writes_exact_literals() {
    let opts = VerifyOptions::default();
    let script = LocalStorage::set_item_script(&opts.storage_key, &opts.storage_value);
    assert_eq!(
        script,
        r#"localStorage.setItem("jules-api-key", "fake-api-key")"#
    );
}

#[test]
fn test_readback_script_targets_injected_key() {
    let opts = VerifyOptions::default();
    let script = LocalStorage::get_item_script(&opts.storage_key);
    assert_eq!(script, r#"localStorage.getItem("jules-api-key")"#);
}

#[test]
fn test_passed_outcome_status_line() {
    let outcome = VerifyOutcome::Passed {
        screenshot: PathBuf::from("verification/session_keeper_modal.png"),
    };
    assert!(outcome.passed());
    assert_eq!(
        outcome.status_line(),
        "Screenshot taken: verification/session_keeper_modal.png"
    );
}

#[test]
fn test_failed_outcome_keeps_underlying_error_text() {
    let outcome = VerifyOutcome::Failed {
        message: "Verification failed: Navigation error: Page load failed: \
                  net::ERR_CONNECTION_REFUSED"
            .to_string(),
        screenshot: None,
    };
    assert!(!outcome.passed());
    assert!(outcome.status_line().starts_with("Verification failed:"));
    assert!(outcome.status_line().contains("ERR_CONNECTION_REFUSED"));
}

#[test]
fn test_options_json_roundtrip() {
    let opts = VerifyOptions {
        url: "http://localhost:8080".to_string(),
        element_timeout_ms: 2500,
        ..VerifyOptions::default()
    };

    let json = serde_json::to_string(&opts).unwrap();
    let back: VerifyOptions = serde_json::from_str(&json).unwrap();

    assert_eq!(back.url, "http://localhost:8080");
    assert_eq!(back.element_timeout_ms, 2500);
    assert_eq!(back.storage_key, opts.storage_key);
    assert_eq!(back.output, opts.output);
}
