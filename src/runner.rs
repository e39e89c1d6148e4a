//! The verification runner
//!
//! Drives the scripted interaction sequence against the target application:
//! navigate, inject the fake credential, reload, wait for the Session Keeper
//! settings control, click it, wait for the modal text, screenshot. Any
//! failure along the way is caught, reported, and answered with a best-effort
//! diagnostic screenshot; the browser is closed exactly once on every path.

use crate::browser::navigation::{DEFAULT_NAV_TIMEOUT_MS, DEFAULT_TEXT_TIMEOUT_MS};
use crate::browser::{BrowserConfig, BrowserController, PageCapture, PageNavigator};
use crate::error::Result;
use crate::storage::LocalStorage;
use chromiumoxide::Page;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Target application address
pub const DEFAULT_URL: &str = "http://localhost:3000";

/// Storage key the target checks for an API credential
pub const DEFAULT_STORAGE_KEY: &str = "jules-api-key";

/// Fake credential value; presence alone toggles the UI
pub const DEFAULT_STORAGE_VALUE: &str = "fake-api-key";

/// Selector for the Session Keeper settings control
pub const DEFAULT_SELECTOR: &str = "button[title=\"Session Keeper Settings\"]";

/// Text fragment that signals the modal rendered
pub const DEFAULT_MODAL_TEXT: &str = "Session Keeper (Auto-Pilot)";

/// Success artifact path
pub const DEFAULT_OUTPUT: &str = "verification/session_keeper_modal.png";

/// Diagnostic artifact path for failed runs
pub const DEFAULT_ERROR_OUTPUT: &str = "verification/error.png";

/// Bound for the settings-control visibility wait
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 5000;

/// Options for a verification run. The defaults reproduce the manual
/// smoke-test exactly; every field can be overridden from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOptions {
    /// Target application URL
    pub url: String,
    /// `localStorage` key for the injected credential
    pub storage_key: String,
    /// Injected credential value
    pub storage_value: String,
    /// Selector for the control that opens the modal
    pub selector: String,
    /// Text fragment expected inside the modal
    pub modal_text: String,
    /// Screenshot path on success
    pub output: PathBuf,
    /// Screenshot path on failure
    pub error_output: PathBuf,
    /// Bound for the element-visibility wait, in milliseconds
    pub element_timeout_ms: u64,
    /// Bound for the modal-text wait, in milliseconds
    pub text_timeout_ms: u64,
    /// Bound for navigation and reload, in milliseconds
    pub nav_timeout_ms: u64,
    /// Path to Chrome/Chromium executable (None = auto-detect)
    pub chrome_path: Option<String>,
    /// Run Chrome with its sandbox enabled
    pub sandbox: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_value: DEFAULT_STORAGE_VALUE.to_string(),
            selector: DEFAULT_SELECTOR.to_string(),
            modal_text: DEFAULT_MODAL_TEXT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            error_output: PathBuf::from(DEFAULT_ERROR_OUTPUT),
            element_timeout_ms: DEFAULT_ELEMENT_TIMEOUT_MS,
            text_timeout_ms: DEFAULT_TEXT_TIMEOUT_MS,
            nav_timeout_ms: DEFAULT_NAV_TIMEOUT_MS,
            chrome_path: None,
            sandbox: true,
        }
    }
}

/// Result of a verification run
#[derive(Debug)]
pub enum VerifyOutcome {
    /// The modal appeared and the screenshot was written
    Passed {
        /// Path of the success artifact
        screenshot: PathBuf,
    },
    /// Some step failed; a diagnostic screenshot may have been written
    Failed {
        /// Failure message including the underlying error text
        message: String,
        /// Path of the diagnostic artifact, if it could be captured
        screenshot: Option<PathBuf>,
    },
}

impl VerifyOutcome {
    /// Whether the run passed
    pub fn passed(&self) -> bool {
        matches!(self, VerifyOutcome::Passed { .. })
    }

    /// One-line status for stdout
    pub fn status_line(&self) -> String {
        match self {
            VerifyOutcome::Passed { screenshot } => {
                format!("Screenshot taken: {}", screenshot.display())
            }
            VerifyOutcome::Failed { message, .. } => message.clone(),
        }
    }
}

/// The verification runner
pub struct VerificationRunner;

impl VerificationRunner {
    /// Run the full verification sequence.
    ///
    /// Never returns an error: every failure, including browser launch, is
    /// folded into `VerifyOutcome::Failed`.
    #[instrument(skip(options))]
    pub async fn run(options: &VerifyOptions) -> VerifyOutcome {
        let config = BrowserConfig {
            headless: true,
            sandbox: options.sandbox,
            chrome_path: options.chrome_path.clone(),
            ..BrowserConfig::default()
        };

        let controller = match BrowserController::with_config(config).await {
            Ok(controller) => controller,
            Err(e) => {
                warn!("Verification failed: {}", e);
                // No page exists yet, so no diagnostic screenshot
                return VerifyOutcome::Failed {
                    message: format!("Verification failed: {}", e),
                    screenshot: None,
                };
            }
        };

        let outcome = match controller.new_page().await {
            Ok(page) => match Self::drive(&page, options).await {
                Ok(screenshot) => {
                    info!("Verification passed");
                    VerifyOutcome::Passed { screenshot }
                }
                Err(e) => {
                    warn!("Verification failed: {}", e);
                    let screenshot = Self::error_screenshot(&page, options).await;
                    VerifyOutcome::Failed {
                        message: format!("Verification failed: {}", e),
                        screenshot,
                    }
                }
            },
            Err(e) => {
                warn!("Verification failed: {}", e);
                VerifyOutcome::Failed {
                    message: format!("Verification failed: {}", e),
                    screenshot: None,
                }
            }
        };

        if let Err(e) = controller.close().await {
            debug!("Browser close error: {}", e);
        }

        outcome
    }

    /// Steps 2-8 of the sequence. Any error propagates to the catch-all in
    /// `run`.
    async fn drive(page: &Page, options: &VerifyOptions) -> Result<PathBuf> {
        PageNavigator::goto(page, &options.url, options.nav_timeout_ms).await?;

        LocalStorage::set_item(page, &options.storage_key, &options.storage_value).await?;

        // The target re-evaluates the credential on load
        PageNavigator::reload(page, options.nav_timeout_ms).await?;

        PageNavigator::wait_for_visible(page, &options.selector, options.element_timeout_ms)
            .await?;

        PageNavigator::click(page, &options.selector).await?;

        PageNavigator::wait_for_text(page, &options.modal_text, options.text_timeout_ms).await?;

        let data = PageCapture::screenshot(page).await?;
        PageCapture::write_artifact(&options.output, &data)?;

        Ok(options.output.clone())
    }

    /// Best-effort diagnostic screenshot for the failure path. The page may
    /// be in an unrecoverable state, so capture errors are only logged.
    async fn error_screenshot(page: &Page, options: &VerifyOptions) -> Option<PathBuf> {
        match PageCapture::screenshot(page).await {
            Ok(data) => match PageCapture::write_artifact(&options.error_output, &data) {
                Ok(()) => Some(options.error_output.clone()),
                Err(e) => {
                    debug!("Error screenshot write failed: {}", e);
                    None
                }
            },
            Err(e) => {
                debug!("Error screenshot capture failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_options_match_smoke_test_literals() {
        let opts = VerifyOptions::default();
        assert_eq!(opts.url, "http://localhost:3000");
        assert_eq!(opts.storage_key, "jules-api-key");
        assert_eq!(opts.storage_value, "fake-api-key");
        assert_eq!(opts.selector, "button[title=\"Session Keeper Settings\"]");
        assert_eq!(opts.modal_text, "Session Keeper (Auto-Pilot)");
        assert_eq!(
            opts.output,
            PathBuf::from("verification/session_keeper_modal.png")
        );
        assert_eq!(opts.error_output, PathBuf::from("verification/error.png"));
        assert_eq!(opts.element_timeout_ms, 5000);
        assert_eq!(opts.text_timeout_ms, 30000);
        assert!(opts.sandbox);
        assert!(opts.chrome_path.is_none());
    }

    #[test]
    fn test_outcome_status_lines() {
        let passed = VerifyOutcome::Passed {
            screenshot: PathBuf::from("verification/session_keeper_modal.png"),
        };
        assert!(passed.passed());
        assert_eq!(
            passed.status_line(),
            "Screenshot taken: verification/session_keeper_modal.png"
        );

        let failed = VerifyOutcome::Failed {
            message: "Verification failed: Navigation error: Page load failed: refused"
                .to_string(),
            screenshot: Some(PathBuf::from("verification/error.png")),
        };
        assert!(!failed.passed());
        assert!(failed.status_line().contains("refused"));
    }

    #[test]
    fn test_options_serialize_roundtrip() {
        let opts = VerifyOptions::default();
        let json = serde_json::to_string(&opts).unwrap();
        let back: VerifyOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.url, opts.url);
        assert_eq!(back.selector, opts.selector);
        assert_eq!(back.element_timeout_ms, opts.element_timeout_ms);
    }
}
