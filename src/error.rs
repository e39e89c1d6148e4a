//! Error types for the verification runner
//!
//! This module provides the error hierarchy using `thiserror`, one enum per
//! concern plus a top-level `Error` that everything converts into.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for verification operations
#[derive(Error, Debug)]
pub enum Error {
    /// Browser lifecycle errors
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Element/text wait errors
    #[error("Wait error: {0}")]
    Wait(#[from] WaitError),

    /// Client-side storage injection errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Screenshot capture and artifact errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),
}

/// Navigation errors
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Navigation timeout
    #[error("Navigation timed out after {0}ms")]
    Timeout(u64),

    /// Page load failed
    #[error("Page load failed: {0}")]
    LoadFailed(String),

    /// Page reload failed
    #[error("Page reload failed: {0}")]
    ReloadFailed(String),
}

/// Errors while waiting for page state
#[derive(Error, Debug)]
pub enum WaitError {
    /// Element never became visible within the bound
    #[error("Timed out after {timeout_ms}ms waiting for element to become visible: {selector}")]
    ElementTimeout {
        /// CSS selector that was being waited on
        selector: String,
        /// The wait bound in milliseconds
        timeout_ms: u64,
    },

    /// Text never appeared within the bound
    #[error("Timed out after {timeout_ms}ms waiting for text: {text}")]
    TextTimeout {
        /// The text fragment that was being waited on
        text: String,
        /// The wait bound in milliseconds
        timeout_ms: u64,
    },

    /// Click on the located element failed
    #[error("Click failed on {selector}: {reason}")]
    ClickFailed {
        /// CSS selector of the click target
        selector: String,
        /// Underlying failure description
        reason: String,
    },
}

/// Client-side storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// The in-page setItem script failed
    #[error("Failed to write storage key {key:?}: {reason}")]
    InjectionFailed {
        /// Storage key that was being written
        key: String,
        /// Underlying failure description
        reason: String,
    },

    /// The in-page getItem script failed
    #[error("Failed to read storage key {key:?}: {reason}")]
    ReadFailed {
        /// Storage key that was being read
        key: String,
        /// Underlying failure description
        reason: String,
    },
}

/// Capture errors (screenshot + artifact file)
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Screenshot failed
    #[error("Screenshot capture failed: {0}")]
    ScreenshotFailed(String),

    /// Writing the artifact file failed
    #[error("Failed to write artifact {path}: {source}")]
    WriteFailed {
        /// Target artifact path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result type alias for verification operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}
