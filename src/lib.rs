//! Session Keeper Verify - Headless-Browser Smoke Test Runner
//!
//! Visually verifies the Session Keeper settings modal of the target web
//! application: it injects a fake API credential into `localStorage`,
//! reloads, clicks the settings control, waits for the modal text, and
//! writes a screenshot artifact.
//!
//! # Sequence
//!
//! ```text
//! Launch (headless, 375x812) ──▶ goto localhost:3000
//!        │
//!        ▼
//! localStorage['jules-api-key'] = 'fake-api-key' ──▶ reload
//!        │
//!        ▼
//! wait button[title="Session Keeper Settings"] ──▶ click
//!        │
//!        ▼
//! wait "Session Keeper (Auto-Pilot)" ──▶ screenshot
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use session_keeper_verify::runner::{VerificationRunner, VerifyOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let outcome = VerificationRunner::run(&VerifyOptions::default()).await;
//!     println!("{}", outcome.status_line());
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod error;
pub mod runner;
pub mod storage;

// Re-exports for convenience
pub use browser::{BrowserConfig, BrowserController, PageCapture, PageNavigator};
pub use error::{Error, Result};
pub use runner::{VerificationRunner, VerifyOptions, VerifyOutcome};
pub use storage::LocalStorage;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
