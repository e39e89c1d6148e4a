//! Browser automation module
//!
//! High-level browser control through ChromiumOxide: lifecycle management,
//! navigation/wait primitives, and screenshot capture.

pub mod capture;
pub mod controller;
pub mod navigation;

pub use capture::PageCapture;
pub use controller::{BrowserConfig, BrowserController};
pub use navigation::PageNavigator;
