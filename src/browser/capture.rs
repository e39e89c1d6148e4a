//! Screenshot capture and artifact output
//!
//! Full-page PNG capture plus the artifact writer that puts the image on
//! disk at a fixed path, overwriting any previous run's output.

use crate::error::{CaptureError, Result};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Page capture functionality
pub struct PageCapture;

impl PageCapture {
    /// Take a full-page PNG screenshot and return the raw bytes.
    #[instrument(skip(page))]
    pub async fn screenshot(page: &Page) -> Result<Vec<u8>> {
        info!("Capturing screenshot");

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .from_surface(true)
            .capture_beyond_viewport(true)
            .build();

        let data = page
            .screenshot(params)
            .await
            .map_err(|e| CaptureError::ScreenshotFailed(e.to_string()))?;

        debug!("Screenshot captured: {} bytes", data.len());
        Ok(data)
    }

    /// Write screenshot bytes to `path`, creating parent directories as
    /// needed. An existing file at the path is overwritten, so repeated runs
    /// replace the artifact instead of accumulating files.
    #[instrument(skip(data))]
    pub fn write_artifact(path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CaptureError::WriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, data).map_err(|e| CaptureError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!("Screenshot written: {}", path.display());
        Ok(())
    }
}
