//! Page navigation and wait primitives
//!
//! Navigation with bounded timeouts, reload, and the polling waits the
//! verification sequence is built from: element visibility and text
//! appearance.

use crate::error::{Error, NavigationError, Result, WaitError};
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default navigation timeout in milliseconds
pub const DEFAULT_NAV_TIMEOUT_MS: u64 = 30_000;

/// Default bound for text-appearance waits in milliseconds
pub const DEFAULT_TEXT_TIMEOUT_MS: u64 = 30_000;

/// Page navigation and wait operations
pub struct PageNavigator;

impl PageNavigator {
    /// Navigate the page to a URL and wait for the load event, bounded by
    /// `timeout_ms`.
    #[instrument(skip(page))]
    pub async fn goto(page: &Page, url: &str, timeout_ms: u64) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            NavigationError::InvalidUrl(format!("{}: {}", url, e))
        })?;
        match parsed.scheme() {
            "http" | "https" | "file" => {}
            other => {
                return Err(NavigationError::InvalidUrl(format!(
                    "unsupported scheme {:?} in {}",
                    other, url
                ))
                .into());
            }
        }

        info!("Navigating to: {}", url);

        let timeout = Duration::from_millis(timeout_ms);
        tokio::time::timeout(timeout, page.goto(url))
            .await
            .map_err(|_| NavigationError::Timeout(timeout_ms))?
            .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;

        Self::wait_for_load(page, timeout_ms).await?;

        debug!("Navigation complete: {}", url);
        Ok(())
    }

    /// Reload the current page and wait for the load event again.
    #[instrument(skip(page))]
    pub async fn reload(page: &Page, timeout_ms: u64) -> Result<()> {
        info!("Reloading page");

        page.reload()
            .await
            .map_err(|e| NavigationError::ReloadFailed(e.to_string()))?;

        Self::wait_for_load(page, timeout_ms).await?;
        Ok(())
    }

    /// Wait until `document.readyState` reaches `complete`.
    async fn wait_for_load(page: &Page, timeout_ms: u64) -> Result<()> {
        let script = r#"
            new Promise(resolve => {
                if (document.readyState === 'complete') {
                    resolve(true);
                } else {
                    window.addEventListener('load', () => resolve(true));
                }
            })
        "#;

        let timeout = Duration::from_millis(timeout_ms);
        tokio::time::timeout(timeout, page.evaluate(script))
            .await
            .map_err(|_| NavigationError::Timeout(timeout_ms))?
            .map_err(|e| Error::cdp(e.to_string()))?;

        Ok(())
    }

    /// Wait until the element matched by `selector` is present and visibly
    /// rendered (non-empty bounding box, not `visibility: hidden`), bounded
    /// by `timeout_ms`.
    #[instrument(skip(page))]
    pub async fn wait_for_visible(page: &Page, selector: &str, timeout_ms: u64) -> Result<()> {
        info!("Waiting for element to become visible: {}", selector);

        let script = format!(
            r#"
                new Promise((resolve, reject) => {{
                    const selector = {selector};
                    const deadline = Date.now() + {timeout_ms};

                    function visible(el) {{
                        if (!el) return false;
                        const rect = el.getBoundingClientRect();
                        return rect.width > 0 && rect.height > 0 &&
                            getComputedStyle(el).visibility !== 'hidden';
                    }}

                    function check() {{
                        if (visible(document.querySelector(selector))) {{
                            resolve(true);
                        }} else if (Date.now() > deadline) {{
                            reject(new Error('TimeoutError: element not visible'));
                        }} else {{
                            setTimeout(check, 100);
                        }}
                    }}
                    check();
                }})
            "#,
            selector = js_string(selector),
            timeout_ms = timeout_ms,
        );

        // Outer margin so the in-page deadline fires first
        let timeout = outer_wait_bound(timeout_ms);
        let evaluated = tokio::time::timeout(timeout, page.evaluate(script.as_str()))
            .await
            .map_err(|_| WaitError::ElementTimeout {
                selector: selector.to_string(),
                timeout_ms,
            })?;

        if let Err(e) = evaluated {
            return Err(classify_wait_failure(
                &e.to_string(),
                WaitError::ElementTimeout {
                    selector: selector.to_string(),
                    timeout_ms,
                },
            ));
        }

        debug!("Element visible: {}", selector);
        Ok(())
    }

    /// Wait until `text` appears anywhere in the page body, bounded by
    /// `timeout_ms`.
    #[instrument(skip(page))]
    pub async fn wait_for_text(page: &Page, text: &str, timeout_ms: u64) -> Result<()> {
        info!("Waiting for text: {}", text);

        let script = format!(
            r#"
                new Promise((resolve, reject) => {{
                    const needle = {text};
                    const deadline = Date.now() + {timeout_ms};

                    function check() {{
                        if (document.body && document.body.innerText.includes(needle)) {{
                            resolve(true);
                        }} else if (Date.now() > deadline) {{
                            reject(new Error('TimeoutError: text not found'));
                        }} else {{
                            setTimeout(check, 100);
                        }}
                    }}
                    check();
                }})
            "#,
            text = js_string(text),
            timeout_ms = timeout_ms,
        );

        let timeout = outer_wait_bound(timeout_ms);
        let evaluated = tokio::time::timeout(timeout, page.evaluate(script.as_str()))
            .await
            .map_err(|_| WaitError::TextTimeout {
                text: text.to_string(),
                timeout_ms,
            })?;

        if let Err(e) = evaluated {
            return Err(classify_wait_failure(
                &e.to_string(),
                WaitError::TextTimeout {
                    text: text.to_string(),
                    timeout_ms,
                },
            ));
        }

        debug!("Text found: {}", text);
        Ok(())
    }

    /// Click the element matched by `selector`.
    #[instrument(skip(page))]
    pub async fn click(page: &Page, selector: &str) -> Result<()> {
        info!("Clicking: {}", selector);

        let element = page.find_element(selector).await.map_err(|e| {
            warn!("Click target lookup failed: {}", e);
            WaitError::ClickFailed {
                selector: selector.to_string(),
                reason: format!("element not found: {}", e),
            }
        })?;

        element.click().await.map_err(|e| WaitError::ClickFailed {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

/// Outer guard for an in-page bounded wait, slightly wider than the page's
/// own deadline so the in-page rejection fires first.
pub(crate) fn outer_wait_bound(timeout_ms: u64) -> Duration {
    Duration::from_millis(timeout_ms.saturating_add(1000))
}

/// Sort a wait-evaluation failure. The wait scripts reject with a
/// `TimeoutError` message when their deadline passes; any other evaluation
/// failure (page crash, unrelated JS exception) is a CDP error, not a
/// timeout.
pub(crate) fn classify_wait_failure(detail: &str, timed_out: WaitError) -> Error {
    if detail.contains("TimeoutError") {
        timed_out.into()
    } else {
        Error::cdp(detail)
    }
}

/// Encode a Rust string as a JavaScript string literal.
///
/// JSON string encoding is valid JavaScript and closes off quote/backslash
/// escapes, so selector and text values cannot break out of the embedding
/// script.
pub(crate) fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
