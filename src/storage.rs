//! Client-side storage injection
//!
//! Writes the fake credential into the page's `localStorage` so the target
//! application reveals the Session Keeper controls after reload.

use crate::browser::navigation::js_string;
use crate::error::{Result, StorageError};
use chromiumoxide::Page;
use tracing::{debug, info, instrument};

/// `localStorage` access for the page under verification
pub struct LocalStorage;

impl LocalStorage {
    /// Write a key/value pair into the page's `localStorage`.
    #[instrument(skip(page))]
    pub async fn set_item(page: &Page, key: &str, value: &str) -> Result<()> {
        info!("Injecting storage key: {}", key);

        let script = Self::set_item_script(key, value);
        page.evaluate(script.as_str())
            .await
            .map_err(|e| StorageError::InjectionFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Storage key written: {}", key);
        Ok(())
    }

    /// Read a key back from the page's `localStorage`. This is the
    /// reload-time assertion hook: a test double of the target can confirm
    /// the exact injected literals were observed in storage.
    pub async fn get_item(page: &Page, key: &str) -> Result<Option<String>> {
        let script = Self::get_item_script(key);

        let value: Option<String> = page
            .evaluate(script.as_str())
            .await
            .map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?
            .into_value()
            .map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        Ok(value)
    }

    /// Build the in-page script for `get_item`.
    pub fn get_item_script(key: &str) -> String {
        format!("localStorage.getItem({})", js_string(key))
    }

    /// Build the in-page script for `set_item`. Key and value are embedded
    /// as JSON string literals so they cannot break out of the call.
    pub fn set_item_script(key: &str, value: &str) -> String {
        format!(
            "localStorage.setItem({}, {})",
            js_string(key),
            js_string(value)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_item_script_spec_literals() {
        assert_eq!(
            LocalStorage::set_item_script("jules-api-key", "fake-api-key"),
            "localStorage.setItem(\"jules-api-key\", \"fake-api-key\")"
        );
    }

    #[test]
    fn test_set_item_script_escapes_quotes() {
        let script = LocalStorage::set_item_script("k", "a\"b'c");
        assert_eq!(script, "localStorage.setItem(\"k\", \"a\\\"b'c\")");
    }

    #[test]
    fn test_get_item_script_spec_literal() {
        assert_eq!(
            LocalStorage::get_item_script("jules-api-key"),
            "localStorage.getItem(\"jules-api-key\")"
        );
    }

    #[test]
    fn test_get_item_script_escapes_quotes() {
        let script = LocalStorage::get_item_script("a\"b");
        assert_eq!(script, "localStorage.getItem(\"a\\\"b\")");
    }
}
