// Driver capability seam
//
// The wait/retry engine never talks a wire protocol itself; it consumes the
// browser session through the two narrow traits below. A production client
// (WebDriver over HTTP, CDP, ...) implements them once; tests supply a fake.
//
// Architecture:
// - `DriverClient` is the whole-session capability (navigation, scripts,
//   lookup roots, diagnostics capture).
// - `ElementHandle` is a resolved DOM node. Handles are returned fresh from
//   every lookup; entities stay lazy and re-resolve per interaction.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Locator for element lookup.
///
/// Only the two constructors are part of this crate's surface; selector
/// grammar and translation belong to the driver client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum By {
    Css(String),
    XPath(String),
}

impl By {
    /// Locates by CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        By::Css(selector.into())
    }

    /// Locates by XPath expression.
    pub fn xpath(path: impl Into<String>) -> Self {
        By::XPath(path.into())
    }
}

impl std::fmt::Display for By {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            By::Css(selector) => write!(f, "By(css selector, {selector})"),
            By::XPath(path) => write!(f, "By(xpath, {path})"),
        }
    }
}

/// Session-level capability of the underlying browser driver.
///
/// Invoked opaquely by leaf conditions, commands and failure hooks; the
/// wait/retry engine itself never calls it directly.
#[async_trait]
pub trait DriverClient: Send + Sync {
    /// Navigates the session to the given absolute URL.
    async fn open(&self, url: &str) -> Result<()>;

    /// Returns the URL of the current page.
    async fn current_url(&self) -> Result<String>;

    /// Returns the title of the current page.
    async fn title(&self) -> Result<String>;

    /// Returns the full page source of the current page.
    async fn page_source(&self) -> Result<String>;

    /// Captures a screenshot of the current viewport as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Executes a script in the page, returning its JSON result.
    async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value>;

    /// Resizes the browser window.
    async fn set_window_size(&self, width: u32, height: u32) -> Result<()>;

    /// Resolves the first element matching the locator.
    async fn find(&self, by: &By) -> Result<Arc<dyn ElementHandle>>;

    /// Resolves all elements matching the locator.
    async fn find_all(&self, by: &By) -> Result<Vec<Arc<dyn ElementHandle>>>;

    /// Closes the current window.
    async fn close_window(&self) -> Result<()>;

    /// Ends the session.
    async fn quit(&self) -> Result<()>;
}

/// A resolved DOM node.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Dispatches a native click to the node.
    async fn click(&self) -> Result<()>;

    /// Clears the node's value.
    async fn clear(&self) -> Result<()>;

    /// Sends a key sequence to the node.
    async fn send_keys(&self, keys: &str) -> Result<()>;

    /// Returns the node's visible text.
    async fn text(&self) -> Result<String>;

    /// Returns the node's tag name.
    async fn tag_name(&self) -> Result<String>;

    /// Returns the value of an attribute, or `None` when absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    async fn is_displayed(&self) -> Result<bool>;

    async fn is_enabled(&self) -> Result<bool>;

    async fn is_selected(&self) -> Result<bool>;

    /// Executes a script with this node bound as `arguments[0]`; extra args
    /// follow from `arguments[1]` on.
    async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value>;

    /// Resolves the first descendant matching the locator.
    async fn find(&self, by: &By) -> Result<Arc<dyn ElementHandle>>;

    /// Resolves all descendants matching the locator.
    async fn find_all(&self, by: &By) -> Result<Vec<Arc<dyn ElementHandle>>>;
}

#[cfg(test)]
mod tests {
    use super::By;

    #[test]
    fn by_display_uses_selenium_addressing_text() {
        assert_eq!(By::css("#test").to_string(), "By(css selector, #test)");
        assert_eq!(
            By::xpath("//div[@id='a']").to_string(),
            "By(xpath, //div[@id='a'])"
        );
    }
}
