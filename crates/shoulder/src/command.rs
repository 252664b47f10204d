// Commands - named side-effecting operations over an element
//
// Each command is a light value object exposing `perform` plus a `Display`
// used verbatim in error messages. `PerformActionOnVisible` is the retry
// wrapper every element interaction goes through: try once, force a
// visibility wait on failure, try once more, then give up with context.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::conditions::be;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::hooks::HookExecutor;

/// A named, side-effecting operation performed against an element.
#[async_trait]
pub trait Command: fmt::Display + Send + Sync {
    async fn perform(&self, element: &Element) -> Result<()>;
}

/// Retries a failed command exactly once after forcing a visibility wait.
///
/// Many interaction failures are transient races against page rendering; one
/// visibility-gated retry resolves those without hiding genuine failures
/// behind unbounded retries.
pub struct PerformActionOnVisible<'a, C> {
    hooks: HookExecutor<'a>,
    command: C,
}

impl<'a, C: Command> PerformActionOnVisible<'a, C> {
    pub fn new(hooks: HookExecutor<'a>, command: C) -> Self {
        Self { hooks, command }
    }

    /// Performs the command, retrying once behind a visibility wait.
    ///
    /// The visibility wait is a full retrying-wait cycle with the ambient
    /// timeout; if it times out, its error (and its own hook pass) pre-empts
    /// the retry. A second command failure is wrapped as
    /// `"For element <element>: cannot perform <command>. Reason: <msg>"`,
    /// hooks run, and a typed [`Error::CannotPerformAction`] surfaces.
    pub async fn perform(&self, element: &Element) -> Result<()> {
        if self.command.perform(element).await.is_ok() {
            return Ok(());
        }
        element.should(be::visible()).await?;
        match self.command.perform(element).await {
            Ok(()) => {
                tracing::debug!(command = %self.command, element = %element, "action succeeded on retry");
                Ok(())
            }
            Err(cause) => {
                let error = Error::CannotPerformAction(format!(
                    "For element {element}: cannot perform {}. Reason: {cause}",
                    self.command
                ));
                self.hooks.execute_on_failure_hooks(&error, None).await;
                Err(error)
            }
        }
    }
}

/// Keys with dedicated element shortcuts, as WebDriver code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Tab,
    Escape,
}

impl Key {
    /// The WebDriver key code sent over `send_keys`.
    pub fn code(self) -> &'static str {
        match self {
            Key::Enter => "\u{e007}",
            Key::Tab => "\u{e004}",
            Key::Escape => "\u{e00c}",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Enter => f.write_str("Enter"),
            Key::Tab => f.write_str("Tab"),
            Key::Escape => f.write_str("Escape"),
        }
    }
}

/// Native click.
pub struct Click;

#[async_trait]
impl Command for Click {
    async fn perform(&self, element: &Element) -> Result<()> {
        element.resolve().await?.click().await
    }
}

impl fmt::Display for Click {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("click")
    }
}

const CLICK_BY_JS_SCRIPT: &str = "arguments[0].dispatchEvent(new MouseEvent('click', \
     {view: window, bubbles: true, cancelable: true}));";

/// Click synthesized as a bubbling JS MouseEvent, for targets a native click
/// cannot reach (overlapped or offscreen nodes).
pub struct ClickByJs;

#[async_trait]
impl Command for ClickByJs {
    async fn perform(&self, element: &Element) -> Result<()> {
        element
            .resolve()
            .await?
            .execute_script(CLICK_BY_JS_SCRIPT, Vec::new())
            .await
            .map(|_| ())
    }
}

impl fmt::Display for ClickByJs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("click by js")
    }
}

/// Raw key sequence, appended to the current value.
pub struct SendKeys {
    keys: String,
}

impl SendKeys {
    pub fn new(keys: impl Into<String>) -> Self {
        Self { keys: keys.into() }
    }
}

#[async_trait]
impl Command for SendKeys {
    async fn perform(&self, element: &Element) -> Result<()> {
        element.resolve().await?.send_keys(&self.keys).await
    }
}

impl fmt::Display for SendKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "send keys '{}'", self.keys)
    }
}

/// Clear, then type the value.
pub struct SetValue {
    value: String,
}

impl SetValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[async_trait]
impl Command for SetValue {
    async fn perform(&self, element: &Element) -> Result<()> {
        let handle = element.resolve().await?;
        handle.clear().await?;
        handle.send_keys(&self.value).await
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set value '{}'", self.value)
    }
}

// Truncates to the input's maxlength the way typed input would.
const SET_VALUE_BY_JS_SCRIPT: &str = "\
    (function(element, text) {\
        var maxlength = element.getAttribute('maxlength') === null\
            ? -1\
            : parseInt(element.getAttribute('maxlength'));\
        element.value = maxlength === -1 ? text\
            : text.length <= maxlength ? text\
            : text.substring(0, maxlength);\
    })(arguments[0], arguments[1]);";

/// Set the value directly through the DOM, bypassing key events.
pub struct SetValueByJs {
    value: String,
}

impl SetValueByJs {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[async_trait]
impl Command for SetValueByJs {
    async fn perform(&self, element: &Element) -> Result<()> {
        let handle = element.resolve().await?;
        handle.clear().await?;
        handle
            .execute_script(SET_VALUE_BY_JS_SCRIPT, vec![json!(self.value)])
            .await
            .map(|_| ())
    }
}

impl fmt::Display for SetValueByJs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set value by js '{}'", self.value)
    }
}

/// Single key press.
pub struct PressKey {
    key: Key,
}

impl PressKey {
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

#[async_trait]
impl Command for PressKey {
    async fn perform(&self, element: &Element) -> Result<()> {
        element.resolve().await?.send_keys(self.key.code()).await
    }
}

impl fmt::Display for PressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "press {}", self.key)
    }
}

/// Scroll the element into the viewport.
pub struct ScrollIntoView;

#[async_trait]
impl Command for ScrollIntoView {
    async fn perform(&self, element: &Element) -> Result<()> {
        element
            .resolve()
            .await?
            .execute_script("arguments[0].scrollIntoView(true);", Vec::new())
            .await
            .map(|_| ())
    }
}

impl fmt::Display for ScrollIntoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scroll into view")
    }
}
