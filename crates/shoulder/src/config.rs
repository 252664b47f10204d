// Config - ambient settings shared by every entity of one session
//
// Read-only from the engine's perspective: supplied at Browser construction,
// never mutated by the wait/retry logic.

use std::time::Duration;

use crate::hooks::OnFailureHook;

/// Default deadline for `should`/`is` polling.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Default pause between poll attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Session configuration.
///
/// Fields are public; the `with_*` methods exist for fluent setup:
///
/// ```ignore
/// let config = Config::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_base_url("https://example.org")
///     .with_failure_hook(hooks::screenshot("./reports"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Deadline for `should`/`is` polling when the call site gives none.
    pub timeout: Duration,
    /// Pause between poll attempts; zero means busy-polling.
    pub poll_interval: Duration,
    /// Base joined with relative targets passed to `Browser::open`.
    pub base_url: Option<String>,
    pub window_width: Option<u32>,
    pub window_height: Option<u32>,
    /// Route `Element::click` through a synthesized JS click event.
    pub click_by_js: bool,
    /// Route `Element::set_value` through the JS value setter.
    pub set_value_by_js: bool,
    /// Hooks run on every wait/action failure, in order.
    pub on_failure_hooks: Vec<OnFailureHook>,
    /// Hooks run additionally when the failing entity is an element.
    pub on_element_failure_hooks: Vec<OnFailureHook>,
    /// Hooks run additionally when the failing entity is a collection.
    pub on_collection_failure_hooks: Vec<OnFailureHook>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            base_url: None,
            window_width: None,
            window_height: None,
            click_by_js: false,
            set_value_by_js: false,
            on_failure_hooks: Vec::new(),
            on_element_failure_hooks: Vec::new(),
            on_collection_failure_hooks: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = Some(width);
        self.window_height = Some(height);
        self
    }

    pub fn with_click_by_js(mut self, enabled: bool) -> Self {
        self.click_by_js = enabled;
        self
    }

    pub fn with_set_value_by_js(mut self, enabled: bool) -> Self {
        self.set_value_by_js = enabled;
        self
    }

    /// Appends a hook to the common on-failure list.
    pub fn with_failure_hook(mut self, hook: OnFailureHook) -> Self {
        self.on_failure_hooks.push(hook);
        self
    }

    /// Appends a hook run only for element failures.
    pub fn with_element_failure_hook(mut self, hook: OnFailureHook) -> Self {
        self.on_element_failure_hooks.push(hook);
        self
    }

    /// Appends a hook run only for collection failures.
    pub fn with_collection_failure_hook(mut self, hook: OnFailureHook) -> Self {
        self.on_collection_failure_hooks.push(hook);
        self
    }
}
