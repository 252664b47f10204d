// Shared test harness: tracing init, a scriptable fake driver, hook helpers.
//
// The fake driver implements the DriverClient/ElementHandle capability seam
// with in-memory state behind parking_lot mutexes, so tests can script
// failures (click fails twice, element never appears) and observe call
// counts without a real browser.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use shoulder::{By, DriverClient, ElementHandle, Error, FailureContext, OnFailureHook, Result};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A scriptable DOM node.
#[derive(Default)]
pub struct FakeElement {
    pub text: Mutex<String>,
    pub tag: Mutex<String>,
    pub attributes: Mutex<HashMap<String, String>>,
    pub displayed: Mutex<bool>,
    pub enabled: Mutex<bool>,
    pub selected: Mutex<bool>,
    /// Pre-scripted click failures, consumed front to back; an empty queue
    /// means clicks succeed.
    pub click_failures: Mutex<VecDeque<String>>,
    pub click_calls: Mutex<usize>,
    pub displayed_checks: Mutex<usize>,
    pub keys_sent: Mutex<Vec<String>>,
    pub clear_calls: Mutex<usize>,
    pub scripts_run: Mutex<Vec<String>>,
    pub children: Mutex<HashMap<String, Arc<FakeElement>>>,
    pub child_lists: Mutex<HashMap<String, Vec<Arc<FakeElement>>>>,
}

impl FakeElement {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            displayed: Mutex::new(true),
            enabled: Mutex::new(true),
            ..Self::default()
        })
    }

    pub fn with_text(self: Arc<Self>, text: &str) -> Arc<Self> {
        *self.text.lock() = text.to_string();
        self
    }

    pub fn with_displayed(self: Arc<Self>, displayed: bool) -> Arc<Self> {
        *self.displayed.lock() = displayed;
        self
    }

    pub fn with_enabled(self: Arc<Self>, enabled: bool) -> Arc<Self> {
        *self.enabled.lock() = enabled;
        self
    }

    pub fn with_selected(self: Arc<Self>, selected: bool) -> Arc<Self> {
        *self.selected.lock() = selected;
        self
    }

    pub fn with_attribute(self: Arc<Self>, name: &str, value: &str) -> Arc<Self> {
        self.attributes
            .lock()
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Scripts the next `times` clicks to fail with `message`.
    pub fn failing_clicks(self: Arc<Self>, times: usize, message: &str) -> Arc<Self> {
        let mut failures = self.click_failures.lock();
        for _ in 0..times {
            failures.push_back(message.to_string());
        }
        drop(failures);
        self
    }

    pub fn with_child(self: Arc<Self>, by: &By, child: Arc<FakeElement>) -> Arc<Self> {
        self.children.lock().insert(by.to_string(), child);
        self
    }
}

#[async_trait]
impl ElementHandle for FakeElement {
    async fn click(&self) -> Result<()> {
        *self.click_calls.lock() += 1;
        match self.click_failures.lock().pop_front() {
            Some(message) => Err(Error::Driver(message)),
            None => Ok(()),
        }
    }

    async fn clear(&self) -> Result<()> {
        *self.clear_calls.lock() += 1;
        Ok(())
    }

    async fn send_keys(&self, keys: &str) -> Result<()> {
        self.keys_sent.lock().push(keys.to_string());
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.text.lock().clone())
    }

    async fn tag_name(&self) -> Result<String> {
        Ok(self.tag.lock().clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attributes.lock().get(name).cloned())
    }

    async fn is_displayed(&self) -> Result<bool> {
        *self.displayed_checks.lock() += 1;
        Ok(*self.displayed.lock())
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(*self.enabled.lock())
    }

    async fn is_selected(&self) -> Result<bool> {
        Ok(*self.selected.lock())
    }

    async fn execute_script(&self, script: &str, _args: Vec<Value>) -> Result<Value> {
        self.scripts_run.lock().push(script.to_string());
        Ok(Value::Null)
    }

    async fn find(&self, by: &By) -> Result<Arc<dyn ElementHandle>> {
        self.children
            .lock()
            .get(&by.to_string())
            .cloned()
            .map(|child| child as Arc<dyn ElementHandle>)
            .ok_or_else(|| Error::ElementNotFound(by.to_string()))
    }

    async fn find_all(&self, by: &By) -> Result<Vec<Arc<dyn ElementHandle>>> {
        Ok(self
            .child_lists
            .lock()
            .get(&by.to_string())
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|child| child as Arc<dyn ElementHandle>)
            .collect())
    }
}

/// A scriptable browser session.
#[derive(Default)]
pub struct FakeDriver {
    pub url: Mutex<String>,
    pub title: Mutex<String>,
    pub source: Mutex<String>,
    pub screenshot_png: Mutex<Vec<u8>>,
    pub screenshot_calls: Mutex<usize>,
    /// When set, screenshot capture fails with this message.
    pub screenshot_failure: Mutex<Option<String>>,
    pub opened: Mutex<Vec<String>>,
    pub window_sizes: Mutex<Vec<(u32, u32)>>,
    pub elements: Mutex<HashMap<String, Arc<FakeElement>>>,
    pub element_lists: Mutex<HashMap<String, Vec<Arc<FakeElement>>>>,
    pub scripts_run: Mutex<Vec<String>>,
    pub closed: Mutex<bool>,
    pub quit_called: Mutex<bool>,
}

impl FakeDriver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            screenshot_png: Mutex::new(vec![0x89, b'P', b'N', b'G']),
            source: Mutex::new("<html></html>".to_string()),
            ..Self::default()
        })
    }

    pub fn add_element(&self, by: &By, element: Arc<FakeElement>) {
        self.elements.lock().insert(by.to_string(), element);
    }

    pub fn add_elements(&self, by: &By, elements: Vec<Arc<FakeElement>>) {
        self.element_lists.lock().insert(by.to_string(), elements);
    }
}

#[async_trait]
impl DriverClient for FakeDriver {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().push(url.to_string());
        *self.url.lock() = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.url.lock().clone())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.title.lock().clone())
    }

    async fn page_source(&self) -> Result<String> {
        Ok(self.source.lock().clone())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        *self.screenshot_calls.lock() += 1;
        if let Some(message) = self.screenshot_failure.lock().clone() {
            return Err(Error::Driver(message));
        }
        Ok(self.screenshot_png.lock().clone())
    }

    async fn execute_script(&self, script: &str, _args: Vec<Value>) -> Result<Value> {
        self.scripts_run.lock().push(script.to_string());
        Ok(Value::Null)
    }

    async fn set_window_size(&self, width: u32, height: u32) -> Result<()> {
        self.window_sizes.lock().push((width, height));
        Ok(())
    }

    async fn find(&self, by: &By) -> Result<Arc<dyn ElementHandle>> {
        self.elements
            .lock()
            .get(&by.to_string())
            .cloned()
            .map(|element| element as Arc<dyn ElementHandle>)
            .ok_or_else(|| Error::ElementNotFound(by.to_string()))
    }

    async fn find_all(&self, by: &By) -> Result<Vec<Arc<dyn ElementHandle>>> {
        Ok(self
            .element_lists
            .lock()
            .get(&by.to_string())
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|element| element as Arc<dyn ElementHandle>)
            .collect())
    }

    async fn close_window(&self) -> Result<()> {
        *self.closed.lock() = true;
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        *self.quit_called.lock() = true;
        Ok(())
    }
}

/// Hook that appends its name to a shared log and succeeds.
pub fn recording_hook(name: &str, log: Arc<Mutex<Vec<String>>>) -> OnFailureHook {
    let hook_name = name.to_string();
    OnFailureHook::new(name, move |_context: FailureContext<'_>| {
        let log = Arc::clone(&log);
        let hook_name = hook_name.clone();
        Box::pin(async move {
            log.lock().push(hook_name);
            Ok(())
        })
    })
}

/// Hook that appends its name to a shared log, then fails.
pub fn failing_hook(name: &str, log: Arc<Mutex<Vec<String>>>) -> OnFailureHook {
    let hook_name = name.to_string();
    OnFailureHook::new(name, move |_context: FailureContext<'_>| {
        let log = Arc::clone(&log);
        let hook_name = hook_name.clone();
        Box::pin(async move {
            log.lock().push(hook_name.clone());
            Err(Error::Driver(format!("{hook_name} hook exploded")))
        })
    })
}
