// Element - lazy, chainable handle on a single DOM node
//
// An element stores how to find its node, not the node itself; every
// interaction re-resolves through the driver, which is what makes waits and
// retries meaningful. The stored source also yields the addressing text used
// in error messages ("browser.find(By(css selector, #test))" and friends).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::collection::{Collection, CollectionSource};
use crate::command::{
    Click, ClickByJs, Command, Key, PerformActionOnVisible, PressKey, ScrollIntoView, SendKeys,
    SetValue, SetValueByJs,
};
use crate::condition::Condition;
use crate::conditions::be;
use crate::config::Config;
use crate::driver::{By, DriverClient, ElementHandle};
use crate::entity::{Entity, EntityKind};
use crate::error::{Error, Result};
use crate::hooks::HookExecutor;
use crate::wait::Wait;

/// How an element is located, and how it describes itself.
#[derive(Clone)]
pub(crate) enum ElementSource {
    /// Looked up from the session root.
    Root(By),
    /// Looked up inside a parent element's subtree.
    Child {
        parent: Box<ElementSource>,
        by: By,
    },
    /// The n-th member of a collection.
    Indexed {
        collection: CollectionSource,
        index: usize,
    },
    /// Already resolved (collection filtering probes).
    Cached {
        handle: Arc<dyn ElementHandle>,
        description: String,
    },
}

impl fmt::Display for ElementSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementSource::Root(by) => write!(f, "browser.find({by})"),
            ElementSource::Child { parent, by } => write!(f, "{parent}.find({by})"),
            ElementSource::Indexed { collection, index } => write!(f, "{collection}[{index}]"),
            ElementSource::Cached { description, .. } => f.write_str(description),
        }
    }
}

impl ElementSource {
    pub(crate) fn resolve<'a>(
        &'a self,
        client: &'a Arc<dyn DriverClient>,
        config: &'a Arc<Config>,
    ) -> BoxFuture<'a, Result<Arc<dyn ElementHandle>>> {
        Box::pin(async move {
            match self {
                ElementSource::Root(by) => client.find(by).await,
                ElementSource::Child { parent, by } => {
                    parent.resolve(client, config).await?.find(by).await
                }
                ElementSource::Indexed { collection, index } => {
                    let handles = collection.resolve(client, config).await?;
                    let size = handles.len();
                    handles.into_iter().nth(*index).ok_or_else(|| {
                        Error::ElementNotFound(format!(
                            "{self}: index {index} is out of bounds (size {size})"
                        ))
                    })
                }
                ElementSource::Cached { handle, .. } => Ok(Arc::clone(handle)),
            }
        })
    }
}

/// A single page element, located lazily.
///
/// Assertions poll through the retrying waiter; actions go through the
/// visibility-gated retry wrapper. Cheap to clone and to construct per call.
#[derive(Clone)]
pub struct Element {
    source: ElementSource,
    client: Arc<dyn DriverClient>,
    config: Arc<Config>,
}

impl Element {
    pub(crate) fn new(
        source: ElementSource,
        client: Arc<dyn DriverClient>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            source,
            client,
            config,
        }
    }

    pub(crate) fn cached(
        handle: Arc<dyn ElementHandle>,
        description: String,
        client: Arc<dyn DriverClient>,
        config: Arc<Config>,
    ) -> Self {
        Self::new(ElementSource::Cached {
            handle,
            description,
        }, client, config)
    }

    /// Resolves the element to a live handle.
    pub(crate) async fn resolve(&self) -> Result<Arc<dyn ElementHandle>> {
        self.source.resolve(&self.client, &self.config).await
    }

    fn wait(&self) -> Wait<'_, Element> {
        Wait::new(
            self,
            &self.config,
            HookExecutor::new(self.client.as_ref(), &self.config, self),
        )
    }

    async fn run(&self, command: impl Command) -> Result<()> {
        let hooks = HookExecutor::new(self.client.as_ref(), &self.config, self);
        PerformActionOnVisible::new(hooks, command).perform(self).await
    }

    // Assertions

    /// Waits until the condition matches, with the ambient timeout.
    pub async fn should(&self, condition: Condition<Element>) -> Result<&Self> {
        self.wait().should_match(&condition, None).await?;
        Ok(self)
    }

    /// Waits until the negated condition matches.
    pub async fn should_not(&self, condition: Condition<Element>) -> Result<&Self> {
        self.should(Condition::not(condition)).await
    }

    /// Like [`Element::should`], with an explicit timeout.
    pub async fn should_within(
        &self,
        condition: Condition<Element>,
        timeout: Duration,
    ) -> Result<&Self> {
        self.wait().should_match(&condition, Some(timeout)).await?;
        Ok(self)
    }

    /// Probes the condition without throwing: polls with the ambient timeout
    /// and reports the outcome as a boolean. Runs no failure hooks.
    pub async fn is(&self, condition: Condition<Element>) -> bool {
        self.wait().is_match(&condition, None).await
    }

    pub async fn is_not(&self, condition: Condition<Element>) -> bool {
        self.is(Condition::not(condition)).await
    }

    // Actions, all routed through the visibility-gated retry wrapper

    /// Clicks the element. Honors `Config::click_by_js`.
    pub async fn click(&self) -> Result<&Self> {
        if self.config.click_by_js {
            self.run(ClickByJs).await?;
        } else {
            self.run(Click).await?;
        }
        Ok(self)
    }

    pub async fn click_by_js(&self) -> Result<&Self> {
        self.run(ClickByJs).await?;
        Ok(self)
    }

    /// Replaces the element's value. Honors `Config::set_value_by_js`.
    pub async fn set_value(&self, value: impl Into<String> + Send) -> Result<&Self> {
        let value = value.into();
        if self.config.set_value_by_js {
            self.run(SetValueByJs::new(value)).await?;
        } else {
            self.run(SetValue::new(value)).await?;
        }
        Ok(self)
    }

    pub async fn set_value_by_js(&self, value: impl Into<String> + Send) -> Result<&Self> {
        self.run(SetValueByJs::new(value)).await?;
        Ok(self)
    }

    pub async fn send_keys(&self, keys: impl Into<String> + Send) -> Result<&Self> {
        self.run(SendKeys::new(keys)).await?;
        Ok(self)
    }

    pub async fn press_key(&self, key: Key) -> Result<&Self> {
        self.run(PressKey::new(key)).await?;
        Ok(self)
    }

    pub async fn press_enter(&self) -> Result<&Self> {
        self.press_key(Key::Enter).await
    }

    pub async fn press_tab(&self) -> Result<&Self> {
        self.press_key(Key::Tab).await
    }

    pub async fn press_escape(&self) -> Result<&Self> {
        self.press_key(Key::Escape).await
    }

    pub async fn scroll_into_view(&self) -> Result<&Self> {
        self.run(ScrollIntoView).await?;
        Ok(self)
    }

    // Queries

    /// The element's visible text. Waits for visibility first, so a node
    /// still rendering reports its settled text rather than "".
    pub async fn text(&self) -> Result<String> {
        self.should(be::visible()).await?;
        self.resolve().await?.text().await
    }

    /// The element's `value` attribute.
    pub async fn value(&self) -> Result<Option<String>> {
        self.attribute("value").await
    }

    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.resolve().await?.attribute(name).await
    }

    pub async fn tag_name(&self) -> Result<String> {
        self.resolve().await?.tag_name().await
    }

    // Probes: lookup failures report as plain `false`, never as errors.

    pub async fn is_visible(&self) -> bool {
        match self.resolve().await {
            Ok(handle) => handle.is_displayed().await.unwrap_or(false),
            Err(_) => false,
        }
    }

    pub async fn is_present(&self) -> bool {
        self.resolve().await.is_ok()
    }

    pub async fn is_absent(&self) -> bool {
        !self.is_present().await
    }

    // Navigation

    /// A lazy child element inside this element's subtree.
    pub fn find(&self, by: By) -> Element {
        Element::new(
            ElementSource::Child {
                parent: Box::new(self.source.clone()),
                by,
            },
            Arc::clone(&self.client),
            Arc::clone(&self.config),
        )
    }

    /// A lazy collection of descendants.
    pub fn all(&self, by: By) -> Collection {
        Collection::new(
            CollectionSource::Child {
                parent: Box::new(self.source.clone()),
                by,
            },
            Arc::clone(&self.client),
            Arc::clone(&self.config),
        )
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({})", self.source)
    }
}

impl Entity for Element {
    fn kind(&self) -> EntityKind {
        EntityKind::Element
    }
}
