// Collection - lazy, chainable handle on a homogeneous group of elements

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::condition::Condition;
use crate::config::Config;
use crate::driver::{By, DriverClient, ElementHandle};
use crate::element::{Element, ElementSource};
use crate::entity::{Entity, EntityKind};
use crate::error::Result;
use crate::hooks::HookExecutor;
use crate::wait::Wait;

/// How a collection is located, and how it describes itself.
#[derive(Clone)]
pub(crate) enum CollectionSource {
    /// Looked up from the session root.
    Root(By),
    /// Looked up inside a parent element's subtree.
    Child {
        parent: Box<ElementSource>,
        by: By,
    },
    /// A parent collection narrowed to members matching a condition.
    Filtered {
        parent: Box<CollectionSource>,
        condition: Condition<Element>,
    },
}

impl fmt::Display for CollectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionSource::Root(by) => write!(f, "browser.all({by})"),
            CollectionSource::Child { parent, by } => write!(f, "{parent}.all({by})"),
            CollectionSource::Filtered { parent, condition } => {
                write!(f, "{parent}.filter({condition})")
            }
        }
    }
}

impl CollectionSource {
    pub(crate) fn resolve<'a>(
        &'a self,
        client: &'a Arc<dyn DriverClient>,
        config: &'a Arc<Config>,
    ) -> BoxFuture<'a, Result<Vec<Arc<dyn ElementHandle>>>> {
        Box::pin(async move {
            match self {
                CollectionSource::Root(by) => client.find_all(by).await,
                CollectionSource::Child { parent, by } => {
                    parent.resolve(client, config).await?.find_all(by).await
                }
                CollectionSource::Filtered { parent, condition } => {
                    let handles = parent.resolve(client, config).await?;
                    let mut kept = Vec::new();
                    for (index, handle) in handles.into_iter().enumerate() {
                        let probe = Element::cached(
                            Arc::clone(&handle),
                            format!("{parent}[{index}]"),
                            Arc::clone(client),
                            Arc::clone(config),
                        );
                        if condition.matches(&probe).await.is_ok() {
                            kept.push(handle);
                        }
                    }
                    Ok(kept)
                }
            }
        })
    }
}

/// A group of page elements, located lazily.
#[derive(Clone)]
pub struct Collection {
    source: CollectionSource,
    client: Arc<dyn DriverClient>,
    config: Arc<Config>,
}

impl Collection {
    pub(crate) fn new(
        source: CollectionSource,
        client: Arc<dyn DriverClient>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            source,
            client,
            config,
        }
    }

    /// Resolves the collection to live handles.
    pub(crate) async fn resolve(&self) -> Result<Vec<Arc<dyn ElementHandle>>> {
        self.source.resolve(&self.client, &self.config).await
    }

    fn wait(&self) -> Wait<'_, Collection> {
        Wait::new(
            self,
            &self.config,
            HookExecutor::new(self.client.as_ref(), &self.config, self),
        )
    }

    // Assertions

    pub async fn should(&self, condition: Condition<Collection>) -> Result<&Self> {
        self.wait().should_match(&condition, None).await?;
        Ok(self)
    }

    pub async fn should_not(&self, condition: Condition<Collection>) -> Result<&Self> {
        self.should(Condition::not(condition)).await
    }

    pub async fn should_within(
        &self,
        condition: Condition<Collection>,
        timeout: Duration,
    ) -> Result<&Self> {
        self.wait().should_match(&condition, Some(timeout)).await?;
        Ok(self)
    }

    pub async fn is(&self, condition: Condition<Collection>) -> bool {
        self.wait().is_match(&condition, None).await
    }

    pub async fn is_not(&self, condition: Condition<Collection>) -> bool {
        self.is(Condition::not(condition)).await
    }

    // Navigation

    /// The n-th member, as a lazy element.
    pub fn get(&self, index: usize) -> Element {
        Element::new(
            ElementSource::Indexed {
                collection: self.source.clone(),
                index,
            },
            Arc::clone(&self.client),
            Arc::clone(&self.config),
        )
    }

    pub fn first(&self) -> Element {
        self.get(0)
    }

    /// Narrows to the members matching the condition at resolution time.
    pub fn filter(&self, condition: Condition<Element>) -> Collection {
        Collection::new(
            CollectionSource::Filtered {
                parent: Box::new(self.source.clone()),
                condition,
            },
            Arc::clone(&self.client),
            Arc::clone(&self.config),
        )
    }

    /// The first member matching the condition.
    pub fn find_by(&self, condition: Condition<Element>) -> Element {
        self.filter(condition).get(0)
    }

    // Queries

    pub async fn size(&self) -> Result<usize> {
        Ok(self.resolve().await?.len())
    }

    pub async fn texts(&self) -> Result<Vec<String>> {
        let handles = self.resolve().await?;
        let mut texts = Vec::with_capacity(handles.len());
        for handle in &handles {
            texts.push(handle.text().await?);
        }
        Ok(texts)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection({})", self.source)
    }
}

impl Entity for Collection {
    fn kind(&self) -> EntityKind {
        EntityKind::Collection
    }
}
