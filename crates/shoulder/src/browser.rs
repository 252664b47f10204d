// Browser - the explicit session object
//
// Owns the driver client handle plus the session configuration, and is the
// root every element/collection chain starts from. Created at suite setup,
// torn down at suite end, passed by reference; there is no process-global
// session state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::collection::{Collection, CollectionSource};
use crate::condition::Condition;
use crate::config::Config;
use crate::driver::{By, DriverClient};
use crate::element::{Element, ElementSource};
use crate::entity::{Entity, EntityKind};
use crate::error::{Error, Result};
use crate::hooks::HookExecutor;
use crate::wait::Wait;

/// A browser session: driver client + configuration.
#[derive(Clone)]
pub struct Browser {
    client: Arc<dyn DriverClient>,
    config: Arc<Config>,
}

impl Browser {
    pub fn new(client: Arc<dyn DriverClient>, config: Config) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn wait(&self) -> Wait<'_, Browser> {
        Wait::new(
            self,
            &self.config,
            HookExecutor::new(self.client.as_ref(), &self.config, self),
        )
    }

    // Navigation

    /// Opens a page. Relative targets are joined onto the configured base
    /// URL; a configured window size is applied first.
    pub async fn open(&self, url: &str) -> Result<&Self> {
        if let (Some(width), Some(height)) = (self.config.window_width, self.config.window_height)
        {
            self.client.set_window_size(width, height).await?;
        }
        let target = self.resolve_url(url)?;
        self.client.open(&target).await?;
        Ok(self)
    }

    fn resolve_url(&self, url: &str) -> Result<String> {
        match &self.config.base_url {
            Some(base) if !url.contains("://") => Url::parse(base)
                .and_then(|parsed| parsed.join(url))
                .map(String::from)
                .map_err(|cause| {
                    Error::InvalidArgument(format!(
                        "cannot resolve '{url}' against base '{base}': {cause}"
                    ))
                }),
            _ => Ok(url.to_string()),
        }
    }

    /// A lazy element handle rooted at this session.
    pub fn element(&self, by: By) -> Element {
        Element::new(
            ElementSource::Root(by),
            Arc::clone(&self.client),
            Arc::clone(&self.config),
        )
    }

    /// A lazy collection handle rooted at this session.
    pub fn all(&self, by: By) -> Collection {
        Collection::new(
            CollectionSource::Root(by),
            Arc::clone(&self.client),
            Arc::clone(&self.config),
        )
    }

    // Assertions

    pub async fn should(&self, condition: Condition<Browser>) -> Result<&Self> {
        self.wait().should_match(&condition, None).await?;
        Ok(self)
    }

    pub async fn should_not(&self, condition: Condition<Browser>) -> Result<&Self> {
        self.should(Condition::not(condition)).await
    }

    pub async fn should_within(
        &self,
        condition: Condition<Browser>,
        timeout: Duration,
    ) -> Result<&Self> {
        self.wait().should_match(&condition, Some(timeout)).await?;
        Ok(self)
    }

    pub async fn is(&self, condition: Condition<Browser>) -> bool {
        self.wait().is_match(&condition, None).await
    }

    pub async fn is_not(&self, condition: Condition<Browser>) -> bool {
        self.is(Condition::not(condition)).await
    }

    // Queries

    pub async fn url(&self) -> Result<String> {
        self.client.current_url().await
    }

    pub async fn title(&self) -> Result<String> {
        self.client.title().await
    }

    pub async fn page_source(&self) -> Result<String> {
        self.client.page_source().await
    }

    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.client.screenshot().await
    }

    pub async fn execute_script(&self, script: &str) -> Result<Value> {
        self.client.execute_script(script, Vec::new()).await
    }

    pub async fn execute_script_with_args(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.client.execute_script(script, args).await
    }

    // Lifecycle

    pub async fn close(&self) -> Result<()> {
        self.client.close_window().await
    }

    pub async fn quit(&self) -> Result<()> {
        self.client.quit().await
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("browser")
    }
}

impl fmt::Debug for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Browser")
    }
}

impl Entity for Browser {
    fn kind(&self) -> EntityKind {
        EntityKind::Browser
    }
}
