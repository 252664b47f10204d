// On-failure hooks - diagnostics when a wait or action ultimately fails
//
// Hooks never affect control flow: the executor runs each configured hook in
// order, and a hook that itself fails is logged and skipped, never masking
// the original error or stopping the hooks after it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use futures_util::future::BoxFuture;

use crate::config::Config;
use crate::driver::DriverClient;
use crate::entity::{Entity, EntityKind};
use crate::error::{Error, Result};

/// What a failure hook gets to look at.
///
/// The driver reference is the live session, so hooks can capture state that
/// requires it (screenshots, page source).
pub struct FailureContext<'a> {
    /// The error about to be surfaced to the caller.
    pub error: &'a Error,
    /// The entity the wait or action was bound to.
    pub entity: &'a dyn Entity,
    /// Description of the condition being waited on, when there was one.
    pub condition: Option<&'a str>,
    /// The underlying driver session.
    pub driver: &'a dyn DriverClient,
}

type HookFn = dyn for<'a> Fn(FailureContext<'a>) -> BoxFuture<'a, Result<()>> + Send + Sync;

/// A named diagnostic callback invoked when a wait or action ultimately fails.
#[derive(Clone)]
pub struct OnFailureHook {
    name: String,
    run: Arc<HookFn>,
}

impl OnFailureHook {
    /// Builds a hook from a name (used when logging the hook's own failures)
    /// and an async callback.
    pub fn new(
        name: impl Into<String>,
        run: impl for<'a> Fn(FailureContext<'a>) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for OnFailureHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnFailureHook").field("name", &self.name).finish()
    }
}

/// Runs the configured failure hooks for one failure occasion.
///
/// Constructed fresh per failure, never reused. Common hooks run first, then
/// the list specific to the entity's kind.
pub struct HookExecutor<'a> {
    driver: &'a dyn DriverClient,
    config: &'a Config,
    entity: &'a dyn Entity,
}

impl<'a> HookExecutor<'a> {
    pub fn new(driver: &'a dyn DriverClient, config: &'a Config, entity: &'a dyn Entity) -> Self {
        Self {
            driver,
            config,
            entity,
        }
    }

    /// Invokes every configured hook with the given error, isolating each
    /// hook's own failure. Control always returns to the caller, which stays
    /// responsible for surfacing `error`.
    pub async fn execute_on_failure_hooks(&self, error: &Error, condition: Option<&str>) {
        self.run_hooks(&self.config.on_failure_hooks, error, condition)
            .await;

        let kind_hooks = match self.entity.kind() {
            EntityKind::Element => &self.config.on_element_failure_hooks,
            EntityKind::Collection => &self.config.on_collection_failure_hooks,
            EntityKind::Browser => return,
        };
        self.run_hooks(kind_hooks, error, condition).await;
    }

    async fn run_hooks(&self, hooks: &[OnFailureHook], error: &Error, condition: Option<&str>) {
        for hook in hooks {
            let context = FailureContext {
                error,
                entity: self.entity,
                condition,
                driver: self.driver,
            };
            if let Err(hook_error) = (hook.run)(context).await {
                tracing::warn!(
                    hook = hook.name.as_str(),
                    error = %hook_error,
                    "on-failure hook failed; continuing with remaining hooks"
                );
            }
        }
    }
}

/// Hook that captures a viewport screenshot into `dir` as a timestamped PNG.
pub fn screenshot(dir: impl Into<PathBuf>) -> OnFailureHook {
    let dir = dir.into();
    OnFailureHook::new("screenshot", move |context: FailureContext<'_>| {
        let dir = dir.clone();
        Box::pin(async move {
            let png = context.driver.screenshot().await?;
            tokio::fs::create_dir_all(&dir).await?;
            let path = dir.join(format!("failure-{}.png", timestamp_millis()));
            tokio::fs::write(&path, png).await?;
            tracing::info!(path = %path.display(), entity = %context.entity, "saved failure screenshot");
            Ok(())
        })
    })
}

/// Hook that dumps the page source into `dir` as a timestamped HTML file.
pub fn page_source(dir: impl Into<PathBuf>) -> OnFailureHook {
    let dir = dir.into();
    OnFailureHook::new("page-source", move |context: FailureContext<'_>| {
        let dir = dir.clone();
        Box::pin(async move {
            let source = context.driver.page_source().await?;
            tokio::fs::create_dir_all(&dir).await?;
            let path = dir.join(format!("failure-{}.html", timestamp_millis()));
            tokio::fs::write(&path, source).await?;
            tracing::info!(path = %path.display(), entity = %context.entity, "saved failure page source");
            Ok(())
        })
    })
}

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
