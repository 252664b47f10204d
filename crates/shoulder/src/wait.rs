// Wait - the retrying assertion engine
//
// Binds one entity for one polling session: evaluate the condition, and on a
// mismatch sleep briefly and try again until the deadline. The deadline is
// absolute, computed once at entry, so total wall time is bounded by the
// timeout plus at most one in-flight check straddling it.

use std::time::{Duration, Instant};

use crate::condition::Condition;
use crate::config::Config;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::hooks::HookExecutor;

/// Polls a [`Condition`] against a bound entity until it matches or a timeout
/// elapses.
///
/// Created fresh per `should`/`is` invocation and discarded afterwards; no
/// state is shared across calls beyond the read-only configuration.
pub struct Wait<'a, T: Entity> {
    entity: &'a T,
    config: &'a Config,
    hooks: HookExecutor<'a>,
}

impl<'a, T: Entity> Wait<'a, T> {
    pub fn new(entity: &'a T, config: &'a Config, hooks: HookExecutor<'a>) -> Self {
        Self {
            entity,
            config,
            hooks,
        }
    }

    /// Polls until the condition matches, returning the entity for chaining.
    ///
    /// On timeout the last mismatch is rewritten into
    /// `"<entity> should <reason>. Wait timed out after <timeout>ms"`, every
    /// configured failure hook runs (each isolated), and the rewritten error
    /// is returned.
    pub async fn should_match(
        &self,
        condition: &Condition<T>,
        timeout: Option<Duration>,
    ) -> Result<&'a T> {
        let timeout = timeout.unwrap_or(self.config.timeout);
        match self.poll(condition, timeout).await {
            Ok(()) => Ok(self.entity),
            Err(last) => {
                let error = Error::WaitTimeout {
                    entity: self.entity.to_string(),
                    reason: mismatch_reason(last),
                    timeout_ms: timeout.as_millis(),
                };
                self.hooks
                    .execute_on_failure_hooks(&error, Some(condition.description()))
                    .await;
                Err(error)
            }
        }
    }

    /// Polls like [`Wait::should_match`] but converts the outcome into a
    /// boolean: no hooks run and no error is surfaced for a non-match.
    pub async fn is_match(&self, condition: &Condition<T>, timeout: Option<Duration>) -> bool {
        let timeout = timeout.unwrap_or(self.config.timeout);
        self.poll(condition, timeout).await.is_ok()
    }

    async fn poll(&self, condition: &Condition<T>, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let last = match condition.matches(self.entity).await {
                Ok(()) => return Ok(()),
                Err(error) => error,
            };
            let now = Instant::now();
            if now >= deadline {
                tracing::debug!(
                    attempts,
                    condition = condition.description(),
                    entity = %self.entity,
                    "wait deadline reached"
                );
                return Err(last);
            }
            // Clamp so the final attempt lands at the deadline, not one full
            // interval past it.
            tokio::time::sleep(self.config.poll_interval.min(deadline - now)).await;
        }
    }
}

fn mismatch_reason(error: Error) -> String {
    match error {
        Error::ConditionMismatch(reason) => reason,
        other => other.to_string(),
    }
}
