// Condition - described, composable predicate over an entity
//
// A condition either matches (Ok) or fails with a condition-mismatch error;
// there is no third outcome. Predicates may perform live lookups, and any
// error they produce is coerced into a mismatch so the waiter can always
// treat a failure as "not yet matching". Composition (`not`, `and`, `or`)
// produces new first-class conditions with derived descriptions.

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::error::{Error, Result};

type Predicate<T> = dyn for<'a> Fn(&'a T) -> BoxFuture<'a, Result<()>> + Send + Sync;

/// A named predicate evaluated repeatedly against an entity until it holds or
/// a deadline passes.
///
/// The description is fixed at construction and is what failure messages are
/// built from: `el.should(have::exact_text("Done"))` reports
/// `... should have exact text 'Done' ...` on timeout.
pub struct Condition<T: ?Sized> {
    description: String,
    test: Arc<Predicate<T>>,
}

impl<T: ?Sized> Clone for Condition<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T: ?Sized> fmt::Display for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<T: ?Sized> fmt::Debug for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("description", &self.description)
            .finish()
    }
}

impl<T: ?Sized> Condition<T> {
    /// Builds a leaf condition from a description and an async predicate.
    pub fn new(
        description: impl Into<String>,
        test: impl for<'a> Fn(&'a T) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            test: Arc::new(test),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Evaluates the condition against the entity.
    ///
    /// Succeeds iff the condition holds right now. Every failure surfaces as
    /// [`Error::ConditionMismatch`]: predicate errors of any other type
    /// (element lookup failures included) are rewritten here, so raw driver
    /// errors never escape to the waiter.
    pub async fn matches(&self, entity: &T) -> Result<()> {
        (self.test)(entity).await.map_err(|error| match error {
            Error::ConditionMismatch(_) => error,
            other => Error::ConditionMismatch(other.to_string()),
        })
    }
}

impl<T: Send + Sync + 'static> Condition<T> {
    /// Inverts a condition: matches iff the wrapped condition does not.
    ///
    /// A mismatch (or any failure) of the wrapped condition counts as a match
    /// of the negation; a wrapped success becomes a mismatch described as
    /// `not <condition>`. Double negation restores the original pass/fail
    /// behavior.
    pub fn not(condition: Condition<T>) -> Condition<T> {
        let description = format!("not {}", condition.description);
        let negated = description.clone();
        Condition::new(description, move |entity: &T| {
            let condition = condition.clone();
            let negated = negated.clone();
            Box::pin(async move {
                match condition.matches(entity).await {
                    Ok(()) => Err(Error::ConditionMismatch(negated)),
                    Err(_) => Ok(()),
                }
            })
        })
    }

    /// Conjunction: matches iff both conditions match, evaluated in order and
    /// short-circuiting on the first failure, whose mismatch is the one
    /// surfaced. The description joins the operands with " AND ".
    pub fn and(self, other: Condition<T>) -> Condition<T> {
        let description = format!("{} AND {}", self.description, other.description);
        let operands = [self, other];
        Condition::new(description, move |entity: &T| {
            let operands = operands.clone();
            Box::pin(async move {
                for condition in &operands {
                    condition.matches(entity).await?;
                }
                Ok(())
            })
        })
    }

    /// Disjunction: matches iff at least one operand matches, trying each in
    /// order and succeeding on the first match. Only when every operand fails
    /// does the composed condition mismatch, described by the " OR " join.
    pub fn or(self, other: Condition<T>) -> Condition<T> {
        let description = format!("{} OR {}", self.description, other.description);
        let joined = description.clone();
        let operands = [self, other];
        Condition::new(description, move |entity: &T| {
            let operands = operands.clone();
            let joined = joined.clone();
            Box::pin(async move {
                for condition in &operands {
                    if condition.matches(entity).await.is_ok() {
                        return Ok(());
                    }
                }
                Err(Error::ConditionMismatch(joined))
            })
        })
    }
}
