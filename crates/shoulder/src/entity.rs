// Entity - the common surface of assertion/action targets
//
// Browser, Element and Collection all implement this trait. The `Display`
// impl supplies the addressing text used verbatim in error messages
// ("browser", "browser.find(By(css selector, #test))", ...); the kind
// discriminant is what hook dispatch branches on, instead of probing the
// target's shape at runtime.

use std::fmt;

/// Discriminant for the three entity flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Browser,
    Element,
    Collection,
}

/// A target a condition can be matched against or an action performed on.
pub trait Entity: fmt::Display + Send + Sync {
    /// Which flavor of entity this is.
    fn kind(&self) -> EntityKind;
}
