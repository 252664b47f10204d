//! shoulder: fluent, self-retrying browser-automation testing
//!
//! Test suites describe UI expectations declaratively instead of writing
//! polling loops: `element.should(have::exact_text("Done"))` keeps evaluating
//! the condition until it holds or the ambient timeout elapses, and failure
//! messages carry the full addressing context (entity, expectation, actual
//! state, elapsed timeout).
//!
//! # Examples
//!
//! ## Assertions
//!
//! ```ignore
//! use std::sync::Arc;
//! use shoulder::{be, have, Browser, By, Config};
//!
//! #[tokio::main]
//! async fn main() -> shoulder::Result<()> {
//!     // `client` is any DriverClient implementation (a WebDriver or CDP
//!     // adapter); shoulder itself does not speak a wire protocol.
//!     let browser = Browser::new(client, Config::new());
//!     browser.open("https://todo.example.org").await?;
//!
//!     browser.element(By::css("#new-todo")).set_value("buy milk").await?;
//!     browser.element(By::css("#new-todo")).press_enter().await?;
//!
//!     browser.all(By::css("#todo-list li")).should(have::size(1)).await?;
//!     browser
//!         .element(By::css("#todo-list li"))
//!         .should(be::visible())
//!         .await?
//!         .should(have::text("buy milk"))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Probes and composition
//!
//! ```ignore
//! use shoulder::{be, have, By, Condition};
//!
//! // Probes never throw for a non-match.
//! if browser.element(By::css(".banner")).is(be::visible()).await {
//!     browser.element(By::css(".banner .close")).click().await?;
//! }
//!
//! // Conditions compose, and the composed description shows up in errors.
//! let ready = be::visible().and(be::enabled());
//! browser.element(By::css("#submit")).should(ready).await?;
//! ```
//!
//! ## Failure diagnostics
//!
//! ```ignore
//! use shoulder::{hooks, Config};
//!
//! let config = Config::new()
//!     .with_failure_hook(hooks::screenshot("./reports"))
//!     .with_failure_hook(hooks::page_source("./reports"));
//! // Every failed wait or action now captures a screenshot and a page dump
//! // before the error surfaces; a hook failure is logged, never raised.
//! ```

pub mod browser;
pub mod collection;
pub mod command;
pub mod condition;
pub mod conditions;
pub mod config;
pub mod driver;
pub mod element;
pub mod entity;
pub mod error;
pub mod hooks;
pub mod wait;

// Re-export error types
pub use error::{Error, Result};

// Re-export the session and entity handles
pub use browser::Browser;
pub use collection::Collection;
pub use element::Element;
pub use entity::{Entity, EntityKind};

// Re-export the condition algebra and catalog helpers
pub use condition::Condition;
pub use conditions::{be, have};

// Re-export the action pipeline
pub use command::{
    Click, ClickByJs, Command, Key, PerformActionOnVisible, PressKey, ScrollIntoView, SendKeys,
    SetValue, SetValueByJs,
};

// Re-export configuration and hooks
pub use config::{Config, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
pub use hooks::{FailureContext, HookExecutor, OnFailureHook};

// Re-export the driver capability seam
pub use driver::{By, DriverClient, ElementHandle};

// Re-export the wait engine
pub use wait::Wait;
