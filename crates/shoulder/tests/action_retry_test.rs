// Integration tests for the visibility-gated action retry
//
// Tests cover:
// - happy path: one attempt, no visibility wait
// - transient failure: exactly one retry behind exactly one visibility wait
// - double failure: contextual CannotPerformAction + one hook pass
// - visibility wait timing out mid-retry pre-empts the action error

mod common;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use common::{FakeDriver, FakeElement};
use shoulder::{Browser, By, Config, Error, Key};

fn quick_config() -> Config {
    Config::new()
        .with_timeout(Duration::from_millis(40))
        .with_poll_interval(Duration::from_millis(5))
}

#[tokio::test]
async fn successful_action_runs_once_without_visibility_wait() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let button = FakeElement::new();
    driver.add_element(&By::css("#btn"), Arc::clone(&button));
    let browser = Browser::new(driver, quick_config());

    browser
        .element(By::css("#btn"))
        .click()
        .await
        .expect("click succeeds");

    assert_eq!(*button.click_calls.lock(), 1);
    assert_eq!(
        *button.displayed_checks.lock(),
        0,
        "no visibility wait on the happy path"
    );
}

#[tokio::test]
async fn transient_failure_is_retried_exactly_once_behind_a_visibility_wait() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let button = FakeElement::new().failing_clicks(1, "not interactable yet");
    driver.add_element(&By::css("#btn"), Arc::clone(&button));
    let browser = Browser::new(driver, quick_config());

    browser
        .element(By::css("#btn"))
        .click()
        .await
        .expect("second attempt succeeds");

    assert_eq!(*button.click_calls.lock(), 2, "initial attempt plus one retry");
    assert_eq!(
        *button.displayed_checks.lock(),
        1,
        "exactly one visibility check gates the retry"
    );
}

#[tokio::test]
async fn double_failure_surfaces_a_contextual_action_error() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let button = FakeElement::new().failing_clicks(2, "boom");
    driver.add_element(&By::css("#btn"), Arc::clone(&button));

    let log = Arc::new(Mutex::new(Vec::new()));
    let config = quick_config()
        .with_failure_hook(common::recording_hook("common", Arc::clone(&log)))
        .with_element_failure_hook(common::recording_hook("element", Arc::clone(&log)));
    let browser = Browser::new(driver, config);

    let error = browser
        .element(By::css("#btn"))
        .click()
        .await
        .expect_err("both attempts fail");

    assert!(matches!(error, Error::CannotPerformAction(_)));
    assert_eq!(
        error.to_string(),
        "For element browser.find(By(css selector, #btn)): cannot perform click. \
         Reason: Driver error: boom"
    );
    assert_eq!(*button.click_calls.lock(), 2, "no retries beyond the second attempt");
    assert_eq!(
        *log.lock(),
        vec!["common".to_string(), "element".to_string()],
        "each configured hook runs exactly once, common list first"
    );
}

#[tokio::test]
async fn visibility_wait_timeout_preempts_the_action_error() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let button = FakeElement::new()
        .with_displayed(false)
        .failing_clicks(5, "boom");
    driver.add_element(&By::css("#btn"), Arc::clone(&button));
    let browser = Browser::new(driver, quick_config());

    let error = browser
        .element(By::css("#btn"))
        .click()
        .await
        .expect_err("hidden element never becomes visible");

    // The error is the visibility wait's own timeout, not the action wrapper's.
    assert!(matches!(error, Error::WaitTimeout { .. }));
    assert_eq!(
        error.to_string(),
        "browser.find(By(css selector, #btn)) should be visible. Wait timed out after 40ms"
    );
    assert_eq!(
        *button.click_calls.lock(),
        1,
        "the retry never runs when the visibility wait fails"
    );
}

#[tokio::test]
async fn set_value_clears_then_types() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let input = FakeElement::new();
    driver.add_element(&By::css("#name"), Arc::clone(&input));
    let browser = Browser::new(driver, quick_config());

    browser
        .element(By::css("#name"))
        .set_value("John Doe")
        .await
        .expect("set value");

    assert_eq!(*input.clear_calls.lock(), 1);
    assert_eq!(*input.keys_sent.lock(), vec!["John Doe".to_string()]);
}

#[tokio::test]
async fn set_value_by_js_runs_the_dom_setter() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let input = FakeElement::new();
    driver.add_element(&By::css("#name"), Arc::clone(&input));
    let browser = Browser::new(driver, quick_config().with_set_value_by_js(true));

    browser
        .element(By::css("#name"))
        .set_value("over the wire")
        .await
        .expect("set value by js");

    assert_eq!(*input.clear_calls.lock(), 1);
    assert!(input.keys_sent.lock().is_empty(), "no key events in JS mode");
    let scripts = input.scripts_run.lock();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].contains("maxlength"));
}

#[tokio::test]
async fn click_by_js_configuration_reroutes_clicks() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let button = FakeElement::new();
    driver.add_element(&By::css("#btn"), Arc::clone(&button));
    let browser = Browser::new(driver, quick_config().with_click_by_js(true));

    browser.element(By::css("#btn")).click().await.expect("js click");

    assert_eq!(*button.click_calls.lock(), 0, "native click is bypassed");
    let scripts = button.scripts_run.lock();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].contains("MouseEvent"));
}

#[tokio::test]
async fn key_presses_send_webdriver_code_points() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let input = FakeElement::new();
    driver.add_element(&By::css("#name"), Arc::clone(&input));
    let browser = Browser::new(driver, quick_config());
    let element = browser.element(By::css("#name"));

    element.press_enter().await.expect("enter");
    element.press_tab().await.expect("tab");
    element.press_key(Key::Escape).await.expect("escape");

    assert_eq!(
        *input.keys_sent.lock(),
        vec![
            "\u{e007}".to_string(),
            "\u{e004}".to_string(),
            "\u{e00c}".to_string(),
        ]
    );
}

#[tokio::test]
async fn scroll_into_view_runs_its_script() {
    common::init_tracing();
    let driver = FakeDriver::new();
    let row = FakeElement::new();
    driver.add_element(&By::css("#row"), Arc::clone(&row));
    let browser = Browser::new(driver, quick_config());

    browser
        .element(By::css("#row"))
        .scroll_into_view()
        .await
        .expect("scroll");

    assert_eq!(
        *row.scripts_run.lock(),
        vec!["arguments[0].scrollIntoView(true);".to_string()]
    );
}
