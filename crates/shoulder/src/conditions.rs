// Condition catalog
//
// Leaf predicates for the three entity flavors, grouped per target type,
// plus the `be`/`have` helper modules that make call sites read as prose:
// `el.should(be::visible())`, `el.should(have::exact_text("Done"))`.
//
// Every predicate reports failure as a condition mismatch, including element
// lookup failures: an element that cannot be resolved simply "does not have
// text 'x'" yet, which is what keeps the waiter polling instead of blowing
// up on a race.

/// Conditions over a single [`Element`](crate::Element).
pub mod element {
    use regex::Regex;

    use crate::condition::Condition;
    use crate::element::Element;
    use crate::error::Error;

    pub fn visible() -> Condition<Element> {
        Condition::new("be visible", |element: &Element| {
            Box::pin(async move {
                let displayed = match element.resolve().await {
                    Ok(handle) => handle.is_displayed().await.unwrap_or(false),
                    Err(_) => false,
                };
                if displayed {
                    Ok(())
                } else {
                    Err(Error::ConditionMismatch("be visible".into()))
                }
            })
        })
    }

    /// Matches when the element is absent or present but not displayed.
    pub fn hidden() -> Condition<Element> {
        Condition::new("be hidden", |element: &Element| {
            Box::pin(async move {
                let displayed = match element.resolve().await {
                    Ok(handle) => handle.is_displayed().await.unwrap_or(false),
                    Err(_) => false,
                };
                if displayed {
                    Err(Error::ConditionMismatch("be hidden".into()))
                } else {
                    Ok(())
                }
            })
        })
    }

    pub fn present() -> Condition<Element> {
        Condition::new("be present", |element: &Element| {
            Box::pin(async move {
                element
                    .resolve()
                    .await
                    .map(|_| ())
                    .map_err(|_| Error::ConditionMismatch("be present".into()))
            })
        })
    }

    pub fn absent() -> Condition<Element> {
        Condition::new("be absent", |element: &Element| {
            Box::pin(async move {
                match element.resolve().await {
                    Ok(_) => Err(Error::ConditionMismatch("be absent".into())),
                    Err(_) => Ok(()),
                }
            })
        })
    }

    pub fn enabled() -> Condition<Element> {
        Condition::new("be enabled", |element: &Element| {
            Box::pin(async move {
                let enabled = match element.resolve().await {
                    Ok(handle) => handle.is_enabled().await.unwrap_or(false),
                    Err(_) => false,
                };
                if enabled {
                    Ok(())
                } else {
                    Err(Error::ConditionMismatch("be enabled".into()))
                }
            })
        })
    }

    pub fn disabled() -> Condition<Element> {
        Condition::new("be disabled", |element: &Element| {
            Box::pin(async move {
                let enabled = match element.resolve().await {
                    Ok(handle) => handle.is_enabled().await.unwrap_or(true),
                    Err(_) => true,
                };
                if enabled {
                    Err(Error::ConditionMismatch("be disabled".into()))
                } else {
                    Ok(())
                }
            })
        })
    }

    pub fn selected() -> Condition<Element> {
        Condition::new("be selected", |element: &Element| {
            Box::pin(async move {
                let selected = match element.resolve().await {
                    Ok(handle) => handle.is_selected().await.unwrap_or(false),
                    Err(_) => false,
                };
                if selected {
                    Ok(())
                } else {
                    Err(Error::ConditionMismatch("be selected".into()))
                }
            })
        })
    }

    async fn read_text(element: &Element) -> Option<String> {
        match element.resolve().await {
            Ok(handle) => handle.text().await.ok(),
            Err(_) => None,
        }
    }

    /// Substring match on the element's visible text.
    pub fn text(expected: impl Into<String>) -> Condition<Element> {
        let expected = expected.into();
        Condition::new(format!("have text '{expected}'"), move |element: &Element| {
            let expected = expected.clone();
            Box::pin(async move {
                match read_text(element).await {
                    Some(actual) if actual.contains(&expected) => Ok(()),
                    Some(actual) => Err(Error::ConditionMismatch(format!(
                        "have text '{expected}', but was '{actual}'"
                    ))),
                    None => Err(Error::ConditionMismatch(format!("have text '{expected}'"))),
                }
            })
        })
    }

    /// Exact match on the element's visible text.
    pub fn exact_text(expected: impl Into<String>) -> Condition<Element> {
        let expected = expected.into();
        Condition::new(
            format!("have exact text '{expected}'"),
            move |element: &Element| {
                let expected = expected.clone();
                Box::pin(async move {
                    match read_text(element).await {
                        Some(actual) if actual == expected => Ok(()),
                        Some(actual) => Err(Error::ConditionMismatch(format!(
                            "have exact text '{expected}', but was '{actual}'"
                        ))),
                        None => Err(Error::ConditionMismatch(format!(
                            "have exact text '{expected}'"
                        ))),
                    }
                })
            },
        )
    }

    /// Regex match anywhere in the element's visible text.
    pub fn text_matching(pattern: impl AsRef<str>) -> Condition<Element> {
        let pattern = pattern.as_ref().to_string();
        let regex = Regex::new(&pattern);
        Condition::new(
            format!("have text matching '{pattern}'"),
            move |element: &Element| {
                let regex = regex.clone();
                let pattern = pattern.clone();
                Box::pin(async move {
                    let regex = regex.map_err(|cause| {
                        Error::InvalidArgument(format!("bad pattern '{pattern}': {cause}"))
                    })?;
                    match read_text(element).await {
                        Some(actual) if regex.is_match(&actual) => Ok(()),
                        Some(actual) => Err(Error::ConditionMismatch(format!(
                            "have text matching '{pattern}', but was '{actual}'"
                        ))),
                        None => Err(Error::ConditionMismatch(format!(
                            "have text matching '{pattern}'"
                        ))),
                    }
                })
            },
        )
    }

    async fn read_attribute(element: &Element, name: &str) -> Option<String> {
        match element.resolve().await {
            Ok(handle) => handle.attribute(name).await.ok().flatten(),
            Err(_) => None,
        }
    }

    /// The attribute exists, with any value.
    pub fn attribute(name: impl Into<String>) -> Condition<Element> {
        let name = name.into();
        Condition::new(
            format!("have attribute '{name}'"),
            move |element: &Element| {
                let name = name.clone();
                Box::pin(async move {
                    match read_attribute(element, &name).await {
                        Some(_) => Ok(()),
                        None => Err(Error::ConditionMismatch(format!("have attribute '{name}'"))),
                    }
                })
            },
        )
    }

    /// The attribute exists and its value contains `value`.
    pub fn attribute_with_value(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Condition<Element> {
        let name = name.into();
        let value = value.into();
        Condition::new(
            format!("have attribute '{name}' with value '{value}'"),
            move |element: &Element| {
                let name = name.clone();
                let value = value.clone();
                Box::pin(async move {
                    match read_attribute(element, &name).await {
                        Some(actual) if actual.contains(&value) => Ok(()),
                        Some(actual) => Err(Error::ConditionMismatch(format!(
                            "have attribute '{name}' with value '{value}', but was '{actual}'"
                        ))),
                        None => Err(Error::ConditionMismatch(format!(
                            "have attribute '{name}' with value '{value}'"
                        ))),
                    }
                })
            },
        )
    }

    /// The attribute exists and its value equals `value`.
    pub fn exact_attribute(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Condition<Element> {
        let name = name.into();
        let value = value.into();
        Condition::new(
            format!("have attribute '{name}' with exact value '{value}'"),
            move |element: &Element| {
                let name = name.clone();
                let value = value.clone();
                Box::pin(async move {
                    match read_attribute(element, &name).await {
                        Some(actual) if actual == value => Ok(()),
                        Some(actual) => Err(Error::ConditionMismatch(format!(
                            "have attribute '{name}' with exact value '{value}', but was '{actual}'"
                        ))),
                        None => Err(Error::ConditionMismatch(format!(
                            "have attribute '{name}' with exact value '{value}'"
                        ))),
                    }
                })
            },
        )
    }

    /// The `class` attribute contains the given class name as a whole token.
    pub fn css_class(name: impl Into<String>) -> Condition<Element> {
        let name = name.into();
        Condition::new(
            format!("have css class '{name}'"),
            move |element: &Element| {
                let name = name.clone();
                Box::pin(async move {
                    match read_attribute(element, "class").await {
                        Some(classes) if classes.split_whitespace().any(|c| c == name) => Ok(()),
                        Some(classes) => Err(Error::ConditionMismatch(format!(
                            "have css class '{name}', but was '{classes}'"
                        ))),
                        None => Err(Error::ConditionMismatch(format!("have css class '{name}'"))),
                    }
                })
            },
        )
    }

    /// The `value` attribute contains the given text.
    pub fn value(expected: impl Into<String>) -> Condition<Element> {
        attribute_with_value("value", expected)
    }
}

/// Conditions over a [`Collection`](crate::Collection).
pub mod collection {
    use crate::collection::Collection;
    use crate::condition::Condition;
    use crate::error::Error;

    pub fn size(expected: usize) -> Condition<Collection> {
        Condition::new(format!("have size {expected}"), move |collection: &Collection| {
            Box::pin(async move {
                let actual = collection.resolve().await?.len();
                if actual == expected {
                    Ok(())
                } else {
                    Err(Error::ConditionMismatch(format!(
                        "have size {expected}, but was {actual}"
                    )))
                }
            })
        })
    }

    pub fn size_greater_than(limit: usize) -> Condition<Collection> {
        Condition::new(
            format!("have size greater than {limit}"),
            move |collection: &Collection| {
                Box::pin(async move {
                    let actual = collection.resolve().await?.len();
                    if actual > limit {
                        Ok(())
                    } else {
                        Err(Error::ConditionMismatch(format!(
                            "have size greater than {limit}, but was {actual}"
                        )))
                    }
                })
            },
        )
    }

    async fn read_texts(collection: &Collection) -> crate::error::Result<Vec<String>> {
        let handles = collection.resolve().await?;
        let mut texts = Vec::with_capacity(handles.len());
        for handle in &handles {
            texts.push(handle.text().await?);
        }
        Ok(texts)
    }

    /// Pairwise substring match over the members' texts; sizes must agree.
    pub fn texts<I, S>(expected: I) -> Condition<Collection>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected: Vec<String> = expected.into_iter().map(Into::into).collect();
        Condition::new(
            format!("have texts {expected:?}"),
            move |collection: &Collection| {
                let expected = expected.clone();
                Box::pin(async move {
                    let actual = read_texts(collection).await?;
                    let matched = actual.len() == expected.len()
                        && actual
                            .iter()
                            .zip(&expected)
                            .all(|(actual, expected)| actual.contains(expected.as_str()));
                    if matched {
                        Ok(())
                    } else {
                        Err(Error::ConditionMismatch(format!(
                            "have texts {expected:?}, but was {actual:?}"
                        )))
                    }
                })
            },
        )
    }

    /// Pairwise exact match over the members' texts; sizes must agree.
    pub fn exact_texts<I, S>(expected: I) -> Condition<Collection>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected: Vec<String> = expected.into_iter().map(Into::into).collect();
        Condition::new(
            format!("have exact texts {expected:?}"),
            move |collection: &Collection| {
                let expected = expected.clone();
                Box::pin(async move {
                    let actual = read_texts(collection).await?;
                    if actual == expected {
                        Ok(())
                    } else {
                        Err(Error::ConditionMismatch(format!(
                            "have exact texts {expected:?}, but was {actual:?}"
                        )))
                    }
                })
            },
        )
    }
}

/// Conditions over the [`Browser`](crate::Browser) session.
pub mod browser {
    use crate::browser::Browser;
    use crate::condition::Condition;
    use crate::error::Error;

    pub fn url(expected: impl Into<String>) -> Condition<Browser> {
        let expected = expected.into();
        Condition::new(format!("have url '{expected}'"), move |browser: &Browser| {
            let expected = expected.clone();
            Box::pin(async move {
                let actual = browser.url().await?;
                if actual == expected {
                    Ok(())
                } else {
                    Err(Error::ConditionMismatch(format!(
                        "have url '{expected}', but was '{actual}'"
                    )))
                }
            })
        })
    }

    pub fn url_containing(part: impl Into<String>) -> Condition<Browser> {
        let part = part.into();
        Condition::new(
            format!("have url containing '{part}'"),
            move |browser: &Browser| {
                let part = part.clone();
                Box::pin(async move {
                    let actual = browser.url().await?;
                    if actual.contains(&part) {
                        Ok(())
                    } else {
                        Err(Error::ConditionMismatch(format!(
                            "have url containing '{part}', but was '{actual}'"
                        )))
                    }
                })
            },
        )
    }

    pub fn title(expected: impl Into<String>) -> Condition<Browser> {
        let expected = expected.into();
        Condition::new(
            format!("have title '{expected}'"),
            move |browser: &Browser| {
                let expected = expected.clone();
                Box::pin(async move {
                    let actual = browser.title().await?;
                    if actual == expected {
                        Ok(())
                    } else {
                        Err(Error::ConditionMismatch(format!(
                            "have title '{expected}', but was '{actual}'"
                        )))
                    }
                })
            },
        )
    }

    pub fn title_containing(part: impl Into<String>) -> Condition<Browser> {
        let part = part.into();
        Condition::new(
            format!("have title containing '{part}'"),
            move |browser: &Browser| {
                let part = part.clone();
                Box::pin(async move {
                    let actual = browser.title().await?;
                    if actual.contains(&part) {
                        Ok(())
                    } else {
                        Err(Error::ConditionMismatch(format!(
                            "have title containing '{part}', but was '{actual}'"
                        )))
                    }
                })
            },
        )
    }
}

/// State conditions, for `el.should(be::visible())` call sites.
pub mod be {
    use crate::condition::Condition;
    use crate::element::Element;

    pub fn visible() -> Condition<Element> {
        super::element::visible()
    }

    pub fn hidden() -> Condition<Element> {
        super::element::hidden()
    }

    pub fn present() -> Condition<Element> {
        super::element::present()
    }

    pub fn absent() -> Condition<Element> {
        super::element::absent()
    }

    pub fn enabled() -> Condition<Element> {
        super::element::enabled()
    }

    pub fn disabled() -> Condition<Element> {
        super::element::disabled()
    }

    pub fn selected() -> Condition<Element> {
        super::element::selected()
    }
}

/// Content conditions, for `el.should(have::exact_text("x"))` call sites.
pub mod have {
    use crate::browser::Browser;
    use crate::collection::Collection;
    use crate::condition::Condition;
    use crate::element::Element;

    pub fn text(expected: impl Into<String>) -> Condition<Element> {
        super::element::text(expected)
    }

    pub fn exact_text(expected: impl Into<String>) -> Condition<Element> {
        super::element::exact_text(expected)
    }

    pub fn text_matching(pattern: impl AsRef<str>) -> Condition<Element> {
        super::element::text_matching(pattern)
    }

    pub fn attribute(name: impl Into<String>) -> Condition<Element> {
        super::element::attribute(name)
    }

    pub fn attribute_with_value(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Condition<Element> {
        super::element::attribute_with_value(name, value)
    }

    pub fn exact_attribute(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Condition<Element> {
        super::element::exact_attribute(name, value)
    }

    pub fn css_class(name: impl Into<String>) -> Condition<Element> {
        super::element::css_class(name)
    }

    pub fn value(expected: impl Into<String>) -> Condition<Element> {
        super::element::value(expected)
    }

    pub fn size(expected: usize) -> Condition<Collection> {
        super::collection::size(expected)
    }

    pub fn size_greater_than(limit: usize) -> Condition<Collection> {
        super::collection::size_greater_than(limit)
    }

    pub fn texts<I, S>(expected: I) -> Condition<Collection>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        super::collection::texts(expected)
    }

    pub fn exact_texts<I, S>(expected: I) -> Condition<Collection>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        super::collection::exact_texts(expected)
    }

    pub fn url(expected: impl Into<String>) -> Condition<Browser> {
        super::browser::url(expected)
    }

    pub fn url_containing(part: impl Into<String>) -> Condition<Browser> {
        super::browser::url_containing(part)
    }

    pub fn title(expected: impl Into<String>) -> Condition<Browser> {
        super::browser::title(expected)
    }

    pub fn title_containing(part: impl Into<String>) -> Condition<Browser> {
        super::browser::title_containing(part)
    }
}
