use super::*;

pub(super) fn install_roadmap_switcher() -> Result<FeatureStatus, String> {
    let mut panels = Vec::new();
    for key in DomainKey::ALL {
        if let Some(panel) = element_by_id(key.panel_id())? {
            panels.push((key, panel));
        }
    }
    let placeholder = element_by_id(PLACEHOLDER_ID)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok());
    let selector_links = query_selector_all(SELECTOR_LINK_SELECTOR)?;
    if panels.is_empty() && placeholder.is_none() {
        return Ok(FeatureStatus::absent(format!("#{PLACEHOLDER_ID}")));
    }

    for link in &selector_links {
        let clicked = link.clone();
        listen(link, "click", move |event| {
            event.prevent_default();
            let Some(href) = clicked
                .dyn_ref::<web_sys::HtmlAnchorElement>()
                .map(web_sys::HtmlAnchorElement::href)
            else {
                return;
            };
            if let Some(key) = link_domain(&href) {
                show_domain(&key);
            }
        })?;
    }
    tracing::debug!(
        panels = panels.len(),
        links = selector_links.len(),
        "roadmap switcher wired"
    );
    ROADMAP_SURFACE.with(|slot| {
        let mut surface = slot.borrow_mut();
        surface.switcher = RoadmapSwitcher::with_panels(panels.iter().map(|(key, _)| *key));
        surface.panels = panels;
        surface.placeholder = placeholder;
        surface.selector_links = selector_links;
    });

    restore_from_url()?;
    Ok(FeatureStatus::Attached)
}

/// Shows the domain named in the page URL, when its panel exists.
fn restore_from_url() -> Result<(), String> {
    let href = current_href()?;
    let initial = match initial_domain(&href) {
        Ok(initial) => initial,
        Err(error) => {
            tracing::warn!(%error, "roadmap selection not restored");
            return Ok(());
        }
    };
    let Some(key) = initial.filter(|key| has_panel(*key)) else {
        return Ok(());
    };
    tracing::debug!(domain = key.as_str(), "restoring roadmap selection from url");
    show_domain(key.as_str());
    Ok(())
}

fn has_panel(key: DomainKey) -> bool {
    ROADMAP_SURFACE.with(|slot| {
        slot.borrow()
            .panels
            .iter()
            .any(|(candidate, _)| *candidate == key)
    })
}

/// Hides every panel, then shows the one for `key`, or the placeholder when
/// `key` is unknown or its panel is missing from the page.
pub(super) fn show_domain(key: &str) {
    let href = current_href().unwrap_or_default();
    let surface = ROADMAP_SURFACE.with(|slot| slot.borrow().clone());

    for (_, panel) in &surface.panels {
        add_class(panel, HIDDEN_CLASS);
    }
    if let Some(placeholder) = &surface.placeholder {
        add_class(placeholder, HIDDEN_CLASS);
    }

    let view = ROADMAP_SURFACE.with(|slot| slot.borrow_mut().switcher.show_domain(key, &href));
    let shown = match view.visible {
        VisiblePanel::Domain(domain) => surface
            .panels
            .iter()
            .find(|(candidate, _)| *candidate == domain)
            .map(|(_, panel)| panel),
        VisiblePanel::Placeholder => None,
    };
    let selected = ROADMAP_SURFACE.with(|slot| slot.borrow().switcher.selected());
    DIAGNOSTICS.with(|state| state.borrow_mut().roadmap_domain = selected);
    let Some(panel) = shown else {
        if let Some(placeholder) = &surface.placeholder {
            remove_class(placeholder, HIDDEN_CLASS);
        }
        return;
    };

    remove_class(panel, HIDDEN_CLASS);
    if let Some(domain) = view.highlight {
        highlight_card(&surface.selector_links, domain);
    }
    if let Some(url) = view.replace_url.as_deref() {
        replace_url(url);
    }
    if view.scroll_to_content {
        let offset = config().roadmap_scroll_offset;
        let placeholder_top = surface
            .placeholder
            .as_ref()
            .map(|placeholder| f64::from(placeholder.offset_top()));
        if let Err(error) = scroll_window_to(content_scroll_top(placeholder_top, offset)) {
            set_error(&error);
        }
    }
}

fn highlight_card(selector_links: &[Element], domain: DomainKey) {
    for link in selector_links {
        for card in query_within(link, SELECTOR_CARD_SELECTOR) {
            remove_class(&card, HIGHLIGHT_CLASS);
        }
    }
    let target = selector_links.iter().find(|link| {
        link.get_attribute("href")
            .is_some_and(|href| domain.matches_href(&href))
    });
    if let Some(card) = target.and_then(|link| link.query_selector(SELECTOR_CARD_SELECTOR).ok().flatten()) {
        add_class(&card, HIGHLIGHT_CLASS);
    }
}

fn replace_url(url: &str) {
    let replaced = window().and_then(|window| {
        window
            .history()
            .map_err(|_| "history is unavailable".to_string())?
            .replace_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(|_| format!("failed to replace url with {url}"))
    });
    if let Err(error) = replaced {
        tracing::warn!(%error, "roadmap url not updated");
    }
}
