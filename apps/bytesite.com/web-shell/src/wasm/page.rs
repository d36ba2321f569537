use super::*;

/// `localStorage` behind the theme store seam. A page without storage (or
/// with storage blocked) behaves as an empty store that drops writes.
struct LocalStorageThemeStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageThemeStore {
    fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten();
        Self { storage }
    }
}

impl ThemeStore for LocalStorageThemeStore {
    type Error = String;

    fn load_theme(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage
            .get_item(key)
            .map_err(|_| format!("failed to read {key} from local storage"))
    }

    fn persist_theme(&mut self, key: &str, theme: Theme) -> Result<(), Self::Error> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        storage
            .set_item(key, theme.as_str())
            .map_err(|_| format!("failed to write {key} to local storage"))
    }
}

pub(super) fn install_smooth_navigation() -> Result<FeatureStatus, String> {
    let anchors = query_selector_all(IN_PAGE_LINK_SELECTOR)?;
    let mut attached = 0_usize;
    for anchor in anchors {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        if in_page_fragment(&href).is_none() {
            continue;
        }
        listen(&anchor, "click", move |event| {
            event.prevent_default();
            follow_in_page_link(&href);
        })?;
        attached += 1;
    }
    if attached == 0 {
        return Ok(FeatureStatus::absent(IN_PAGE_LINK_SELECTOR));
    }
    tracing::debug!(links = attached, "in-page links wired");
    Ok(FeatureStatus::Attached)
}

fn follow_in_page_link(href: &str) {
    // an href that is not a valid selector has no target
    let Ok(Some(target)) = query_selector(href) else {
        return;
    };
    scroll_into_view_smooth(&target);
    let pushed = window().and_then(|window| {
        window
            .history()
            .map_err(|_| "history is unavailable".to_string())?
            .push_state_with_url(&JsValue::NULL, "", Some(href))
            .map_err(|_| format!("failed to push {href}"))
    });
    if let Err(error) = pushed {
        tracing::warn!(%error, "address bar not updated");
    }
}

pub(super) fn install_back_to_top() -> Result<FeatureStatus, String> {
    let Some(button) = element_by_id(BACK_TO_TOP_ID)? else {
        return Ok(FeatureStatus::absent(format!("#{BACK_TO_TOP_ID}")));
    };
    listen(&button, "click", |event| {
        event.prevent_default();
        if let Err(error) = scroll_window_to(0.0) {
            set_error(&error);
        }
    })?;
    SCROLL_SURFACE.with(|slot| slot.borrow_mut().back_to_top = Some(button));
    Ok(FeatureStatus::Attached)
}

/// Applies the stored theme and wires the toggle. The theme is applied even
/// when the toggle itself is missing.
pub(super) fn install_theme_toggle() -> Result<FeatureStatus, String> {
    let config = config();
    let mut controller = ThemeController::new(config.theme_storage_key.clone(), config.default_theme);
    let mut store = LocalStorageThemeStore::open();
    let presentation = match controller.initialize(&mut store) {
        Ok(presentation) => presentation,
        Err(error) => {
            tracing::warn!(%error, "theme storage unavailable; applying default");
            config.default_theme.presentation()
        }
    };
    apply_presentation(&presentation);
    THEME.with(|slot| *slot.borrow_mut() = Some(controller));

    let Some(toggle) = element_by_id(THEME_TOGGLE_ID)? else {
        return Ok(FeatureStatus::absent(format!("#{THEME_TOGGLE_ID}")));
    };
    listen(&toggle, "click", |_event| toggle_theme_from_page())?;
    Ok(FeatureStatus::Attached)
}

pub(super) fn toggle_theme_from_page() {
    let has_light_class = document()
        .ok()
        .and_then(|document| document.body())
        .is_some_and(|body| has_class(&body, LIGHT_THEME_BODY_CLASS));
    let current = Theme::from_body_class(has_light_class);
    let mut store = LocalStorageThemeStore::open();
    let result = THEME.with(|slot| {
        let mut slot = slot.borrow_mut();
        let controller = slot.get_or_insert_with(|| {
            let config = config();
            ThemeController::new(config.theme_storage_key, config.default_theme)
        });
        controller.toggle(&mut store, current)
    });
    let presentation = match result {
        Ok(presentation) => presentation,
        Err(error) => {
            set_error(&error);
            current.toggled().presentation()
        }
    };
    apply_presentation(&presentation);
}

fn apply_presentation(presentation: &ThemePresentation) {
    if let Ok(Some(body)) = document().map(|document| document.body()) {
        set_class(&body, LIGHT_THEME_BODY_CLASS, presentation.body_light_class);
    }
    if let Ok(Some(navbar)) = query_selector(NAVBAR_SELECTOR) {
        set_class(&navbar, NAVBAR_LIGHT_CLASS, presentation.navbar_light_class);
        set_class(&navbar, NAVBAR_DARK_CLASS, presentation.navbar_dark_class);
    }
    if let Ok(Some(toggle)) = element_by_id(THEME_TOGGLE_ID) {
        toggle.set_inner_html(&presentation.icon_markup());
        let _ = toggle.set_attribute("aria-label", presentation.aria_label);
    }
    DIAGNOSTICS.with(|state| state.borrow_mut().theme = Some(presentation.theme));
}

pub(super) fn install_background_shift() -> Result<FeatureStatus, String> {
    let Some(body) = document()?.body() else {
        return Ok(FeatureStatus::absent("body"));
    };
    SCROLL_SURFACE.with(|slot| {
        let mut surface = slot.borrow_mut();
        surface.body = Some(body);
        surface.bg_shift_enabled = true;
    });
    Ok(FeatureStatus::Attached)
}

pub(super) fn install_active_section() -> Result<FeatureStatus, String> {
    let nav_links: Vec<(Element, String)> = query_selector_all(NAV_LINK_SELECTOR)?
        .into_iter()
        .filter_map(|link| {
            let href = link.get_attribute("href")?;
            Some((link, href))
        })
        .collect();
    if nav_links.is_empty() {
        return Ok(FeatureStatus::absent(NAV_LINK_SELECTOR));
    }
    let sections = query_selector_all(SECTION_SELECTOR)?;
    tracing::debug!(
        sections = sections.len(),
        links = nav_links.len(),
        "active section tracking wired"
    );
    SCROLL_SURFACE.with(|slot| {
        let mut surface = slot.borrow_mut();
        surface.sections = sections;
        surface.nav_links = nav_links;
        surface.active_section_enabled = true;
    });
    Ok(FeatureStatus::Attached)
}

pub(super) fn install_scroll_listener() -> Result<(), String> {
    let window = window()?;
    listen_passive(&window, "scroll", |_event| refresh_scroll_effects())
}

/// One scroll pass: back-to-top visibility, background shift and the active
/// nav link, all from a single `scrollY` read.
pub(super) fn refresh_scroll_effects() {
    let config = config();
    let scroll_y = scroll_y();
    let active = SCROLL_SURFACE.with(|slot| {
        let surface = slot.borrow();
        let offsets: Vec<SectionOffset> = if surface.active_section_enabled {
            surface
                .sections
                .iter()
                .map(|section| {
                    SectionOffset::from_viewport(
                        section.id(),
                        section.get_bounding_client_rect().top(),
                        scroll_y,
                    )
                })
                .collect()
        } else {
            Vec::new()
        };
        let effects = scroll_effects(&config, &offsets, scroll_y);

        if let Some(button) = &surface.back_to_top {
            set_class(button, BACK_TO_TOP_VISIBLE_CLASS, effects.back_to_top_visible);
        }
        if let Some(body) = surface.body.as_ref().filter(|_| surface.bg_shift_enabled) {
            let shifted = body
                .style()
                .set_property(BG_SHIFT_PROPERTY, &effects.bg_shift_value());
            if shifted.is_err() {
                tracing::warn!("failed to update background shift");
            }
        }
        if surface.active_section_enabled {
            for (link, href) in &surface.nav_links {
                set_class(
                    link,
                    NAV_LINK_ACTIVE_CLASS,
                    nav_link_is_active(href, effects.active_section.as_deref()),
                );
            }
        }
        effects.active_section
    });
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        if state.active_section != active {
            tracing::debug!(section = active.as_deref().unwrap_or_default(), "active section changed");
            state.active_section = active;
        }
    });
}

pub(super) fn install_reveal_animations(motion: MotionPreference) -> Result<FeatureStatus, String> {
    if let Some(status) = motion.gate() {
        return Ok(status);
    }
    if !intersection_observer_supported() {
        return Ok(FeatureStatus::skipped("IntersectionObserver is unavailable"));
    }
    let config = config();

    let mut matched = Vec::with_capacity(REVEAL_GROUPS.len());
    for group in REVEAL_GROUPS {
        matched.push((group, query_selector_all(group.selector)?));
    }
    let targets = merge_reveal_targets(matched, config.reveal_delay_cap_ms);
    if targets.is_empty() {
        return Ok(FeatureStatus::absent("reveal groups"));
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::wrap(Box::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            on_reveal_entries(&entries, &observer);
        },
    ));
    let options = web_sys::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(|_| "failed to create reveal observer".to_string())?;
    REVEAL_OBSERVER_HANDLER.with(|slot| *slot.borrow_mut() = Some(callback));

    REVEAL_SURFACE.with(|slot| {
        let mut surface = slot.borrow_mut();
        for (element, delay_ms) in targets {
            add_class(&element, REVEAL_CLASS);
            if let Some(delay_ms) = delay_ms {
                let delay = transition_delay_css(delay_ms);
                if let Err(error) = set_style(&element, "transition-delay", &delay) {
                    tracing::warn!(%error, "reveal delay not applied");
                }
            }
            observer.observe(&element);
            surface.tracker.register();
            surface.elements.push(element);
        }
        tracing::debug!(watched = surface.tracker.watched(), "reveal observer wired");
    });
    Ok(FeatureStatus::Attached)
}

fn on_reveal_entries(entries: &js_sys::Array, observer: &IntersectionObserver) {
    let revealed = REVEAL_SURFACE.with(|slot| {
        let mut surface = slot.borrow_mut();
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let Some(index) = surface.elements.iter().position(|element| *element == target) else {
                continue;
            };
            if surface.tracker.on_intersection(index, entry.is_intersecting())
                == RevealAction::RevealAndUnobserve
            {
                add_class(&target, REVEAL_IN_CLASS);
                observer.unobserve(&target);
            }
        }
        surface.tracker.revealed()
    });
    DIAGNOSTICS.with(|state| state.borrow_mut().revealed_elements = revealed);
}

pub(super) fn install_hero_parallax(motion: MotionPreference) -> Result<FeatureStatus, String> {
    let Some(hero) = query_selector(HERO_SELECTOR)? else {
        return Ok(FeatureStatus::absent(HERO_SELECTOR));
    };
    if let Some(status) = motion.gate() {
        return Ok(status);
    }
    let Some(visual) = hero.query_selector(HERO_VISUAL_SELECTOR).ok().flatten() else {
        return Ok(FeatureStatus::absent(HERO_VISUAL_SELECTOR));
    };
    let strength = config().hero_tilt_strength;

    let region = hero.clone();
    let moving = visual.clone();
    listen_mouse(&hero, "mousemove", move |event: MouseEvent| {
        let Some(translation) = hero_tilt(
            bounding_rect(&region),
            f64::from(event.client_x()),
            f64::from(event.client_y()),
            strength,
        ) else {
            return;
        };
        if let Err(error) = set_style(&moving, "transform", &translation.to_css()) {
            tracing::warn!(%error, "hero tilt not applied");
        }
    })?;
    listen_mouse(&hero, "mouseleave", move |_event| {
        clear_style(&visual, "transform");
    })?;
    Ok(FeatureStatus::Attached)
}

pub(super) fn install_note_placement() -> Result<FeatureStatus, String> {
    let Some(note) = query_selector(NOTE_SELECTOR)? else {
        return Ok(FeatureStatus::absent(NOTE_SELECTOR));
    };
    place_note(&note);
    let window = window()?;
    let resized = note.clone();
    listen(&window, "resize", move |_event| place_note(&resized))?;
    listen_passive(&window, "scroll", move |_event| place_note(&note))?;
    Ok(FeatureStatus::Attached)
}

/// Skips the pass when either anchor is missing from the page.
fn place_note(note: &Element) {
    let (Ok(Some(navbar)), Ok(Some(container))) = (
        query_selector(NAVBAR_SELECTOR),
        query_selector(HERO_CONTAINER_SELECTOR),
    ) else {
        return;
    };
    let top = note_top(bounding_rect(&navbar), bounding_rect(&container), scroll_y());
    if let Err(error) = set_style(note, "top", &format!("{top}px")) {
        tracing::warn!(%error, "note placement not applied");
    }
}

pub(super) fn install_typewriter(motion: MotionPreference) -> Result<FeatureStatus, String> {
    let Some(headline) = query_selector(HEADLINE_SELECTOR)? else {
        return Ok(FeatureStatus::absent(HEADLINE_SELECTOR));
    };
    if let Some(status) = motion.gate() {
        return Ok(status);
    }

    let height = headline.get_bounding_client_rect().height();
    set_style(&headline, "min-height", &format!("{height}px"))?;
    let nodes = headline_nodes(&headline);
    let typewriter = Typewriter::from_nodes(&nodes, config().typewriter_interval_ms);

    let output = create_element("span")?;
    output.set_class_name(OUTPUT_CLASS);
    let cursor = create_element("span")?;
    cursor.set_class_name(CURSOR_CLASS);
    headline.set_inner_html("");
    headline
        .append_child(&output)
        .map_err(|_| "failed to mount typewriter output".to_string())?;
    headline
        .append_child(&cursor)
        .map_err(|_| "failed to mount typewriter cursor".to_string())?;

    tracing::debug!(chars = typewriter.len(), "typewriter armed");
    TYPEWRITER_SURFACE.with(|slot| {
        let mut surface = slot.borrow_mut();
        surface.typewriter = Some(typewriter);
        surface.output = Some(output);
        surface.cursor = Some(cursor);
    });
    set_typewriter_phase(TypewriterPhase::Pending);
    spawn_local(run_typewriter());
    Ok(FeatureStatus::Attached)
}

fn headline_nodes(parent: &web_sys::Node) -> Vec<HeadlineNode> {
    let children = parent.child_nodes();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .filter_map(|node| headline_node(&node))
        .collect()
}

fn headline_node(node: &web_sys::Node) -> Option<HeadlineNode> {
    match node.node_type() {
        web_sys::Node::TEXT_NODE => Some(HeadlineNode::text(node.text_content().unwrap_or_default())),
        web_sys::Node::ELEMENT_NODE => {
            let class_list = node.dyn_ref::<Element>()?.class_list();
            let classes = (0..class_list.length())
                .filter_map(|index| class_list.item(index))
                .collect();
            Some(HeadlineNode::Element {
                classes,
                children: headline_nodes(node),
            })
        }
        _ => None,
    }
}

/// First character lands immediately, then one per interval until the
/// cursor hides.
async fn run_typewriter() {
    let interval_ms = TYPEWRITER_SURFACE.with(|slot| {
        let mut surface = slot.borrow_mut();
        let typewriter = surface.typewriter.as_mut()?;
        typewriter.start().then(|| typewriter.interval_ms())
    });
    let Some(interval_ms) = interval_ms else {
        return;
    };
    set_typewriter_phase(TypewriterPhase::Running);

    loop {
        let tick = TYPEWRITER_SURFACE.with(|slot| {
            slot.borrow_mut()
                .typewriter
                .as_mut()
                .and_then(Typewriter::tick)
        });
        match tick {
            Some(TypewriterTick::Emit(styled)) => {
                if let Err(error) = emit_typed_char(styled) {
                    set_error(&error);
                }
            }
            Some(TypewriterTick::HideCursor) => {
                if let Some(cursor) = TYPEWRITER_SURFACE.with(|slot| slot.borrow().cursor.clone()) {
                    add_class(&cursor, CURSOR_HIDDEN_CLASS);
                }
                set_typewriter_phase(TypewriterPhase::Done);
                tracing::debug!("typewriter finished");
                return;
            }
            None => return,
        }
        sleep(Duration::from_millis(u64::from(interval_ms))).await;
    }
}

fn emit_typed_char(styled: StyledChar) -> Result<(), String> {
    let Some(output) = TYPEWRITER_SURFACE.with(|slot| slot.borrow().output.clone()) else {
        return Ok(());
    };
    let mut buffer = [0_u8; 4];
    let text = styled.ch.encode_utf8(&mut buffer);
    if styled.gradient {
        let wrap = create_element("span")?;
        wrap.set_class_name(GRADIENT_CLASS);
        wrap.set_text_content(Some(text));
        output
            .append_child(&wrap)
            .map_err(|_| "failed to append typed character".to_string())?;
    } else {
        let node = document()?.create_text_node(text);
        output
            .append_child(&node)
            .map_err(|_| "failed to append typed character".to_string())?;
    }
    Ok(())
}

fn set_typewriter_phase(phase: TypewriterPhase) {
    DIAGNOSTICS.with(|state| state.borrow_mut().typewriter = Some(phase));
}

pub(super) fn install_application_form() -> Result<FeatureStatus, String> {
    let Some(form) = element_by_id(APPLICATION_FORM_ID)?
        .and_then(|element| element.dyn_into::<web_sys::HtmlFormElement>().ok())
    else {
        return Ok(FeatureStatus::absent(format!("#{APPLICATION_FORM_ID}")));
    };
    let submitted = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        on_application_submit(&submitted);
    })?;
    Ok(FeatureStatus::Attached)
}

fn on_application_submit(form: &web_sys::HtmlFormElement) {
    let fields = RawApplicationFields::collect(control_value, checkbox_checked);
    match handle_submit(form.check_validity(), fields) {
        SubmitOutcome::ReportValidity => {
            let _ = form.report_validity();
        }
        SubmitOutcome::Accepted {
            record,
            message,
            kind,
        } => {
            tracing::debug!(record = %record.to_json(), "application record kept local");
            show_toast(kind, message);
            form.reset();
            if let Ok(Some(section)) = query_selector(CONTACT_SECTION_SELECTOR) {
                scroll_into_view_smooth(&section);
            }
        }
    }
}

/// Prepends a notification to the contact card and removes it once its
/// lifetime elapses. Repeated calls stack.
pub(super) fn show_toast(kind: ToastKind, message: &str) {
    let Ok(Some(container)) = query_selector(TOAST_CONTAINER_SELECTOR) else {
        tracing::debug!("toast container absent; notification dropped");
        return;
    };
    let element = match toast_element(kind, message) {
        Ok(element) => element,
        Err(error) => {
            set_error(&error);
            return;
        }
    };
    if container.prepend_with_node_1(&element).is_err() {
        set_error("failed to mount notification");
        return;
    }

    let (toast, lifetime_ms, shown_total) = TOASTS.with(|slot| {
        let mut queue = slot.borrow_mut();
        let toast = queue.show(kind, message, now_ms());
        (toast, queue.lifetime_ms(), queue.shown_total())
    });
    DIAGNOSTICS.with(|state| state.borrow_mut().toasts_shown = shown_total);

    spawn_local(async move {
        sleep(Duration::from_millis(lifetime_ms)).await;
        element.remove();
        let expired = TOASTS.with(|slot| {
            slot.borrow_mut()
                .expire(now_ms().max(toast.expires_at_ms))
        });
        tracing::debug!(id = toast.id, expired = expired.len(), "toast timer fired");
    });
}

fn toast_element(kind: ToastKind, message: &str) -> Result<Element, String> {
    let element = create_element("div")?;
    element.set_class_name(&kind.class_name());
    set_style(&element, "background", kind.background())?;
    set_style(&element, "border", TOAST_BORDER)?;
    set_style(&element, "color", TOAST_COLOR)?;
    element
        .set_attribute("role", TOAST_ROLE)
        .map_err(|_| "failed to set notification role".to_string())?;
    element.set_text_content(Some(message));
    Ok(element)
}
