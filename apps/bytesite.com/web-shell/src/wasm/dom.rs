use super::*;

pub(super) fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window is unavailable".to_string())
}

pub(super) fn document() -> Result<web_sys::Document, String> {
    window()?
        .document()
        .ok_or_else(|| "document is unavailable".to_string())
}

pub(super) fn query_selector(selector: &str) -> Result<Option<Element>, String> {
    document()?
        .query_selector(selector)
        .map_err(|_| format!("invalid selector {selector}"))
}

pub(super) fn query_selector_all(selector: &str) -> Result<Vec<Element>, String> {
    let nodes = document()?
        .query_selector_all(selector)
        .map_err(|_| format!("invalid selector {selector}"))?;
    Ok(collect_elements(&nodes))
}

pub(super) fn query_within(parent: &Element, selector: &str) -> Vec<Element> {
    parent
        .query_selector_all(selector)
        .map(|nodes| collect_elements(&nodes))
        .unwrap_or_default()
}

fn collect_elements(nodes: &web_sys::NodeList) -> Vec<Element> {
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(super) fn element_by_id(id: &str) -> Result<Option<Element>, String> {
    Ok(document()?.get_element_by_id(id))
}

pub(super) fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub(super) fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub(super) fn set_class(element: &Element, class: &str, present: bool) {
    let _ = element.class_list().toggle_with_force(class, present);
}

pub(super) fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub(super) fn set_style(element: &Element, property: &str, value: &str) -> Result<(), String> {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return Err(format!("cannot style non-html element for {property}"));
    };
    element
        .style()
        .set_property(property, value)
        .map_err(|_| format!("failed to set style {property}"))
}

pub(super) fn clear_style(element: &Element, property: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().remove_property(property);
    }
}

pub(super) fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(super) fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or(0.0)
}

pub(super) fn current_href() -> Result<String, String> {
    window()?
        .location()
        .href()
        .map_err(|_| "location href is unavailable".to_string())
}

pub(super) fn scroll_window_to(top: f64) -> Result<(), String> {
    let options = web_sys::ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

pub(super) fn scroll_into_view_smooth(element: &Element) {
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Attaches `handler` for `event` on `target` and keeps the closure alive for
/// the page lifetime.
pub(super) fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), String> {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|_| format!("failed to listen for {event}"))?;
    EVENT_HANDLERS.with(|slot| slot.borrow_mut().push(callback));
    Ok(())
}

pub(super) fn listen_passive(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), String> {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|_| format!("failed to listen for {event}"))?;
    EVENT_HANDLERS.with(|slot| slot.borrow_mut().push(callback));
    Ok(())
}

pub(super) fn listen_mouse(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(MouseEvent) + 'static,
) -> Result<(), String> {
    let callback = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(handler));
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|_| format!("failed to listen for {event}"))?;
    MOUSE_HANDLERS.with(|slot| slot.borrow_mut().push(callback));
    Ok(())
}

/// Value of the form control with `id`, whichever kind of control it is.
pub(super) fn control_value(id: &str) -> Option<String> {
    let element = web_sys::window()?.document()?.get_element_by_id(id)?;
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        return Some(select.value());
    }
    element
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(web_sys::HtmlTextAreaElement::value)
}

pub(super) fn checkbox_checked(id: &str) -> Option<bool> {
    let element = web_sys::window()?.document()?.get_element_by_id(id)?;
    element
        .dyn_ref::<web_sys::HtmlInputElement>()
        .map(web_sys::HtmlInputElement::checked)
}

pub(super) fn create_element(tag: &str) -> Result<Element, String> {
    document()?
        .create_element(tag)
        .map_err(|_| format!("failed to create {tag} element"))
}
