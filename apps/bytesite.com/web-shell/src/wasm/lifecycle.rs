use super::*;

pub(super) fn set_phase(phase: &str, detail: &str) {
    DIAGNOSTICS.with(|state| state.borrow_mut().set_phase(phase, detail));
    tracing::debug!(phase, detail, "page phase");
}

pub(super) fn set_error(message: &str) {
    tracing::warn!(message, "page interaction error");
    DIAGNOSTICS.with(|state| {
        state.borrow_mut().last_error = Some(message.to_string());
    });
}

pub(super) fn record_feature(feature: Feature, result: Result<FeatureStatus, String>) {
    let status = FeatureStatus::from(result);
    DIAGNOSTICS.with(|state| state.borrow_mut().record_feature(feature, status));
}

pub(super) fn config() -> InteractionConfig {
    CONFIG.with(|config| config.borrow().clone())
}

/// Reads optional overrides from `window.__BYTESITE_CONFIG__`, either a JSON
/// string or a plain object. Invalid overrides fall back to defaults.
pub(super) fn load_config() -> InteractionConfig {
    let Some(raw) = config_overrides() else {
        return InteractionConfig::default();
    };
    match InteractionConfig::from_json(&raw) {
        Ok(config) => config,
        Err(error) => {
            // logging is not installed yet
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "bytesite: ignoring config overrides: {error}"
            )));
            InteractionConfig::default()
        }
    }
}

fn config_overrides() -> Option<String> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(raw) = value.as_string() {
        return Some(raw);
    }
    js_sys::JSON::stringify(&value).ok()?.as_string()
}

pub(super) fn detect_motion_preference() -> MotionPreference {
    let matches = web_sys::window()
        .and_then(|window| window.match_media(bytesite_ui_core::feature::REDUCED_MOTION_QUERY).ok())
        .flatten()
        .is_some_and(|query| query.matches());
    MotionPreference::from_media_match(matches)
}

pub(super) fn intersection_observer_supported() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::has(&window, &JsValue::from_str(INTERSECTION_OBSERVER_GLOBAL))
        .unwrap_or(false)
}

/// Runs `ready` once the document is parsed: immediately when it already is,
/// otherwise on `DOMContentLoaded`.
pub(super) fn run_when_dom_ready(ready: fn()) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        set_error("document is unavailable");
        return;
    };
    if document_parsed(&document.ready_state()) {
        ready();
        return;
    }
    DOM_READY_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            ready();
        }));
        if document
            .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
            .is_err()
        {
            set_error("failed to listen for DOMContentLoaded");
            return;
        }
        *slot.borrow_mut() = Some(callback);
    });
}

pub(super) fn now_ms() -> u64 {
    let now = js_sys::Date::now();
    if !now.is_finite() || now.is_sign_negative() {
        return 0;
    }
    now.floor().min(u64::MAX as f64) as u64
}
