#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(target_arch = "wasm32")]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use bytesite_ui_core::form::{RawApplicationFields, SubmitOutcome, handle_submit};
    use bytesite_ui_core::layout::{Rect, hero_tilt, note_top};
    use bytesite_ui_core::query::in_page_fragment;
    use bytesite_ui_core::reveal::{
        REVEAL_CLASS, REVEAL_GROUPS, REVEAL_IN_CLASS, RevealAction, merge_reveal_targets,
        transition_delay_css,
    };
    use bytesite_ui_core::roadmap::{
        HIDDEN_CLASS, HIGHLIGHT_CLASS, PLACEHOLDER_ID, SELECTOR_CARD_SELECTOR,
        SELECTOR_LINK_SELECTOR, content_scroll_top, initial_domain, link_domain,
    };
    use bytesite_ui_core::scroll::{
        BACK_TO_TOP_VISIBLE_CLASS, BG_SHIFT_PROPERTY, NAV_LINK_ACTIVE_CLASS, SectionOffset,
        nav_link_is_active, scroll_effects,
    };
    use bytesite_ui_core::theme::{
        LIGHT_THEME_BODY_CLASS, NAVBAR_DARK_CLASS, NAVBAR_LIGHT_CLASS,
    };
    use bytesite_ui_core::toast::{TOAST_BORDER, TOAST_COLOR, TOAST_ROLE, ToastKind, ToastQueue};
    use bytesite_ui_core::typewriter::{
        CURSOR_CLASS, CURSOR_HIDDEN_CLASS, GRADIENT_CLASS, HeadlineNode, OUTPUT_CLASS, StyledChar,
        Typewriter, TypewriterPhase, TypewriterTick,
    };
    use bytesite_ui_core::{
        DomainKey, Feature, FeatureStatus, InteractionConfig, MotionPreference, PageDiagnostics,
        RoadmapSwitcher, Theme, ThemeController, ThemePresentation, ThemeStore, VisiblePanel,
        document_parsed,
    };
    use gloo_timers::future::sleep;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Element, HtmlElement, IntersectionObserver, MouseEvent};
    use web_time::{Duration, Instant};

    use crate::wasm_constants::*;
    use crate::wasm_state::{
        RevealSurfaceState, RoadmapSurfaceState, ScrollSurfaceState, TypewriterSurfaceState,
    };

    mod dom;
    mod lifecycle;
    mod logging;
    mod page;
    mod roadmap;

    use dom::*;
    use lifecycle::*;
    use page::*;
    use roadmap::*;

    thread_local! {
        static CONFIG: RefCell<InteractionConfig> = RefCell::new(InteractionConfig::default());
        static DIAGNOSTICS: RefCell<PageDiagnostics> = RefCell::new(PageDiagnostics::default());
        static THEME: RefCell<Option<ThemeController>> = const { RefCell::new(None) };
        static TOASTS: RefCell<ToastQueue> = RefCell::new(ToastQueue::new(6_000));
        static SCROLL_SURFACE: RefCell<ScrollSurfaceState> = RefCell::new(ScrollSurfaceState::default());
        static REVEAL_SURFACE: RefCell<RevealSurfaceState> = RefCell::new(RevealSurfaceState::default());
        static TYPEWRITER_SURFACE: RefCell<TypewriterSurfaceState> = RefCell::new(TypewriterSurfaceState::default());
        static ROADMAP_SURFACE: RefCell<RoadmapSurfaceState> = RefCell::new(RoadmapSurfaceState::default());
        static DOM_READY_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static EVENT_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
        static MOUSE_HANDLERS: RefCell<Vec<Closure<dyn FnMut(MouseEvent)>>> = const { RefCell::new(Vec::new()) };
        static REVEAL_OBSERVER_HANDLER: RefCell<Option<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let config = load_config();
        logging::install(&config.log_level);
        TOASTS.with(|toasts| *toasts.borrow_mut() = ToastQueue::new(config.toast_lifetime_ms));
        CONFIG.with(|slot| *slot.borrow_mut() = config);
        set_phase("waiting", "waiting for the document to finish parsing");
        run_when_dom_ready(boot);
    }

    #[wasm_bindgen]
    pub fn page_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| state.borrow().to_json())
    }

    /// Selects a roadmap domain from script, the same way a selector link does.
    #[wasm_bindgen]
    pub fn show_roadmap_domain(key: String) {
        show_domain(&key);
    }

    #[wasm_bindgen]
    pub fn toggle_theme() {
        toggle_theme_from_page();
    }

    fn boot() {
        set_phase("wiring", "attaching page interactions");
        let started_at = Instant::now();

        let motion = detect_motion_preference();
        tracing::debug!(reduced = !motion.allows_animation(), "motion preference read");

        record_feature(Feature::SmoothNavigation, install_smooth_navigation());
        record_feature(Feature::BackToTop, install_back_to_top());
        record_feature(Feature::ThemeToggle, install_theme_toggle());
        record_feature(Feature::BackgroundShift, install_background_shift());
        record_feature(Feature::ActiveSection, install_active_section());
        record_feature(Feature::RevealAnimations, install_reveal_animations(motion));
        record_feature(Feature::HeroParallax, install_hero_parallax(motion));
        record_feature(Feature::NotePlacement, install_note_placement());
        record_feature(Feature::Typewriter, install_typewriter(motion));
        record_feature(Feature::ApplicationForm, install_application_form());
        record_feature(Feature::RoadmapSwitcher, install_roadmap_switcher());

        if let Err(error) = install_scroll_listener() {
            set_error(&error);
        }
        refresh_scroll_effects();

        let elapsed_ms = started_at.elapsed().as_millis() as u64;
        DIAGNOSTICS.with(|state| {
            state
                .borrow_mut()
                .record_wiring_latency(elapsed_ms, WIRING_BUDGET_MS);
        });
        let attached = DIAGNOSTICS.with(|state| state.borrow().attached_count());
        tracing::info!(attached, elapsed_ms, "page interactions ready");
        set_phase("ready", "page interactions attached");
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::page_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn page_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"page diagnostics only available on wasm\"}".to_string()
}
