use bytesite_ui_core::reveal::RevealTracker;
use bytesite_ui_core::typewriter::Typewriter;
use bytesite_ui_core::{DomainKey, RoadmapSwitcher};
use web_sys::{Element, HtmlElement};

/// Elements every scroll pass reads or writes, captured once at boot.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScrollSurfaceState {
    pub(super) body: Option<HtmlElement>,
    pub(super) back_to_top: Option<Element>,
    pub(super) sections: Vec<Element>,
    pub(super) nav_links: Vec<(Element, String)>,
    pub(super) bg_shift_enabled: bool,
    pub(super) active_section_enabled: bool,
}

#[derive(Debug, Default)]
pub(crate) struct RevealSurfaceState {
    pub(super) tracker: RevealTracker,
    pub(super) elements: Vec<Element>,
}

#[derive(Debug, Default)]
pub(crate) struct TypewriterSurfaceState {
    pub(super) typewriter: Option<Typewriter>,
    pub(super) output: Option<Element>,
    pub(super) cursor: Option<Element>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RoadmapSurfaceState {
    pub(super) switcher: RoadmapSwitcher,
    pub(super) panels: Vec<(DomainKey, Element)>,
    pub(super) placeholder: Option<HtmlElement>,
    pub(super) selector_links: Vec<Element>,
}
