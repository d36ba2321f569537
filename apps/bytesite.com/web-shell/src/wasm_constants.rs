pub(crate) const CONFIG_GLOBAL: &str = "__BYTESITE_CONFIG__";
pub(crate) const INTERSECTION_OBSERVER_GLOBAL: &str = "IntersectionObserver";

pub(crate) const IN_PAGE_LINK_SELECTOR: &str = "a[href^=\"#\"]";
pub(crate) const BACK_TO_TOP_ID: &str = "backToTop";
pub(crate) const THEME_TOGGLE_ID: &str = "themeToggle";
pub(crate) const NAVBAR_SELECTOR: &str = ".navbar";
pub(crate) const SECTION_SELECTOR: &str = "section[id]";
pub(crate) const NAV_LINK_SELECTOR: &str = ".navbar .nav-link[href^=\"#\"]";
pub(crate) const HERO_SELECTOR: &str = ".hero-section";
pub(crate) const HERO_VISUAL_SELECTOR: &str = ".hero-visual";
pub(crate) const HERO_CONTAINER_SELECTOR: &str = ".hero-section .container";
pub(crate) const NOTE_SELECTOR: &str = ".mast-note";
pub(crate) const HEADLINE_SELECTOR: &str = ".letter-animate[data-letters]";
pub(crate) const APPLICATION_FORM_ID: &str = "applicationForm";
pub(crate) const CONTACT_SECTION_SELECTOR: &str = ".contact-section";
pub(crate) const TOAST_CONTAINER_SELECTOR: &str = ".contact-card";

pub(crate) const WIRING_BUDGET_MS: u64 = 50;
