//! Roadmap view switcher state.
//!
//! Exactly one of the four domain panels, or the placeholder, is visible after
//! every selection. The selection lives only in memory and in the `domain`
//! query parameter.

use serde::Serialize;

use crate::query::{DOMAIN_PARAM, QueryError, query_param, with_query_param};

pub const HIDDEN_CLASS: &str = "d-none";
pub const HIGHLIGHT_CLASS: &str = "border-orange";
pub const PLACEHOLDER_ID: &str = "roadmapEmpty";
pub const SELECTOR_LINK_SELECTOR: &str = "a[href^=\"roadmap.html?domain=\"]";
pub const SELECTOR_CARD_SELECTOR: &str = ".program-card";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKey {
    Devops,
    Cloud,
    Ai,
    Data,
}

impl DomainKey {
    pub const ALL: [DomainKey; 4] = [Self::Devops, Self::Cloud, Self::Ai, Self::Data];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "devops" => Some(Self::Devops),
            "cloud" => Some(Self::Cloud),
            "ai" => Some(Self::Ai),
            "data" => Some(Self::Data),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Devops => "devops",
            Self::Cloud => "cloud",
            Self::Ai => "ai",
            Self::Data => "data",
        }
    }

    pub fn panel_id(self) -> &'static str {
        match self {
            Self::Devops => "rm-devops",
            Self::Cloud => "rm-cloud",
            Self::Ai => "rm-ai",
            Self::Data => "rm-data",
        }
    }

    /// Whether a selector link's href points at this domain.
    pub fn matches_href(self, href: &str) -> bool {
        href.contains(&format!("?{DOMAIN_PARAM}={}", self.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "domain")]
pub enum VisiblePanel {
    Domain(DomainKey),
    Placeholder,
}

/// The DOM changes one `show_domain` call asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapView {
    pub visible: VisiblePanel,
    /// Card to highlight after clearing every other highlight.
    pub highlight: Option<DomainKey>,
    /// Replacement URL for `history.replaceState`.
    pub replace_url: Option<String>,
    pub scroll_to_content: bool,
}

impl RoadmapView {
    pub fn is_panel_visible(&self, key: DomainKey) -> bool {
        self.visible == VisiblePanel::Domain(key)
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.visible == VisiblePanel::Placeholder
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapSwitcher {
    selected: Option<DomainKey>,
    panels: Vec<DomainKey>,
}

impl Default for RoadmapSwitcher {
    fn default() -> Self {
        Self::with_panels(DomainKey::ALL)
    }
}

impl RoadmapSwitcher {
    /// Switcher for a page that carries only the given domain panels.
    pub fn with_panels(panels: impl IntoIterator<Item = DomainKey>) -> Self {
        Self {
            selected: None,
            panels: panels.into_iter().collect(),
        }
    }

    pub fn selected(&self) -> Option<DomainKey> {
        self.selected
    }

    /// Selects `key` against the page at `current_href`. Unknown keys, and
    /// known keys whose panel the page lacks, show the placeholder and leave
    /// the URL alone.
    pub fn show_domain(&mut self, key: &str, current_href: &str) -> RoadmapView {
        let Some(domain) = DomainKey::parse(key) else {
            tracing::debug!(key, "unknown roadmap domain; showing placeholder");
            return self.placeholder();
        };
        if !self.panels.contains(&domain) {
            tracing::debug!(key, "roadmap panel missing; showing placeholder");
            return self.placeholder();
        }
        self.selected = Some(domain);
        let replace_url = match with_query_param(current_href, DOMAIN_PARAM, domain.as_str()) {
            Ok(url) => Some(url),
            Err(error) => {
                tracing::warn!(%error, "roadmap url not updated");
                None
            }
        };
        tracing::info!(domain = domain.as_str(), "roadmap domain selected");
        RoadmapView {
            visible: VisiblePanel::Domain(domain),
            highlight: Some(domain),
            replace_url,
            scroll_to_content: true,
        }
    }

    fn placeholder(&mut self) -> RoadmapView {
        self.selected = None;
        RoadmapView {
            visible: VisiblePanel::Placeholder,
            highlight: None,
            replace_url: None,
            scroll_to_content: false,
        }
    }
}

/// Domain named by the page URL at load, when it is one of the known keys.
pub fn initial_domain(current_href: &str) -> Result<Option<DomainKey>, QueryError> {
    Ok(query_param(current_href, DOMAIN_PARAM)?
        .as_deref()
        .and_then(DomainKey::parse))
}

/// Domain key a selector link carries in its own query string.
pub fn link_domain(link_href: &str) -> Option<String> {
    query_param(link_href, DOMAIN_PARAM)
        .ok()
        .flatten()
        .filter(|key| !key.is_empty())
}

/// Page offset to scroll to so the revealed content sits below the navbar.
pub fn content_scroll_top(placeholder_offset_top: Option<f64>, offset: f64) -> f64 {
    placeholder_offset_top.unwrap_or(0.0) - offset
}
