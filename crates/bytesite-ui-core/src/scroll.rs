use serde::Serialize;

use crate::config::InteractionConfig;

pub const BACK_TO_TOP_VISIBLE_CLASS: &str = "show";
pub const NAV_LINK_ACTIVE_CLASS: &str = "active";
pub const BG_SHIFT_PROPERTY: &str = "--bg-shift";

/// Document-order position of a `section[id]`, in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionOffset {
    pub id: String,
    pub page_top: f64,
}

impl SectionOffset {
    pub fn new(id: impl Into<String>, page_top: f64) -> Self {
        Self {
            id: id.into(),
            page_top,
        }
    }

    /// Converts a viewport-relative rect top into page coordinates.
    pub fn from_viewport(id: impl Into<String>, rect_top: f64, scroll_y: f64) -> Self {
        Self::new(id, rect_top + scroll_y)
    }
}

/// Everything one scroll event derives from the current offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollEffects {
    pub back_to_top_visible: bool,
    pub bg_shift_px: f64,
    pub active_section: Option<String>,
}

impl ScrollEffects {
    pub fn bg_shift_value(&self) -> String {
        format!("{}px", self.bg_shift_px)
    }
}

pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn background_shift(scroll_y: f64, divisor: f64, max_shift: f64) -> f64 {
    (scroll_y / divisor).min(max_shift)
}

/// The last section, in document order, whose top minus the navbar allowance
/// has been scrolled past.
pub fn active_section(sections: &[SectionOffset], scroll_y: f64, navbar_offset: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| scroll_y >= section.page_top - navbar_offset)
        .map(|section| section.id.as_str())
}

/// Whether a nav link with `href` should carry the active class.
pub fn nav_link_is_active(href: &str, active: Option<&str>) -> bool {
    match active {
        Some(id) if !id.is_empty() => href.strip_prefix('#') == Some(id),
        _ => false,
    }
}

pub fn scroll_effects(
    config: &InteractionConfig,
    sections: &[SectionOffset],
    scroll_y: f64,
) -> ScrollEffects {
    ScrollEffects {
        back_to_top_visible: back_to_top_visible(scroll_y, config.back_to_top_threshold),
        bg_shift_px: background_shift(scroll_y, config.bg_shift_divisor, config.bg_shift_max),
        active_section: active_section(sections, scroll_y, config.navbar_offset).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcheck::{TestResult, quickcheck};

    fn page_sections() -> Vec<SectionOffset> {
        vec![
            SectionOffset::new("home", 0.0),
            SectionOffset::new("programs", 900.0),
            SectionOffset::new("pricing", 1_800.0),
            SectionOffset::new("contact", 2_600.0),
        ]
    }

    #[test]
    fn back_to_top_threshold_is_exclusive() {
        assert!(!back_to_top_visible(400.0, 400.0));
        assert!(back_to_top_visible(400.5, 400.0));
        assert!(!back_to_top_visible(0.0, 400.0));
    }

    #[test]
    fn background_shift_caps_at_max() {
        assert_eq!(background_shift(0.0, 8.0, 80.0), 0.0);
        assert_eq!(background_shift(320.0, 8.0, 80.0), 40.0);
        assert_eq!(background_shift(10_000.0, 8.0, 80.0), 80.0);
    }

    #[test]
    fn active_section_uses_navbar_allowance() {
        let sections = page_sections();
        assert_eq!(active_section(&sections, 0.0, 100.0), Some("home"));
        assert_eq!(active_section(&sections, 799.0, 100.0), Some("home"));
        assert_eq!(active_section(&sections, 800.0, 100.0), Some("programs"));
        assert_eq!(active_section(&sections, 5_000.0, 100.0), Some("contact"));
    }

    #[test]
    fn no_section_qualifies_above_the_first() {
        let sections = vec![SectionOffset::new("intro", 600.0)];
        assert_eq!(active_section(&sections, 0.0, 100.0), None);
        assert!(!nav_link_is_active("#intro", None));
    }

    #[test]
    fn last_match_wins_for_unsorted_offsets() {
        let sections = vec![
            SectionOffset::new("late", 1_000.0),
            SectionOffset::new("early", 50.0),
        ];
        assert_eq!(active_section(&sections, 1_200.0, 100.0), Some("early"));
    }

    #[test]
    fn nav_link_matches_exact_fragment() {
        assert!(nav_link_is_active("#programs", Some("programs")));
        assert!(!nav_link_is_active("#program", Some("programs")));
        assert!(!nav_link_is_active("programs", Some("programs")));
        assert!(!nav_link_is_active("#", Some("")));
    }

    #[test]
    fn scroll_effects_bundle_every_derived_value() {
        let effects = scroll_effects(&InteractionConfig::default(), &page_sections(), 960.0);
        assert_eq!(
            effects,
            ScrollEffects {
                back_to_top_visible: true,
                bg_shift_px: 80.0,
                active_section: Some("programs".to_string()),
            }
        );
        assert_eq!(effects.bg_shift_value(), "80px");
    }

    quickcheck! {
        fn back_to_top_visible_iff_past_threshold(scroll: u32) -> bool {
            let s = f64::from(scroll);
            back_to_top_visible(s, 400.0) == (s > 400.0)
        }

        fn background_shift_is_clamped_and_monotonic(a: u32, b: u32) -> TestResult {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo_shift = background_shift(f64::from(lo), 8.0, 80.0);
            let hi_shift = background_shift(f64::from(hi), 8.0, 80.0);
            let expected = (f64::from(lo) / 8.0).min(80.0);
            TestResult::from_bool(
                lo_shift <= hi_shift && hi_shift <= 80.0 && (lo_shift - expected).abs() < f64::EPSILON,
            )
        }

        fn active_section_is_last_qualifying(tops: Vec<u16>, scroll: u16) -> bool {
            let sections: Vec<SectionOffset> = tops
                .iter()
                .enumerate()
                .map(|(index, top)| SectionOffset::new(format!("s{index}"), f64::from(*top)))
                .collect();
            let scroll_y = f64::from(scroll);
            let mut expected = None;
            for (index, top) in tops.iter().enumerate() {
                if scroll_y >= f64::from(*top) - 100.0 {
                    expected = Some(format!("s{index}"));
                }
            }
            active_section(&sections, scroll_y, 100.0).map(str::to_string) == expected
        }
    }
}
