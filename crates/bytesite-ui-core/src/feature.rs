use serde::Serialize;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    SmoothNavigation,
    BackToTop,
    ThemeToggle,
    BackgroundShift,
    ActiveSection,
    RevealAnimations,
    HeroParallax,
    NotePlacement,
    Typewriter,
    ApplicationForm,
    RoadmapSwitcher,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SmoothNavigation => "smooth_navigation",
            Self::BackToTop => "back_to_top",
            Self::ThemeToggle => "theme_toggle",
            Self::BackgroundShift => "background_shift",
            Self::ActiveSection => "active_section",
            Self::RevealAnimations => "reveal_animations",
            Self::HeroParallax => "hero_parallax",
            Self::NotePlacement => "note_placement",
            Self::Typewriter => "typewriter",
            Self::ApplicationForm => "application_form",
            Self::RoadmapSwitcher => "roadmap_switcher",
        }
    }
}

/// Outcome of wiring one feature. A feature whose elements are missing
/// reports `Absent` and leaves every other feature untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum FeatureStatus {
    Attached,
    Absent { selector: String },
    Skipped { reason: String },
    Failed { message: String },
}

impl FeatureStatus {
    pub fn absent(selector: impl Into<String>) -> Self {
        Self::Absent {
            selector: selector.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached)
    }
}

impl From<Result<FeatureStatus, String>> for FeatureStatus {
    fn from(result: Result<FeatureStatus, String>) -> Self {
        result.unwrap_or_else(|message| Self::Failed { message })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPreference {
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn from_media_match(matches: bool) -> Self {
        if matches { Self::Reduced } else { Self::Full }
    }

    pub fn allows_animation(self) -> bool {
        self == Self::Full
    }

    /// Status for a motion-gated feature, or `None` when it may proceed.
    pub fn gate(self) -> Option<FeatureStatus> {
        if self.allows_animation() {
            None
        } else {
            Some(FeatureStatus::skipped("reduced motion requested"))
        }
    }
}

/// Whether a `document.readyState` value means parsing has finished.
pub fn document_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reduced_motion_skips_gated_features() {
        assert_eq!(MotionPreference::from_media_match(false).gate(), None);
        assert_eq!(
            MotionPreference::from_media_match(true).gate(),
            Some(FeatureStatus::skipped("reduced motion requested"))
        );
    }

    #[test]
    fn only_loading_state_defers_wiring() {
        assert!(!document_parsed("loading"));
        assert!(document_parsed("interactive"));
        assert!(document_parsed("complete"));
    }

    #[test]
    fn wiring_errors_become_failed_status() {
        let status: FeatureStatus = Err::<FeatureStatus, _>("listener rejected".to_string()).into();
        assert_eq!(
            status,
            FeatureStatus::Failed {
                message: "listener rejected".to_string()
            }
        );
        assert!(FeatureStatus::from(Ok(FeatureStatus::Attached)).is_attached());
    }

    #[test]
    fn status_serializes_with_tag() {
        let json = serde_json::to_string(&FeatureStatus::absent("#backToTop")).expect("serialize");
        assert_eq!(json, r##"{"status":"absent","selector":"#backToTop"}"##);
    }
}
