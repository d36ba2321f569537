use std::collections::BTreeMap;

use serde::Serialize;

use crate::feature::{Feature, FeatureStatus};
use crate::roadmap::DomainKey;
use crate::theme::Theme;
use crate::typewriter::TypewriterPhase;

#[derive(Debug, Clone, Serialize)]
pub struct PageDiagnostics {
    pub phase: String,
    pub detail: String,
    pub features: BTreeMap<Feature, FeatureStatus>,
    pub theme: Option<Theme>,
    pub active_section: Option<String>,
    pub roadmap_domain: Option<DomainKey>,
    pub typewriter: Option<TypewriterPhase>,
    pub revealed_elements: usize,
    pub toasts_shown: u64,
    pub wiring_latency_ms: Option<u64>,
    pub budget_breaches: Vec<String>,
    pub last_error: Option<String>,
}

impl Default for PageDiagnostics {
    fn default() -> Self {
        Self {
            phase: "idle".to_string(),
            detail: "page interactions not started".to_string(),
            features: BTreeMap::new(),
            theme: None,
            active_section: None,
            roadmap_domain: None,
            typewriter: None,
            revealed_elements: 0,
            toasts_shown: 0,
            wiring_latency_ms: None,
            budget_breaches: Vec::new(),
            last_error: None,
        }
    }
}

impl PageDiagnostics {
    pub fn set_phase(&mut self, phase: &str, detail: &str) {
        self.phase = phase.to_string();
        self.detail = detail.to_string();
    }

    pub fn record_feature(&mut self, feature: Feature, status: FeatureStatus) {
        match &status {
            FeatureStatus::Attached => tracing::debug!(feature = feature.as_str(), "attached"),
            FeatureStatus::Absent { selector } => {
                tracing::debug!(feature = feature.as_str(), selector, "element absent");
            }
            FeatureStatus::Skipped { reason } => {
                tracing::debug!(feature = feature.as_str(), reason, "skipped");
            }
            FeatureStatus::Failed { message } => {
                tracing::warn!(feature = feature.as_str(), message, "wiring failed");
                self.last_error = Some(format!("{}: {message}", feature.as_str()));
            }
        }
        self.features.insert(feature, status);
    }

    pub fn record_wiring_latency(&mut self, actual_ms: u64, budget_ms: u64) {
        self.wiring_latency_ms = Some(actual_ms);
        if actual_ms > budget_ms {
            self.budget_breaches
                .push(format!("wiring_latency_ms>{budget_ms} (actual={actual_ms})"));
        }
    }

    pub fn attached_count(&self) -> usize {
        self.features
            .values()
            .filter(|status| status.is_attached())
            .count()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn failed_feature_records_last_error() {
        let mut diagnostics = PageDiagnostics::default();
        diagnostics.record_feature(Feature::BackToTop, FeatureStatus::Attached);
        diagnostics.record_feature(
            Feature::ThemeToggle,
            FeatureStatus::Failed {
                message: "storage unavailable".to_string(),
            },
        );
        assert_eq!(diagnostics.attached_count(), 1);
        assert_eq!(
            diagnostics.last_error.as_deref(),
            Some("theme_toggle: storage unavailable")
        );

        diagnostics.set_phase("ready", "all features wired");
        assert!(diagnostics.last_error.is_some());
    }

    #[test]
    fn slow_wiring_is_recorded_as_breach() {
        let mut diagnostics = PageDiagnostics::default();
        diagnostics.record_wiring_latency(12, 50);
        assert!(diagnostics.budget_breaches.is_empty());
        diagnostics.record_wiring_latency(75, 50);
        assert_eq!(diagnostics.wiring_latency_ms, Some(75));
        assert_eq!(
            diagnostics.budget_breaches,
            vec!["wiring_latency_ms>50 (actual=75)".to_string()]
        );
    }

    #[test]
    fn json_keys_features_by_name() {
        let mut diagnostics = PageDiagnostics::default();
        diagnostics.record_feature(Feature::Typewriter, FeatureStatus::skipped("reduced motion"));
        let value: serde_json::Value =
            serde_json::from_str(&diagnostics.to_json()).expect("valid json");
        assert_eq!(value["phase"], "idle");
        assert_eq!(value["features"]["typewriter"]["status"], "skipped");
    }
}
