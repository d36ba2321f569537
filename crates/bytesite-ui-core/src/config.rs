use serde::{Deserialize, Serialize};

use crate::theme::Theme;

pub const DEFAULT_THEME_STORAGE_KEY: &str = "theme";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("config overrides are not valid JSON: {0}")]
    InvalidJson(String),
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    #[error("{field} must be within 0..=1 (got {value})")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("theme storage key must not be empty")]
    EmptyStorageKey,
}

/// Tunables for every page interaction. Each field defaults to the value the
/// production page ships with, so a partial override only changes what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub back_to_top_threshold: f64,
    pub bg_shift_divisor: f64,
    pub bg_shift_max: f64,
    pub navbar_offset: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub reveal_delay_cap_ms: u32,
    pub hero_tilt_strength: f64,
    pub typewriter_interval_ms: u32,
    pub toast_lifetime_ms: u32,
    pub roadmap_scroll_offset: f64,
    pub theme_storage_key: String,
    pub default_theme: Theme,
    pub log_level: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            back_to_top_threshold: 400.0,
            bg_shift_divisor: 8.0,
            bg_shift_max: 80.0,
            navbar_offset: 100.0,
            reveal_threshold: 0.12,
            reveal_root_margin: "0px 0px -10% 0px".to_string(),
            reveal_delay_cap_ms: 400,
            hero_tilt_strength: 12.0,
            typewriter_interval_ms: 45,
            toast_lifetime_ms: 6_000,
            roadmap_scroll_offset: 80.0,
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            default_theme: Theme::Dark,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl InteractionConfig {
    /// Parses a JSON object of overrides and validates the merged result.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(trimmed)
            .map_err(|error| ConfigError::InvalidJson(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bg_shift_divisor <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "bg_shift_divisor",
            });
        }
        if self.typewriter_interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "typewriter_interval_ms",
            });
        }
        if self.toast_lifetime_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "toast_lifetime_ms",
            });
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::OutOfUnitRange {
                field: "reveal_threshold",
                value: self.reveal_threshold,
            });
        }
        if self.theme_storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_overrides_yield_defaults() {
        let config = InteractionConfig::from_json("  ").expect("empty overrides");
        assert_eq!(config, InteractionConfig::default());
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config = InteractionConfig::from_json(
            r#"{"back_to_top_threshold": 250, "default_theme": "light"}"#,
        )
        .expect("partial overrides");
        assert_eq!(config.back_to_top_threshold, 250.0);
        assert_eq!(config.default_theme, Theme::Light);
        assert_eq!(config.typewriter_interval_ms, 45);
        assert_eq!(config.theme_storage_key, "theme");
    }

    #[test]
    fn rejects_zero_divisor_and_bad_threshold() {
        assert_eq!(
            InteractionConfig::from_json(r#"{"bg_shift_divisor": 0}"#),
            Err(ConfigError::NonPositive {
                field: "bg_shift_divisor"
            })
        );
        assert!(matches!(
            InteractionConfig::from_json(r#"{"reveal_threshold": 1.5}"#),
            Err(ConfigError::OutOfUnitRange { .. })
        ));
        assert!(matches!(
            InteractionConfig::from_json("{not json"),
            Err(ConfigError::InvalidJson(_))
        ));
    }
}
