use serde::{Deserialize, Serialize};

pub const LIGHT_THEME_BODY_CLASS: &str = "light-theme";
pub const NAVBAR_LIGHT_CLASS: &str = "navbar-light";
pub const NAVBAR_DARK_CLASS: &str = "navbar-dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Anything other than exactly `light` reads as dark, matching how the stored
    /// flag has always been interpreted.
    pub fn from_stored(raw: &str) -> Self {
        if raw == "light" {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn from_body_class(has_light_class: bool) -> Self {
        if has_light_class {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn presentation(self) -> ThemePresentation {
        let is_light = self == Self::Light;
        ThemePresentation {
            theme: self,
            body_light_class: is_light,
            navbar_light_class: is_light,
            navbar_dark_class: !is_light,
            icon_class: if is_light { "fas fa-moon" } else { "fas fa-sun" },
            aria_label: if is_light {
                "Switch to dark mode"
            } else {
                "Switch to light mode"
            },
        }
    }
}

/// Every DOM mutation that applying a theme performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePresentation {
    pub theme: Theme,
    pub body_light_class: bool,
    pub navbar_light_class: bool,
    pub navbar_dark_class: bool,
    pub icon_class: &'static str,
    pub aria_label: &'static str,
}

impl ThemePresentation {
    pub fn icon_markup(&self) -> String {
        format!("<i class=\"{}\"></i>", self.icon_class)
    }
}

pub trait ThemeStore {
    type Error;

    fn load_theme(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn persist_theme(&mut self, key: &str, theme: Theme) -> Result<(), Self::Error>;
}

/// Applied theme plus the storage key it is persisted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeController {
    storage_key: String,
    default_theme: Theme,
    applied: Option<Theme>,
}

impl ThemeController {
    pub fn new(storage_key: impl Into<String>, default_theme: Theme) -> Self {
        Self {
            storage_key: storage_key.into(),
            default_theme,
            applied: None,
        }
    }

    pub fn applied(&self) -> Option<Theme> {
        self.applied
    }

    /// Resolves the startup theme from storage and applies it once.
    pub fn initialize<S: ThemeStore>(
        &mut self,
        store: &mut S,
    ) -> Result<ThemePresentation, S::Error> {
        let stored = store.load_theme(&self.storage_key)?;
        let theme = match stored.as_deref() {
            Some(raw) if !raw.is_empty() => Theme::from_stored(raw),
            _ => self.default_theme,
        };
        self.apply(store, theme)
    }

    pub fn apply<S: ThemeStore>(
        &mut self,
        store: &mut S,
        theme: Theme,
    ) -> Result<ThemePresentation, S::Error> {
        self.applied = Some(theme);
        let presentation = theme.presentation();
        store.persist_theme(&self.storage_key, theme)?;
        tracing::info!(theme = theme.as_str(), "theme applied");
        Ok(presentation)
    }

    /// Flips the theme read from the page, not from storage.
    pub fn toggle<S: ThemeStore>(
        &mut self,
        store: &mut S,
        current: Theme,
    ) -> Result<ThemePresentation, S::Error> {
        self.apply(store, current.toggled())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryThemeStore {
    pub entries: std::collections::BTreeMap<String, String>,
}

impl ThemeStore for MemoryThemeStore {
    type Error = std::convert::Infallible;

    fn load_theme(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn persist_theme(&mut self, key: &str, theme: Theme) -> Result<(), Self::Error> {
        self.entries
            .insert(key.to_string(), theme.as_str().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcheck::quickcheck;

    #[test]
    fn initialize_defaults_to_dark_and_persists_it() {
        let mut store = MemoryThemeStore::default();
        let mut controller = ThemeController::new("theme", Theme::Dark);
        let presentation = controller.initialize(&mut store).expect("infallible");

        assert_eq!(presentation.theme, Theme::Dark);
        assert!(!presentation.body_light_class);
        assert!(presentation.navbar_dark_class);
        assert_eq!(presentation.icon_class, "fas fa-sun");
        assert_eq!(presentation.aria_label, "Switch to light mode");
        assert_eq!(store.entries.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn initialize_treats_blank_stored_value_as_absent() {
        let mut store = MemoryThemeStore::default();
        store.entries.insert("theme".into(), "".into());
        let mut controller = ThemeController::new("theme", Theme::Dark);
        let presentation = controller.initialize(&mut store).expect("infallible");
        assert_eq!(presentation.theme, Theme::Dark);
    }

    #[test]
    fn light_presentation_swaps_icon_and_navbar_variant() {
        let presentation = Theme::Light.presentation();
        assert!(presentation.body_light_class);
        assert!(presentation.navbar_light_class);
        assert!(!presentation.navbar_dark_class);
        assert_eq!(presentation.icon_markup(), "<i class=\"fas fa-moon\"></i>");
        assert_eq!(presentation.aria_label, "Switch to dark mode");
    }

    #[test]
    fn unknown_stored_value_reads_as_dark() {
        assert_eq!(Theme::from_stored("sepia"), Theme::Dark);
        assert_eq!(Theme::from_stored(" light "), Theme::Dark);
        assert_eq!(Theme::from_stored("Light"), Theme::Dark);
    }

    #[test]
    fn padded_stored_value_initializes_dark() {
        let mut store = MemoryThemeStore::default();
        store.entries.insert("theme".into(), " light ".into());
        let mut controller = ThemeController::new("theme", Theme::Light);
        let presentation = controller.initialize(&mut store).expect("infallible");

        assert_eq!(presentation.theme, Theme::Dark);
        assert_eq!(store.entries.get("theme").map(String::as_str), Some("dark"));
    }

    quickcheck! {
        fn toggle_twice_restores_classes_and_storage(start_light: bool) -> bool {
            let start = Theme::from_body_class(start_light);
            let mut store = MemoryThemeStore::default();
            let mut controller = ThemeController::new("theme", Theme::Dark);
            let initial = controller.apply(&mut store, start).expect("infallible");
            let once = controller.toggle(&mut store, start).expect("infallible");
            let twice = controller.toggle(&mut store, once.theme).expect("infallible");
            twice == initial
                && store.entries.get("theme").map(String::as_str) == Some(start.as_str())
        }
    }
}
