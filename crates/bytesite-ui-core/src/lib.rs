#![cfg_attr(test, allow(clippy::expect_used, clippy::panic))]
//! Page interaction state for the BYTESITE landing and roadmap pages.
//!
//! Everything here is a pure function of an environment snapshot or a small
//! explicit state machine. The browser glue in the web shell reads the DOM,
//! calls into this crate, and writes the result back.

pub mod config;
pub mod diagnostics;
pub mod feature;
pub mod form;
pub mod layout;
pub mod query;
pub mod reveal;
pub mod roadmap;
pub mod scroll;
pub mod theme;
pub mod toast;
pub mod typewriter;

pub use config::{ConfigError, InteractionConfig};
pub use diagnostics::PageDiagnostics;
pub use feature::{Feature, FeatureStatus, MotionPreference, document_parsed};
pub use query::QueryError;
pub use roadmap::{DomainKey, RoadmapSwitcher, RoadmapView, VisiblePanel};
pub use theme::{Theme, ThemeController, ThemePresentation, ThemeStore};
