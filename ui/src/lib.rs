//! Shared UI crate for Lifebar. The widget, its calculations and the export
//! pipeline live here; the `web` and `desktop` crates only launch it.

use dioxus::prelude::*;

pub mod core;
pub mod export;
pub mod i18n;
pub mod views;
pub mod widget;

pub mod components {
    pub mod app_header;
    pub use app_header::AppHeader;
}

#[cfg(test)]
mod tests;

/// Unified theme, loaded as an asset by the web launcher.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");

/// Same theme as a string for launchers that inline it.
pub const THEME_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));
