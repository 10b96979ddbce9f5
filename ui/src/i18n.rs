//! Localized strings for the widget, captions included.
//!
//! Bundles live under `i18n/<locale>/lifebar-ui.ftl` and are embedded at
//! compile time; `en-US` is the reference set every other locale must match.
//! Lookups go through [`t!`](crate::t), which checks keys and arguments against
//! the reference bundle when the crate is built.
//!
//! Captions end up inside exported images, where the invisible directional
//! isolation marks Fluent puts around arguments would render as stray glyphs,
//! so isolation is turned off whenever bundles are (re)loaded.
use std::sync::Once;

use dioxus::logger::tracing::{debug, warn};
use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// `t!("key")` or `t!("key", arg = value, ...)` against the shared [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Bundle file stem, shared by every locale directory.
const DOMAIN: &str = "lifebar-ui";
const REFERENCE_LOCALE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let reference: LanguageIdentifier = REFERENCE_LOCALE
        .parse()
        .expect("reference locale is a valid identifier");
    FluentLanguageLoader::new(DOMAIN, reference)
});

static INIT: Once = Once::new();

/// Load bundles for the user's preferred locales. Safe to call on every render.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = load(&requested) {
            warn!("i18n: locale selection failed ({err}), using {REFERENCE_LOCALE}");
        }
    });
}

/// Switch to `tag` at runtime. Tags that do not parse are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        debug!("i18n: ignoring malformed locale tag {tag:?}");
        return Ok(());
    };
    load(&[lang])
}

fn load(requested: &[LanguageIdentifier]) -> Result<(), i18n_embed::I18nEmbedError> {
    let selected = i18n_embed::select(&*LOADER, &Localizations, requested);
    // Applies to whatever bundles are loaded now, even after a failed select.
    LOADER.set_use_isolating(false);
    selected.map(|_| ())
}

/// Locale directories embedded in the binary, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs: Vec<String> = Localizations::iter()
        .filter_map(|path| path.split_once('/').map(|(dir, _)| dir.to_owned()))
        .collect();
    langs.sort_unstable();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
