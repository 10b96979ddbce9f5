use std::collections::BTreeSet;

use ui::widget::POOL_SIZE;

/// Every locale bundle is embedded here; register new locales in `LOCALES`.
const EN_US: &str = include_str!("../i18n/en-US/lifebar-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/lifebar-ui.ftl");
const FR_FR: &str = include_str!("../i18n/fr-FR/lifebar-ui.ftl");

const LOCALES: &[(&str, &str)] = &[("en-US", EN_US), ("es-ES", ES_ES), ("fr-FR", FR_FR)];

/// Message ids defined in a Fluent source (comments, terms and attributes skipped).
fn keys(src: &str) -> Vec<String> {
    src.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(['#', '.', '-']))
        .filter_map(|line| line.split_once('=').map(|(key, _)| key.trim()))
        .filter(|key| !key.is_empty() && !key.contains(char::is_whitespace))
        .map(str::to_string)
        .collect()
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback: BTreeSet<_> = keys(EN_US).into_iter().collect();
    assert!(!fallback.is_empty(), "Fallback (en-US) contains no keys.");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        let present: BTreeSet<_> = keys(src).into_iter().collect();
        let missing: Vec<_> = fallback.difference(&present).cloned().collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing: {}", missing.join(", ")));
        }
    }

    assert!(
        failures.is_empty(),
        "Translation completeness check failed:\n{}",
        failures.join("\n")
    );
}

#[test]
fn no_locale_defines_a_key_twice() {
    for (locale, src) in LOCALES {
        let all = keys(src);
        let unique: BTreeSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len(), "duplicate keys in {locale}");
    }
}

#[test]
fn caption_pools_are_complete() {
    let fallback = keys(EN_US);
    for tier in ["early", "late"] {
        for index in 0..POOL_SIZE {
            let id = format!("message-{tier}-{index}");
            assert!(fallback.contains(&id), "missing caption template {id}");
        }
        let extra = format!("message-{tier}-{POOL_SIZE}");
        assert!(!fallback.contains(&extra), "unreachable caption template {extra}");
    }
}
