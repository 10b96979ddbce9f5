//! Source-level i18n guard: every `t!("…")` key used in `src/` exists in the
//! fallback bundle, and every locale uses the same placeables per message as
//! the fallback (a translated caption that drops `$progress` would silently
//! render without the number).

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "lifebar-ui.ftl";
const I18N_DIR: &str = "i18n";

/// Message id → set of `$variables` referenced in its value.
fn parse_messages(content: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut messages = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let Some((id, value)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() || !id.chars().all(valid_key_char) {
            continue;
        }
        messages.insert(id.to_string(), placeables(value));
    }
    messages
}

fn placeables(value: &str) -> BTreeSet<String> {
    let mut vars = BTreeSet::new();
    let mut rest = value;
    while let Some(pos) = rest.find('$') {
        let tail = &rest[pos + 1..];
        let end = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(tail.len());
        if end > 0 {
            vars.insert(tail[..end].to_string());
        }
        rest = &tail[end..];
    }
    vars
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Collect literal first arguments of `t!("…")` under `root`.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            for entry in fs::read_dir(&path).into_iter().flatten().flatten() {
                stack.push(entry.path());
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for chunk in content.split("t!(\"").skip(1) {
            if let Some(end) = chunk.find('"') {
                let key = &chunk[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }

    found
}

fn locale_files(i18n_root: &Path) -> Vec<(String, PathBuf)> {
    let mut files: Vec<_> = fs::read_dir(i18n_root)
        .into_iter()
        .flatten()
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            Some((name, entry.path().join(FTL_FILENAME)))
        })
        .collect();
    files.sort();
    files
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = fs::read_to_string(crate_root.join(I18N_DIR).join("en-US").join(FTL_FILENAME))
        .expect("fallback FTL readable");
    let fallback = parse_messages(&fallback);

    let used = referenced_keys(&crate_root.join("src"));
    assert!(used.contains("export-failed"), "scanner found no keys");

    let missing: Vec<_> = used.iter().filter(|k| !fallback.contains_key(*k)).collect();
    assert!(
        missing.is_empty(),
        "Referenced translation keys missing in fallback: {missing:?}"
    );
}

#[test]
fn locales_share_fallback_placeables() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let i18n_root = crate_root.join(I18N_DIR);
    let fallback = parse_messages(
        &fs::read_to_string(i18n_root.join("en-US").join(FTL_FILENAME))
            .expect("fallback FTL readable"),
    );
    assert_eq!(
        fallback.get("message-early-0").map(|v| v.len()),
        Some(2),
        "fallback captions lost their placeables"
    );

    let mut report = Vec::new();
    for (locale, path) in locale_files(&i18n_root) {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("locale {locale} missing {FTL_FILENAME}"));
        let messages = parse_messages(&content);
        for (id, vars) in &fallback {
            match messages.get(id) {
                None => report.push(format!("{locale}: missing {id}")),
                Some(found) if found != vars => report.push(format!(
                    "{locale}: {id} uses {found:?}, fallback uses {vars:?}"
                )),
                Some(_) => {}
            }
        }
    }

    assert!(report.is_empty(), "Locale drift:\n  {}", report.join("\n  "));
}
