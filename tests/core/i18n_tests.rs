//! Tests for language selection
//!
//! Tests cover:
//! - Language enum methods (locale_code, display_name, all, locale)
//! - Default language selection
//! - Runtime locale resolution
//! - Serialization/deserialization

use std::collections::HashMap;

use chrono::Locale;
use ruuvi_monitor::i18n::Language;
use ruuvi_monitor::Preset;

#[test]
fn test_language_default_is_english() {
    assert_eq!(Language::default(), Language::English);
}

#[test]
fn test_language_locale_codes() {
    assert_eq!(Language::English.locale_code(), "en");
    assert_eq!(Language::Finnish.locale_code(), "fi");
    assert_eq!(Language::Spanish.locale_code(), "es");
}

#[test]
fn test_language_display_names_are_native() {
    assert_eq!(Language::English.display_name(), "English");
    assert_eq!(Language::Finnish.display_name(), "Suomi");
    assert_eq!(Language::Spanish.display_name(), "Español");
}

#[test]
fn test_language_chrono_locales() {
    assert_eq!(Language::English.locale(), Locale::en_US);
    assert_eq!(Language::Finnish.locale(), Locale::fi_FI);
    assert_eq!(Language::German.locale(), Locale::de_DE);
}

#[test]
fn test_language_all_returns_all_languages() {
    let all = Language::all();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0], Language::English);
    assert!(all.contains(&Language::Swedish));
}

#[test]
fn test_language_roundtrip_by_code() {
    for lang in Language::all() {
        assert_eq!(Language::from_locale_code(lang.locale_code()), Some(*lang));
    }
}

#[test]
fn test_language_serde_uses_variant_names() {
    let json = serde_json::to_string(&Language::Finnish).unwrap();
    assert_eq!(json, "\"Finnish\"");
    let lang: Language = serde_json::from_str("\"Spanish\"").unwrap();
    assert_eq!(lang, Language::Spanish);
}

// ============================================
// Runtime Locale Tests
// ============================================

fn resolve(env: &[(&str, &str)]) -> Language {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Language::from_locale_vars(|name| env.get(name).cloned())
}

#[test]
fn test_runtime_locale_maps_to_language() {
    assert_eq!(resolve(&[("LANG", "fi_FI.UTF-8")]), Language::Finnish);
    assert_eq!(resolve(&[("LC_TIME", "de_DE"), ("LANG", "en_US")]), Language::German);
    assert_eq!(
        resolve(&[("LC_ALL", "fi_FI.UTF-8"), ("LANG", "fi_FI.UTF-8")]),
        Language::Finnish
    );
}

#[test]
fn test_runtime_locale_falls_back_to_english() {
    assert_eq!(resolve(&[]), Language::English);
    assert_eq!(resolve(&[("LANG", "C.UTF-8")]), Language::English);
    assert_eq!(resolve(&[("LANG", "pt_BR")]), Language::English);
}

#[test]
fn test_finnish_locale_gives_finnish_weekdays() {
    let w = Preset::Week2
        .window_with(
            14,
            chrono::Utc,
            ruuvi_monitor::FixedClock::at_timestamp(1_700_000_000).unwrap(),
            resolve(&[("LC_ALL", "fi_FI.UTF-8")]).locale(),
        )
        .unwrap();
    assert_eq!(w.locale(), Locale::fi_FI);
    let english = Preset::Week2
        .window_with(
            14,
            chrono::Utc,
            ruuvi_monitor::FixedClock::at_timestamp(1_700_000_000).unwrap(),
            Locale::en_US,
        )
        .unwrap();
    assert_ne!(w.label(0).unwrap(), english.label(0).unwrap());
}

#[test]
fn test_default_window_uses_runtime_locale() {
    let w = Preset::Week2.window(14).unwrap();
    assert_eq!(w.locale(), Language::from_env().locale());
}
