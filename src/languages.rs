//! Supported translation target languages

use serde::Serialize;

use crate::error::CatalogError;

/// Language the dataset is authored in. Translating to it is a no-op.
pub const SOURCE_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

const fn lang(code: &'static str, name: &'static str, native_name: &'static str) -> Language {
    Language { code, name, native_name }
}

/// Selector order: English first, then the rest. Each code appears once.
pub const LANGUAGES: &[Language] = &[
    lang("en", "English", "English"),
    lang("hi", "Hindi", "हिन्दी"),
    lang("es", "Spanish", "Español"),
    lang("fr", "French", "Français"),
    lang("de", "German", "Deutsch"),
    lang("it", "Italian", "Italiano"),
    lang("pt", "Portuguese", "Português"),
    lang("ja", "Japanese", "日本語"),
    lang("ko", "Korean", "한국어"),
    lang("zh", "Chinese", "中文"),
    lang("ar", "Arabic", "العربية"),
    lang("ru", "Russian", "Русский"),
    lang("ta", "Tamil", "தமிழ்"),
    lang("te", "Telugu", "తెలుగు"),
    lang("bn", "Bengali", "বাংলা"),
    lang("mr", "Marathi", "मराठी"),
    lang("gu", "Gujarati", "ગુજરાતી"),
    lang("kn", "Kannada", "ಕನ್ನಡ"),
    lang("ml", "Malayalam", "മലയാളം"),
    lang("or", "Odia", "ଓଡ଼ିଆ"),
    lang("pa", "Punjabi", "ਪੰਜਾਬੀ"),
    lang("ur", "Urdu", "اردو"),
];

/// Look up a language by code (case-insensitive).
pub fn find(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

pub fn is_supported(code: &str) -> bool {
    find(code).is_some()
}

/// Reject a language list that repeats a code.
pub fn validate_unique(languages: &[Language]) -> Result<(), CatalogError> {
    for (i, language) in languages.iter().enumerate() {
        if languages[..i].iter().any(|l| l.code == language.code) {
            return Err(CatalogError::DuplicateLanguage(language.code.to_string()));
        }
    }
    Ok(())
}
