// UI language selection

/// Languages with translations.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "es"];

/// Used when the stored or host language is unsupported.
pub const DEFAULT_LANGUAGE: &str = "es";

/// Host display language from the POSIX locale variables, e.g. `es_AR.UTF-8` -> `es`.
pub fn host_language() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value.as_str() != "C" && value.as_str() != "POSIX")
        .and_then(|value| two_letter_code(&value))
}

/// Lowercased first two characters of a locale tag.
fn two_letter_code(tag: &str) -> Option<String> {
    let code: String = tag.chars().take(2).collect::<String>().to_lowercase();
    if code.chars().count() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code)
    } else {
        None
    }
}

/// Decide the UI language.
///
/// A stored language wins; otherwise the host language is used. Anything
/// unsupported falls back to [`DEFAULT_LANGUAGE`] with a warning.
pub fn resolve_language(stored: Option<&str>, host: Option<&str>) -> String {
    let candidate = stored
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .or_else(|| host.and_then(two_letter_code));

    match candidate {
        Some(lang) if SUPPORTED_LANGUAGES.contains(&lang.as_str()) => lang,
        Some(lang) => {
            log::warn!(
                "Sorry, the language {} is not supported yet. Setting the default: {}",
                lang, DEFAULT_LANGUAGE
            );
            DEFAULT_LANGUAGE.to_string()
        }
        None => DEFAULT_LANGUAGE.to_string(),
    }
}
