// User-facing message translations (en, es)

use crate::language::DEFAULT_LANGUAGE;

/// Identifiers for every localized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ErrorBadQuote,
    ErrorSearchByQuote,
    ErrorGetVersions,
    ErrorSearchByKeyword,
}

impl MessageKey {
    /// Stable identifier, as used by the dialog pages.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::ErrorBadQuote => "ERROR_BAD_QUOTE",
            MessageKey::ErrorSearchByQuote => "ERROR_SEARCH_BY_QUOTE",
            MessageKey::ErrorGetVersions => "ERROR_GET_VERSIONS",
            MessageKey::ErrorSearchByKeyword => "ERROR_SEARCH_BY_KEYWORD",
        }
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ErrorBadQuote => "The quote is not valid. Example: Jn 3:16-18",
        MessageKey::ErrorSearchByQuote => "The quote could not be retrieved. Please try again later.",
        MessageKey::ErrorGetVersions => "The list of Bible versions could not be loaded.",
        MessageKey::ErrorSearchByKeyword => "The keyword search could not be opened.",
    }
}

fn spanish(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ErrorBadQuote => "La cita no es válida. Ejemplo: Jn 3:16-18",
        MessageKey::ErrorSearchByQuote => "No se pudo obtener la cita. Inténtelo más tarde.",
        MessageKey::ErrorGetVersions => "No se pudo cargar la lista de versiones de la Biblia.",
        MessageKey::ErrorSearchByKeyword => "No se pudo abrir la búsqueda por palabra clave.",
    }
}

/// Translate `key` into `lang`. Unsupported languages use the default language.
pub fn tr(lang: &str, key: MessageKey) -> &'static str {
    let lang = if crate::SUPPORTED_LANGUAGES.contains(&lang) { lang } else { DEFAULT_LANGUAGE };
    match lang {
        "en" => english(key),
        _ => spanish(key),
    }
}
