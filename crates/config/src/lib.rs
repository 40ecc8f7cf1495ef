// Configuration loading
// Everything persisted lives under ~/.config/versequote (or $VERSEQUOTE_CONFIG_DIR)

pub mod i18n;
pub mod language;
pub mod preferences;
pub mod settings;
pub mod store;

use std::path::PathBuf;

pub use i18n::{tr, MessageKey};
pub use language::{host_language, resolve_language, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
pub use preferences::Preferences;
pub use settings::{
    BookChapterStyle, BookPresentation, LabelPosition, ParagraphStyle, StyleSettings, TextStyle,
    VerseStyle, VersionLabelStyle,
};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError};

/// Environment variable that relocates the configuration directory.
pub const CONFIG_DIR_ENV: &str = "VERSEQUOTE_CONFIG_DIR";

/// Directory holding every VerseQuote preference file.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("versequote")
}
