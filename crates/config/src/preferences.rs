// Typed access to the persisted preference keys

use versequote_core::VersionCatalog;

use crate::language::resolve_language;
use crate::settings::StyleSettings;
use crate::store::{PreferenceStore, StoreError};

pub const KEY_LANGUAGE: &str = "bible.i18n.lang";
pub const KEY_SELECTED_VERSION: &str = "bible.selectedversion";
pub const KEY_VERSIONS: &str = "bible.versions";
pub const KEY_SETTINGS: &str = "bible.settings";

/// Typed view over a [`PreferenceStore`].
///
/// Absent or malformed values read as `None` (or the documented defaults);
/// callers never see a parse error from stored data.
#[derive(Debug, Clone)]
pub struct Preferences<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ── Version selection ───────────────────────────────────────────

    pub fn selected_version(&self) -> Option<String> {
        self.store.get(KEY_SELECTED_VERSION).filter(|v| !v.is_empty())
    }

    pub fn save_selected_version(&mut self, key: &str) -> Result<(), StoreError> {
        self.store.set(KEY_SELECTED_VERSION, key)
    }

    // ── Language ────────────────────────────────────────────────────

    pub fn language(&self) -> Option<String> {
        self.store.get(KEY_LANGUAGE).filter(|v| !v.is_empty())
    }

    pub fn set_language(&mut self, lang: &str) -> Result<(), StoreError> {
        self.store.set(KEY_LANGUAGE, lang)
    }

    /// Resolve the UI language against the host language and persist it.
    pub fn setup_language(&mut self, host: Option<&str>) -> Result<String, StoreError> {
        let stored = self.language();
        let lang = resolve_language(stored.as_deref(), host);
        self.set_language(&lang)?;
        Ok(lang)
    }

    // ── Cached version catalog ──────────────────────────────────────

    pub fn cached_versions(&self) -> Option<VersionCatalog> {
        let json = self.store.get(KEY_VERSIONS)?;
        match serde_json::from_str::<VersionCatalog>(&json) {
            Ok(catalog) if !catalog.is_empty() => Some(catalog),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Ignoring malformed cached version list: {}", e);
                None
            }
        }
    }

    pub fn cache_versions(&mut self, catalog: &VersionCatalog) -> Result<(), StoreError> {
        let json = serde_json::to_string(catalog).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.store.set(KEY_VERSIONS, &json)
    }

    pub fn clear_cached_versions(&mut self) -> Result<(), StoreError> {
        self.store.remove(KEY_VERSIONS)
    }

    // ── Style settings ──────────────────────────────────────────────

    /// The style sheet to use for the next insertion.
    ///
    /// An override, when present and valid, replaces the defaults entirely.
    pub fn style_settings(&self) -> StyleSettings {
        let Some(json) = self.store.get(KEY_SETTINGS) else {
            return StyleSettings::default();
        };
        if json.trim().is_empty() {
            return StyleSettings::default();
        }
        match StyleSettings::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Error parsing stored style settings: {}; using defaults", e);
                StyleSettings::default()
            }
        }
    }

    pub fn save_style_settings(&mut self, settings: &StyleSettings) -> Result<(), StoreError> {
        let json = settings.to_json().map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.store.set(KEY_SETTINGS, &json)
    }

    pub fn reset_style_settings(&mut self) -> Result<(), StoreError> {
        self.store.remove(KEY_SETTINGS)
    }
}
