//! Task pane: the user actions of the add-in.
//!
//! Every action that touches the document loads the style settings once,
//! queues its insertions in a single edit context and commits once. A failed
//! remote call produces one localized notice and leaves the document alone.

use versequote_bibleget::{ClientError, LookupService, PreferOrigin};
use versequote_config::{resolve_language, tr, MessageKey, PreferenceStore, Preferences, StoreError};
use versequote_core::{is_valid_reference, Quote, VersionCatalog};
use versequote_engine::{CommitSummary, Document, QuoteFormatter};
use versequote_protocol::{DialogMessage, DialogPage, DialogRequest, DEFAULT_DIALOG_BASE};

use crate::dialog::{DialogChannel, DialogError, DialogHost};

#[derive(Debug)]
pub enum PaneError {
    Lookup(ClientError),
    Store(StoreError),
    Dialog(DialogError),
    /// Version key not offered by the catalog
    UnknownVersion(String),
}

impl std::fmt::Display for PaneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaneError::Lookup(e) => write!(f, "{}", e),
            PaneError::Store(e) => write!(f, "{}", e),
            PaneError::Dialog(e) => write!(f, "{}", e),
            PaneError::UnknownVersion(key) => write!(f, "Unknown version '{}'", key),
        }
    }
}

impl std::error::Error for PaneError {}

impl From<StoreError> for PaneError {
    fn from(e: StoreError) -> Self {
        PaneError::Store(e)
    }
}

impl From<DialogError> for PaneError {
    fn from(e: DialogError) -> Self {
        PaneError::Dialog(e)
    }
}

/// Why a search did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyInput,
    InvalidReference,
    NoVersion,
}

#[derive(Debug)]
pub enum SearchOutcome {
    Skipped(SkipReason),
    Inserted { quotes: Vec<Quote>, commit: CommitSummary },
    Failed(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordOutcome {
    Skipped,
    /// Dialog session ended; `inserted` quotes were committed one by one
    Closed { inserted: usize },
}

pub struct TaskPane<S: PreferenceStore, L: LookupService> {
    prefs: Preferences<S>,
    lookup: L,
    dialog_base: String,
    lang: String,
    host_lang: Option<String>,
    versions: VersionCatalog,
    notice: Option<&'static str>,
    notices: Vec<&'static str>,
}

impl<S: PreferenceStore, L: LookupService> TaskPane<S, L> {
    pub fn new(prefs: Preferences<S>, lookup: L) -> Self {
        Self {
            prefs,
            lookup,
            dialog_base: DEFAULT_DIALOG_BASE.to_string(),
            lang: versequote_config::DEFAULT_LANGUAGE.to_string(),
            host_lang: None,
            versions: VersionCatalog::default(),
            notice: None,
            notices: Vec::new(),
        }
    }

    pub fn with_dialog_base(mut self, base: impl Into<String>) -> Self {
        self.dialog_base = base.into();
        self
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.prefs
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences<S> {
        &mut self.prefs
    }

    pub fn language(&self) -> &str {
        &self.lang
    }

    pub fn versions(&self) -> &VersionCatalog {
        &self.versions
    }

    pub fn selected_version(&self) -> Option<String> {
        self.prefs.selected_version()
    }

    /// The notice currently displayed, if any.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Every notice shown since the pane was created.
    pub fn notices(&self) -> &[&'static str] {
        &self.notices
    }

    pub fn error_message(&self, key: MessageKey) -> &'static str {
        tr(&self.lang, key)
    }

    // ── Startup ─────────────────────────────────────────────────────

    /// Resolve the UI language, then load the version list and preselect one.
    ///
    /// A version list failure is reported as a notice and does not abort startup.
    pub fn startup(&mut self, host_lang: Option<&str>) -> Result<(), PaneError> {
        self.setup_language(host_lang)?;
        match self.load_versions(false) {
            Ok(_) | Err(PaneError::Lookup(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn setup_language(&mut self, host_lang: Option<&str>) -> Result<&str, PaneError> {
        self.host_lang = host_lang.map(str::to_string);
        self.lang = self.prefs.setup_language(host_lang)?;
        Ok(&self.lang)
    }

    /// Resolve the UI language like [`TaskPane::setup_language`] without
    /// writing it back to the store.
    pub fn use_language(&mut self, host_lang: Option<&str>) -> &str {
        self.host_lang = host_lang.map(str::to_string);
        self.lang = resolve_language(self.prefs.language().as_deref(), host_lang);
        &self.lang
    }

    /// Populate the version list from the cache, or from the service when the
    /// cache is empty or `refresh` is set. Returns the number of versions.
    pub fn load_versions(&mut self, refresh: bool) -> Result<usize, PaneError> {
        let cached = if refresh { None } else { self.prefs.cached_versions() };

        let catalog = match cached {
            Some(catalog) => catalog,
            None => match self.lookup.get_versions() {
                Ok(catalog) => {
                    if let Err(e) = self.prefs.cache_versions(&catalog) {
                        log::warn!("Could not cache version list: {}", e);
                    }
                    catalog
                }
                Err(e) => {
                    self.notify(MessageKey::ErrorGetVersions);
                    log::error!("Loading versions failed: {}", e);
                    return Err(PaneError::Lookup(e));
                }
            },
        };

        self.versions = catalog;
        self.apply_preferred_version();
        Ok(self.versions.len())
    }

    fn apply_preferred_version(&mut self) {
        let saved = self.prefs.selected_version();
        let user_lang = self.host_lang.as_deref().map(two_letter).unwrap_or_default();
        let Some(key) = self.versions.preferred(saved.as_deref(), &user_lang) else {
            return;
        };
        let key = key.to_string();
        if let Err(e) = self.prefs.save_selected_version(&key) {
            log::warn!("Could not save selected version: {}", e);
        }
    }

    pub fn select_version(&mut self, key: &str) -> Result<(), PaneError> {
        if !self.versions.is_empty() && !self.versions.contains(key) {
            return Err(PaneError::UnknownVersion(key.to_string()));
        }
        self.prefs.save_selected_version(key)?;
        Ok(())
    }

    // ── Search by reference ─────────────────────────────────────────

    /// Live validation of the reference field. Empty input clears the notice.
    pub fn validate_reference_input(&mut self, input: &str) -> bool {
        if input.trim().is_empty() {
            self.notice = None;
            return true;
        }
        if is_valid_reference(input) {
            self.notice = None;
            true
        } else {
            log::debug!("Rejected reference: {}", input.trim());
            self.notify(MessageKey::ErrorBadQuote);
            false
        }
    }

    /// Look up `input` and insert every verse at the document cursor.
    ///
    /// `version` overrides the selected version for this search only.
    pub fn search_by_reference(
        &mut self,
        document: &mut Document,
        input: &str,
        version: Option<&str>,
        origin: Option<PreferOrigin>,
    ) -> SearchOutcome {
        if input.trim().is_empty() {
            return SearchOutcome::Skipped(SkipReason::EmptyInput);
        }
        if !self.validate_reference_input(input) {
            return SearchOutcome::Skipped(SkipReason::InvalidReference);
        }
        let Some(version) = version.map(str::to_string).or_else(|| self.prefs.selected_version())
        else {
            return SearchOutcome::Skipped(SkipReason::NoVersion);
        };

        let quotes = match self.lookup.get_by_quote(input, Some(&version), origin) {
            Ok(quotes) => quotes,
            Err(e) => {
                self.notify(MessageKey::ErrorSearchByQuote);
                log::error!("Search by reference '{}' failed: {}", input, e);
                return SearchOutcome::Failed(e);
            }
        };

        let settings = self.prefs.style_settings();
        let mut edit = document.begin_edit();
        {
            let mut range = edit.selection();
            QuoteFormatter::new(&settings, &version).insert_quotes(&mut range, &quotes);
        }
        let commit = edit.commit();
        SearchOutcome::Inserted { quotes, commit }
    }

    // ── Dialogs ─────────────────────────────────────────────────────

    /// Open the keyword search results dialog and insert every quote it sends
    /// until it closes.
    pub fn keyword_search(
        &mut self,
        document: &mut Document,
        host: &mut dyn DialogHost,
        keyword: &str,
        exact_match: bool,
        version: Option<&str>,
    ) -> Result<KeywordOutcome, PaneError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(KeywordOutcome::Skipped);
        }

        let version = version
            .map(str::to_string)
            .or_else(|| self.prefs.selected_version())
            .unwrap_or_default();
        let page = DialogPage::SearchResults {
            keyword: keyword.to_string(),
            version: version.clone(),
            exact_match,
        };
        let channel = match self.open_dialog(host, &page) {
            Ok((_, channel)) => channel,
            Err(e) => {
                self.notify(MessageKey::ErrorSearchByKeyword);
                log::error!("Keyword search '{}' failed: {}", keyword, e);
                return Err(e);
            }
        };

        let inserted = self.run_session(host, &channel, Some(document), Some(&version));
        Ok(KeywordOutcome::Closed { inserted })
    }

    pub fn show_settings(&mut self, host: &mut dyn DialogHost) -> Result<DialogRequest, PaneError> {
        self.show_page(host, DialogPage::Settings)
    }

    pub fn show_help(&mut self, host: &mut dyn DialogHost) -> Result<DialogRequest, PaneError> {
        self.show_page(host, DialogPage::Help)
    }

    pub fn show_about(&mut self, host: &mut dyn DialogHost) -> Result<DialogRequest, PaneError> {
        self.show_page(host, DialogPage::About)
    }

    /// Insert one quote sent by a dialog, in its own edit batch.
    ///
    /// The version label shows `version`, or the selected version when `None`.
    pub fn insert_result(
        &self,
        document: &mut Document,
        quote: &Quote,
        version: Option<&str>,
    ) -> CommitSummary {
        let settings = self.prefs.style_settings();
        let version = version
            .map(str::to_string)
            .or_else(|| self.prefs.selected_version())
            .unwrap_or_default();

        let mut edit = document.begin_edit();
        {
            let mut range = edit.selection();
            QuoteFormatter::new(&settings, &version).insert_quote(&mut range, quote, true);
        }
        edit.commit()
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn show_page(&mut self, host: &mut dyn DialogHost, page: DialogPage) -> Result<DialogRequest, PaneError> {
        let (request, channel) = self.open_dialog(host, &page)?;
        self.run_session(host, &channel, None, None);
        Ok(request)
    }

    fn open_dialog(
        &self,
        host: &mut dyn DialogHost,
        page: &DialogPage,
    ) -> Result<(DialogRequest, DialogChannel), PaneError> {
        let request = DialogRequest::new(page, &self.dialog_base).map_err(DialogError::from)?;
        let channel = host.open(&request)?;
        Ok((request, channel))
    }

    /// Handle dialog messages in order until `close` or hang-up.
    fn run_session(
        &self,
        host: &mut dyn DialogHost,
        channel: &DialogChannel,
        mut document: Option<&mut Document>,
        version: Option<&str>,
    ) -> usize {
        let mut inserted = 0;
        while let Some(raw) = channel.recv() {
            match DialogMessage::parse(&raw) {
                Ok(DialogMessage::Close) => break,
                Ok(DialogMessage::Insert { quote }) => match document.as_deref_mut() {
                    Some(doc) => {
                        self.insert_result(doc, &quote, version);
                        inserted += 1;
                    }
                    None => log::warn!("Ignoring insert from a dialog without a document"),
                },
                Err(e) => log::warn!("Ignoring malformed dialog message: {}", e),
            }
        }
        host.close();
        inserted
    }

    fn notify(&mut self, key: MessageKey) {
        let message = tr(&self.lang, key);
        self.notice = Some(message);
        self.notices.push(message);
    }
}

fn two_letter(lang: &str) -> String {
    lang.chars().take(2).collect::<String>().to_lowercase()
}
