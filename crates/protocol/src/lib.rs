//! VerseQuote Dialog Protocol
//!
//! Types exchanged between the task pane and the dialogs it opens.
//! Dialog pages are addressed by URL under a configurable base; dialogs talk
//! back with JSON messages, one per line when carried over a stream.
//!
//! # Usage
//!
//! ```ignore
//! use versequote_protocol::{DialogMessage, DialogPage, DEFAULT_DIALOG_BASE};
//!
//! let url = DialogPage::About.url(DEFAULT_DIALOG_BASE)?;
//! let msg = DialogMessage::parse(r#"{"action":"close"}"#)?;
//! ```

use serde::{Deserialize, Serialize};
use url::Url;
use versequote_core::Quote;

/// Where dialog pages are served from unless overridden.
pub const DEFAULT_DIALOG_BASE: &str = "https://localhost:3000";

/// Dialog size as a percentage of the host window.
pub const DIALOG_HEIGHT_PERCENT: u8 = 70;
pub const DIALOG_WIDTH_PERCENT: u8 = 50;

// =============================================================================
// Dialog → Task pane Messages
// =============================================================================

/// Messages sent from a dialog back to the task pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum DialogMessage {
    /// Close the dialog and end the session.
    #[serde(rename = "close")]
    Close,
    /// Insert one verse at the cursor.
    #[serde(rename = "ins")]
    Insert { quote: Quote },
}

impl DialogMessage {
    /// Parse one message. Whitespace around the JSON is ignored.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw.trim())
    }

    pub fn to_json(&self) -> String {
        // Only strings and integers; serialization is infallible
        serde_json::to_string(self).unwrap_or_default()
    }
}

// =============================================================================
// Task pane → Dialog
// =============================================================================

/// Pages the task pane can open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPage {
    Settings,
    Help,
    About,
    SearchResults {
        keyword: String,
        version: String,
        exact_match: bool,
    },
}

impl DialogPage {
    pub fn file_name(&self) -> &'static str {
        match self {
            DialogPage::Settings => "settings.html",
            DialogPage::Help => "help.html",
            DialogPage::About => "about.html",
            DialogPage::SearchResults { .. } => "search-results.html",
        }
    }

    /// Absolute page URL under `base`. Query parameters are percent-encoded.
    pub fn url(&self, base: &str) -> Result<Url, url::ParseError> {
        // Without a trailing slash, `join` would replace the last path segment
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{}/", base))?
        };
        let mut url = base.join(self.file_name())?;

        if let DialogPage::SearchResults { keyword, version, exact_match } = self {
            url.query_pairs_mut()
                .append_pair("keyword", keyword)
                .append_pair("version", version)
                .append_pair("exactmatch", if *exact_match { "true" } else { "false" });
        }

        Ok(url)
    }
}

/// A request to open a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub url: Url,
    pub height_percent: u8,
    pub width_percent: u8,
}

impl DialogRequest {
    pub fn new(page: &DialogPage, base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: page.url(base)?,
            height_percent: DIALOG_HEIGHT_PERCENT,
            width_percent: DIALOG_WIDTH_PERCENT,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
