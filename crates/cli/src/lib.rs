//! VerseQuote task pane, usable without the `vquote` binary.

pub mod dialog;
pub mod taskpane;

pub use dialog::{DialogChannel, DialogError, DialogHost, ReaderDialogHost};
pub use taskpane::{KeywordOutcome, PaneError, SearchOutcome, SkipReason, TaskPane};
