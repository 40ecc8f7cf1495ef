//! CLI Exit Code Registry
//!
//! Single source of truth for `vquote` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | Usage error (bad args, unknown version/language) |
//! | 3    | Reference is not valid                          |
//! | 4    | Remote lookup failed (quote or version list)    |
//! | 5    | Preference store could not be written           |
//! | 6    | Document could not be read or written           |
//! | 7    | Dialog could not be opened                      |

use versequote_cli::PaneError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown version or language, bad settings file.
pub const EXIT_USAGE: u8 = 2;

/// The reference failed validation; nothing was looked up.
pub const EXIT_INVALID_REFERENCE: u8 = 3;

/// Network, HTTP, parse or service error from the lookup service.
pub const EXIT_LOOKUP: u8 = 4;

/// Preference file could not be written.
pub const EXIT_STORE: u8 = 5;

/// Document file could not be read, parsed or written.
pub const EXIT_DOCUMENT: u8 = 6;

/// The host refused or failed to open a dialog.
pub const EXIT_DIALOG: u8 = 7;

/// Map a task pane error to its exit code.
pub fn pane_exit_code(err: &PaneError) -> u8 {
    match err {
        PaneError::Lookup(_) => EXIT_LOOKUP,
        PaneError::Store(_) => EXIT_STORE,
        PaneError::Dialog(_) => EXIT_DIALOG,
        PaneError::UnknownVersion(_) => EXIT_USAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use versequote_bibleget::ClientError;
    use versequote_cli::DialogError;
    use versequote_config::StoreError;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_INVALID_REFERENCE,
            EXIT_LOOKUP,
            EXIT_STORE,
            EXIT_DOCUMENT,
            EXIT_DIALOG,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn test_pane_error_mapping() {
        assert_eq!(pane_exit_code(&PaneError::Lookup(ClientError::Http(500, String::new()))), EXIT_LOOKUP);
        assert_eq!(pane_exit_code(&PaneError::Store(StoreError::Io("ro".into()))), EXIT_STORE);
        assert_eq!(pane_exit_code(&PaneError::Dialog(DialogError::AlreadyOpen)), EXIT_DIALOG);
        assert_eq!(pane_exit_code(&PaneError::UnknownVersion("X".into())), EXIT_USAGE);
    }
}
