//! Dialog hosting for the task pane.
//!
//! A [`DialogHost`] opens a [`DialogRequest`] and hands back a
//! [`DialogChannel`]: the raw messages the dialog sends until it is closed.
//! Messages are delivered one at a time over a `std::sync::mpsc` channel.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use versequote_protocol::DialogRequest;

#[derive(Debug)]
pub enum DialogError {
    /// Another dialog is still open
    AlreadyOpen,
    /// Page URL could not be built
    Url(String),
    /// The host failed to display the dialog
    Open(String),
}

impl std::fmt::Display for DialogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogError::AlreadyOpen => write!(f, "A dialog is already open"),
            DialogError::Url(msg) => write!(f, "Invalid dialog URL: {}", msg),
            DialogError::Open(msg) => write!(f, "Failed to open dialog: {}", msg),
        }
    }
}

impl std::error::Error for DialogError {}

impl From<url::ParseError> for DialogError {
    fn from(e: url::ParseError) -> Self {
        DialogError::Url(e.to_string())
    }
}

/// Receiving end of an open dialog. Ends when the dialog side hangs up.
pub struct DialogChannel {
    rx: Receiver<String>,
}

impl DialogChannel {
    /// A connected pair: the sender belongs to the dialog side.
    pub fn pair() -> (Sender<String>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// A channel that yields `messages` and then ends.
    pub fn from_messages<I, T>(messages: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let (tx, channel) = Self::pair();
        for msg in messages {
            // Receiver is alive in `channel`
            let _ = tx.send(msg.into());
        }
        channel
    }

    /// A channel with no messages.
    pub fn empty() -> Self {
        Self::from_messages(Vec::<String>::new())
    }

    /// Block until the next message. `None` once the dialog side is gone.
    pub fn recv(&self) -> Option<String> {
        self.rx.recv().ok()
    }
}

/// Displays dialog pages on behalf of the task pane.
pub trait DialogHost {
    fn open(&mut self, request: &DialogRequest) -> Result<DialogChannel, DialogError>;

    /// Close the current dialog, if any.
    fn close(&mut self);
}

/// Dialog host fed by a line-oriented reader (JSONL, one message per line).
///
/// The reader is consumed by the first dialog opened; later dialogs, and hosts
/// built with [`ReaderDialogHost::detached`], receive no messages.
///
/// Lines are read on a detached `dialog-reader` thread that is never joined.
/// It stops at end of input, or at the first line read after the dialog is
/// closed; that line and the rest of the input are dropped. A blocking reader
/// such as stdin keeps the thread parked until the next line or EOF, so hosts
/// should not expect the reader back after [`DialogHost::close`].
pub struct ReaderDialogHost {
    reader: Option<Box<dyn BufRead + Send>>,
    current: Option<DialogRequest>,
    opened: Vec<DialogRequest>,
}

impl ReaderDialogHost {
    pub fn new(reader: impl BufRead + Send + 'static) -> Self {
        Self { reader: Some(Box::new(reader)), current: None, opened: Vec::new() }
    }

    pub fn detached() -> Self {
        Self { reader: None, current: None, opened: Vec::new() }
    }

    /// Every request opened so far, oldest first.
    pub fn opened(&self) -> &[DialogRequest] {
        &self.opened
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

impl DialogHost for ReaderDialogHost {
    fn open(&mut self, request: &DialogRequest) -> Result<DialogChannel, DialogError> {
        if self.current.is_some() {
            return Err(DialogError::AlreadyOpen);
        }
        log::info!(
            "Opening dialog {} ({}% x {}%)",
            request.url,
            request.height_percent,
            request.width_percent
        );

        let channel = match self.reader.take() {
            Some(reader) => {
                let (tx, channel) = DialogChannel::pair();
                thread::Builder::new()
                    .name("dialog-reader".into())
                    .spawn(move || forward_lines(reader, tx))
                    .map_err(|e| DialogError::Open(e.to_string()))?;
                channel
            }
            None => DialogChannel::empty(),
        };

        self.current = Some(request.clone());
        self.opened.push(request.clone());
        Ok(channel)
    }

    fn close(&mut self) {
        if let Some(request) = self.current.take() {
            log::debug!("Closed dialog {}", request.url);
        }
    }
}

/// Forward non-blank lines until EOF, a read error, or the receiver hangs up.
fn forward_lines<R: BufRead>(reader: R, tx: Sender<String>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Dialog input error: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        if tx.send(line).is_err() {
            // Pane stopped listening (dialog closed)
            break;
        }
    }
}
