//! In-memory rich-text document.
//!
//! A document is a list of paragraphs, each a list of styled runs, plus a
//! cursor. Edits are never applied directly: they are queued on an
//! [`EditContext`](crate::edit::EditContext) and land together on commit,
//! which bumps the revision exactly once.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use versequote_core::{Font, InsertLocation, Insertion, InsertionKind, ParagraphFormat};

use crate::edit::EditContext;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub font: Font,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    #[serde(default)]
    pub format: ParagraphFormat,
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

/// Insertion point: before run `run` of paragraph `paragraph`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub paragraph: usize,
    pub run: usize,
}

/// Error type for document persistence and navigation.
#[derive(Debug)]
pub enum DocumentError {
    Io(String),
    Parse(String),
    /// Cursor outside the document
    InvalidCursor(Cursor),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Io(msg) => write!(f, "Document I/O error: {}", msg),
            DocumentError::Parse(msg) => write!(f, "Document parse error: {}", msg),
            DocumentError::InvalidCursor(c) => {
                write!(f, "Cursor out of range: paragraph {}, run {}", c.paragraph, c.run)
            }
        }
    }
}

impl std::error::Error for DocumentError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
    #[serde(default)]
    cursor: Cursor,
    #[serde(default)]
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with one empty paragraph and the cursor at its start.
    pub fn new() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
            cursor: Cursor::default(),
            revision: 0,
        }
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DocumentError::Io(format!("{}: {}", path.display(), e)))?;
        let mut doc: Document = serde_json::from_str(&contents)
            .map_err(|e| DocumentError::Parse(format!("{}: {}", path.display(), e)))?;
        if doc.paragraphs.is_empty() {
            doc.paragraphs.push(Paragraph::default());
        }
        if doc.check_cursor(doc.cursor).is_err() {
            log::warn!("Cursor out of range in {}; moving it to the end", path.display());
            doc.move_to_end();
        }
        Ok(doc)
    }

    /// Load `path` if it exists, otherwise start a new document.
    pub fn load_or_new(path: &Path) -> Result<Self, DocumentError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| DocumentError::Io(format!("{}: {}", parent.display(), e)))?;
            }
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DocumentError::Parse(e.to_string()))?;
        fs::write(path, json).map_err(|e| DocumentError::Io(format!("{}: {}", path.display(), e)))
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Number of committed edit batches.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_cursor(&mut self, cursor: Cursor) -> Result<(), DocumentError> {
        self.check_cursor(cursor)?;
        self.cursor = cursor;
        Ok(())
    }

    /// Put the cursor after the last run of the last paragraph.
    pub fn move_to_end(&mut self) {
        let paragraph = self.paragraphs.len() - 1;
        self.cursor = Cursor { paragraph, run: self.paragraphs[paragraph].runs.len() };
    }

    /// Put the cursor in an empty paragraph at the end, adding one if needed.
    /// Navigation only; does not count as an edit.
    pub fn move_to_new_paragraph(&mut self) {
        if !self.paragraphs.last().map_or(false, Paragraph::is_empty) {
            self.paragraphs.push(Paragraph::default());
        }
        self.move_to_end();
    }

    /// Paragraph texts joined by newlines.
    pub fn to_plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Start a batch of edits at the cursor.
    pub fn begin_edit(&mut self) -> EditContext<'_> {
        EditContext::new(self)
    }

    fn check_cursor(&self, cursor: Cursor) -> Result<(), DocumentError> {
        match self.paragraphs.get(cursor.paragraph) {
            Some(p) if cursor.run <= p.runs.len() => Ok(()),
            _ => Err(DocumentError::InvalidCursor(cursor)),
        }
    }

    /// Apply queued insertions in order, relative to a range that starts
    /// collapsed at the cursor. Leaves the cursor at the end of the range.
    pub(crate) fn apply(&mut self, insertions: Vec<Insertion>) {
        let mut range = RangeState {
            paragraph: self.cursor.paragraph,
            start: self.cursor.run,
            end: self.cursor.run,
            paragraphs_after: 0,
        };

        for op in insertions {
            match op.kind {
                InsertionKind::Text => self.apply_text(&mut range, op),
                InsertionKind::Paragraph => self.apply_paragraph(&mut range, op),
            }
        }

        self.cursor = Cursor { paragraph: range.paragraph, run: range.end };
        self.revision += 1;
    }

    fn apply_text(&mut self, range: &mut RangeState, op: Insertion) {
        let paragraph = &mut self.paragraphs[range.paragraph];
        if !op.paragraph.is_empty() {
            paragraph.format.set(&op.paragraph);
        }
        if op.text.is_empty() {
            return;
        }

        let run = Run { text: op.text, font: op.font };
        match op.location {
            InsertLocation::Before => {
                paragraph.runs.insert(range.start, run);
                range.start += 1;
                range.end += 1;
            }
            InsertLocation::Start => {
                paragraph.runs.insert(range.start, run);
                range.end += 1;
            }
            InsertLocation::End => {
                paragraph.runs.insert(range.end, run);
                range.end += 1;
            }
            InsertLocation::After => {
                paragraph.runs.insert(range.end, run);
            }
        }
    }

    fn apply_paragraph(&mut self, range: &mut RangeState, op: Insertion) {
        let runs = if op.text.is_empty() {
            Vec::new()
        } else {
            vec![Run { text: op.text, font: op.font }]
        };
        let paragraph = Paragraph { runs, format: op.paragraph };

        match op.location {
            InsertLocation::Before | InsertLocation::Start => {
                self.paragraphs.insert(range.paragraph, paragraph);
                range.paragraph += 1;
            }
            // Successive "after" paragraphs keep their insertion order
            InsertLocation::After | InsertLocation::End => {
                let at = range.paragraph + 1 + range.paragraphs_after;
                self.paragraphs.insert(at, paragraph);
                range.paragraphs_after += 1;
            }
        }
    }
}

struct RangeState {
    paragraph: usize,
    start: usize,
    end: usize,
    paragraphs_after: usize,
}
