//! Edit batches.
//!
//! One user action opens one [`EditContext`], queues every insertion through
//! its [`Selection`], and commits once. Queued insertions are invisible in the
//! document until [`EditContext::commit`]; dropping the context discards them.

use versequote_core::{InsertLocation, Insertion, SelectionRange};

use crate::document::Document;

/// Result of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Document revision after the commit
    pub revision: u64,
    /// Number of insertions applied
    pub insertions: usize,
}

pub struct EditContext<'a> {
    document: &'a mut Document,
    pending: Vec<Insertion>,
}

impl<'a> EditContext<'a> {
    pub(crate) fn new(document: &'a mut Document) -> Self {
        Self { document, pending: Vec::new() }
    }

    /// The selection range at the document cursor.
    pub fn selection(&mut self) -> Selection<'_> {
        Selection { pending: &mut self.pending }
    }

    /// Insertions queued so far.
    pub fn pending(&self) -> &[Insertion] {
        &self.pending
    }

    /// The document as last committed.
    pub fn document(&self) -> &Document {
        self.document
    }

    /// Apply every queued insertion. An empty batch leaves the document
    /// (and its revision) untouched.
    pub fn commit(self) -> CommitSummary {
        let insertions = self.pending.len();
        if insertions > 0 {
            self.document.apply(self.pending);
        }
        log::debug!("Committed {} insertion(s), revision {}", insertions, self.document.revision());
        CommitSummary { revision: self.document.revision(), insertions }
    }

    /// Drop every queued insertion.
    pub fn discard(self) {
        if !self.pending.is_empty() {
            log::debug!("Discarded {} pending insertion(s)", self.pending.len());
        }
    }
}

/// Selection handle borrowed from an [`EditContext`].
pub struct Selection<'c> {
    pending: &'c mut Vec<Insertion>,
}

impl SelectionRange for Selection<'_> {
    fn insert_text(&mut self, text: &str, location: InsertLocation) -> &mut Insertion {
        self.pending.insert_text(text, location)
    }

    fn insert_paragraph(&mut self, text: &str, location: InsertLocation) -> &mut Insertion {
        self.pending.insert_paragraph(text, location)
    }
}
