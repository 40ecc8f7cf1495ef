pub mod document;
pub mod edit;
pub mod formatter;

pub use document::{Cursor, Document, DocumentError, Paragraph, Run};
pub use edit::{CommitSummary, EditContext, Selection};
pub use formatter::{book_label, host_alignment, wrap, QuoteFormatter};
