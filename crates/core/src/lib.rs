//! Core types shared by every VerseQuote crate.
//!
//! - `quote`: the verse record returned by the lookup service
//! - `reference`: validation and parsing of user-typed references
//! - `catalog`: the ordered list of Bible versions offered by the service
//! - `document`: the host document-editing contract (selection range, fonts, paragraphs)
//!
//! No I/O, no network.

pub mod catalog;
pub mod document;
pub mod quote;
pub mod reference;

pub use catalog::{VersionCatalog, VersionEntry};
pub use document::{
    Alignment, Font, InsertLocation, Insertion, InsertionKind, ParagraphFormat, SelectionRange,
    Underline,
};
pub use quote::Quote;
pub use reference::{is_valid_reference, Reference, ReferenceError};
