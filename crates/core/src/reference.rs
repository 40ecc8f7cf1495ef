//! Scripture reference validation.
//!
//! Accepted grammar, after all whitespace is removed:
//!
//! ```text
//! [ordinal digits] letters chapter [ (":" | ",") verse ] [ "-" end ]
//! ```
//!
//! Examples: `Jn 3:16`, `1 Co 13`, `Gn1,1-5`, `Génesis 1`.
//! The whole string must match; there are no partial matches.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]*\p{L}+)([0-9]+)(?:[,:]([0-9]+))?(?:-([0-9]+))?$")
        .expect("reference pattern compiles")
});

/// A parsed scripture reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Book name or abbreviation, including any leading ordinal ("1co").
    pub book: String,
    pub chapter: u32,
    pub verse: Option<u32>,
    /// End of a range (`-N`). Applies to verses when a verse is given,
    /// otherwise to chapters.
    pub range_end: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// Nothing but whitespace
    Empty,
    /// Does not match the reference grammar
    Malformed(String),
    /// A chapter or verse number does not fit
    OutOfRange(String),
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceError::Empty => write!(f, "empty reference"),
            ReferenceError::Malformed(s) => write!(f, "malformed reference: {}", s),
            ReferenceError::OutOfRange(s) => write!(f, "number out of range in reference: {}", s),
        }
    }
}

impl std::error::Error for ReferenceError {}

/// Remove every whitespace character.
fn compact(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Returns true if `input` matches the reference grammar. Numbers are not
/// range-checked here; [`Reference::parse`] does that.
pub fn is_valid_reference(input: &str) -> bool {
    REFERENCE_RE.is_match(&compact(input))
}

impl Reference {
    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        let compacted = compact(input);
        if compacted.is_empty() {
            return Err(ReferenceError::Empty);
        }

        let caps = REFERENCE_RE
            .captures(&compacted)
            .ok_or_else(|| ReferenceError::Malformed(input.trim().to_string()))?;

        let number = |idx: usize| -> Result<Option<u32>, ReferenceError> {
            match caps.get(idx) {
                Some(m) => m
                    .as_str()
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|_| ReferenceError::OutOfRange(compacted.clone())),
                None => Ok(None),
            }
        };

        let chapter = number(2)?.ok_or_else(|| ReferenceError::Malformed(compacted.clone()))?;

        Ok(Self {
            book: caps[1].to_string(),
            chapter,
            verse: number(3)?,
            range_end: number(4)?,
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.book, self.chapter)?;
        if let Some(verse) = self.verse {
            write!(f, ":{}", verse)?;
        }
        if let Some(end) = self.range_end {
            write!(f, "-{}", end)?;
        }
        Ok(())
    }
}
