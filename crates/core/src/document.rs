//! Host document-editing contract.
//!
//! A [`SelectionRange`] queues insertions relative to the user's selection.
//! Each insertion hands back a mutable [`Insertion`] whose `font` and
//! `paragraph` can be styled before the owning edit context commits.
//! Nothing becomes visible in the document until that commit.

use serde::{Deserialize, Serialize};

/// Where an insertion lands relative to the selection range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertLocation {
    Before,
    After,
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Centered,
    Right,
    /// Alignment the host could not classify
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Underline {
    None,
    Single,
}

/// Run-level typography. Unset properties inherit from the host defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superscript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
}

impl Font {
    /// Overlay every property set in `other` onto `self`.
    pub fn set(&mut self, other: &Font) {
        if other.name.is_some() {
            self.name = other.name.clone();
        }
        if other.size.is_some() {
            self.size = other.size;
        }
        if other.bold.is_some() {
            self.bold = other.bold;
        }
        if other.italic.is_some() {
            self.italic = other.italic;
        }
        if other.underline.is_some() {
            self.underline = other.underline;
        }
        if other.superscript.is_some() {
            self.superscript = other.superscript;
        }
        if other.subscript.is_some() {
            self.subscript = other.subscript;
        }
        if other.color.is_some() {
            self.color = other.color.clone();
        }
        if other.highlight_color.is_some() {
            self.highlight_color = other.highlight_color.clone();
        }
    }
}

/// Paragraph-level formatting. Indents and line spacing are in points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_indent: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_indent: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
}

impl ParagraphFormat {
    pub fn is_empty(&self) -> bool {
        *self == ParagraphFormat::default()
    }

    /// Overlay every property set in `other` onto `self`.
    pub fn set(&mut self, other: &ParagraphFormat) {
        if other.alignment.is_some() {
            self.alignment = other.alignment;
        }
        if other.left_indent.is_some() {
            self.left_indent = other.left_indent;
        }
        if other.right_indent.is_some() {
            self.right_indent = other.right_indent;
        }
        if other.line_spacing.is_some() {
            self.line_spacing = other.line_spacing;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionKind {
    /// In-line text run
    Text,
    /// Whole new paragraph
    Paragraph,
}

/// A queued insertion. Styling set here is applied when the edit commits.
///
/// For `Text` insertions, `paragraph` formats the paragraph that contains
/// the inserted run. For `Paragraph` insertions it formats the new paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Insertion {
    pub kind: InsertionKind,
    pub text: String,
    pub location: InsertLocation,
    pub font: Font,
    pub paragraph: ParagraphFormat,
}

impl Insertion {
    pub fn new(kind: InsertionKind, text: impl Into<String>, location: InsertLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
            font: Font::default(),
            paragraph: ParagraphFormat::default(),
        }
    }
}

/// The user's selection in the host document.
pub trait SelectionRange {
    /// Queue an in-line text run.
    fn insert_text(&mut self, text: &str, location: InsertLocation) -> &mut Insertion;

    /// Queue a new paragraph. `Start` behaves like `Before`, `End` like `After`.
    fn insert_paragraph(&mut self, text: &str, location: InsertLocation) -> &mut Insertion;
}

/// A selection that records insertions without a backing document.
impl SelectionRange for Vec<Insertion> {
    fn insert_text(&mut self, text: &str, location: InsertLocation) -> &mut Insertion {
        self.push(Insertion::new(InsertionKind::Text, text, location));
        let last = self.len() - 1;
        &mut self[last]
    }

    fn insert_paragraph(&mut self, text: &str, location: InsertLocation) -> &mut Insertion {
        self.push(Insertion::new(InsertionKind::Paragraph, text, location));
        let last = self.len() - 1;
        &mut self[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_set_overlays_only_present_fields() {
        let mut font = Font {
            name: Some("Arial".into()),
            size: Some(10),
            bold: Some(false),
            ..Font::default()
        };
        font.set(&Font {
            bold: Some(true),
            color: Some("red".into()),
            ..Font::default()
        });
        assert_eq!(font.name.as_deref(), Some("Arial"));
        assert_eq!(font.size, Some(10));
        assert_eq!(font.bold, Some(true));
        assert_eq!(font.color.as_deref(), Some("red"));
    }

    #[test]
    fn test_paragraph_format_empty() {
        let mut format = ParagraphFormat::default();
        assert!(format.is_empty());
        format.set(&ParagraphFormat {
            alignment: Some(Alignment::Centered),
            ..ParagraphFormat::default()
        });
        assert!(!format.is_empty());
        assert_eq!(format.alignment, Some(Alignment::Centered));
    }

    #[test]
    fn test_vec_selection_records_in_order() {
        let mut ops: Vec<Insertion> = Vec::new();
        ops.insert_paragraph("John 3", InsertLocation::Before).font.bold = Some(true);
        ops.insert_text("16 ", InsertLocation::End);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].kind, InsertionKind::Paragraph);
        assert_eq!(ops[0].font.bold, Some(true));
        assert_eq!(ops[1].kind, InsertionKind::Text);
        assert_eq!(ops[1].location, InsertLocation::End);
    }

    #[test]
    fn test_font_json_skips_unset() {
        let font = Font { size: Some(12), ..Font::default() };
        assert_eq!(serde_json::to_string(&font).unwrap(), r#"{"size":12}"#);
    }
}
