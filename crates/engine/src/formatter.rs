//! Quote formatter.
//!
//! Turns a [`Quote`] plus the user's [`StyleSettings`] into styled insertions
//! on a selection range: optional version label, optional book/chapter label,
//! optional verse number, then the quote body.
//!
//! Order of insertions for one verse:
//!
//! | Step | Condition                                        | Insertion                         |
//! |------|--------------------------------------------------|-----------------------------------|
//! | 1    | first verse, version visible, `version.pos=up`   | version paragraph before          |
//! | 2    | `bc.pos=up`                                      | book/chapter paragraph before     |
//! | 3    | `verse.visible`                                  | `"{verse} "` run at end           |
//! | 4    | always                                           | body run at end                   |
//! | 5    | `bc.pos=inline-down` / `bc.pos=down`             | label run at end / paragraph after|
//! | 6    | first verse, version visible, `version.pos=down` | version paragraph after           |

use versequote_config::{BookPresentation, LabelPosition, StyleSettings, TextStyle};
use versequote_core::{Alignment, Font, InsertLocation, ParagraphFormat, Quote, SelectionRange, Underline};

/// Millimetres per typographic point. Indents are configured in mm.
pub const MM_PER_POINT: f32 = 0.3527;

/// Line spacing in points for an interline multiplier of 1.
pub const LINE_SPACING_PER_INTERLINE: f32 = 10.0;

/// Bracket `s` with the first and second characters of `wrapper`.
/// Missing characters contribute nothing.
pub fn wrap(s: &str, wrapper: &str) -> String {
    let mut chars = wrapper.chars();
    let open = chars.next();
    let close = chars.next();

    let mut out = String::with_capacity(s.len() + 8);
    if let Some(c) = open {
        out.push(c);
    }
    out.push_str(s);
    if let Some(c) = close {
        out.push(c);
    }
    out
}

/// Book/chapter label text, wrapped.
pub fn book_label(quote: &Quote, presentation: BookPresentation, wrapper: &str) -> String {
    let text = match presentation {
        BookPresentation::Default => format!("{} {}", quote.book, quote.chapter),
        BookPresentation::Abbreviated => format!("{} {}", quote.bookabbrev, quote.chapter),
        BookPresentation::Full => format!("{} {}, {}", quote.book, quote.chapter, quote.verse),
    };
    wrap(&text, wrapper)
}

/// Map a settings alignment name onto the host's alignment.
pub fn host_alignment(align: &str) -> Alignment {
    match align {
        "center" => Alignment::Centered,
        "left" => Alignment::Left,
        "right" => Alignment::Right,
        _ => Alignment::Unknown,
    }
}

fn run_font(style: &TextStyle, family: &str) -> Font {
    Font {
        name: Some(family.to_string()),
        size: Some(style.font_size_points()),
        bold: Some(style.bold),
        italic: Some(style.italic),
        underline: Some(if style.underline { Underline::Single } else { Underline::None }),
        superscript: Some(style.superscript),
        subscript: Some(style.subscript),
        color: Some(style.color.clone()),
        highlight_color: style.background.clone(),
    }
}

pub struct QuoteFormatter<'a> {
    settings: &'a StyleSettings,
    version_key: &'a str,
}

impl<'a> QuoteFormatter<'a> {
    /// `version_key` is the selected version, shown by the version label.
    pub fn new(settings: &'a StyleSettings, version_key: &'a str) -> Self {
        Self { settings, version_key }
    }

    /// Queue one verse on `range`. `first_verse` enables the version label.
    pub fn insert_quote<R>(&self, range: &mut R, quote: &Quote, first_verse: bool)
    where
        R: SelectionRange + ?Sized,
    {
        let s = self.settings;

        if first_verse && s.version.pos == LabelPosition::Up {
            self.insert_version(range);
        }

        if s.bc.pos == LabelPosition::Up {
            self.insert_book_label(range, quote);
        }

        if s.verse.visible {
            self.insert_verse_number(range, quote);
        }

        let body = range.insert_text(&quote.text, InsertLocation::End);
        body.paragraph = self.paragraph_format(&s.par.align);
        body.font.set(&run_font(&s.text, &s.par.font_family));

        if matches!(s.bc.pos, LabelPosition::Down | LabelPosition::InlineDown) {
            self.insert_book_label(range, quote);
        }

        if first_verse && s.version.visible && s.version.pos == LabelPosition::Down {
            self.insert_version(range);
        }
    }

    /// Queue every verse of a search result; only the first carries the version label.
    pub fn insert_quotes<R>(&self, range: &mut R, quotes: &[Quote])
    where
        R: SelectionRange + ?Sized,
    {
        for (i, quote) in quotes.iter().enumerate() {
            self.insert_quote(range, quote, i == 0);
        }
    }

    fn paragraph_format(&self, align: &str) -> ParagraphFormat {
        let par = &self.settings.par;
        ParagraphFormat {
            alignment: Some(host_alignment(align)),
            left_indent: Some(par.left_indent / MM_PER_POINT),
            right_indent: Some(par.right_indent / MM_PER_POINT),
            line_spacing: Some(LINE_SPACING_PER_INTERLINE * par.interline),
        }
    }

    fn insert_version<R>(&self, range: &mut R)
    where
        R: SelectionRange + ?Sized,
    {
        let s = self.settings;
        if !s.version.visible {
            return;
        }

        let location = if s.version.pos == LabelPosition::Up {
            InsertLocation::Before
        } else {
            InsertLocation::After
        };
        let label = wrap(self.version_key, &s.version.wrapper);

        let version = range.insert_paragraph(&label, location);
        version.paragraph = self.paragraph_format(&s.version.align);
        version.font.set(&run_font(&s.book, &s.par.font_family));
    }

    fn insert_book_label<R>(&self, range: &mut R, quote: &Quote)
    where
        R: SelectionRange + ?Sized,
    {
        let s = self.settings;
        let label = book_label(quote, s.bc.presentation, &s.bc.wrapper);
        let family = s.bc.font_family.as_deref().unwrap_or(&s.par.font_family);

        let book = match s.bc.pos {
            LabelPosition::InlineDown => range.insert_text(&label, InsertLocation::End),
            LabelPosition::Up | LabelPosition::Down => {
                let location = if s.bc.pos == LabelPosition::Up {
                    InsertLocation::Before
                } else {
                    InsertLocation::After
                };
                let book = range.insert_paragraph(&label, location);
                book.paragraph = self.paragraph_format(&s.par.align);
                book
            }
            LabelPosition::Off => return,
        };
        book.font.set(&run_font(&s.book, family));
    }

    fn insert_verse_number<R>(&self, range: &mut R, quote: &Quote)
    where
        R: SelectionRange + ?Sized,
    {
        let s = self.settings;
        let verse = range.insert_text(&format!("{} ", quote.verse), InsertLocation::End);
        verse.font.set(&run_font(&s.verse.style, &s.par.font_family));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use versequote_core::{Insertion, InsertionKind};

    fn john_3_16() -> Quote {
        Quote::new("John", "Jn", 3, 16, "For God so loved the world")
    }

    fn john_3_17() -> Quote {
        Quote::new("John", "Jn", 3, 17, "For God did not send his Son")
    }

    fn format(settings: &StyleSettings, quotes: &[Quote]) -> Vec<Insertion> {
        let mut ops: Vec<Insertion> = Vec::new();
        QuoteFormatter::new(settings, "NABRE").insert_quotes(&mut ops, quotes);
        ops
    }

    fn texts(ops: &[Insertion]) -> Vec<(&str, InsertionKind, InsertLocation)> {
        ops.iter().map(|o| (o.text.as_str(), o.kind, o.location)).collect()
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("ESV", "()"), "(ESV)");
        assert_eq!(wrap("ESV", ""), "ESV");
        assert_eq!(wrap("ESV", "["), "[ESV");
        assert_eq!(wrap("ESV", "«»"), "«ESV»");
        assert_eq!(wrap("ESV", "<>!"), "<ESV>");
    }

    #[test]
    fn test_book_label_presentations() {
        let q = john_3_16();
        assert_eq!(book_label(&q, BookPresentation::Abbreviated, ""), "Jn 3");
        assert_eq!(book_label(&q, BookPresentation::Full, ""), "John 3, 16");
        assert_eq!(book_label(&q, BookPresentation::Default, ""), "John 3");
        assert_eq!(book_label(&q, BookPresentation::Default, "[]"), "[John 3]");
    }

    #[test]
    fn test_host_alignment() {
        assert_eq!(host_alignment("left"), Alignment::Left);
        assert_eq!(host_alignment("center"), Alignment::Centered);
        assert_eq!(host_alignment("right"), Alignment::Right);
        assert_eq!(host_alignment("justify"), Alignment::Unknown);
        assert_eq!(host_alignment(""), Alignment::Unknown);
    }

    #[test]
    fn test_defaults_single_verse() {
        let ops = format(&StyleSettings::default(), &[john_3_16()]);
        assert_eq!(
            texts(&ops),
            vec![
                ("John 3", InsertionKind::Paragraph, InsertLocation::Before),
                ("16 ", InsertionKind::Text, InsertLocation::End),
                ("For God so loved the world", InsertionKind::Text, InsertLocation::End),
            ]
        );

        let body = &ops[2];
        assert_eq!(body.font.name.as_deref(), Some("Arial"));
        assert_eq!(body.font.size, Some(10));
        assert_eq!(body.font.underline, Some(Underline::None));
        assert_eq!(body.font.color.as_deref(), Some("black"));
        assert_eq!(body.font.highlight_color, None);
        assert_eq!(body.paragraph.alignment, Some(Alignment::Left));
        assert_eq!(body.paragraph.left_indent, Some(0.0));
        assert_eq!(body.paragraph.line_spacing, Some(10.0));
    }

    #[test]
    fn test_version_up_only_on_first_verse() {
        let mut settings = StyleSettings::default();
        settings.version.visible = true;
        settings.version.wrapper = "()".into();

        let ops = format(&settings, &[john_3_16(), john_3_17()]);
        let versions: Vec<usize> = ops
            .iter()
            .enumerate()
            .filter(|(_, o)| o.text == "(NABRE)")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(versions, vec![0]);
        assert_eq!(ops[0].location, InsertLocation::Before);
        assert_eq!(ops[0].kind, InsertionKind::Paragraph);
    }

    #[test]
    fn test_version_hidden_is_never_inserted() {
        let mut settings = StyleSettings::default();
        settings.version.pos = LabelPosition::Down;
        let ops = format(&settings, &[john_3_16()]);
        assert!(ops.iter().all(|o| o.text != "NABRE"));
    }

    #[test]
    fn test_version_down_after_first_verse() {
        let mut settings = StyleSettings::default();
        settings.version.visible = true;
        settings.version.pos = LabelPosition::Down;
        settings.bc.pos = LabelPosition::Off;
        settings.verse.visible = false;

        let ops = format(&settings, &[john_3_16(), john_3_17()]);
        assert_eq!(
            texts(&ops),
            vec![
                ("For God so loved the world", InsertionKind::Text, InsertLocation::End),
                ("NABRE", InsertionKind::Paragraph, InsertLocation::After),
                ("For God did not send his Son", InsertionKind::Text, InsertLocation::End),
            ]
        );
    }

    #[test]
    fn test_book_inline_down_and_down() {
        let mut settings = StyleSettings::default();
        settings.bc.pos = LabelPosition::InlineDown;
        settings.bc.wrapper = "()".into();
        settings.bc.presentation = BookPresentation::Full;
        settings.verse.visible = false;

        let ops = format(&settings, &[john_3_16()]);
        assert_eq!(
            texts(&ops),
            vec![
                ("For God so loved the world", InsertionKind::Text, InsertLocation::End),
                ("(John 3, 16)", InsertionKind::Text, InsertLocation::End),
            ]
        );
        assert!(ops[1].paragraph.is_empty(), "inline label leaves paragraph format alone");

        settings.bc.pos = LabelPosition::Down;
        let ops = format(&settings, &[john_3_16()]);
        assert_eq!(ops[1].kind, InsertionKind::Paragraph);
        assert_eq!(ops[1].location, InsertLocation::After);
        assert_eq!(ops[1].paragraph.alignment, Some(Alignment::Left));
    }

    #[test]
    fn test_book_off_skips_label() {
        let mut settings = StyleSettings::default();
        settings.bc.pos = LabelPosition::Off;
        let ops = format(&settings, &[john_3_16()]);
        assert!(ops.iter().all(|o| !o.text.starts_with("John")));
        assert_eq!(ops.len(), 2);
    }

    #[test]
    fn test_segment_typography() {
        let mut settings = StyleSettings::default();
        settings.book.bold = true;
        settings.book.font_size = 14.0;
        settings.verse.style.superscript = true;
        settings.verse.style.color = "red".into();
        settings.text.italic = true;
        settings.text.underline = true;
        settings.text.background = Some("yellow".into());
        settings.bc.font_family = Some("Garamond".into());

        let ops = format(&settings, &[john_3_16()]);
        let (book, verse, body) = (&ops[0], &ops[1], &ops[2]);

        assert_eq!(book.font.bold, Some(true));
        assert_eq!(book.font.size, Some(14));
        assert_eq!(book.font.name.as_deref(), Some("Garamond"));

        assert_eq!(verse.font.superscript, Some(true));
        assert_eq!(verse.font.color.as_deref(), Some("red"));
        assert_eq!(verse.font.name.as_deref(), Some("Arial"));

        assert_eq!(body.font.italic, Some(true));
        assert_eq!(body.font.underline, Some(Underline::Single));
        assert_eq!(body.font.highlight_color.as_deref(), Some("yellow"));
    }

    #[test]
    fn test_paragraph_units() {
        let mut settings = StyleSettings::default();
        settings.par.left_indent = 3.527;
        settings.par.right_indent = 7.054;
        settings.par.interline = 1.5;
        settings.par.align = "center".into();

        let ops = format(&settings, &[john_3_16()]);
        let body = ops.last().unwrap();
        let left = body.paragraph.left_indent.unwrap();
        let right = body.paragraph.right_indent.unwrap();
        assert!((left - 10.0).abs() < 1e-3, "left indent {}", left);
        assert!((right - 20.0).abs() < 1e-3, "right indent {}", right);
        assert_eq!(body.paragraph.line_spacing, Some(15.0));
        assert_eq!(body.paragraph.alignment, Some(Alignment::Centered));
    }

    #[test]
    fn test_unknown_alignment_maps_to_unknown() {
        let mut settings = StyleSettings::default();
        settings.par.align = "middle".into();
        let ops = format(&settings, &[john_3_16()]);
        assert_eq!(ops[0].paragraph.alignment, Some(Alignment::Unknown));
    }

    #[test]
    fn test_book_paragraph_follows_par_alignment() {
        let mut settings = StyleSettings::default();
        settings.par.align = "center".into();
        settings.par.interline = 2.0;
        settings.bc.align = "right".into();

        let ops = format(&settings, &[john_3_16()]);
        assert_eq!(ops[0].text, "John 3");
        assert_eq!(ops[0].paragraph.alignment, Some(Alignment::Centered));
        assert_eq!(ops[0].paragraph.line_spacing, Some(20.0));

        settings.bc.pos = LabelPosition::Down;
        let ops = format(&settings, &[john_3_16()]);
        let label = ops.last().unwrap();
        assert_eq!(label.text, "John 3");
        assert_eq!(label.paragraph.alignment, Some(Alignment::Centered));
    }

    #[test]
    fn test_repeated_calls_insert_repeated_copies() {
        let settings = StyleSettings::default();
        let formatter = QuoteFormatter::new(&settings, "NABRE");
        let mut ops: Vec<Insertion> = Vec::new();
        formatter.insert_quote(&mut ops, &john_3_16(), true);
        formatter.insert_quote(&mut ops, &john_3_16(), true);
        assert_eq!(ops.len(), 6);
    }
}
