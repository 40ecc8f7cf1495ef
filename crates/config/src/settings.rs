// Quote style settings
// Stored as JSON under the `bible.settings` preference key

use serde::{Deserialize, Deserializer, Serialize};

/// Where a label (version or book/chapter) goes relative to the quote.
///
/// Any unrecognized value becomes `Off`, which skips the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LabelPosition {
    /// Own paragraph above the quote
    Up,
    /// Own paragraph below the quote
    Down,
    /// Run appended after the quote text
    InlineDown,
    Off,
}

impl From<String> for LabelPosition {
    fn from(s: String) -> Self {
        match s.as_str() {
            "up" => LabelPosition::Up,
            "down" => LabelPosition::Down,
            "inline-down" => LabelPosition::InlineDown,
            _ => LabelPosition::Off,
        }
    }
}

impl From<LabelPosition> for String {
    fn from(pos: LabelPosition) -> Self {
        match pos {
            LabelPosition::Up => "up",
            LabelPosition::Down => "down",
            LabelPosition::InlineDown => "inline-down",
            LabelPosition::Off => "off",
        }
        .to_string()
    }
}

/// How the book/chapter label is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookPresentation {
    /// "John 3"
    #[default]
    Default,
    /// "Jn 3"
    Abbreviated,
    /// "John 3, 16"
    Full,
}

impl From<String> for BookPresentation {
    fn from(s: String) -> Self {
        match s.as_str() {
            "abb" => BookPresentation::Abbreviated,
            "full" => BookPresentation::Full,
            _ => BookPresentation::Default,
        }
    }
}

impl From<BookPresentation> for String {
    fn from(p: BookPresentation) -> Self {
        match p {
            BookPresentation::Default => "def",
            BookPresentation::Abbreviated => "abb",
            BookPresentation::Full => "full",
        }
        .to_string()
    }
}

/// Typography for one run group (`book`, `verse`, `text`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(deserialize_with = "number_or_string")]
    pub font_size: f32,
    pub bold: bool,
    pub color: String,
    #[serde(default)]
    pub background: Option<String>,
    pub italic: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub underline: bool,
}

impl TextStyle {
    /// Font size as the host takes it: truncated to a whole point.
    pub fn font_size_points(&self) -> u32 {
        if self.font_size.is_finite() && self.font_size > 0.0 {
            self.font_size.trunc() as u32
        } else {
            0
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            bold: false,
            color: "black".to_string(),
            background: None,
            italic: false,
            subscript: false,
            superscript: false,
            underline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseStyle {
    pub visible: bool,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl Default for VerseStyle {
    fn default() -> Self {
        Self { visible: true, style: TextStyle::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionLabelStyle {
    pub visible: bool,
    pub wrapper: String,
    pub align: String,
    pub pos: LabelPosition,
}

impl Default for VersionLabelStyle {
    fn default() -> Self {
        Self {
            visible: false,
            wrapper: String::new(),
            align: "left".to_string(),
            pos: LabelPosition::Up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookChapterStyle {
    pub presentation: BookPresentation,
    pub wrapper: String,
    pub align: String,
    pub pos: LabelPosition,
    /// Falls back to the paragraph font family when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Default for BookChapterStyle {
    fn default() -> Self {
        Self {
            presentation: BookPresentation::Default,
            wrapper: String::new(),
            align: "left".to_string(),
            pos: LabelPosition::Up,
            font_family: None,
        }
    }
}

/// Paragraph layout. Indents are millimetres; `interline` is a multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub align: String,
    #[serde(deserialize_with = "number_or_string")]
    pub interline: f32,
    #[serde(deserialize_with = "number_or_string")]
    pub left_indent: f32,
    #[serde(deserialize_with = "number_or_string")]
    pub right_indent: f32,
    pub font_family: String,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            align: "left".to_string(),
            interline: 1.0,
            left_indent: 0.0,
            right_indent: 0.0,
            font_family: "Arial".to_string(),
        }
    }
}

/// The complete style sheet applied when inserting quotes.
///
/// A stored override must be complete: it replaces the defaults wholesale,
/// there is no per-field merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    pub version: VersionLabelStyle,
    pub bc: BookChapterStyle,
    pub par: ParagraphStyle,
    pub book: TextStyle,
    pub verse: VerseStyle,
    pub text: TextStyle,
}

impl StyleSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

// Form fields from the settings dialog arrive as strings
fn number_or_string<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n as f32),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number {:?}: {}", s, e))),
    }
}
