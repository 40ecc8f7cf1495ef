use serde::{Deserialize, Deserializer, Serialize};

/// A single verse as returned by the lookup service.
///
/// The service is not consistent about numeric fields: `chapter` and `verse`
/// come back either as JSON numbers or as numeric strings. Both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub book: String,
    #[serde(default)]
    pub bookabbrev: String,
    #[serde(deserialize_with = "number_or_string")]
    pub chapter: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub verse: u32,
    pub text: String,
}

impl Quote {
    pub fn new(
        book: impl Into<String>,
        bookabbrev: impl Into<String>,
        chapter: u32,
        verse: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            book: book.into(),
            bookabbrev: bookabbrev.into(),
            chapter,
            verse,
            text: text.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NumberOrString::deserialize(deserializer)?;
    match raw {
        NumberOrString::Number(n) => u32::try_from(n).map_err(serde::de::Error::custom),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number {:?}: {}", s, e))),
    }
}
