//! Bible version catalog.
//!
//! The service returns versions as a JSON object (`key -> display name`).
//! Display names embed the language as a `|lang` segment, e.g.
//! `"Conferenza Episcopale Italiana|2008|it"`. The catalog keeps the
//! server's ordering so version pickers list versions the way the service does.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionCatalog {
    entries: Vec<VersionEntry>,
}

impl VersionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a version. A repeated key replaces the earlier name in place.
    pub fn insert(&mut self, key: impl Into<String>, name: impl Into<String>) {
        let key = key.into();
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => existing.name = name,
            None => self.entries.push(VersionEntry { key, name }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn name(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.name.as_str())
    }

    /// Pick the version to preselect.
    ///
    /// The saved key wins if the catalog still offers it. Otherwise the first
    /// version whose display name carries `|{lang}` (not at position 0) is used.
    pub fn preferred(&self, saved: Option<&str>, lang: &str) -> Option<&str> {
        if let Some(saved) = saved {
            if let Some(entry) = self.entries.iter().find(|e| e.key == saved) {
                return Some(entry.key.as_str());
            }
        }

        if lang.is_empty() {
            return None;
        }
        let tag = format!("|{}", lang);
        self.entries
            .iter()
            .find(|e| e.name.find(&tag).map_or(false, |idx| idx > 0))
            .map(|e| e.key.as_str())
    }
}

impl FromIterator<(String, String)> for VersionCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut catalog = VersionCatalog::new();
        for (key, name) in iter {
            catalog.insert(key, name);
        }
        catalog
    }
}

impl Serialize for VersionCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.name)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = VersionCatalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of version keys to display names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut catalog = VersionCatalog::new();
        while let Some((key, name)) = access.next_entry::<String, String>()? {
            catalog.insert(key, name);
        }
        Ok(catalog)
    }
}

impl<'de> Deserialize<'de> for VersionCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}
