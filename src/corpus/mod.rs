use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, Visitor},
};

pub mod store;

pub use store::{CorpusStore, LoadOutcome};

/// Literal token in `ResponseEntry::message` replaced by the user's name.
pub const NAME_PLACEHOLDER: &str = "[User]";

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("verse data unavailable at {}: {source}", .path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("verse data is malformed: {reason}")]
    DataMalformed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseEntry {
    /// Lowercased, never empty after loading.
    pub keywords: Vec<String>,
    pub text: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub entries: Vec<ResponseEntry>,
}

/// Entries grouped by category, in the order they appear in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    categories: Vec<Category>,
}

impl Corpus {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CorpusError> {
        let CategoryList(mut categories) =
            serde_json::from_str(raw).map_err(|e| CorpusError::DataMalformed {
                reason: e.to_string(),
            })?;

        for category in categories.iter_mut() {
            for (index, entry) in category.entries.iter_mut().enumerate() {
                entry.keywords = entry
                    .keywords
                    .iter()
                    .filter(|kw| !kw.is_empty())
                    .map(|kw| kw.to_lowercase())
                    .collect();

                if entry.keywords.is_empty() {
                    return Err(CorpusError::DataMalformed {
                        reason: format!(
                            "entry {index} in category {:?} has no keywords",
                            category.name
                        ),
                    });
                }
            }
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn entries(&self) -> impl Iterator<Item = &ResponseEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level JSON object read in document order. Duplicate category names are rejected
/// instead of silently keeping the last one.
struct CategoryList(Vec<Category>);

impl<'de> Deserialize<'de> for CategoryList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoryListVisitor;

        impl<'de> Visitor<'de> for CategoryListVisitor {
            type Value = CategoryList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category names to lists of entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories: Vec<Category> = Vec::new();

                while let Some((name, entries)) = map.next_entry::<String, Vec<ResponseEntry>>()? {
                    if categories.iter().any(|c| c.name == name) {
                        return Err(de::Error::custom(format!("duplicate category {name:?}")));
                    }

                    categories.push(Category { name, entries });
                }

                Ok(CategoryList(categories))
            }
        }

        deserializer.deserialize_map(CategoryListVisitor)
    }
}
