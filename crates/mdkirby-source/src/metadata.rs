//! Front matter parsing.
//!
//! Pages may start with a YAML block fenced by `---` lines. Its keys become
//! the page [`Metadata`], kept in the order they were written so the content
//! serializer can emit one block per key in that same order.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

/// Front matter fence: `---` line, YAML, closing `---` or `...` line.
static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?\r?\n)??(?:---|\.\.\.)[ \t]*(?:\r?\n|\z)").unwrap()
});

/// Split a markdown document into its front matter and body.
///
/// Returns `(None, content)` when the document has no front matter.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    match FRONT_MATTER_RE.captures(content) {
        Some(caps) => {
            let yaml = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (Some(yaml), &content[end..])
        }
        None => (None, content),
    }
}

/// Ordered page metadata from front matter.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, Value)>,
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
    /// Front matter is valid YAML but not a key/value mapping.
    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

impl Metadata {
    /// Parse metadata from YAML content.
    ///
    /// Empty content returns an empty instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or not a mapping.
    pub fn from_yaml(content: &str) -> Result<Self, MetadataError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(trimmed)
            .map_err(|e| MetadataError::Parse(format!("Invalid YAML: {e}")))?;

        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::default()),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                return Err(MetadataError::NotAMapping("a scalar"));
            }
            Value::Sequence(_) => return Err(MetadataError::NotAMapping("a sequence")),
            Value::Tagged(_) => return Err(MetadataError::NotAMapping("a tagged value")),
        };

        let mut meta = Self::default();
        for (key, value) in mapping {
            let key = match key {
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                _ => {
                    return Err(MetadataError::Parse(
                        "front matter keys must be scalars".to_owned(),
                    ));
                }
            };
            meta.insert(key, value);
        }
        Ok(meta)
    }

    /// Insert a value, replacing an existing key without moving it.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Get a value by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get a string value by exact key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Explicit `title` from front matter.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    /// Content template override (`template` key).
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.get_str("template").filter(|t| !t.is_empty())
    }

    /// Iterate over entries in front matter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if metadata has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut meta = Self::default();
        for (key, value) in iter {
            meta.insert(key, value);
        }
        meta
    }
}
