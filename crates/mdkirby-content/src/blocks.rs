//! Kirby content block format.
//!
//! A content file is a sequence of blocks:
//!
//! ```text
//! Title: Intro
//!
//! ----
//!
//! Text: Hello
//!
//! ```
//!
//! Each block is `Key: value` followed by a blank line; blocks after the first
//! are preceded by a `----` separator line.

use mdkirby_source::{MetaValue, Page};

/// Title used for nodes without a page.
const PLACEHOLDER_TITLE: &str = "No Title";

/// Separator between two blocks.
const SEPARATOR: &str = "----\n\n";

/// Ordered, key-unique list of content blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentBlocks {
    blocks: Vec<(String, String)>,
}

impl ContentBlocks {
    /// Create an empty block list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a block, replacing the value of an existing key without moving it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.blocks.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.blocks.push((key, value));
        }
    }

    /// Get a block value by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.blocks
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate blocks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.blocks.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if there are no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the blocks as Kirby content text.
    ///
    /// Keys are title-cased on output (`author` -> `Author`).
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push_str(SEPARATOR);
            }
            out.push_str(&title_case(key));
            out.push_str(": ");
            out.push_str(value);
            out.push_str("\n\n");
        }
        out
    }
}

/// Title-case a block key.
///
/// A letter is upper-cased when it starts a run of letters and lower-cased
/// otherwise, so `created_at` becomes `Created_At` and `SEO` becomes `Seo`.
#[must_use]
pub fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_word = false;
    for c in key.chars() {
        if c.is_uppercase() || c.is_lowercase() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Render a front matter value as block text.
///
/// Strings are written verbatim, other scalars in their YAML spelling and
/// null as nothing. Lists and mappings become compact JSON.
#[must_use]
pub fn render_value(value: &MetaValue) -> String {
    match value {
        MetaValue::Null => String::new(),
        MetaValue::Bool(b) => b.to_string(),
        MetaValue::Number(n) => n.to_string(),
        MetaValue::String(s) => s.clone(),
        MetaValue::Sequence(_) | MetaValue::Mapping(_) => serde_json::to_string(value)
            .or_else(|_| serde_yaml::to_string(value).map(|s| s.trim_end().to_owned()))
            .unwrap_or_default(),
        MetaValue::Tagged(tagged) => render_value(&tagged.value),
    }
}

/// Blocks for a node of the destination tree.
///
/// `title` first (page title, or a placeholder for container nodes), then
/// every metadata key lower-cased, then `text` with the raw page body.
/// Container nodes only get the title block.
#[must_use]
pub fn node_blocks(page: Option<&Page>) -> ContentBlocks {
    let mut blocks = ContentBlocks::new();
    let Some(page) = page else {
        blocks.insert("title", PLACEHOLDER_TITLE);
        return blocks;
    };

    blocks.insert("title", page.title.as_str());
    for (key, value) in page.meta.iter() {
        blocks.insert(key.to_lowercase(), render_value(value));
    }
    blocks.insert("text", page.markdown.as_str());
    blocks
}

/// Blocks for a page written as a standalone document.
///
/// `Title` comes from the front matter `title`, else the page title unless it
/// is the literal `index`, else the enclosing section title; it is omitted
/// when none applies. Remaining metadata follows with its keys as written,
/// then `Text` holding `body` after a blank line.
#[must_use]
pub fn document_blocks(page: &Page, body: &str) -> ContentBlocks {
    let mut blocks = ContentBlocks::new();

    let title = if let Some(title) = page.meta.get("title") {
        Some(render_value(title))
    } else if page.title.to_lowercase() != "index" {
        Some(page.title.clone())
    } else {
        page.parent_title.clone()
    };
    if let Some(title) = title {
        blocks.insert("Title", title);
    }

    for (key, value) in page.meta.iter().filter(|(key, _)| *key != "title") {
        blocks.insert(key, render_value(value));
    }

    blocks.insert("Text", format!("\n\n{body}"));
    blocks
}
