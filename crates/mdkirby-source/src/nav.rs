//! Navigation tree.
//!
//! The navigation is the display order of the documentation. It is either
//! read from the `nav:` key of an `mkdocs.yml` file or derived from the
//! directory layout when no such key exists.
//!
//! # `nav:` syntax
//!
//! ```yaml
//! nav:
//!   - index.md                      # page, title from the page itself
//!   - Setup: guide/setup.md         # page with explicit title
//!   - Guide:                        # section
//!       - guide/index.md
//!       - guide/usage.md
//!   - GitHub: https://github.com    # external link, ignored
//! ```

use serde::Deserialize;
use serde_yaml::Value;

use crate::loader::SourceError;
use crate::page::PageId;
use crate::paths::is_external;

/// Entry of the display-ordered navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavItem {
    /// A page, identified by its id in the [`Site`](crate::Site).
    Page(PageId),
    /// A titled group of further items.
    Section {
        /// Section title as displayed.
        title: String,
        /// Items in display order.
        children: Vec<NavItem>,
    },
}

impl NavItem {
    /// Create a section item.
    #[must_use]
    pub fn section(title: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self::Section {
            title: title.into(),
            children,
        }
    }

    /// Collect page ids depth-first, in display order.
    #[must_use]
    pub fn pages(items: &[NavItem]) -> Vec<PageId> {
        fn collect(items: &[NavItem], out: &mut Vec<PageId>) {
            for item in items {
                match item {
                    NavItem::Page(id) => out.push(*id),
                    NavItem::Section { children, .. } => collect(children, out),
                }
            }
        }

        let mut out = Vec::new();
        collect(items, &mut out);
        out
    }
}

/// Navigation entry as written in `mkdocs.yml`, before file resolution.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum NavEntry {
    Page {
        title: Option<String>,
        file: String,
    },
    Section {
        title: String,
        children: Vec<NavEntry>,
    },
}

/// The only part of `mkdocs.yml` we read.
#[derive(Deserialize)]
struct NavFile {
    #[serde(default)]
    nav: Option<Value>,
}

/// Parse the `nav:` key of an `mkdocs.yml` document.
///
/// Returns `Ok(None)` when the document has no `nav:` key.
pub(crate) fn parse_nav_file(content: &str) -> Result<Option<Vec<NavEntry>>, SourceError> {
    let file: NavFile = serde_yaml::from_str(content)
        .map_err(|e| SourceError::Nav(format!("invalid YAML: {e}")))?;
    file.nav.map(|nav| parse_entries(&nav)).transpose()
}

fn parse_entries(value: &Value) -> Result<Vec<NavEntry>, SourceError> {
    let Value::Sequence(items) = value else {
        return Err(SourceError::Nav(format!(
            "expected a list of entries, found {}",
            describe(value)
        )));
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        if let Some(entry) = parse_entry(item)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Parse one entry. External links yield `None`.
fn parse_entry(value: &Value) -> Result<Option<NavEntry>, SourceError> {
    match value {
        Value::String(target) => Ok(page_entry(None, target)),
        Value::Mapping(mapping) if mapping.len() == 1 => {
            let Some((key, value)) = mapping.iter().next() else {
                return Ok(None);
            };
            let Some(title) = key.as_str() else {
                return Err(SourceError::Nav(format!(
                    "entry titles must be strings, found {}",
                    describe(key)
                )));
            };
            match value {
                Value::String(target) => Ok(page_entry(Some(title), target)),
                Value::Sequence(_) => Ok(Some(NavEntry::Section {
                    title: title.to_owned(),
                    children: parse_entries(value)?,
                })),
                other => Err(SourceError::Nav(format!(
                    "entry '{title}' must be a file or a list, found {}",
                    describe(other)
                ))),
            }
        }
        other => Err(SourceError::Nav(format!(
            "unexpected entry: {}",
            describe(other)
        ))),
    }
}

fn page_entry(title: Option<&str>, target: &str) -> Option<NavEntry> {
    if is_external(target) {
        tracing::debug!(target, "Skipping external navigation link");
        return None;
    }
    Some(NavEntry::Page {
        title: title.map(str::to_owned),
        file: target.trim_start_matches("./").to_owned(),
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn page(title: Option<&str>, file: &str) -> NavEntry {
        NavEntry::Page {
            title: title.map(str::to_owned),
            file: file.to_owned(),
        }
    }

    #[test]
    fn test_parse_nav_file_full() {
        let yaml = r"
site_name: Docs
nav:
  - index.md
  - Setup: ./guide/setup.md
  - Guide:
      - guide/index.md
      - Usage: guide/usage.md
  - GitHub: https://github.com/example
";
        let nav = parse_nav_file(yaml).unwrap().unwrap();

        assert_eq!(
            nav,
            vec![
                page(None, "index.md"),
                page(Some("Setup"), "guide/setup.md"),
                NavEntry::Section {
                    title: "Guide".to_owned(),
                    children: vec![
                        page(None, "guide/index.md"),
                        page(Some("Usage"), "guide/usage.md"),
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_parse_nav_file_without_nav() {
        assert!(parse_nav_file("site_name: Docs\n").unwrap().is_none());
    }

    #[test]
    fn test_parse_nav_not_a_list() {
        let err = parse_nav_file("nav: index.md\n").unwrap_err();
        assert!(err.to_string().contains("list"));
    }

    #[test]
    fn test_parse_nav_bad_entry() {
        let err = parse_nav_file("nav:\n  - 42\n").unwrap_err();
        assert!(err.to_string().contains("unexpected entry"));
    }

    #[test]
    fn test_parse_nav_multi_key_mapping_rejected() {
        let err = parse_nav_file("nav:\n  - {A: a.md, B: b.md}\n").unwrap_err();
        assert!(matches!(err, SourceError::Nav(_)));
    }

    #[test]
    fn test_nav_item_pages_depth_first() {
        let nav = vec![
            NavItem::Page(PageId::new(2)),
            NavItem::section(
                "S",
                vec![
                    NavItem::Page(PageId::new(0)),
                    NavItem::section("T", vec![NavItem::Page(PageId::new(3))]),
                ],
            ),
            NavItem::Page(PageId::new(1)),
        ];

        assert_eq!(
            NavItem::pages(&nav),
            vec![
                PageId::new(2),
                PageId::new(0),
                PageId::new(3),
                PageId::new(1)
            ]
        );
    }
}
