//! Source page model.

use std::fmt;
use std::path::PathBuf;

use crate::metadata::Metadata;

/// Stable identifier of a page inside a [`Site`](crate::Site).
///
/// Two navigation entries refer to the same page exactly when their ids are
/// equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(usize);

impl PageId {
    /// Create an id from a page index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index of the page in [`Site::pages`](crate::Site::pages).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A parsed source document. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// Display title (front matter > navigation > first H1 > file name).
    pub title: String,
    /// Directory-style URL (e.g., "", "guide/", "domain/setup/").
    pub url: String,
    /// Source path relative to the docs directory.
    pub src_path: PathBuf,
    /// Absolute source path.
    pub abs_src_path: PathBuf,
    /// Markdown body without front matter.
    pub markdown: String,
    /// Front matter entries.
    pub meta: Metadata,
    /// Title of the navigation section containing this page, if any.
    pub parent_title: Option<String>,
}

impl Page {
    /// URL split into path segments (empty for the home page).
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.url.split('/').filter(|s| !s.is_empty())
    }

    /// File stem of the source path (`setup` for `guide/setup.md`).
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.src_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
