//! Site loading from a documentation directory.
//!
//! Loading happens in three phases:
//! 1. Scan the source directory for markdown files (sorted, hidden entries
//!    and excluded patterns skipped)
//! 2. Read every file, splitting front matter from the body
//! 3. Resolve the navigation (`mkdocs.yml` `nav:` or the directory layout)
//!    against the scanned files and settle page titles

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use glob::Pattern;
use regex::Regex;

use crate::metadata::{Metadata, MetadataError, split_front_matter};
use crate::nav::{NavEntry, NavItem, parse_nav_file};
use crate::page::{Page, PageId};
use crate::paths::{file_path_to_url, name_to_title};
use crate::site::Site;

/// First level-one ATX heading.
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap());

/// Error returned when loading a documentation source fails.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Reading a file or directory failed.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Front matter could not be parsed.
    #[error("Invalid front matter in {}: {source}", path.display())]
    Metadata {
        /// Markdown file with the broken front matter.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: MetadataError,
    },
    /// Navigation is malformed or references unknown files.
    #[error("Invalid navigation: {0}")]
    Nav(String),
    /// Exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {message}")]
    Pattern {
        /// Offending pattern.
        pattern: String,
        /// Glob error message.
        message: String,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SourceError + '_ {
    move |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Markdown files of one directory, sorted for display.
#[derive(Debug, Default)]
struct DirListing {
    /// Name of the directory (empty for the source root).
    name: String,
    /// Source-relative paths of markdown files, `index.md` first.
    files: Vec<String>,
    /// Subdirectories containing markdown files.
    dirs: Vec<DirListing>,
}

impl DirListing {
    /// Files in discovery order: own files, then subdirectories depth-first.
    fn flatten(&self, out: &mut Vec<String>) {
        out.extend(self.files.iter().cloned());
        for dir in &self.dirs {
            dir.flatten(out);
        }
    }

    /// Navigation derived from the directory layout.
    fn to_nav(&self) -> Vec<NavEntry> {
        let pages = self.files.iter().map(|file| NavEntry::Page {
            title: None,
            file: file.clone(),
        });
        let sections = self.dirs.iter().map(|dir| NavEntry::Section {
            title: name_to_title(&dir.name),
            children: dir.to_nav(),
        });
        pages.chain(sections).collect()
    }
}

/// A markdown file read from disk, before its title is settled.
struct RawDocument {
    rel_path: String,
    abs_path: PathBuf,
    meta: Metadata,
    markdown: String,
}

/// Loads a [`Site`] from a documentation directory.
pub struct SiteLoader {
    source_dir: PathBuf,
    nav_file: Option<PathBuf>,
    exclude: Vec<Pattern>,
}

impl SiteLoader {
    /// Create a loader for a source directory.
    ///
    /// Without a nav file the navigation is derived from the directory layout.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            nav_file: None,
            exclude: Vec::new(),
        }
    }

    /// Read the navigation from an `mkdocs.yml`-style file if it exists.
    #[must_use]
    pub fn with_nav_file(mut self, nav_file: PathBuf) -> Self {
        self.nav_file = Some(nav_file);
        self
    }

    /// Skip files matching any of the glob patterns (relative to the source dir).
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self, SourceError> {
        for pattern in patterns {
            let compiled = Pattern::new(pattern).map_err(|e| SourceError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            self.exclude.push(compiled);
        }
        Ok(self)
    }

    /// Load all pages and the navigation.
    ///
    /// # Errors
    ///
    /// Fails if the source directory is missing, a file cannot be read, front
    /// matter is malformed, or the navigation references unknown files.
    pub fn load(&self) -> Result<Site, SourceError> {
        if !self.source_dir.is_dir() {
            return Err(SourceError::NotFound(self.source_dir.clone()));
        }

        let listing = self.scan_directory(&self.source_dir, String::new(), "")?;
        let mut files = Vec::new();
        listing.flatten(&mut files);

        let documents = files
            .into_iter()
            .map(|rel_path| self.read_document(rel_path))
            .collect::<Result<Vec<_>, _>>()?;

        let entries = match self.read_nav()? {
            Some(entries) => entries,
            None => listing.to_nav(),
        };

        let mut resolver = NavResolver::new(&documents);
        let nav = resolver.resolve(&entries, None)?;
        let (nav_titles, parent_titles) = resolver.into_titles();

        let pages = documents
            .into_iter()
            .zip(nav_titles.into_iter().zip(parent_titles))
            .map(|(doc, (nav_title, parent_title))| build_page(doc, nav_title, parent_title))
            .collect::<Vec<_>>();

        tracing::debug!(
            pages = pages.len(),
            source = %self.source_dir.display(),
            "Loaded documentation source"
        );

        Ok(Site::new(pages, nav))
    }

    /// Parse the nav file, if configured and present.
    fn read_nav(&self) -> Result<Option<Vec<NavEntry>>, SourceError> {
        let Some(nav_file) = self.nav_file.as_deref().filter(|p| p.is_file()) else {
            return Ok(None);
        };
        let content = fs::read_to_string(nav_file).map_err(io_error(nav_file))?;
        parse_nav_file(&content)
    }

    /// Scan a directory recursively, collecting markdown files.
    fn scan_directory(
        &self,
        dir_path: &Path,
        name: String,
        rel_prefix: &str,
    ) -> Result<DirListing, SourceError> {
        let entries = fs::read_dir(dir_path).map_err(io_error(dir_path))?;

        // Collect entries with cached file_type to avoid repeated stat calls
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let file_name = e.file_name().to_string_lossy().into_owned();
                (e.path(), is_dir, file_name)
            })
            .filter(|(_, _, file_name)| !file_name.starts_with('.'))
            .collect();
        entries.sort_by(|a, b| a.2.cmp(&b.2));

        let mut listing = DirListing {
            name,
            ..DirListing::default()
        };

        for (path, is_dir, file_name) in entries {
            let rel_path = if rel_prefix.is_empty() {
                file_name.clone()
            } else {
                format!("{rel_prefix}/{file_name}")
            };

            if is_dir {
                let child = self.scan_directory(&path, file_name, &rel_path)?;
                if !child.files.is_empty() || !child.dirs.is_empty() {
                    listing.dirs.push(child);
                }
            } else if Path::new(&file_name).extension().is_some_and(|e| e == "md") {
                if self.is_excluded(&rel_path) {
                    tracing::debug!(path = %rel_path, "Skipping excluded file");
                } else if file_name == "index.md" {
                    listing.files.insert(0, rel_path);
                } else {
                    listing.files.push(rel_path);
                }
            }
        }

        Ok(listing)
    }

    fn is_excluded(&self, rel_path: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(rel_path))
    }

    /// Read a markdown file and split its front matter.
    fn read_document(&self, rel_path: String) -> Result<RawDocument, SourceError> {
        let abs_path = self.source_dir.join(&rel_path);
        let content = fs::read_to_string(&abs_path).map_err(io_error(&abs_path))?;

        let (front_matter, body) = split_front_matter(&content);
        let meta = match front_matter {
            Some(yaml) => Metadata::from_yaml(yaml).map_err(|source| SourceError::Metadata {
                path: abs_path.clone(),
                source,
            })?,
            None => Metadata::default(),
        };

        Ok(RawDocument {
            markdown: body.to_owned(),
            rel_path,
            abs_path,
            meta,
        })
    }
}

/// Resolves navigation entries to page ids, recording titles along the way.
struct NavResolver<'a> {
    index: HashMap<&'a str, usize>,
    nav_titles: Vec<Option<String>>,
    parent_titles: Vec<Option<String>>,
}

impl<'a> NavResolver<'a> {
    fn new(documents: &'a [RawDocument]) -> Self {
        Self {
            index: documents
                .iter()
                .enumerate()
                .map(|(i, doc)| (doc.rel_path.as_str(), i))
                .collect(),
            nav_titles: vec![None; documents.len()],
            parent_titles: vec![None; documents.len()],
        }
    }

    /// Navigation and parent section titles, indexed like the documents.
    fn into_titles(self) -> (Vec<Option<String>>, Vec<Option<String>>) {
        (self.nav_titles, self.parent_titles)
    }

    fn resolve(
        &mut self,
        entries: &[NavEntry],
        parent: Option<&str>,
    ) -> Result<Vec<NavItem>, SourceError> {
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                NavEntry::Page { title, file } => {
                    let &idx = self.index.get(file.as_str()).ok_or_else(|| {
                        SourceError::Nav(format!("'{file}' does not match any document"))
                    })?;
                    // First mention wins when a page is listed twice
                    if self.nav_titles[idx].is_none() {
                        self.nav_titles[idx].clone_from(title);
                    }
                    if self.parent_titles[idx].is_none() {
                        self.parent_titles[idx] = parent.map(str::to_owned);
                    }
                    items.push(NavItem::Page(PageId::new(idx)));
                }
                NavEntry::Section { title, children } => {
                    let children = self.resolve(children, Some(title))?;
                    items.push(NavItem::section(title.clone(), children));
                }
            }
        }
        Ok(items)
    }
}

/// Settle the page title: front matter > navigation > first H1 > file name.
fn build_page(doc: RawDocument, nav_title: Option<String>, parent_title: Option<String>) -> Page {
    let rel_path = PathBuf::from(&doc.rel_path);
    let title = doc
        .meta
        .title()
        .map(str::to_owned)
        .or(nav_title)
        .or_else(|| {
            H1_RE
                .captures(&doc.markdown)
                .map(|caps| caps[1].trim().to_owned())
        })
        .unwrap_or_else(|| {
            let stem = rel_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            name_to_title(&stem)
        });

    Page {
        title,
        url: file_path_to_url(&rel_path),
        src_path: rel_path,
        abs_src_path: doc.abs_path,
        markdown: doc.markdown,
        meta: doc.meta,
        parent_title,
    }
}
