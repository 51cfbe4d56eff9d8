//! Markdown image and link rewriting.
//!
//! Every page ends up in a directory of its own, next to copies of the images
//! it references. Image targets are therefore flattened to their file name and
//! internal links are made relative to the page's new location.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use mdkirby_source::is_external;
use regex::{Captures, Regex};

/// Markdown image: `![alt](target)`.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Markdown link: `[text](target)`. Images also match and are filtered out.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Assets referenced by a page, keyed by file name.
///
/// The first path registered under a name is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assets {
    entries: Vec<(String, PathBuf)>,
}

impl Assets {
    /// Register an asset. Returns `false` if the name was already taken.
    pub fn insert(&mut self, name: impl Into<String>, path: PathBuf) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.entries.push((name, path));
        true
    }

    /// Source path of an asset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.as_path())
    }

    /// Iterate `(name, source path)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_path()))
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no asset was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of [`rewrite`].
#[derive(Debug, Default)]
pub struct Rewritten {
    /// Body with image targets flattened and links fixed.
    pub body: String,
    /// Images to copy next to the content file.
    pub assets: Assets,
    /// Resolved paths of referenced images that do not exist.
    pub missing: Vec<PathBuf>,
}

/// Rewrite a page body for its destination directory.
///
/// `source_dir` is the directory of the source page; relative image targets
/// resolve against it. Existing images are replaced by their file name and
/// collected into [`Rewritten::assets`]; missing ones are left as written and
/// logged. Every non-image link then goes through [`fix_link`].
#[must_use]
pub fn rewrite(body: &str, source_dir: &Path) -> Rewritten {
    let mut out = body.to_owned();
    let mut assets = Assets::default();
    let mut missing = Vec::new();

    for caps in IMAGE_RE.captures_iter(body) {
        let target = &caps[2];
        if is_external(target) {
            continue;
        }

        let path = path_part(target);
        let resolved = normalize(&source_dir.join(path.trim_start_matches('/')));
        if !resolved.is_file() {
            tracing::warn!(asset = %resolved.display(), "Asset not found");
            missing.push(resolved);
            continue;
        }

        let name = path.rsplit('/').next().unwrap_or(path);
        if let Some(kept) = assets.get(name) {
            if kept != resolved.as_path() {
                tracing::debug!(name, path = %resolved.display(), "Asset name already taken");
            }
        } else {
            assets.insert(name, resolved);
        }
        out = out.replace(target, name);
    }

    let body = LINK_RE
        .replace_all(&out, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let start = caps.get(0).map_or(0, |m| m.start());
            if out[..start].ends_with('!') {
                return whole.to_owned();
            }
            format!("[{}]({})", &caps[1], fix_link(&caps[2]))
        })
        .into_owned();

    Rewritten {
        body,
        assets,
        missing,
    }
}

/// Make an internal link target relative to the page's own directory.
///
/// Only the path part of the target is kept: query and fragment are dropped.
/// A trailing `index.md` or `.md` is removed, then a leading `./` and a
/// leading `/`, and the result is prefixed with `../`. External targets are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use mdkirby_content::fix_link;
///
/// assert_eq!(fix_link("./sub/page.md"), "../sub/page");
/// assert_eq!(fix_link("/index.md"), "../");
/// assert_eq!(fix_link("https://example.com/a.md"), "https://example.com/a.md");
/// ```
#[must_use]
pub fn fix_link(link: &str) -> String {
    if is_external(link) {
        return link.to_owned();
    }

    let mut path = path_part(link);
    if let Some(stripped) = path.strip_suffix("index.md") {
        path = stripped;
    }
    if let Some(stripped) = path.strip_suffix(".md") {
        path = stripped;
    }
    let path = path.strip_prefix("./").unwrap_or(path);
    let path = path.strip_prefix('/').unwrap_or(path);

    format!("../{path}")
}

/// Path part of a target, without `?query` and `#fragment`.
fn path_part(target: &str) -> &str {
    target
        .find(['?', '#'])
        .map_or(target, |end| &target[..end])
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
