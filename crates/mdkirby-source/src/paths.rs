//! Path and URL helpers shared by the loader and the content rewriter.

use std::path::Path;

use url::Url;

/// Convert a source-relative markdown path to its directory-style URL.
///
/// Every page is published as a directory, so URLs end with `/` except for
/// the home page which maps to the empty string.
///
/// # Examples
///
/// - `index.md` -> `""`
/// - `guide.md` -> `"guide/"`
/// - `domain/index.md` -> `"domain/"`
/// - `domain/setup.md` -> `"domain/setup/"`
pub fn file_path_to_url(rel_path: &Path) -> String {
    let parent = rel_path
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();
    let stem = rel_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut segments: Vec<&str> = parent.split('/').filter(|s| !s.is_empty()).collect();
    if stem != "index" {
        segments.push(&stem);
    }

    if segments.is_empty() {
        String::new()
    } else {
        format!("{}/", segments.join("/"))
    }
}

/// Check whether a link target points outside the documentation tree.
///
/// A target is external when it carries a scheme (`https:`, `mailto:`) or a
/// network location (`//cdn.example.com/x.png`).
pub fn is_external(target: &str) -> bool {
    match Url::parse(target) {
        Ok(_) => true,
        Err(url::ParseError::RelativeUrlWithoutBase) => target.starts_with("//"),
        // Any other failure means a scheme was recognized but the rest is malformed
        Err(_) => true,
    }
}

/// Derive a display title from a file stem or directory name.
///
/// Dashes and underscores become spaces; an all-lowercase result gets its
/// first letter capitalized, anything else is kept as written.
///
/// # Examples
///
/// - `getting-started` -> `Getting started`
/// - `API_Reference` -> `API Reference`
/// - `index` -> `Index`
pub(crate) fn name_to_title(name: &str) -> String {
    let title = name.replace(['-', '_'], " ");
    if title.to_lowercase() != title {
        return title;
    }
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_to_url() {
        assert_eq!(file_path_to_url(Path::new("index.md")), "");
        assert_eq!(file_path_to_url(Path::new("guide.md")), "guide/");
        assert_eq!(file_path_to_url(Path::new("domain/index.md")), "domain/");
        assert_eq!(
            file_path_to_url(Path::new("domain/setup.md")),
            "domain/setup/"
        );
        assert_eq!(file_path_to_url(Path::new("a/b/c.md")), "a/b/c/");
    }

    #[test]
    fn test_is_external_with_scheme() {
        assert!(is_external("https://example.com/a.png"));
        assert!(is_external("http://example.com"));
        assert!(is_external("mailto:team@example.com"));
    }

    #[test]
    fn test_is_external_protocol_relative() {
        assert!(is_external("//cdn.example.com/logo.svg"));
    }

    #[test]
    fn test_is_external_relative_paths() {
        assert!(!is_external("img/pic.png"));
        assert!(!is_external("./sub/page.md"));
        assert!(!is_external("/index.md"));
        assert!(!is_external("../other.md#anchor"));
    }

    #[test]
    fn test_name_to_title() {
        assert_eq!(name_to_title("getting-started"), "Getting started");
        assert_eq!(name_to_title("my_page"), "My page");
        assert_eq!(name_to_title("API_Reference"), "API Reference");
        assert_eq!(name_to_title("index"), "Index");
        assert_eq!(name_to_title(""), "");
    }
}
