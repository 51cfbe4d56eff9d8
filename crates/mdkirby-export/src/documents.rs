//! Per-page document export.
//!
//! Destinations come from the navigation alone: each entry at a level takes
//! the next position `i` and lives in `<i>_<slug>` under its parent entry,
//! where the slug is the section title (lower-cased, spaces as `-`) or the
//! page file stem. `index` pages stay in the directory of their level.
//! Pages missing from the navigation are not written.

use std::collections::HashMap;
use std::path::Path;

use mdkirby_content::{document_blocks, rewrite};
use mdkirby_source::{NavItem, PageId, Site};

use crate::output::{ContentFile, ExportPlan};
use crate::{ExportOptions, Exporter};

/// Exports every listed page as a standalone document.
pub struct DocumentExporter<'a> {
    site: &'a Site,
    options: &'a ExportOptions,
}

impl<'a> DocumentExporter<'a> {
    /// Create an exporter for a loaded site.
    #[must_use]
    pub fn new(site: &'a Site, options: &'a ExportOptions) -> Self {
        Self { site, options }
    }

    /// Destination directory of every page reachable from the navigation.
    ///
    /// A page listed twice keeps its last position.
    #[must_use]
    pub fn destinations(&self) -> HashMap<PageId, String> {
        let mut out = HashMap::new();
        self.collect(self.site.nav(), "", &mut out);
        out
    }

    fn collect(&self, items: &[NavItem], current: &str, out: &mut HashMap<PageId, String>) {
        for (i, item) in items.iter().enumerate() {
            let slug = match item {
                NavItem::Section { title, .. } => title.replace(' ', "-").to_lowercase(),
                NavItem::Page(id) => self
                    .site
                    .page(*id)
                    .map(mdkirby_source::Page::file_stem)
                    .unwrap_or_default(),
            };

            let directory = if slug == "index" {
                current.to_owned()
            } else if current.is_empty() {
                format!("{i}_{slug}")
            } else {
                format!("{current}/{i}_{slug}")
            };

            match item {
                NavItem::Section { children, .. } => self.collect(children, &directory, out),
                NavItem::Page(id) => {
                    out.insert(*id, directory);
                }
            }
        }
    }
}

impl Exporter for DocumentExporter<'_> {
    fn plan(&self) -> ExportPlan {
        let destinations = self.destinations();
        let mut plan = ExportPlan::default();

        for (id, page) in self.site.iter() {
            let Some(dir) = destinations.get(&id) else {
                tracing::info!(page = %page.src_path.display(), "Page not listed");
                plan.skipped.push(id);
                continue;
            };

            let source_dir = page.abs_src_path.parent().unwrap_or(Path::new(""));
            let rewritten = rewrite(&page.markdown, source_dir);
            if !rewritten.missing.is_empty() {
                tracing::debug!(
                    page = %page.src_path.display(),
                    count = rewritten.missing.len(),
                    "Page references missing assets"
                );
            }
            plan.missing_assets.extend(rewritten.missing);

            plan.files.push(ContentFile {
                dir: dir.clone(),
                filename: self.options.filename(page.meta.template()),
                content: document_blocks(page, &rewritten.body).render(),
                assets: rewritten.assets,
            });
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::PathBuf;

    use mdkirby_source::{Metadata, Page};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn page(docs: &Path, src: &str, title: &str, markdown: &str) -> Page {
        Page {
            title: title.to_owned(),
            url: String::new(),
            src_path: PathBuf::from(src),
            abs_src_path: docs.join(src),
            markdown: markdown.to_owned(),
            meta: Metadata::default(),
            parent_title: None,
        }
    }

    /// `index.md`, a "User Guide" section with an index and a setup page,
    /// `about.md`, and an unlisted `drafts.md`.
    fn site(docs: &Path) -> Site {
        let mut guide_index = page(docs, "guide/index.md", "Index", "Intro");
        guide_index.parent_title = Some("User Guide".to_owned());

        Site::new(
            vec![
                page(docs, "index.md", "Home", "Start [here](guide/setup.md)"),
                guide_index,
                page(
                    docs,
                    "guide/setup.md",
                    "Setup",
                    "![shot](img/shot.png) ![gone](img/gone.png) [home](../index.md)",
                ),
                page(docs, "about.md", "About", ""),
                page(docs, "drafts.md", "Drafts", ""),
            ],
            vec![
                NavItem::Page(PageId::new(0)),
                NavItem::section(
                    "User Guide",
                    vec![NavItem::Page(PageId::new(1)), NavItem::Page(PageId::new(2))],
                ),
                NavItem::Page(PageId::new(3)),
            ],
        )
    }

    #[test]
    fn test_destinations() {
        let site = site(Path::new("/docs"));
        let options = ExportOptions::default();

        let destinations = DocumentExporter::new(&site, &options).destinations();

        assert_eq!(destinations.get(&PageId::new(0)).map(String::as_str), Some(""));
        assert_eq!(
            destinations.get(&PageId::new(1)).map(String::as_str),
            Some("1_user-guide")
        );
        assert_eq!(
            destinations.get(&PageId::new(2)).map(String::as_str),
            Some("1_user-guide/1_setup")
        );
        assert_eq!(
            destinations.get(&PageId::new(3)).map(String::as_str),
            Some("2_about")
        );
        assert!(!destinations.contains_key(&PageId::new(4)));
    }

    #[test]
    fn test_plan_skips_unlisted() {
        let site = site(Path::new("/docs"));
        let options = ExportOptions::default();

        let plan = DocumentExporter::new(&site, &options).plan();

        assert_eq!(plan.skipped, vec![PageId::new(4)]);
        let paths: Vec<String> = plan.files.iter().map(ContentFile::relative_path).collect();
        assert_eq!(
            paths,
            vec![
                "default.md",
                "1_user-guide/default.md",
                "1_user-guide/1_setup/default.md",
                "2_about/default.md",
            ]
        );
    }

    #[test]
    fn test_plan_filename_language_and_template() {
        let mut site_pages = site(Path::new("/docs")).pages().to_vec();
        site_pages[3].meta = Metadata::from_yaml("template: about").unwrap();
        let site = Site::new(site_pages, vec![NavItem::Page(PageId::new(3))]);
        let options = ExportOptions {
            language: Some("en".to_owned()),
            ..ExportOptions::default()
        };

        let plan = DocumentExporter::new(&site, &options).plan();

        assert_eq!(plan.files[0].relative_path(), "0_about/about.en.md");
    }

    #[test]
    fn test_plan_index_title_from_section() {
        let site = site(Path::new("/docs"));
        let options = ExportOptions::default();

        let plan = DocumentExporter::new(&site, &options).plan();

        assert_eq!(
            plan.files[1].content,
            "Title: User Guide\n\n----\n\nText: \n\nIntro\n\n"
        );
    }

    #[test]
    fn test_export_rewrites_and_copies_assets() {
        let temp = TempDir::new().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(docs.join("guide/img")).unwrap();
        fs::write(docs.join("guide/img/shot.png"), "png").unwrap();
        let out = temp.path().join("content");

        let site = site(&docs);
        let options = ExportOptions::default();
        let report = DocumentExporter::new(&site, &options)
            .export(&out)
            .unwrap();

        assert_eq!(report.files_written, 4);
        assert_eq!(report.assets_copied, 1);
        assert_eq!(report.pages_skipped, 1);
        assert_eq!(report.missing_assets, 1);

        let setup = fs::read_to_string(out.join("1_user-guide/1_setup/default.md")).unwrap();
        assert_eq!(
            setup,
            "Title: Setup\n\n----\n\nText: \n\n![shot](shot.png) ![gone](img/gone.png) [home](../../)\n\n"
        );
        assert!(out.join("1_user-guide/1_setup/shot.png").is_file());
        assert_eq!(
            fs::read_to_string(out.join("default.md")).unwrap(),
            "Title: Home\n\n----\n\nText: \n\nStart [here](../guide/setup)\n\n"
        );
    }
}
