//! Node tree export.
//!
//! Every page is registered by its URL, the navigation stamps ordinals, and
//! each node of the resulting tree becomes a directory with one content file.
//! Intermediate nodes without a page still get a file with a placeholder
//! title.

use mdkirby_content::{Assets, node_blocks};
use mdkirby_source::Site;
use mdkirby_tree::NodeTree;

use crate::output::{ContentFile, ExportPlan};
use crate::{ExportOptions, Exporter};

/// Exports the site as one directory per node of the page tree.
pub struct StructureExporter<'a> {
    site: &'a Site,
    options: &'a ExportOptions,
}

impl<'a> StructureExporter<'a> {
    /// Create an exporter for a loaded site.
    #[must_use]
    pub fn new(site: &'a Site, options: &'a ExportOptions) -> Self {
        Self { site, options }
    }

    /// Build the node tree: register all pages, then assign ordinals.
    #[must_use]
    pub fn build_tree(&self) -> NodeTree {
        let mut tree = NodeTree::new(self.options.unlisted);
        for (id, page) in self.site.iter() {
            tree.register_page(&page.url, id);
        }
        let root = tree.root();
        tree.assign_ordinals(self.site.nav(), root);
        tracing::debug!(nodes = tree.len(), "Built node tree");
        tree
    }
}

impl Exporter for StructureExporter<'_> {
    fn plan(&self) -> ExportPlan {
        let tree = self.build_tree();

        let files = tree
            .walk()
            .map(|id| {
                let page = tree
                    .node(id)
                    .page()
                    .and_then(|page| self.site.page(page));
                ContentFile {
                    dir: tree.path(id),
                    filename: self.options.filename(tree.template(id, self.site)),
                    content: node_blocks(page).render(),
                    assets: Assets::default(),
                }
            })
            .collect();

        ExportPlan {
            files,
            ..ExportPlan::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::PathBuf;

    use mdkirby_source::{Metadata, NavItem, Page, PageId};
    use mdkirby_tree::UnlistedPolicy;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn page(src: &str, url: &str, title: &str, meta: &str, markdown: &str) -> Page {
        Page {
            title: title.to_owned(),
            url: url.to_owned(),
            src_path: PathBuf::from(src),
            abs_src_path: PathBuf::from("/docs").join(src),
            markdown: markdown.to_owned(),
            meta: Metadata::from_yaml(meta).unwrap(),
            parent_title: None,
        }
    }

    /// Home, a nested page under a container node, and two top-level pages
    /// listed in reverse creation order.
    fn site() -> Site {
        Site::new(
            vec![
                page("index.md", "", "Home", "", "Welcome"),
                page("guide.md", "guide/", "Guide", "author: Jane", "Read me"),
                page("faq.md", "faq/", "FAQ", "template: questions", "Ask"),
                page("api/v1.md", "api/v1/", "V1", "", "Endpoints"),
            ],
            vec![
                NavItem::Page(PageId::new(0)),
                NavItem::Page(PageId::new(2)),
                NavItem::Page(PageId::new(1)),
            ],
        )
    }

    fn paths(plan: &ExportPlan) -> Vec<String> {
        plan.files.iter().map(ContentFile::relative_path).collect()
    }

    #[test]
    fn test_plan_paths() {
        let site = site();
        let options = ExportOptions::default();

        let plan = StructureExporter::new(&site, &options).plan();

        assert_eq!(
            paths(&plan),
            vec![
                "default.md",
                "2_guide/default.md",
                "1_faq/questions.md",
                "api/default.md",
                "api/v1/default.md",
            ]
        );
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_plan_draft_policy() {
        let site = site();
        let options = ExportOptions {
            unlisted: UnlistedPolicy::Draft,
            ..ExportOptions::default()
        };

        let plan = StructureExporter::new(&site, &options).plan();

        assert_eq!(plan.files[3].relative_path(), "_api/default.md");
        assert_eq!(plan.files[4].relative_path(), "_api/_v1/default.md");
    }

    #[test]
    fn test_plan_language_on_every_level() {
        let site = site();
        let options = ExportOptions {
            language: Some("de".to_owned()),
            ..ExportOptions::default()
        };

        let plan = StructureExporter::new(&site, &options).plan();

        assert!(plan.files.iter().all(|f| f.filename.ends_with(".de.md")));
        assert_eq!(plan.files[4].relative_path(), "api/v1/default.de.md");
    }

    #[test]
    fn test_plan_contents() {
        let site = site();
        let options = ExportOptions::default();

        let plan = StructureExporter::new(&site, &options).plan();

        assert_eq!(
            plan.files[1].content,
            "Title: Guide\n\n----\n\nAuthor: Jane\n\n----\n\nText: Read me\n\n"
        );
        assert_eq!(plan.files[3].content, "Title: No Title\n\n");
    }

    #[test]
    fn test_export_writes_tree() {
        let temp = TempDir::new().unwrap();
        let site = site();
        let options = ExportOptions::default();

        let report = StructureExporter::new(&site, &options)
            .export(temp.path())
            .unwrap();

        assert_eq!(report.files_written, 5);
        assert_eq!(
            fs::read_to_string(temp.path().join("default.md")).unwrap(),
            "Title: Home\n\n----\n\nText: Welcome\n\n"
        );
        assert!(temp.path().join("1_faq/questions.md").is_file());
        assert!(temp.path().join("api/v1/default.md").is_file());
    }
}
