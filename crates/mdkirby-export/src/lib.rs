//! Kirby content tree export for mdkirby.
//!
//! Two exporters turn a loaded [`Site`](mdkirby_source::Site) into a content
//! tree:
//!
//! - [`StructureExporter`]: one directory per node of the page tree, ordered
//!   by the navigation, every node gets a content file
//! - [`DocumentExporter`]: one directory per navigation entry, with links
//!   rewritten and images copied next to each page
//!
//! Both produce an [`ExportPlan`] first, so the destination layout can be
//! inspected without touching the disk.
//!
//! # Example
//!
//! ```ignore
//! use mdkirby_export::{ExportOptions, Exporter, StructureExporter, prepare_output_dir};
//!
//! let options = ExportOptions::default();
//! prepare_output_dir(&output_dir)?;
//! let report = StructureExporter::new(&site, &options).export(&output_dir)?;
//! println!("{} files written", report.files_written);
//! ```

mod documents;
mod error;
mod output;
mod structure;

pub use documents::DocumentExporter;
pub use error::ExportError;
pub use output::{ContentFile, ExportPlan, ExportReport, prepare_output_dir};
pub use structure::StructureExporter;

use std::path::Path;

use mdkirby_tree::UnlistedPolicy;

/// Template used when neither the options nor the page name one.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Settings shared by both exporters.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Template for pages without a `template` front matter key.
    pub default_template: String,
    /// Locale suffix of content files (`default.en.md`).
    pub language: Option<String>,
    /// Naming of nodes absent from the navigation.
    pub unlisted: UnlistedPolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            default_template: DEFAULT_TEMPLATE.to_owned(),
            language: None,
            unlisted: UnlistedPolicy::default(),
        }
    }
}

impl ExportOptions {
    /// Content file name for a page template override, if any.
    #[must_use]
    pub fn filename(&self, template: Option<&str>) -> String {
        ContentFile::filename_for(
            template.unwrap_or(&self.default_template),
            self.language.as_deref(),
        )
    }
}

/// Produces a content tree from a site.
pub trait Exporter {
    /// Compute every content file without writing anything.
    fn plan(&self) -> ExportPlan;

    /// Write the content tree under `output_dir`.
    ///
    /// The directory is expected to have been prepared with
    /// [`prepare_output_dir`]; existing files are overwritten.
    fn export(&self, output_dir: &Path) -> Result<ExportReport, ExportError> {
        self.plan().write(output_dir)
    }
}
