//! Content files and their materialization on disk.

use std::fs;
use std::path::{Path, PathBuf};

use mdkirby_content::Assets;
use mdkirby_source::PageId;

use crate::error::ExportError;

/// Empty `dir`, or create it if it does not exist.
///
/// Every entry inside the directory is removed; the directory itself is kept.
pub fn prepare_output_dir(dir: &Path) -> Result<(), ExportError> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "Creating output directory");
        return fs::create_dir_all(dir).map_err(ExportError::io(dir));
    }

    for entry in fs::read_dir(dir).map_err(ExportError::io(dir))? {
        let entry = entry.map_err(ExportError::io(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(ExportError::io(&path))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(ExportError::io(&path))?;
        } else {
            fs::remove_file(&path).map_err(ExportError::io(&path))?;
        }
    }
    tracing::debug!(dir = %dir.display(), "Cleaned output directory");
    Ok(())
}

/// One content file of the output tree.
#[derive(Debug)]
pub struct ContentFile {
    /// Directory relative to the output root, `/`-separated; empty for the root.
    pub dir: String,
    /// File name (`default.md`, `article.en.md`).
    pub filename: String,
    /// Serialized content blocks.
    pub content: String,
    /// Images copied into `dir` next to the file.
    pub assets: Assets,
}

impl ContentFile {
    /// File name for a template, with the locale suffix when set.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdkirby_export::ContentFile;
    ///
    /// assert_eq!(ContentFile::filename_for("default", None), "default.md");
    /// assert_eq!(ContentFile::filename_for("article", Some("en")), "article.en.md");
    /// ```
    #[must_use]
    pub fn filename_for(template: &str, language: Option<&str>) -> String {
        match language {
            Some(lang) => format!("{template}.{lang}.md"),
            None => format!("{template}.md"),
        }
    }

    /// Path of the file relative to the output root.
    #[must_use]
    pub fn relative_path(&self) -> String {
        if self.dir.is_empty() {
            self.filename.clone()
        } else {
            format!("{}/{}", self.dir, self.filename)
        }
    }

    /// Write the file and copy its assets under `root`.
    ///
    /// Returns the number of assets copied.
    pub fn write(&self, root: &Path) -> Result<usize, ExportError> {
        let dir = self
            .dir
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(root.to_path_buf(), |path, segment| path.join(segment));
        fs::create_dir_all(&dir).map_err(ExportError::io(&dir))?;

        for (name, source) in self.assets.iter() {
            let target = dir.join(name);
            fs::copy(source, &target).map_err(ExportError::io(source))?;
            tracing::debug!(asset = %target.display(), "Copied asset");
        }

        let path = dir.join(&self.filename);
        fs::write(&path, &self.content).map_err(ExportError::io(&path))?;
        tracing::debug!(path = %path.display(), "Wrote content file");

        Ok(self.assets.len())
    }
}

/// Everything an exporter would write.
#[derive(Debug, Default)]
pub struct ExportPlan {
    /// Content files in write order.
    pub files: Vec<ContentFile>,
    /// Pages left out of the output.
    pub skipped: Vec<PageId>,
    /// Image references whose file could not be found.
    pub missing_assets: Vec<PathBuf>,
}

impl ExportPlan {
    /// Write every file under `output_dir`, in order.
    ///
    /// Stops at the first filesystem failure.
    pub fn write(self, output_dir: &Path) -> Result<ExportReport, ExportError> {
        let mut report = ExportReport {
            pages_skipped: self.skipped.len(),
            missing_assets: self.missing_assets.len(),
            ..ExportReport::default()
        };

        for file in &self.files {
            report.assets_copied += file.write(output_dir)?;
            report.files_written += 1;
        }
        Ok(report)
    }
}

/// Summary of an export run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Content files written.
    pub files_written: usize,
    /// Asset files copied.
    pub assets_copied: usize,
    /// Pages not written because they are absent from the navigation.
    pub pages_skipped: usize,
    /// Image references left untouched because their file is missing.
    pub missing_assets: usize,
}
