//! Terminal reporting for the CLI commands.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};
use mdkirby_export::{ContentFile, ExportReport};

/// Writes progress and results for a conversion run.
///
/// Status lines go to stderr; the planned file listing goes to stdout so it
/// can be piped.
pub(crate) struct Output {
    stderr: Term,
    stdout: Term,
    done: Style,
    warn: Style,
    failed: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            stdout: Term::stdout(),
            done: Style::new().green(),
            warn: Style::new().yellow(),
            failed: Style::new().red(),
        }
    }

    /// Print a `Label: path` status line.
    pub(crate) fn location(&self, label: &str, path: &Path) {
        self.status(&format!("{label}: {}", path.display()));
    }

    /// Summarize a finished export into `dir`.
    pub(crate) fn report(&self, report: &ExportReport, dir: &Path) {
        if report.pages_skipped > 0 {
            self.status(&format!(
                "{} page(s) not in the navigation were skipped",
                report.pages_skipped
            ));
        }
        if report.missing_assets > 0 {
            self.status(&self.warn.apply_to(format!(
                "{} image reference(s) point to missing files",
                report.missing_assets
            )));
        }
        self.status(&self.done.apply_to(format!(
            "Wrote {} content file(s) and {} asset(s) to {}",
            report.files_written,
            report.assets_copied,
            dir.display()
        )));
    }

    /// List planned content files on stdout, then unlisted sources on stderr.
    pub(crate) fn plan<'a>(
        &self,
        files: &[ContentFile],
        unlisted: impl IntoIterator<Item = &'a Path>,
    ) {
        for file in files {
            let _ = self.stdout.write_line(&file.relative_path());
        }
        for path in unlisted {
            self.status(&self.warn.apply_to(format!("Not listed: {}", path.display())));
        }
    }

    /// Print a fatal error.
    pub(crate) fn error(&self, err: &dyn Display) {
        self.status(&self.failed.apply_to(format!("Error: {err}")));
    }

    fn status(&self, line: &impl Display) {
        let _ = self.stderr.write_line(&line.to_string());
    }
}
