//! `mdkirby build` command implementation.

use clap::Args;
use mdkirby_export::prepare_output_dir;

use super::{ProjectArgs, export_options, exporter, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Keep existing files in the output directory.
    #[arg(long)]
    no_clean: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or source loading fails, or if the
    /// content tree cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.project.load_config(self.no_clean.then_some(false))?;
        let output_dir = &config.output_resolved.dir;

        output.location("Source", &config.docs_resolved.source_dir);
        output.location("Output", output_dir);

        let site = load_site(&config)?;
        tracing::debug!(pages = site.len(), mode = ?config.output_resolved.mode, "Loaded site");
        let options = export_options(&config);

        if config.output_resolved.clean {
            prepare_output_dir(output_dir)?;
        }

        let report = exporter(config.output_resolved.mode, &site, &options).export(output_dir)?;

        output.report(&report, output_dir);
        Ok(())
    }
}
