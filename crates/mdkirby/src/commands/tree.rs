//! `mdkirby tree` command implementation.

use clap::Args;

use super::{ProjectArgs, export_options, exporter, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or source loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.project.load_config(None)?;
        let site = load_site(&config)?;
        let options = export_options(&config);

        let plan = exporter(config.output_resolved.mode, &site, &options).plan();

        output.location(&format!("{} pages", site.len()), &config.output_resolved.dir);
        let unlisted = plan
            .skipped
            .iter()
            .filter_map(|id| site.page(*id))
            .map(|page| page.src_path.as_path());
        output.plan(&plan.files, unlisted);
        Ok(())
    }
}
