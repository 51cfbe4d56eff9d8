//! CLI command implementations.

mod build;
mod tree;

pub(crate) use build::BuildArgs;
pub(crate) use tree::TreeArgs;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use mdkirby_config::{CliSettings, Config, OutputMode, UnlistedMode};
use mdkirby_export::{DocumentExporter, ExportOptions, Exporter, StructureExporter};
use mdkirby_source::{Site, SiteLoader};
use mdkirby_tree::UnlistedPolicy;

use crate::error::CliError;

/// Export mode as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    /// One directory per node of the page tree.
    Structure,
    /// One directory per navigation entry, with rewritten links and assets.
    Documents,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Structure => Self::Structure,
            ModeArg::Documents => Self::Documents,
        }
    }
}

/// Arguments shared by every command that reads a project.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover mdkirby.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the content tree (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Language suffix for content files (overrides config).
    #[arg(short, long, env = "MDKIRBY_LANGUAGE")]
    language: Option<String>,

    /// Export mode (overrides config).
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Enable verbose output (show unlisted pages and written files).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProjectArgs {
    /// Load the configuration, applying command line overrides.
    pub(crate) fn load_config(&self, clean: Option<bool>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            language: self.language.clone(),
            mode: self.mode.map(OutputMode::from),
            clean,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Load the documentation site described by the configuration.
pub(crate) fn load_site(config: &Config) -> Result<Site, CliError> {
    let docs = &config.docs_resolved;
    let site = SiteLoader::new(docs.source_dir.clone())
        .with_nav_file(docs.nav_file.clone())
        .with_exclude(&docs.exclude)?
        .load()?;
    Ok(site)
}

/// Exporter settings from the output configuration.
pub(crate) fn export_options(config: &Config) -> ExportOptions {
    let output = &config.output_resolved;
    ExportOptions {
        default_template: output.default_template.clone(),
        language: output.language.clone(),
        unlisted: match output.unlisted {
            UnlistedMode::Plain => UnlistedPolicy::Plain,
            UnlistedMode::Draft => UnlistedPolicy::Draft,
        },
    }
}

/// Exporter for the configured mode.
pub(crate) fn exporter<'a>(
    mode: OutputMode,
    site: &'a Site,
    options: &'a ExportOptions,
) -> Box<dyn Exporter + 'a> {
    match mode {
        OutputMode::Structure => Box::new(StructureExporter::new(site, options)),
        OutputMode::Documents => Box::new(DocumentExporter::new(site, options)),
    }
}
