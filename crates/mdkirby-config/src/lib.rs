//! Configuration management for mdkirby.
//!
//! Parses `mdkirby.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.nav_file`
//! - `output.dir`
//! - `output.language`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override output language suffix.
    pub language: Option<String>,
    /// Override export mode.
    pub mode: Option<OutputMode>,
    /// Override output directory cleanup.
    pub clean: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdkirby.toml";

/// Template used when a page does not set `template` in its front matter.
const DEFAULT_TEMPLATE: &str = "default";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation source configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// How the content tree is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One directory per node of the page tree, ordered by navigation.
    #[default]
    Structure,
    /// One directory per navigation entry, with rewritten links and copied assets.
    Documents,
}

/// How nodes missing from the navigation are named on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlistedMode {
    /// Unlisted nodes get no prefix at all.
    #[default]
    Plain,
    /// Unlisted nodes are prefixed with `_` and become drafts.
    Draft,
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    nav_file: Option<String>,
    exclude: Option<Vec<String>>,
}

/// Resolved documentation source configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// `mkdocs.yml`-style file holding the `nav:` tree. Optional on disk.
    pub nav_file: PathBuf,
    /// Glob patterns (relative to `source_dir`) of files to skip.
    pub exclude: Vec<String>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    default_template: Option<String>,
    language: Option<String>,
    mode: Option<OutputMode>,
    unlisted: Option<UnlistedMode>,
    clean: Option<bool>,
}

/// Resolved output configuration.
#[derive(Debug)]
pub struct OutputConfig {
    /// Root of the generated content tree.
    pub dir: PathBuf,
    /// Template name used for content files without a `template` override.
    pub default_template: String,
    /// Locale suffix for content file names (`default.en.md`).
    pub language: Option<String>,
    /// Export mode.
    pub mode: OutputMode,
    /// Naming of nodes absent from the navigation.
    pub unlisted: UnlistedMode,
    /// Whether the output directory is emptied before exporting.
    pub clean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
            default_template: DEFAULT_TEMPLATE.to_owned(),
            language: None,
            mode: OutputMode::default(),
            unlisted: UnlistedMode::default(),
            clean: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`OUTPUT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdkirby.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated once more.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(language) = &settings.language {
            self.output_resolved.language = Some(language.clone());
        }
        if let Some(mode) = settings.mode {
            self.output_resolved.mode = mode;
        }
        if let Some(clean) = settings.clean {
            self.output_resolved.clean = clean;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            output: OutputConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                nav_file: base.join("mkdocs.yml"),
                exclude: Vec::new(),
            },
            output_resolved: OutputConfig {
                dir: base.join("content"),
                ..OutputConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_output()?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        for pattern in &self.docs_resolved.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("docs.exclude pattern '{pattern}' is invalid: {e}"))
            })?;
        }
        Ok(())
    }

    /// Validate output configuration.
    fn validate_output(&self) -> Result<(), ConfigError> {
        let output = &self.output_resolved;

        require_non_empty(&output.default_template, "output.default_template")?;
        if output.default_template.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "output.default_template cannot contain path separators".to_owned(),
            ));
        }

        if let Some(language) = &output.language {
            require_non_empty(language, "output.language")?;
        }

        // Cleaning the output would otherwise wipe the sources
        if output.dir == self.docs_resolved.source_dir {
            return Err(ConfigError::Validation(
                "output.dir must differ from docs.source_dir".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref nav_file) = self.docs.nav_file {
            self.docs.nav_file = Some(expand::expand_env(nav_file, "docs.nav_file")?);
        }
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        if let Some(ref language) = self.output.language {
            self.output.language = Some(expand::expand_env(language, "output.language")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            nav_file: resolve(self.docs.nav_file.as_deref(), "mkdocs.yml"),
            exclude: self.docs.exclude.clone().unwrap_or_default(),
        };

        let defaults = OutputConfig::default();
        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), "content"),
            default_template: self
                .output
                .default_template
                .clone()
                .unwrap_or(defaults.default_template),
            language: self.output.language.clone(),
            mode: self.output.mode.unwrap_or(defaults.mode),
            unlisted: self.output.unlisted.unwrap_or(defaults.unlisted),
            clean: self.output.clean.unwrap_or(defaults.clean),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.nav_file,
            PathBuf::from("/test/mkdocs.yml")
        );
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/content"));
        assert_eq!(config.output_resolved.default_template, "default");
        assert_eq!(config.output_resolved.language, None);
        assert_eq!(config.output_resolved.mode, OutputMode::Structure);
        assert_eq!(config.output_resolved.unlisted, UnlistedMode::Plain);
        assert!(config.output_resolved.clean);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.docs.source_dir.is_none());
        assert!(config.output.mode.is_none());
    }

    #[test]
    fn test_parse_output_config() {
        let toml = r#"
[output]
dir = "site/content"
default_template = "doc"
language = "de"
mode = "documents"
unlisted = "draft"
clean = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        let output = &config.output_resolved;
        assert_eq!(output.dir, PathBuf::from("/project/site/content"));
        assert_eq!(output.default_template, "doc");
        assert_eq!(output.language, Some("de".to_owned()));
        assert_eq!(output.mode, OutputMode::Documents);
        assert_eq!(output.unlisted, UnlistedMode::Draft);
        assert!(!output.clean);
    }

    #[test]
    fn test_parse_unknown_mode_fails() {
        let toml = r#"
[output]
mode = "flat"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
nav_file = "site/mkdocs.yml"
exclude = ["drafts/**"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.nav_file,
            PathBuf::from("/project/site/mkdocs.yml")
        );
        assert_eq!(config.docs_resolved.exclude, vec!["drafts/**".to_owned()]);
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/content"));
    }

    #[test]
    fn test_apply_cli_settings_output_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/elsewhere")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.output_resolved.dir, PathBuf::from("/elsewhere"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            language: Some("fr".to_owned()),
            mode: Some(OutputMode::Documents),
            clean: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.output_resolved.language, Some("fr".to_owned()));
        assert_eq!(config.output_resolved.mode, OutputMode::Documents);
        assert!(!config.output_resolved.clean);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.output_resolved.dir, config_before.output_resolved.dir);
        assert_eq!(
            config.docs_resolved.source_dir,
            config_before.docs_resolved.source_dir
        );
    }

    #[test]
    fn test_expand_env_vars_output_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_MDKIRBY_OUT", "/srv/kirby/content");
        }

        let toml = r#"
[output]
dir = "${TEST_MDKIRBY_OUT}"
language = "${TEST_MDKIRBY_LANG:-en}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.output.dir, Some("/srv/kirby/content".to_owned()));
        assert_eq!(config.output.language, Some("en".to_owned()));

        unsafe {
            std::env::remove_var("TEST_MDKIRBY_OUT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_MDKIRBY_TEST");
        }

        let toml = r#"
[docs]
source_dir = "${MISSING_VAR_MDKIRBY_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_MDKIRBY_TEST"));
        assert!(err.to_string().contains("docs.source_dir"));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[docs]\nsource_dir = \"src-docs\"\n\n[output]\ndir = \"out\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, dir.path().join("src-docs"));
        assert_eq!(config.output_resolved.dir, dir.path().join("out"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/mdkirby.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_template() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.default_template = String::new();
        assert_validation_error(&config, &["default_template", "empty"]);
    }

    #[test]
    fn test_validate_template_with_separator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.default_template = "pages/default".to_owned();
        assert_validation_error(&config, &["default_template", "separators"]);
    }

    #[test]
    fn test_validate_empty_language() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.language = Some(String::new());
        assert_validation_error(&config, &["output.language", "empty"]);
    }

    #[test]
    fn test_validate_output_equals_source() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.dir = PathBuf::from("/test/docs");
        assert_validation_error(&config, &["output.dir", "docs.source_dir"]);
    }

    #[test]
    fn test_validate_invalid_exclude_pattern() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.exclude = vec!["[invalid".to_owned()];
        assert_validation_error(&config, &["docs.exclude", "[invalid"]);
    }
}
