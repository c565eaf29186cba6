//! Configuration management for `apiref.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── build.rs   # [build] section
//! ├── error.rs   # ConfigError, ConfigDiagnostics
//! ├── util.rs    # config file discovery, path helpers
//! └── mod.rs     # ApiRefConfig (this file)
//! ```
//!
//! A missing config file is not an error: defaults apply and the working
//! directory becomes the root. CLI flags override file values.

mod build;
mod error;
mod util;

pub use build::BuildConfig;
pub use error::{ConfigDiagnostics, ConfigError};

use util::find_config_file;

use crate::cli::Cli;
use crate::{debug, log};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the working directory.
pub const CONFIG_FILE: &str = "apiref.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing apiref.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiRefConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl ApiRefConfig {
    /// Load configuration for the current working directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(&cwd, cli)
    }

    /// Load configuration, searching for the config file upward from `start`.
    pub fn load_from(start: &Path, cli: &Cli) -> Result<Self> {
        let config_name = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        let mut config = match find_config_file(start, &config_name) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            // An explicitly requested config must exist
            None if cli.config.is_some() => {
                bail!("Config file '{}' not found", config_name.display());
            }
            None => {
                debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                Self {
                    root: start.to_path_buf(),
                    ..Self::default()
                }
            }
        };

        if let Some(path) = &config.config_path {
            debug!("config"; "using {}", path.display());
        }

        config.apply_cli(cli);
        let root = config.root.clone();
        config.build.normalize(&root);
        config.validate(cli.is_build())?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Apply CLI overrides (paths are relative to the root, like file values).
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(source) = &cli.source {
            self.build.source = source.clone();
        }
        if let Some(output) = cli.output_override() {
            self.build.output = output.to_path_buf();
        }
    }

    /// Validate normalized settings, reporting every problem at once.
    fn validate(&self, writes_output: bool) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag, writes_output);
        diag.into_result()
    }

    /// Get path relative to the root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("apiref").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        let (config, _) = ApiRefConfig::parse_with_ignored("").unwrap();
        assert_eq!(config.build.source, PathBuf::from("_source"));
        assert_eq!(config.build.output, PathBuf::from("."));
        assert_eq!(config.build.extensions, vec!["md"]);
    }

    #[test]
    fn test_parse_partial_section() {
        let content = "[build]\nsource = \"docs\"\n";
        let (config, _) = ApiRefConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.build.source, PathBuf::from("docs"));
        assert_eq!(config.build.extensions, vec!["md"]);
    }

    #[test]
    fn test_parse_with_ignored_collects_unknown() {
        let content = "[build]\nsource = \"s\"\ncolour = true\n";
        let (config, ignored) = ApiRefConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.build.source, PathBuf::from("s"));
        assert_eq!(ignored, vec!["build.colour"]);
    }

    #[test]
    fn test_load_from_config_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages/api")).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[build]\nsource = \"pages\"\noutput = \"site\"\n",
        )
        .unwrap();

        let start = dir.path().join("pages/api");
        let config = ApiRefConfig::load_from(&start, &cli(&["build"])).unwrap();

        assert_eq!(config.root, dir.path());
        assert_eq!(config.build.source, dir.path().join("pages"));
        assert_eq!(config.build.output, dir.path().join("site"));
        assert_eq!(config.config_path, Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_load_without_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("_source")).unwrap();

        let config = ApiRefConfig::load_from(dir.path(), &cli(&["build"])).unwrap();
        assert_eq!(config.config_path, None);
        assert_eq!(config.build.source, dir.path().join("_source"));
        assert_eq!(config.build.output, dir.path());
    }

    #[test]
    fn test_cli_overrides() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src_docs")).unwrap();

        let args = cli(&["--source", "src_docs", "build", "--output", "out"]);
        let config = ApiRefConfig::load_from(dir.path(), &args).unwrap();
        assert_eq!(config.build.source, dir.path().join("src_docs"));
        assert_eq!(config.build.output, dir.path().join("out"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = TempDir::new().unwrap();
        let args = cli(&["--config", "nope-7c1e.toml", "build"]);
        let err = ApiRefConfig::load_from(dir.path(), &args).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_source_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = ApiRefConfig::load_from(dir.path(), &cli(&["build"])).unwrap_err();
        let err = err.downcast::<ConfigError>().unwrap();
        match err {
            ConfigError::Diagnostics(diag) => assert_eq!(diag.errors()[0].field, "build.source"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_root_relative() {
        let config = ApiRefConfig {
            root: PathBuf::from("/docs"),
            ..ApiRefConfig::default()
        };
        let inside = config.root_relative("/docs/out/a.md");
        assert_eq!(inside, PathBuf::from("out/a.md"));
        let outside = config.root_relative("/elsewhere");
        assert_eq!(outside, PathBuf::from("/elsewhere"));
    }
}
