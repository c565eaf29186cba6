//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "_source"      # Pages with API directives (relative to config root)
//! output = "."            # Where rewritten pages are written (relative to config root)
//! extensions = ["md"]     # Page file extensions
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ConfigDiagnostics;
use super::util::lexical_normalize;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory scanned for pages.
    pub source: PathBuf,

    /// Directory the rewritten pages are written to.
    pub output: PathBuf,

    /// Page file extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("_source"),
            output: PathBuf::from("."),
            extensions: vec!["md".to_string()],
        }
    }
}

impl BuildConfig {
    /// Resolve relative paths against `root` and clean up extensions.
    pub fn normalize(&mut self, root: &Path) {
        self.source = lexical_normalize(&root.join(&self.source));
        self.output = lexical_normalize(&root.join(&self.output));
        for ext in &mut self.extensions {
            *ext = ext.trim().trim_start_matches('.').to_string();
        }
        self.extensions.retain(|ext| !ext.is_empty());
    }

    /// Validate normalized settings.
    ///
    /// `writes_output` is false for commands that never write pages.
    pub fn validate(&self, diag: &mut ConfigDiagnostics, writes_output: bool) {
        if !self.source.is_dir() {
            diag.error_with_hint(
                "build.source",
                format!("source directory `{}` not found", self.source.display()),
                "set [build].source or pass --source",
            );
        }

        if self.extensions.is_empty() {
            diag.error_with_hint(
                "build.extensions",
                "no page extensions configured",
                r#"e.g. extensions = ["md"]"#,
            );
        }

        if writes_output && self.output == self.source {
            diag.error(
                "build.output",
                "output directory must differ from the source directory",
            );
        }
    }
}
