//! Build command.
//!
//! Pipeline phases:
//! - **Load** - Read every page under the source directory
//! - **Directives** - Rewrite directive lines, populate the API model
//! - **Links** - Resolve symbol links against the complete model
//! - **Write** - Persist pages under the output directory (skipped with `--dry`)

use anyhow::{Context, Result};

use crate::cli::BuildArgs;
use crate::config::ApiRefConfig;
use crate::page::PageStore;
use crate::pipeline::{self, BuildReport};
use crate::utils::plural_count;
use crate::{debug, debug_do, log};

/// Build all pages.
pub fn build_pages(config: &ApiRefConfig, args: &BuildArgs) -> Result<BuildReport> {
    let build = &config.build;

    let mut store = PageStore::load(&build.source, &build.extensions)?;
    if store.is_empty() {
        log!("warning"; "no pages with extensions {:?} found", build.extensions);
    }
    let source = config.root_relative(&build.source);
    log!("build"; "loaded {} from {}", plural_count(store.len(), "page"), source.display());

    let (index, report) = pipeline::compile(store.pages_mut())
        .context("directive processing failed")?;

    debug_do! {
        let (modules, classes, members) = index.counts();
        debug!("model"; "{}, {}, {}",
            plural_count(modules, "module"),
            plural_count(classes, "class"),
            plural_count(members, "member"));
    }

    if args.dry {
        log!("build"; "dry run, nothing written");
    } else {
        store.save(&build.output)?;
        let output = config.root_relative(&build.output);
        log!("build"; "wrote {} to {}", plural_count(store.len(), "page"), output.display());
    }

    log_summary(&report);
    Ok(report)
}

fn log_summary(report: &BuildReport) {
    log!("build"; "{} rewritten across {}, {} emitted",
        plural_count(report.process.directives, "directive"),
        plural_count(report.pages, "page"),
        plural_count(report.process.stubs, "stub"));

    let resolved = plural_count(report.resolve.resolved, "symbol link");
    let unresolved = report.resolve.unresolved.len();
    if unresolved == 0 {
        log!("link"; "{} resolved", resolved);
    } else {
        log!("link"; "{resolved} resolved, {unresolved} left as written (see --verbose)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> ApiRefConfig {
        let mut config = ApiRefConfig {
            root: root.to_path_buf(),
            ..ApiRefConfig::default()
        };
        config.build.source = root.join("_source");
        config.build.output = root.join("site");
        config
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join("_source").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_writes_resolved_pages() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "ui/widget.md",
            "# Widget\n>.module ui\n>.class Widget\n>.method render(*ctx*)\nDraws.\n",
        );
        write(dir.path(), "guide.md", "Use [render](#Widget.render).\n");

        let config = config_for(dir.path());
        let args = BuildArgs {
            output: None,
            dry: false,
        };
        let report = build_pages(&config, &args).unwrap();

        assert_eq!(report.pages, 2);
        let guide = fs::read_to_string(dir.path().join("site/guide.md")).unwrap();
        assert_eq!(guide, "Use [render](/ui/widget#Widget_render).\n");

        let widget = fs::read_to_string(dir.path().join("site/ui/widget.md")).unwrap();
        let lines: Vec<_> = widget.lines().collect();
        assert_eq!(lines[0], "# Widget");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], r#"<a id="Widget"></a>"#);
        assert!(lines[3].starts_with(r#"<h3 id="Widget_render" class="api">"#));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", ">.module m\n");

        let config = config_for(dir.path());
        let args = BuildArgs {
            output: None,
            dry: true,
        };
        build_pages(&config, &args).unwrap();

        assert!(!dir.path().join("site").exists());
    }

    #[test]
    fn test_directive_error_aborts_without_writing() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "fine\n");
        write(dir.path(), "b.md", ">.method orphan()\n");

        let config = config_for(dir.path());
        let args = BuildArgs {
            output: None,
            dry: false,
        };
        let err = build_pages(&config, &args).unwrap_err();

        assert!(format!("{err:#}").contains("/b:1"));
        assert!(!dir.path().join("site").exists());
    }
}
