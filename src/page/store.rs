//! Page storage: load a source tree, write transformed pages back.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;

use super::Page;
use crate::debug;

/// Ordered collection of every page in a run.
#[derive(Debug, Default)]
pub struct PageStore {
    pages: Vec<Page>,
}

impl PageStore {
    /// Load every page under `source` whose extension is in `extensions`.
    ///
    /// Walk order is sorted so runs are deterministic.
    pub fn load(source: &Path, extensions: &[String]) -> Result<Self> {
        let mut pages = Vec::new();

        for path in collect_page_files(source, extensions) {
            let rel = path.strip_prefix(source).unwrap_or(&path).to_path_buf();
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read page `{}`", path.display()))?;
            debug!("load"; "{}", rel.display());
            pages.push(Page::from_source(rel, &content));
        }

        Ok(Self { pages })
    }

    /// Write every page to `output/<relative file>`, creating parent directories.
    pub fn save(&self, output: &Path) -> Result<()> {
        for page in &self.pages {
            let dest = output.join(page.file());
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create `{}`", parent.display()))?;
            }
            fs::write(&dest, page.to_content())
                .with_context(|| format!("failed to write `{}`", dest.display()))?;
            debug!("write"; "{}", dest.display());
        }
        Ok(())
    }

    #[inline]
    pub fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Collect page files under `dir`, sorted by path.
fn collect_page_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| has_page_extension(p, extensions))
        .collect()
}

fn has_page_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}
