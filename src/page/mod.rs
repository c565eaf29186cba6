//! Pages: logical paths, line buffers, and storage.

mod path;
mod store;

pub use path::PagePath;
pub use store::PageStore;

use std::path::{Path, PathBuf};

/// A documentation page held in memory.
///
/// The path never changes after creation; both passes rewrite `lines` in place.
#[derive(Debug, Clone)]
pub struct Page {
    /// Logical site path (e.g. `/ui/widget`).
    path: PagePath,
    /// File path relative to the source root (e.g. `ui/widget.md`).
    file: PathBuf,
    /// Line buffer without line terminators.
    pub lines: Vec<String>,
}

impl Page {
    /// Create a page from its relative file path and raw content.
    pub fn from_source(file: impl Into<PathBuf>, content: &str) -> Self {
        let file = file.into();
        Self {
            path: PagePath::from_relative(&file),
            lines: content.lines().map(str::to_string).collect(),
            file,
        }
    }

    #[inline]
    pub fn path(&self) -> &PagePath {
        &self.path
    }

    #[inline]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Joined content, one `\n` after every line.
    pub fn to_content(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
impl Page {
    /// Create a page with a given logical path.
    pub fn new(path: impl Into<PagePath>, lines: Vec<String>) -> Self {
        let path = path.into();
        let file = PathBuf::from(format!("{}.md", path.as_str().trim_start_matches('/')));
        Self { path, file, lines }
    }
}
