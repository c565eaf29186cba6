//! Logical page path type.
//!
//! A page is addressed by its site path, not its file name:
//! `guide/intro.md` under the source root becomes `/guide/intro`.

use std::borrow::Borrow;
use std::path::{Component, Path};
use std::sync::Arc;

use serde::Serialize;

/// Logical site path of a page
///
/// Invariants:
/// - Always starts with `/`
/// - Uses `/` separators on every platform
/// - Never carries the file extension
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PagePath(Arc<str>);

impl PagePath {
    /// Derive the page path from a file path relative to the source root.
    ///
    /// `guide/intro.md` -> `/guide/intro`
    pub fn from_relative(rel: &Path) -> Self {
        let stem = rel.with_extension("");
        let segments: Vec<_> = stem
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect();
        Self(Arc::from(format!("/{}", segments.join("/"))))
    }

    /// Create from an already logical path, adding the leading slash if missing.
    pub fn new(path: &str) -> Self {
        let trimmed = path.trim();
        if trimmed.starts_with('/') {
            Self(Arc::from(trimmed))
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link to an anchor on this page: `/ui/widget` + `Widget_render`.
    pub fn with_fragment(&self, anchor: &str) -> String {
        format!("{}#{}", self.0, anchor)
    }
}

impl std::fmt::Display for PagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PagePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for PagePath {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for PagePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<&str> for PagePath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for PagePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}
