//! Symbol link pass.
//!
//! Rewrites markdown links whose target names an API symbol:
//!
//! | Target              | Lookup                              | Result                       |
//! |---------------------|-------------------------------------|------------------------------|
//! | `#Widget`           | class                               | `/ui/widget#Widget`          |
//! | `#Widget.render`    | class member (methods, properties)  | `/ui/widget#Widget_render`   |
//! | `#os.getcwd`        | module member                       | `/os#getcwd`                 |
//! | `/about`, `http://` | none                                | unchanged                    |
//!
//! A symbol that cannot be found is a soft miss: the link is left exactly
//! as written and the pass still succeeds.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::debug;
use crate::model::ApiIndex;
use crate::page::Page;

/// `[text](target)`
static RE_MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Link target naming an API symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolRef<'a> {
    /// `#Name`
    Class(&'a str),
    /// `#Container.member` (split at the first `.`)
    Member { container: &'a str, member: &'a str },
}

impl<'a> SymbolRef<'a> {
    /// Parse a link target. Targets not starting with `#` are ordinary links.
    pub fn parse(target: &'a str) -> Option<Self> {
        let name = target.strip_prefix('#')?;
        Some(match name.split_once('.') {
            Some((container, member)) => Self::Member { container, member },
            None => Self::Class(name),
        })
    }
}

/// Outcome counters of the link pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub resolved: usize,
    /// Symbol targets left as written.
    pub unresolved: Vec<String>,
}

impl ResolveStats {
    pub fn merge(&mut self, other: Self) {
        self.resolved += other.resolved;
        self.unresolved.extend(other.unresolved);
    }
}

/// Resolve a single link target, `None` on a soft miss or an ordinary link.
pub fn resolve_target(index: &ApiIndex, target: &str) -> Option<String> {
    match SymbolRef::parse(target)? {
        SymbolRef::Class(name) => {
            let class = index.class(index.find_class(name)?);
            Some(class.page.with_fragment(&class.name))
        }
        SymbolRef::Member { container, member } => {
            let container = index.container(container)?;
            let id = index.find_member(container, member)?;
            let found = index.member(id);
            Some(found.page.with_fragment(&index.member_anchor(id)))
        }
    }
}

/// Rewrite every symbol link in a line.
pub fn resolve_line<'l>(
    index: &ApiIndex,
    line: &'l str,
    stats: &mut ResolveStats,
) -> Cow<'l, str> {
    RE_MD_LINK.replace_all(line, |caps: &Captures| {
        let text = &caps[1];
        let target = &caps[2];
        match resolve_target(index, target) {
            Some(link) => {
                stats.resolved += 1;
                format!("[{text}]({link})")
            }
            None => {
                if target.starts_with('#') {
                    stats.unresolved.push(target.to_string());
                }
                caps[0].to_string()
            }
        }
    })
}

/// Rewrite every symbol link on a page.
pub fn resolve_page(index: &ApiIndex, page: &mut Page) -> ResolveStats {
    let mut stats = ResolveStats::default();
    for line in &mut page.lines {
        let rewritten = match resolve_line(index, line, &mut stats) {
            Cow::Owned(new) => Some(new),
            Cow::Borrowed(_) => None,
        };
        if let Some(new) = rewritten {
            *line = new;
        }
    }
    for target in &stats.unresolved {
        debug!("link"; "{}: unresolved `{}`", page.path(), target);
    }
    stats
}
