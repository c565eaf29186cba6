//! Two-pass compilation pipeline.
//!
//! ```text
//! pages ── process_all ──► ApiIndex ── resolve_all ──► pages
//!          (directives,               (symbol links,
//!           fail fast)                 soft misses)
//! ```
//!
//! The link pass needs every page's symbols, so it only accepts an
//! [`ApiIndex`], which exists only after `process_all` has finished.

use crate::directive::{DirectiveProcessor, PageError, ProcessStats};
use crate::model::{ApiIndex, ApiModel};
use crate::page::Page;
use crate::resolve::{ResolveStats, resolve_page};

/// Summary of a full run.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: usize,
    pub process: ProcessStats,
    pub resolve: ResolveStats,
}

/// Directive pass over every page, in order.
///
/// Aborts at the first page with a directive error.
pub fn process_all(pages: &mut [Page]) -> Result<(ApiIndex, ProcessStats), PageError> {
    let mut model = ApiModel::new();
    let mut stats = ProcessStats::default();

    let mut processor = DirectiveProcessor::new(&mut model);
    for page in pages.iter_mut() {
        stats += processor.process_page(page)?;
    }

    Ok((model.freeze(), stats))
}

/// Link pass over every page. Never fails.
pub fn resolve_all(index: &ApiIndex, pages: &mut [Page]) -> ResolveStats {
    let mut stats = ResolveStats::default();
    for page in pages.iter_mut() {
        stats.merge(resolve_page(index, page));
    }
    stats
}

/// Run both passes.
pub fn compile(pages: &mut [Page]) -> Result<(ApiIndex, BuildReport), PageError> {
    let (index, process) = process_all(pages)?;
    let resolve = resolve_all(&index, pages);
    let report = BuildReport {
        pages: pages.len(),
        process,
        resolve,
    };
    Ok((index, report))
}
