//! Per-page scan cursor.

use crate::model::{ClassId, Container, MemberId, ModuleId};
use crate::render::CLOSE_TAG;

/// The member whose `<div class="api">` body is currently open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenSection {
    #[default]
    None,
    Method(MemberId),
    Property(MemberId),
}

/// Cursor state threaded through a single page scan.
///
/// Reset for every page: context never leaks from one page to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    pub open_module: Option<ModuleId>,
    pub open_class: Option<ClassId>,
    pub open_section: OpenSection,
    /// Only suppresses heading-triggered closes.
    pub in_code_fence: bool,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container new members attach to: the open class, else the open module.
    pub fn container(&self) -> Option<Container> {
        self.open_class
            .map(Container::Class)
            .or(self.open_module.map(Container::Module))
    }

    #[inline]
    pub fn has_open_section(&self) -> bool {
        self.open_section != OpenSection::None
    }

    /// Close the open section, returning the tag to emit (if any).
    pub fn close_section(&mut self) -> Option<&'static str> {
        if self.has_open_section() {
            self.open_section = OpenSection::None;
            Some(CLOSE_TAG)
        } else {
            None
        }
    }

    /// `.end class`: close the section and leave the class.
    pub fn end_class(&mut self) -> Option<&'static str> {
        self.open_class = None;
        self.close_section()
    }

    /// Heading outside a code fence: close the section, if any.
    pub fn on_heading(&mut self) -> Option<&'static str> {
        if self.in_code_fence {
            None
        } else {
            self.close_section()
        }
    }

    pub fn toggle_fence(&mut self) {
        self.in_code_fence = !self.in_code_fence;
    }
}
