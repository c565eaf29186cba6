//! Directive pass.
//!
//! Recognized directive lines (first character `>`):
//!
//! | Directive                          | Effect                                   |
//! |------------------------------------|------------------------------------------|
//! | `>.module name`                    | open module (get-or-create)              |
//! | `>.class Name`                     | open class in the current module         |
//! | `>.method name(*a*, b=1) [ver]`    | add method, emit stub                    |
//! | `>.property a, b [ver]`            | add properties, emit stubs               |
//! | `>.end` / `>.end class`            | close section (and class)                |
//!
//! Headings outside code fences also close an open section.

mod error;
mod parse;
mod process;
mod state;

pub use error::{DirectiveError, PageError};
pub use process::{DirectiveProcessor, ProcessStats};
