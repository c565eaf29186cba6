//! Directive errors.
//!
//! All of these are authoring defects: processing of the page stops at the
//! first one.

use thiserror::Error;

use crate::page::PagePath;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("`.{directive}` needs an open .module or .class")]
    MissingContext { directive: &'static str },

    #[error("malformed signature `{signature}`: {reason}")]
    MalformedSignature {
        signature: String,
        reason: &'static str,
    },

    #[error("unknown directive `.{keyword}`")]
    UnknownDirective { keyword: String },
}

impl DirectiveError {
    pub(crate) fn missing_context(directive: &'static str) -> Self {
        Self::MissingContext { directive }
    }

    pub(crate) fn unknown(keyword: impl Into<String>) -> Self {
        Self::UnknownDirective {
            keyword: keyword.into(),
        }
    }

    pub(crate) fn malformed(signature: &str, reason: &'static str) -> Self {
        Self::MalformedSignature {
            signature: signature.to_string(),
            reason,
        }
    }
}

/// A directive error located on a page.
// NOTE: `error` is not a #[source] so the message is not printed twice by anyhow
#[derive(Debug, Error)]
#[error("{page}:{line}: {error}")]
pub struct PageError {
    pub page: PagePath,
    /// 1-based line number.
    pub line: usize,
    pub error: DirectiveError,
}
