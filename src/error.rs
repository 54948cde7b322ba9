//! Unified error type for every pipeline (mirror/clangd/gcc).
//!
//! Grounded on the teacher's `parser/infrastructure/error.rs` (plain enum +
//! hand-rolled `Display` + `impl std::error::Error`, no `thiserror`) and on
//! `examples/original_source/src/ach/mirror/errors.hpp` /
//! `ach/clangd/errors.hpp` for the exact reason vocabulary and the
//! span-rendering convention in `ach::mirror::core.cpp`'s `operator<<`.

use std::fmt;

use crate::text::LocatedSpan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReason {
    SyntaxError,
    UnsupportedConstruct,
    InvalidSemanticTokenData,

    ExpectedIdentifier,
    InsufficientCharacters,
    ExpectedSymbol,
    MismatchedSymbol,
    ExpectedNumber,
    ExpectedQuoted,
    ExpectedLineFeed,
    ExhaustedColor,
    InvalidCssClass(String),
    InvalidNumericMagnitude,
    ExpectedSpanClass,

    GccClassificationFailure,

    InternalErrorUnhandledContext,
    InternalErrorUnhandledPreprocessor,
    InternalErrorUnhandledComment,
    InternalErrorUnhandledPreprocessorDiagnosticMessage,
    InternalErrorRawStringLiteralQuoteOpen,
    InternalErrorRawStringLiteralParenOpen,
    InternalErrorRawStringLiteralParenClose,
    InternalErrorRawStringLiteralQuoteClose,
    InternalErrorFindMatchingTokens,
    InternalErrorUnsupportedSplicedToken,

    InvalidInput(String),
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorReason::SyntaxError => write!(f, "syntax error"),
            ErrorReason::UnsupportedConstruct => write!(f, "unsupported construct"),
            ErrorReason::InvalidSemanticTokenData => write!(f, "invalid semantic token data"),
            ErrorReason::ExpectedIdentifier => write!(f, "expected identifier"),
            ErrorReason::InsufficientCharacters => write!(f, "insufficient characters"),
            ErrorReason::ExpectedSymbol => write!(f, "expected symbol"),
            ErrorReason::MismatchedSymbol => write!(f, "mismatched symbol"),
            ErrorReason::ExpectedNumber => write!(f, "expected number"),
            ErrorReason::ExpectedQuoted => write!(f, "expected quoted text"),
            ErrorReason::ExpectedLineFeed => write!(f, "expected line feed"),
            ErrorReason::ExhaustedColor => write!(f, "color template exhausted with code remaining"),
            ErrorReason::InvalidCssClass(name) => write!(f, "invalid CSS class: {name}"),
            ErrorReason::InvalidNumericMagnitude => write!(f, "invalid numeric magnitude"),
            ErrorReason::ExpectedSpanClass => write!(f, "expected span class"),
            ErrorReason::GccClassificationFailure => write!(f, "unrecognized diagnostic line"),
            ErrorReason::InternalErrorUnhandledContext => write!(f, "internal error: unhandled context state"),
            ErrorReason::InternalErrorUnhandledPreprocessor => write!(f, "internal error: unhandled preprocessor state"),
            ErrorReason::InternalErrorUnhandledComment => write!(f, "internal error: unhandled comment state"),
            ErrorReason::InternalErrorUnhandledPreprocessorDiagnosticMessage => {
                write!(f, "internal error: unhandled preprocessor diagnostic message")
            }
            ErrorReason::InternalErrorRawStringLiteralQuoteOpen => write!(f, "internal error: raw string literal quote open"),
            ErrorReason::InternalErrorRawStringLiteralParenOpen => write!(f, "internal error: raw string literal paren open"),
            ErrorReason::InternalErrorRawStringLiteralParenClose => write!(f, "internal error: raw string literal paren close"),
            ErrorReason::InternalErrorRawStringLiteralQuoteClose => write!(f, "internal error: raw string literal quote close"),
            ErrorReason::InternalErrorFindMatchingTokens => write!(f, "internal error: find_matching_tokens found nothing"),
            ErrorReason::InternalErrorUnsupportedSplicedToken => write!(f, "internal error: unsupported spliced semantic token"),
            ErrorReason::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

/// A single error, carrying up to two located spans (source code, and for
/// mirror mode, the color template) for diagnostic rendering.
#[derive(Debug, Clone)]
pub struct HighlighterError {
    pub reason: ErrorReason,
    pub code_location: Option<OwnedLocatedSpan>,
    pub template_location: Option<OwnedLocatedSpan>,
    pub extra: Option<String>,
}

/// An owned copy of [`LocatedSpan`], since errors must outlive the borrowed
/// input buffers once they cross the API boundary.
#[derive(Debug, Clone)]
pub struct OwnedLocatedSpan {
    pub whole_line: String,
    pub line_number: usize,
    pub column: usize,
    pub length: usize,
}

impl From<&LocatedSpan<'_>> for OwnedLocatedSpan {
    fn from(span: &LocatedSpan<'_>) -> Self {
        Self {
            whole_line: span.whole_line.to_string(),
            line_number: span.line_number,
            column: span.column,
            length: span.length,
        }
    }
}

impl OwnedLocatedSpan {
    pub fn render_pointer(&self) -> String {
        LocatedSpan {
            whole_line: &self.whole_line,
            line_number: self.line_number,
            column: self.column,
            length: self.length,
        }
        .render_pointer()
    }
}

impl HighlighterError {
    pub fn new(reason: ErrorReason, code_location: impl Into<OwnedLocatedSpan>) -> Self {
        Self { reason, code_location: Some(code_location.into()), template_location: None, extra: None }
    }

    pub fn with_template_location(mut self, loc: impl Into<OwnedLocatedSpan>) -> Self {
        self.template_location = Some(loc.into());
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    pub fn internal(reason: ErrorReason) -> Self {
        Self { reason, code_location: None, template_location: None, extra: None }
    }
}

impl fmt::Display for HighlighterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)?;
        if let Some(extra) = &self.extra {
            write!(f, ": {extra}")?;
        }
        if let Some(loc) = &self.code_location {
            write!(f, "\nin code {}", loc.render_pointer())?;
        }
        if let Some(loc) = &self.template_location {
            write!(f, "in template {}", loc.render_pointer())?;
        }
        Ok(())
    }
}

impl std::error::Error for HighlighterError {}

impl From<serde_json::Error> for HighlighterError {
    fn from(err: serde_json::Error) -> Self {
        HighlighterError::internal(ErrorReason::InvalidInput(err.to_string()))
    }
}

impl From<std::io::Error> for HighlighterError {
    fn from(err: std::io::Error) -> Self {
        HighlighterError::internal(ErrorReason::InvalidInput(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason_and_pointer() {
        let span = OwnedLocatedSpan { whole_line: "int x;\n".to_string(), line_number: 0, column: 0, length: 3 };
        let err = HighlighterError::new(ErrorReason::SyntaxError, span);
        let rendered = err.to_string();
        assert!(rendered.starts_with("syntax error"));
        assert!(rendered.contains("int x;"));
    }
}
