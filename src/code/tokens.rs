//! `SyntaxElement` and `CodeToken`: the output vocabulary of the C-family
//! tokenizer, before and after semantic reconciliation.
//!
//! Grounded on `examples/original_source/src/ach/clangd/code_token.hpp` and
//! `spec.md` §3 (the closed `SyntaxElement` enumeration, which this crate
//! treats as authoritative over version-drifted snapshots of the original).

use serde::Serialize;

use crate::semantic::token::{ColorVariance, IdentifierInfo};
use crate::text::{Fragment, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyntaxElement {
    PreprocessorHash,
    PreprocessorDirective,
    PreprocessorHeaderFile,
    PreprocessorMacro,
    PreprocessorMacroParam,
    PreprocessorMacroBody,
    PreprocessorOther,
    CommentBeginSingle,
    CommentBeginSingleDoc,
    CommentBeginMulti,
    CommentBeginMultiDoc,
    CommentEnd,
    CommentTagTodo,
    CommentTagDoc,
    Keyword,
    IdentifierUnknown,
    LiteralPrefix,
    LiteralSuffix,
    LiteralNumber,
    LiteralCharBegin,
    LiteralStringBegin,
    LiteralTextEnd,
    LiteralStringRawQuote,
    LiteralStringRawDelimiter,
    LiteralStringRawParen,
    LiteralString,
    EscapeSequence,
    FormatSequence,
    Whitespace,
    Symbol,
    NothingSpecial,
    OverloadedOperator,
    EndOfInput,
}

/// One emitted token: a syntax-level tag, its source fragment, and
/// (after reconciliation) optional externally supplied semantic info.
#[derive(Debug, Clone)]
pub struct CodeToken<'a> {
    pub syntax_element: SyntaxElement,
    pub origin: Fragment<'a>,
    pub info: Option<IdentifierInfo>,
    /// Recorded but not yet rendered; see [`ColorVariance`].
    pub color_variance: Option<ColorVariance>,
}

impl<'a> CodeToken<'a> {
    pub fn new(origin: Fragment<'a>, syntax_element: SyntaxElement) -> Self {
        Self { syntax_element, origin, info: None, color_variance: None }
    }

    pub fn range(&self) -> Range {
        self.origin.range
    }
}
