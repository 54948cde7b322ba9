//! Token and line-classification vocabulary for the gcc/compiler-error
//! pipeline.
//!
//! Grounded on `examples/original_source/src/ach/ce/detail/gcc_tokenizer.hpp`
//! and `examples/original_source/src/ach/ce/css_class_names.hpp`.

use crate::text::LocatedSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClassification {
    Include,
    Admonition,
    Code,
    Underline,
    Separator,
    Hint,
    Proposition,
    Diff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmonitionType {
    None,
    Note,
    Warning,
    Error,
}

/// Coloring applied to a token; mapped to a CSS class by [`GccCssClasses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenColor {
    Normal,
    Highlight,
    Note,
    Warning,
    Error,
    ExtraHighlight1,
    ExtraHighlight2,
}

#[derive(Debug, Clone)]
pub struct GccToken<'a> {
    pub origin: LocatedSpan<'a>,
    pub color: TokenColor,
}

/// A column span within an underline/tilde line, relative to that line's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnderlineSpan {
    pub column: usize,
    pub length: usize,
}

/// The caret plus up to two tilde runs found in one underline line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnderlineInfo {
    pub main: Option<UnderlineSpan>,
    pub extra1: Option<UnderlineSpan>,
    pub extra2: Option<UnderlineSpan>,
}
