//! Position, range, and fragment primitives shared by every tokenizer.
//!
//! Grounded on `examples/original_source/src/ach/text/types.hpp`
//! (`position`, `span`, `located_span`, `range`, `fragment`) and on the
//! teacher's `cst/primitives.rs` (`Position`/`SourceSpan`, serde derive style).

use serde::{Deserialize, Serialize};

/// Zero-based line/column location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn zero() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Advance past one logical byte; newline resets the column and bumps the line.
    pub fn advance(self, c: u8) -> Self {
        if c == b'\n' {
            Position::new(self.line + 1, 0)
        } else {
            Position::new(self.line, self.column + 1)
        }
    }
}

/// Half-open `[first, last)` position range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub first: Position,
    pub last: Position,
}

impl Range {
    pub fn new(first: Position, last: Position) -> Self {
        Self { first, last }
    }

    pub fn empty_at(pos: Position) -> Self {
        Self { first: pos, last: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }
}

/// A borrowed slice paired with its source range.
///
/// Invariant: `slice.is_empty() == range.is_empty()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub range: Range,
}

impl<'a> Fragment<'a> {
    pub fn new(text: &'a str, range: Range) -> Self {
        debug_assert_eq!(text.is_empty(), range.is_empty());
        Self { text, range }
    }

    pub fn empty_at(pos: Position) -> Fragment<'static> {
        Fragment { text: "", range: Range::empty_at(pos) }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A whole source line plus a (column, length) highlight within it, used for
/// diagnostic rendering and as the return type of the line-aware extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedSpan<'a> {
    pub whole_line: &'a str,
    pub line_number: usize,
    pub column: usize,
    pub length: usize,
}

impl<'a> LocatedSpan<'a> {
    pub fn empty_at(whole_line: &'a str, line_number: usize, column: usize) -> Self {
        Self { whole_line, line_number, column, length: 0 }
    }

    pub fn str(&self) -> &'a str {
        &self.whole_line[self.column..self.column + self.length]
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Render the `~`/`^` underline convention used by every error path
    /// (ground: `ach::mirror::core.cpp`'s `operator<<(ostream&, text::location)`).
    pub fn render_pointer(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("line {}:\n", self.line_number + 1));
        out.push_str(self.whole_line);
        if !self.whole_line.ends_with('\n') {
            out.push('\n');
        }
        for ch in self.whole_line[..self.column.min(self.whole_line.len())].chars() {
            out.push(if ch == '\t' { '\t' } else { ' ' });
        }
        if self.length == 0 {
            out.push('^');
        } else {
            for _ in 0..self.length {
                out.push('~');
            }
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_newline_resets_column() {
        let p = Position::new(3, 5).advance(b'\n');
        assert_eq!(p, Position::new(4, 0));
    }

    #[test]
    fn advance_regular_byte_bumps_column() {
        let p = Position::new(3, 5).advance(b'x');
        assert_eq!(p, Position::new(3, 6));
    }

    #[test]
    fn range_empty_iff_equal_endpoints() {
        let p = Position::zero();
        assert!(Range::empty_at(p).is_empty());
        assert!(!Range::new(p, p.advance(b'x')).is_empty());
    }

    #[test]
    fn located_span_pointer_zero_length_uses_caret() {
        let span = LocatedSpan::empty_at("int x;\n", 0, 3);
        let rendered = span.render_pointer();
        assert!(rendered.ends_with("^\n"));
    }

    #[test]
    fn located_span_pointer_nonzero_length_uses_tildes() {
        let span = LocatedSpan { whole_line: "int x;\n", line_number: 0, column: 0, length: 3 };
        let rendered = span.render_pointer();
        assert!(rendered.ends_with("~~~\n"));
    }
}
