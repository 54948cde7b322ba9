//! Line-aware extractor used by the mirror and gcc pipelines.
//!
//! Grounded on `examples/original_source/src/ach/common/text_extractor.cpp`
//! and its header: extraction never crosses a line boundary implicitly,
//! and failed extraction returns a zero-length [`LocatedSpan`] without
//! moving the cursor.

use super::position::LocatedSpan;

pub struct LineExtractor<'a> {
    remaining_text: &'a str,
    current_line: &'a str,
    line_number: usize,
    column_number: usize,
}

impl<'a> LineExtractor<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut me = Self { remaining_text: text, current_line: "", line_number: 0, column_number: 0 };
        me.load_next_line();
        me
    }

    fn remaining_line_str(&self) -> &'a str {
        &self.current_line[self.column_number..]
    }

    /// `line_number` counts lines the way the original's text extractor does
    /// (pre-incremented before the first line is exposed, so the first line
    /// reads as 1) — but every other position type in this crate (`Position`,
    /// clangd's semantic-token coordinates) is zero-based. Translate at this
    /// one boundary so `LocatedSpan::line_number` is zero-based everywhere,
    /// and `render_pointer`'s `+ 1` display adjustment applies uniformly
    /// regardless of which pipeline produced the span.
    fn zero_based_line_number(&self) -> usize {
        self.line_number.saturating_sub(1)
    }

    pub fn peek_next_char(&self) -> Option<char> {
        self.remaining_line_str().chars().next()
    }

    pub fn has_reached_end(&self) -> bool {
        self.remaining_text.is_empty() && self.remaining_line_str().is_empty()
    }

    pub fn current_location(&self) -> LocatedSpan<'a> {
        LocatedSpan::empty_at(self.current_line, self.zero_based_line_number(), self.column_number)
    }

    pub fn remaining_line_text(&self) -> &'a str {
        self.remaining_line_str()
    }

    /// The full text of the line currently being read, including its `\n`.
    pub fn current_line_text(&self) -> &'a str {
        self.current_line
    }

    /// True once only the trailing `\n` (or nothing) remains of the current line.
    pub fn has_reached_line_end(&self) -> bool {
        matches!(self.remaining_line_str(), "" | "\n")
    }

    pub fn extract_rest_of_line(&mut self) -> LocatedSpan<'a> {
        self.extract_by(|c| c != '\n')
    }

    /// Returns false iff nothing remained to advance into.
    pub fn load_next_line(&mut self) -> bool {
        let text = self.remaining_text;
        match text.find('\n') {
            Some(idx) => {
                let split = idx + 1; // include the newline in the line
                if split == 0 {
                    return false;
                }
                self.line_number += 1;
                self.column_number = 0;
                self.current_line = &text[..split];
                self.remaining_text = &text[split..];
                true
            }
            None => {
                if text.is_empty() {
                    return false;
                }
                self.line_number += 1;
                self.column_number = 0;
                self.current_line = text;
                self.remaining_text = "";
                true
            }
        }
    }

    fn skip(&mut self, n: usize) {
        self.column_number += n;
        if self.remaining_line_str().is_empty() {
            self.load_next_line();
        }
    }

    fn extract_by(&mut self, mut pred: impl FnMut(char) -> bool) -> LocatedSpan<'a> {
        let text = self.remaining_line_str();
        let length = text.find(|c| !pred(c)).unwrap_or(text.len());
        let result = LocatedSpan { whole_line: self.current_line, line_number: self.zero_based_line_number(), column: self.column_number, length };
        self.skip(length);
        result
    }

    pub fn extract_identifier(&mut self) -> LocatedSpan<'a> {
        match self.peek_next_char() {
            Some(c) if !c.is_ascii_digit() && (c.is_alphanumeric() || c == '_') => {
                self.extract_by(|c| c.is_alphanumeric() || c == '_')
            }
            _ => self.current_location(),
        }
    }

    pub fn extract_alphas_underscores(&mut self) -> LocatedSpan<'a> {
        self.extract_by(|c| c.is_alphabetic() || c == '_')
    }

    pub fn extract_digits(&mut self) -> LocatedSpan<'a> {
        self.extract_by(|c| c.is_ascii_digit())
    }

    pub fn extract_n_characters(&mut self, n: usize) -> LocatedSpan<'a> {
        let text = self.remaining_line_str();
        if n > text.len() {
            return self.current_location();
        }
        let result = LocatedSpan { whole_line: self.current_line, line_number: self.zero_based_line_number(), column: self.column_number, length: n };
        self.skip(n);
        result
    }

    pub fn extract_until_end_of_line(&mut self) -> LocatedSpan<'a> {
        self.extract_by(|c| c != '\n')
    }

    /// Manual escape-aware quoted-string scan; does not advance on failure.
    pub fn extract_quoted(&mut self, quote: char, escape: char) -> LocatedSpan<'a> {
        if self.peek_next_char() != Some(quote) {
            return self.current_location();
        }
        let text = self.remaining_line_str();
        let rest = &text[quote.len_utf8()..];

        let mut inside_escape = false;
        let mut closing_at = None;
        let mut idx = 0usize;
        for c in rest.chars() {
            if inside_escape {
                inside_escape = false;
                idx += c.len_utf8();
                continue;
            }
            if c == escape {
                inside_escape = true;
                idx += c.len_utf8();
                continue;
            }
            if c == quote {
                idx += c.len_utf8();
                closing_at = Some(idx);
                break;
            }
            idx += c.len_utf8();
        }

        if inside_escape || closing_at.is_none() {
            return self.current_location();
        }

        let length = quote.len_utf8() + closing_at.unwrap();
        let result = LocatedSpan { whole_line: self.current_line, line_number: self.zero_based_line_number(), column: self.column_number, length };
        self.skip(length);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_identifier_not_starting_with_digit() {
        let mut ex = LineExtractor::new("1abc");
        let span = ex.extract_identifier();
        assert!(span.is_empty());
    }

    #[test]
    fn extracts_identifier_ok() {
        let mut ex = LineExtractor::new("abc_1 rest");
        let span = ex.extract_identifier();
        assert_eq!(span.str(), "abc_1");
    }

    #[test]
    fn fixed_length_fails_without_advancing() {
        let mut ex = LineExtractor::new("ab");
        let span = ex.extract_n_characters(5);
        assert!(span.is_empty());
        assert_eq!(ex.current_location().column, 0);
    }

    #[test]
    fn quoted_extracts_with_escapes() {
        let mut ex = LineExtractor::new(r#""a\"b" rest"#);
        let span = ex.extract_quoted('"', '\\');
        assert_eq!(span.str(), r#""a\"b""#);
    }

    #[test]
    fn quoted_unterminated_does_not_advance() {
        let mut ex = LineExtractor::new("\"abc");
        let span = ex.extract_quoted('"', '\\');
        assert!(span.is_empty());
    }

    #[test]
    fn load_next_line_crosses_lines() {
        let mut ex = LineExtractor::new("a\nb\n");
        assert_eq!(ex.current_line, "a\n");
        let _ = ex.extract_until_end_of_line();
        assert!(!ex.has_reached_end());
        ex.load_next_line();
        assert_eq!(ex.current_line, "b\n");
    }

    #[test]
    fn first_line_renders_as_line_one_not_two() {
        let mut ex = LineExtractor::new("int x;\nint y;\n");
        let span = ex.extract_rest_of_line();
        assert!(span.render_pointer().starts_with("line 1:\n"));
        ex.load_next_line();
        let span = ex.extract_rest_of_line();
        assert!(span.render_pointer().starts_with("line 2:\n"));
    }
}
