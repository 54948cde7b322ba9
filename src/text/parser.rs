//! Parser-combinator layer over the spliced iterator.
//!
//! Grounded on `examples/original_source/src/ach/clangd/spliced_text_parser.cpp`.
//! The original builds this with expression-template operator overloads over
//! generic `Parser` types; per the design notes this crate instead exposes
//! small, non-generic combinator *functions* called imperatively from the
//! compound grammar functions below (`numeric_literal`, `escape_sequence`,
//! etc.), each operating on a `Cursor` (an alias for [`SplicedTextIterator`]).

use super::position::{Fragment, Range};
use super::spliced::{str_from_range, SplicedTextIterator};

pub type Cursor<'a> = SplicedTextIterator<'a>;

// ---------------------------------------------------------------------
// character classes
// ---------------------------------------------------------------------

pub fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic()
}
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}
pub fn is_alpha_or_underscore(c: u8) -> bool {
    is_alpha(c) || c == b'_'
}
pub fn is_alnum_or_underscore(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}
pub fn is_digit_octal(c: u8) -> bool {
    (b'0'..=b'7').contains(&c)
}
pub fn is_digit_hex(c: u8) -> bool {
    c.is_ascii_hexdigit()
}
pub fn is_digit_binary(c: u8) -> bool {
    c == b'0' || c == b'1'
}
pub fn is_whitespace(c: u8) -> bool {
    (c as char).is_whitespace()
}
pub fn is_non_newline_whitespace(c: u8) -> bool {
    c != b'\n' && is_whitespace(c)
}
/// The "basic character set": printable ASCII plus common whitespace.
pub fn is_from_basic_character_set(c: u8) -> bool {
    (0x20..=0x7e).contains(&c) || c == b'\t' || c == b'\n'
}
pub fn is_symbol_char(c: u8) -> bool {
    c == b'!'
        || c == b'%'
        || c == b'&'
        || (0x28..=0x2f).contains(&c)
        || (0x3a..=0x3f).contains(&c)
        || c == b'['
        || c == b']'
        || c == b'^'
        || c == b'{'
        || c == b'|'
        || c == b'}'
        || c == b'~'
}

// ---------------------------------------------------------------------
// primitives and combinators
// ---------------------------------------------------------------------

pub fn any_char(cur: &mut Cursor) -> bool {
    if cur.is_end() {
        return false;
    }
    cur.advance();
    true
}

pub fn satisfies(cur: &mut Cursor, pred: impl Fn(u8) -> bool) -> bool {
    if cur.is_end() || !pred(cur.current()) {
        return false;
    }
    cur.advance();
    true
}

pub fn lit_char(cur: &mut Cursor, c: u8) -> bool {
    satisfies(cur, |b| b == c)
}

pub fn lit_str(cur: &mut Cursor, s: &str) -> bool {
    let mut probe = *cur;
    for &b in s.as_bytes() {
        if probe.is_end() || probe.current() != b {
            return false;
        }
        probe.advance();
    }
    *cur = probe;
    true
}

/// Run `p` on a private copy; commit only if it succeeds (rollback on failure).
pub fn atomic<'a>(cur: &mut Cursor<'a>, mut p: impl FnMut(&mut Cursor<'a>) -> bool) -> bool {
    let mut probe = *cur;
    if p(&mut probe) {
        *cur = probe;
        true
    } else {
        false
    }
}

pub fn zero_or_more<'a>(cur: &mut Cursor<'a>, mut p: impl FnMut(&mut Cursor<'a>) -> bool) -> bool {
    while p(cur) {}
    true
}

pub fn one_or_more<'a>(cur: &mut Cursor<'a>, mut p: impl FnMut(&mut Cursor<'a>) -> bool) -> bool {
    if !p(cur) {
        return false;
    }
    while p(cur) {}
    true
}

/// `-p`: optional, always succeeds.
pub fn optional<'a>(cur: &mut Cursor<'a>, mut p: impl FnMut(&mut Cursor<'a>) -> bool) -> bool {
    p(cur);
    true
}

/// `!p`: succeeds without advancing iff `p` would fail here.
pub fn negate<'a>(cur: &Cursor<'a>, mut p: impl FnMut(&mut Cursor<'a>) -> bool) -> bool {
    let mut probe = *cur;
    !p(&mut probe)
}

/// `&p`: lookahead, never advances.
pub fn lookahead<'a>(cur: &Cursor<'a>, mut p: impl FnMut(&mut Cursor<'a>) -> bool) -> bool {
    let mut probe = *cur;
    p(&mut probe)
}

/// `p - q`: accept `p` only if `q` would not match here ("a but not b").
pub fn sub<'a>(
    cur: &mut Cursor<'a>,
    mut p: impl FnMut(&mut Cursor<'a>) -> bool,
    mut q: impl FnMut(&mut Cursor<'a>) -> bool,
) -> bool {
    if lookahead(cur, &mut q) {
        return false;
    }
    p(cur)
}

// ---------------------------------------------------------------------
// grammar: digits, identifiers, numeric literals
// ---------------------------------------------------------------------

/// `*(-'\'' >> digit)` — digits with optional C++14 `'` separators.
fn digit_sequence<'a>(cur: &mut Cursor<'a>, digit: impl Fn(u8) -> bool + Copy) -> bool {
    zero_or_more(cur, |c| {
        atomic(c, |c| {
            optional(c, |c| lit_char(c, b'\''));
            satisfies(c, digit)
        })
    })
}

pub fn identifier(cur: &mut Cursor) -> bool {
    atomic(cur, |c| {
        satisfies(c, is_alpha_or_underscore) && zero_or_more(c, |c| satisfies(c, is_alnum_or_underscore))
    })
}

fn hex_prefix(cur: &mut Cursor) -> bool {
    lit_str(cur, "0x") || lit_str(cur, "0X")
}

fn exponent_tail(cur: &mut Cursor) -> bool {
    atomic(cur, |c| {
        optional(c, |c| lit_char(c, b'+') || lit_char(c, b'-'));
        one_or_more(c, |c| satisfies(c, is_digit))
    })
}

fn exponent_decimal(cur: &mut Cursor) -> bool {
    atomic(cur, |c| (lit_char(c, b'e') || lit_char(c, b'E')) && exponent_tail(c))
}

fn exponent_hex(cur: &mut Cursor) -> bool {
    atomic(cur, |c| (lit_char(c, b'p') || lit_char(c, b'P')) && exponent_tail(c))
}

/// Numeric literal: tries hex float, decimal float, hex int, binary int,
/// octal int, decimal int, in that priority order (ground: the exact
/// alternative order in `spliced_text_parser.cpp::parse_numeric_literal`).
pub fn numeric_literal(cur: &mut Cursor) -> bool {
    // hex float: 0x[hex]*.[hex]+ exp_hex
    if atomic(cur, |c| {
        hex_prefix(c)
            && zero_or_more(c, |c| satisfies(c, is_digit_hex))
            && lit_char(c, b'.')
            && one_or_more(c, |c| satisfies(c, is_digit_hex))
            && exponent_hex(c)
    }) {
        return true;
    }
    // hex float: 0x[hex]+.? exp_hex
    if atomic(cur, |c| {
        hex_prefix(c)
            && one_or_more(c, |c| satisfies(c, is_digit_hex))
            && optional(c, |c| lit_char(c, b'.'))
            && exponent_hex(c)
    }) {
        return true;
    }
    // decimal float: [dec]*.[dec]+ exp_dec?
    if atomic(cur, |c| {
        zero_or_more(c, |c| satisfies(c, is_digit))
            && lit_char(c, b'.')
            && one_or_more(c, |c| satisfies(c, is_digit))
            && optional(c, exponent_decimal)
    }) {
        return true;
    }
    // decimal float: [dec]+.  exp_dec?
    if atomic(cur, |c| {
        one_or_more(c, |c| satisfies(c, is_digit)) && lit_char(c, b'.') && optional(c, exponent_decimal)
    }) {
        return true;
    }
    // decimal float: [dec]+ exp_dec
    if atomic(cur, |c| one_or_more(c, |c| satisfies(c, is_digit)) && exponent_decimal(c)) {
        return true;
    }
    // hex int
    if atomic(cur, |c| {
        hex_prefix(c) && satisfies(c, is_digit_hex) && digit_sequence(c, is_digit_hex)
    }) {
        return true;
    }
    // binary int
    if atomic(cur, |c| {
        (lit_str(c, "0b") || lit_str(c, "0B")) && satisfies(c, is_digit_binary) && digit_sequence(c, is_digit_binary)
    }) {
        return true;
    }
    // octal int
    if atomic(cur, |c| lit_char(c, b'0') && digit_sequence(c, is_digit_octal)) {
        return true;
    }
    // decimal int: first digit must not be '0' (that's octal/float above)
    if atomic(cur, |c| {
        sub(c, |c| satisfies(c, is_digit), |c| lit_char(c, b'0')) && digit_sequence(c, is_digit)
    }) {
        return true;
    }
    false
}

// ---------------------------------------------------------------------
// grammar: literal prefixes, raw strings, symbols, comment tags, quoting
// ---------------------------------------------------------------------

fn text_literal_prefix(cur: &mut Cursor) -> bool {
    lit_char(cur, b'L') || lit_str(cur, "u8") || lit_char(cur, b'u') || lit_char(cur, b'U')
}

pub fn text_literal_prefix_before(cur: &mut Cursor, quote: u8) -> bool {
    atomic(cur, |c| text_literal_prefix(c) && lookahead(c, |c| lit_char(c, quote)))
}

pub fn raw_string_literal_prefix(cur: &mut Cursor) -> bool {
    atomic(cur, |c| {
        optional(c, text_literal_prefix) && lit_char(c, b'R') && lookahead(c, |c| lit_char(c, b'"'))
    })
}

pub fn raw_string_literal_delimiter(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| {
        satisfies(c, |b| is_from_basic_character_set(b) && b != b'(' && b != b')' && b != b'\\' && !is_whitespace(b))
    })
}

pub fn raw_string_literal_body<'a>(cur: &mut Cursor<'a>, delimiter: &str) -> bool {
    one_or_more(cur, |c| {
        sub(c, any_char, |c| atomic(c, |c| lit_char(c, b')') && lit_str(c, delimiter)))
    })
}

pub fn symbols(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| {
        sub(c, |c| satisfies(c, is_symbol_char), |c| lit_str(c, "//") || lit_str(c, "/*"))
    })
}

/// A single symbol character (tokenized one at a time so that `>>`, `::`,
/// etc. can be split into independently-typed tokens downstream).
pub fn symbol(cur: &mut Cursor) -> bool {
    sub(cur, |c| satisfies(c, is_symbol_char), |c| lit_str(c, "//") || lit_str(c, "/*"))
}

pub fn newlines(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| lit_char(c, b'\n') || lit_str(c, "\r\n"))
}

/// `#error`/`#warning` body: anything up to a newline or a comment start.
pub fn preprocessor_diagnostic_message(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| {
        sub(c, |c| sub(c, any_char, |c| lit_char(c, b'\n')), |c| lit_str(c, "//") || lit_str(c, "/*"))
    })
}

/// `printf`-style format specifier: `%[flags][width][.precision][length]conv`.
pub fn format_sequence_printf(cur: &mut Cursor) -> bool {
    atomic(cur, |c| {
        lit_char(c, b'%')
            && zero_or_more(c, |c| satisfies(c, |b| matches!(b, b'-' | b'+' | b' ' | b'#' | b'0')))
            && zero_or_more(c, |c| satisfies(c, is_digit))
            && optional(c, |c| atomic(c, |c| lit_char(c, b'.') && zero_or_more(c, |c| satisfies(c, is_digit))))
            && zero_or_more(c, |c| satisfies(c, |b| matches!(b, b'h' | b'l' | b'L' | b'j' | b'z' | b't')))
            && satisfies(c, |b| matches!(b, b'd' | b'i' | b'o' | b'u' | b'x' | b'X' | b'e' | b'E' | b'f' | b'F' | b'g' | b'G' | b'a' | b'A' | b'c' | b's' | b'p' | b'n' | b'%'))
    })
}

pub fn comment_tag_todo(cur: &mut Cursor) -> bool {
    atomic(cur, |c| {
        (lit_str(c, "TODO") || lit_str(c, "FIXME")) && negate(c, |c| satisfies(c, is_alnum_or_underscore))
    })
}

pub fn comment_tag_doc(cur: &mut Cursor) -> bool {
    atomic(cur, |c| lit_char(c, b'@') && one_or_more(c, |c| satisfies(c, is_alpha)))
}

pub fn comment_single_body(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| sub(c, sub_any_not_newline, comment_tag_todo))
}
fn sub_any_not_newline(cur: &mut Cursor) -> bool {
    sub(cur, any_char, |c| lit_char(c, b'\n'))
}

pub fn comment_single_doc_body(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| sub(c, |c| sub(c, sub_any_not_newline, comment_tag_doc), comment_tag_todo))
}

pub fn comment_multi_body(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| sub(c, |c| sub(c, any_char, |c| lit_str(c, "*/")), comment_tag_todo))
}

pub fn comment_multi_doc_body(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| {
        sub(c, |c| sub(c, |c| sub(c, any_char, |c| lit_str(c, "*/")), comment_tag_doc), comment_tag_todo)
    })
}

/// Plain quoted text, no escape handling (preprocessor `#include <...>` etc.).
pub fn quoted(cur: &mut Cursor, begin: u8, end: u8) -> bool {
    atomic(cur, |c| {
        lit_char(c, begin) && zero_or_more(c, |c| satisfies(c, |b| b != end && b != b'\n')) && lit_char(c, end)
    })
}

fn escape_simple(cur: &mut Cursor) -> bool {
    satisfies(cur, |c| matches!(c, b'\'' | b'"' | b'?' | b'\\' | b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v'))
}

fn escape_numeric(cur: &mut Cursor) -> bool {
    // \nnn | \nn | \n (octal, longest-first)
    if atomic(cur, |c| {
        satisfies(c, is_digit_octal) && satisfies(c, is_digit_octal) && satisfies(c, is_digit_octal)
    }) {
        return true;
    }
    if atomic(cur, |c| satisfies(c, is_digit_octal) && satisfies(c, is_digit_octal)) {
        return true;
    }
    if satisfies(cur, is_digit_octal) {
        return true;
    }
    // \o{n...}
    if atomic(cur, |c| {
        lit_char(c, b'o') && lit_char(c, b'{') && one_or_more(c, |c| satisfies(c, is_digit_octal)) && lit_char(c, b'}')
    }) {
        return true;
    }
    // \x{n...}
    if atomic(cur, |c| {
        lit_char(c, b'x') && lit_char(c, b'{') && one_or_more(c, |c| satisfies(c, is_digit_hex)) && lit_char(c, b'}')
    }) {
        return true;
    }
    // \xn...
    if atomic(cur, |c| lit_char(c, b'x') && one_or_more(c, |c| satisfies(c, is_digit_hex))) {
        return true;
    }
    // \unnnn
    if atomic(cur, |c| {
        lit_char(c, b'u')
            && satisfies(c, is_digit_hex)
            && satisfies(c, is_digit_hex)
            && satisfies(c, is_digit_hex)
            && satisfies(c, is_digit_hex)
    }) {
        return true;
    }
    // \u{n...}
    if atomic(cur, |c| {
        lit_char(c, b'u') && lit_char(c, b'{') && one_or_more(c, |c| satisfies(c, is_digit_hex)) && lit_char(c, b'}')
    }) {
        return true;
    }
    // \Unnnnnnnn
    if atomic(cur, |c| {
        lit_char(c, b'U') && (0..8).all(|_| satisfies(c, is_digit_hex))
    }) {
        return true;
    }
    // \N{name}
    if atomic(cur, |c| {
        lit_char(c, b'N')
            && lit_char(c, b'{')
            && one_or_more(c, |c| satisfies(c, |b| b.is_ascii_uppercase() || is_digit(b) || b == b'-' || b == b' '))
            && lit_char(c, b'}')
    }) {
        return true;
    }
    false
}

fn escape_implementation_defined(cur: &mut Cursor) -> bool {
    satisfies(cur, is_from_basic_character_set)
}

/// `\` followed by a recognized escape body; one logical escape sequence.
pub fn escape_sequence(cur: &mut Cursor) -> bool {
    atomic(cur, |c| {
        lit_char(c, b'\\') && (escape_simple(c) || escape_numeric(c) || escape_implementation_defined(c))
    })
}

pub fn text_literal_body(cur: &mut Cursor, delimiter: u8, stop_before_percent: bool) -> bool {
    one_or_more(cur, |c| {
        sub(c, any_char, |c| lit_char(c, delimiter) || (stop_before_percent && lit_char(c, b'%')))
    })
}

pub fn non_newline_whitespace(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| satisfies(c, is_non_newline_whitespace))
}

pub fn digits(cur: &mut Cursor) -> bool {
    one_or_more(cur, |c| satisfies(c, is_digit))
}

// ---------------------------------------------------------------------
// the parser facade: wraps a cursor and turns grammar bools into fragments
// ---------------------------------------------------------------------

pub struct SplicedTextParser<'a> {
    iter: Cursor<'a>,
}

impl<'a> SplicedTextParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { iter: SplicedTextIterator::new(text) }
    }

    pub fn has_reached_end(&self) -> bool {
        self.iter.is_end()
    }

    pub fn current_position(&self) -> super::position::Position {
        self.iter.position()
    }

    pub fn empty_match(&self) -> Fragment<'static> {
        Fragment::empty_at(self.current_position())
    }

    fn run(&mut self, p: impl FnOnce(&mut Cursor<'a>) -> bool) -> Fragment<'a> {
        let mut updated = self.iter;
        let success = p(&mut updated);
        if success {
            debug_assert!(updated != self.iter, "every successful parse must move the iterator");
            let text = str_from_range(self.iter, updated);
            let range = Range::new(self.iter.position(), updated.position());
            self.iter = updated;
            Fragment::new(text, range)
        } else {
            debug_assert!(updated == self.iter, "every failed parse must not move the iterator");
            Fragment::empty_at(self.current_position())
        }
    }

    pub fn parse_exactly_char(&mut self, c: u8) -> Fragment<'a> {
        self.run(|cur| lit_char(cur, c))
    }

    pub fn parse_exactly(&mut self, s: &str) -> Fragment<'a> {
        let s = s.to_string();
        self.run(move |cur| lit_str(cur, &s))
    }

    pub fn parse_newline(&mut self) -> Fragment<'a> {
        self.parse_exactly_char(b'\n')
    }

    pub fn parse_newlines(&mut self) -> Fragment<'a> {
        self.run(newlines)
    }

    pub fn parse_preprocessor_diagnostic_message(&mut self) -> Fragment<'a> {
        self.run(preprocessor_diagnostic_message)
    }

    pub fn parse_symbol(&mut self) -> Fragment<'a> {
        self.run(symbol)
    }

    pub fn parse_format_sequence_printf(&mut self) -> Fragment<'a> {
        self.run(format_sequence_printf)
    }

    pub fn parse_non_newline_whitespace(&mut self) -> Fragment<'a> {
        self.run(non_newline_whitespace)
    }

    pub fn parse_digits(&mut self) -> Fragment<'a> {
        self.run(digits)
    }

    pub fn parse_identifier(&mut self) -> Fragment<'a> {
        self.run(identifier)
    }

    pub fn parse_numeric_literal(&mut self) -> Fragment<'a> {
        self.run(numeric_literal)
    }

    pub fn parse_text_literal_prefix(&mut self, quote: u8) -> Fragment<'a> {
        self.run(move |cur| text_literal_prefix_before(cur, quote))
    }

    pub fn parse_raw_string_literal_prefix(&mut self) -> Fragment<'a> {
        self.run(raw_string_literal_prefix)
    }

    pub fn parse_raw_string_literal_delimiter_open(&mut self) -> Fragment<'a> {
        self.run(raw_string_literal_delimiter)
    }

    pub fn parse_raw_string_literal_body(&mut self, delimiter: &str) -> Fragment<'a> {
        let delimiter = delimiter.to_string();
        self.run(move |cur| raw_string_literal_body(cur, &delimiter))
    }

    pub fn parse_raw_string_literal_delimiter_close(&mut self, delimiter: &str) -> Fragment<'a> {
        self.parse_exactly(delimiter)
    }

    pub fn parse_symbols(&mut self) -> Fragment<'a> {
        self.run(symbols)
    }

    pub fn parse_comment_tag_todo(&mut self) -> Fragment<'a> {
        self.run(comment_tag_todo)
    }

    pub fn parse_comment_tag_doc(&mut self) -> Fragment<'a> {
        self.run(comment_tag_doc)
    }

    pub fn parse_comment_single_body(&mut self) -> Fragment<'a> {
        self.run(comment_single_body)
    }

    pub fn parse_comment_single_doc_body(&mut self) -> Fragment<'a> {
        self.run(comment_single_doc_body)
    }

    pub fn parse_comment_multi_body(&mut self) -> Fragment<'a> {
        self.run(comment_multi_body)
    }

    pub fn parse_comment_multi_doc_body(&mut self) -> Fragment<'a> {
        self.run(comment_multi_doc_body)
    }

    pub fn parse_quoted(&mut self, begin: u8, end: u8) -> Fragment<'a> {
        self.run(move |cur| quoted(cur, begin, end))
    }

    pub fn parse_escape_sequence(&mut self) -> Fragment<'a> {
        self.run(escape_sequence)
    }

    pub fn parse_text_literal_body(&mut self, delimiter: u8, stop_before_percent: bool) -> Fragment<'a> {
        self.run(move |cur| text_literal_body(cur, delimiter, stop_before_percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identifier() {
        let mut p = SplicedTextParser::new("foo_bar rest");
        let frag = p.parse_identifier();
        assert_eq!(frag.text, "foo_bar");
    }

    #[test]
    fn fails_without_advancing() {
        let mut p = SplicedTextParser::new("123abc");
        let frag = p.parse_identifier();
        assert!(frag.is_empty());
        assert_eq!(p.current_position(), super::super::position::Position::zero());
    }

    #[test]
    fn numeric_literal_hex_int() {
        let mut p = SplicedTextParser::new("0xFF rest");
        let frag = p.parse_numeric_literal();
        assert_eq!(frag.text, "0xFF");
    }

    #[test]
    fn numeric_literal_decimal_float_with_exponent() {
        let mut p = SplicedTextParser::new("3.14e-10;");
        let frag = p.parse_numeric_literal();
        assert_eq!(frag.text, "3.14e-10");
    }

    #[test]
    fn numeric_literal_octal_not_decimal() {
        let mut p = SplicedTextParser::new("0755;");
        let frag = p.parse_numeric_literal();
        assert_eq!(frag.text, "0755");
    }

    #[test]
    fn escape_sequence_simple() {
        let mut p = SplicedTextParser::new(r"\n rest");
        let frag = p.parse_escape_sequence();
        assert_eq!(frag.text, r"\n");
    }

    #[test]
    fn escape_sequence_unicode_braced() {
        let mut p = SplicedTextParser::new(r"\u{1F600}rest");
        let frag = p.parse_escape_sequence();
        assert_eq!(frag.text, r"\u{1F600}");
    }

    #[test]
    fn raw_string_literal_prefix_and_delimiter() {
        let mut p = SplicedTextParser::new(r#"R"delim(body)delim""#);
        let prefix = p.parse_raw_string_literal_prefix();
        assert_eq!(prefix.text, "R");
        let quote = p.parse_exactly_char(b'"');
        assert_eq!(quote.text, "\"");
        let delim = p.parse_raw_string_literal_delimiter_open();
        assert_eq!(delim.text, "delim");
        let paren = p.parse_exactly_char(b'(');
        assert_eq!(paren.text, "(");
        let body = p.parse_raw_string_literal_body("delim");
        assert_eq!(body.text, "body");
    }

    #[test]
    fn symbols_stop_before_comment_start() {
        let mut p = SplicedTextParser::new("+=//comment");
        let frag = p.parse_symbols();
        assert_eq!(frag.text, "+=");
    }

    #[test]
    fn comment_tag_todo_is_whole_word() {
        let mut p = SplicedTextParser::new("TODOX");
        let frag = p.parse_comment_tag_todo();
        assert!(frag.is_empty());
    }
}
