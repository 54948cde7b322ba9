//! Color-template token vocabulary (mirror mode).
//!
//! Grounded on `examples/original_source/src/ach/mirror/color_token.hpp`.

use crate::text::LocatedSpan;

#[derive(Debug, Clone, PartialEq)]
pub enum ColorTokenKind {
    IdentifierSpan { class: String },
    FixedLengthSpan { class: Option<String>, length: usize },
    LineDelimitedSpan { class: Option<String> },
    Number { class: String },
    Symbol { expected: u8 },
    EmptyToken,
    QuotedSpan { primary_class: String, escape_class: String, delimiter: u8, escape: u8 },
    EndOfLine,
    EndOfInput,
    Invalid { reason: &'static str },
}

#[derive(Debug, Clone)]
pub struct ColorToken<'a> {
    pub kind: ColorTokenKind,
    pub origin: LocatedSpan<'a>,
}
