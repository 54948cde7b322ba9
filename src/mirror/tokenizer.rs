//! Color-template tokenizer (mirror mode).
//!
//! Grounded on `examples/original_source/src/ach/mirror/color_tokenizer.cpp`.

use crate::options::ColorOptions;
use crate::text::{LineExtractor, LocatedSpan};

use super::color_token::{ColorToken, ColorTokenKind};

fn merge_spans<'a>(first: LocatedSpan<'a>, second: LocatedSpan<'a>) -> LocatedSpan<'a> {
    let length = (second.column + second.length).saturating_sub(first.column);
    LocatedSpan { whole_line: first.whole_line, line_number: first.line_number, column: first.column, length }
}

pub struct ColorTokenizer<'a> {
    extractor: LineExtractor<'a>,
}

impl<'a> ColorTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { extractor: LineExtractor::new(text) }
    }

    pub fn current_location(&self) -> LocatedSpan<'a> {
        self.extractor.current_location()
    }

    pub fn next_token(&mut self, options: &ColorOptions) -> ColorToken<'a> {
        let mut c = self.extractor.peek_next_char();
        if c.is_none() {
            if !self.extractor.load_next_line() {
                return ColorToken { kind: ColorTokenKind::EndOfInput, origin: self.extractor.current_location() };
            }
            c = self.extractor.peek_next_char();
            if c.is_none() {
                return ColorToken { kind: ColorTokenKind::EndOfInput, origin: self.extractor.current_location() };
            }
        }
        let next_char = c.unwrap();

        if next_char.is_alphabetic() || next_char == '_' {
            let extracted = self.extractor.extract_alphas_underscores();
            let identifier = extracted.str();

            if identifier == options.num_keyword {
                return ColorToken { kind: ColorTokenKind::Number { class: options.num_class.clone() }, origin: extracted };
            }
            if identifier == options.str_keyword {
                return ColorToken {
                    kind: ColorTokenKind::QuotedSpan {
                        primary_class: options.str_class.clone(),
                        escape_class: options.str_esc_class.clone(),
                        delimiter: b'"',
                        escape: options.escape_char,
                    },
                    origin: extracted,
                };
            }
            if identifier == options.chr_keyword {
                return ColorToken {
                    kind: ColorTokenKind::QuotedSpan {
                        primary_class: options.chr_class.clone(),
                        escape_class: options.chr_esc_class.clone(),
                        delimiter: b'\'',
                        escape: options.escape_char,
                    },
                    origin: extracted,
                };
            }
            return ColorToken { kind: ColorTokenKind::IdentifierSpan { class: identifier.to_string() }, origin: extracted };
        }

        if next_char.is_ascii_digit() {
            let extracted_digits = self.extractor.extract_digits();
            let extracted_name = self.extractor.extract_alphas_underscores();

            let num: usize = match extracted_digits.str().parse() {
                Ok(n) => n,
                Err(_) => return ColorToken { kind: ColorTokenKind::Invalid { reason: "invalid numeric magnitude" }, origin: extracted_digits },
            };

            let (class, name_span) = if extracted_name.str().is_empty() {
                if self.extractor.peek_next_char() == Some(options.empty_token_char as char) {
                    (None, self.extractor.extract_n_characters(1))
                } else {
                    return ColorToken { kind: ColorTokenKind::Invalid { reason: "expected span class" }, origin: extracted_digits };
                }
            } else {
                (Some(extracted_name.str().to_string()), extracted_name)
            };

            let origin = merge_spans(extracted_digits, name_span);
            return if num == 0 {
                ColorToken { kind: ColorTokenKind::LineDelimitedSpan { class }, origin }
            } else {
                ColorToken { kind: ColorTokenKind::FixedLengthSpan { class, length: num }, origin }
            };
        }

        if next_char == '\n' {
            return ColorToken { kind: ColorTokenKind::EndOfLine, origin: self.extractor.extract_n_characters(1) };
        }

        if next_char as u32 == options.empty_token_char as u32 {
            return ColorToken { kind: ColorTokenKind::EmptyToken, origin: self.extractor.extract_n_characters(1) };
        }

        let extracted_symbol = self.extractor.extract_n_characters(1);
        let expected = extracted_symbol.str().as_bytes()[0];
        ColorToken { kind: ColorTokenKind::Symbol { expected }, origin: extracted_symbol }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_num_keyword() {
        let options = ColorOptions::default();
        let mut tok = ColorTokenizer::new("num");
        let token = tok.next_token(&options);
        assert_eq!(token.kind, ColorTokenKind::Number { class: options.num_class.clone() });
    }

    #[test]
    fn fixed_length_span_parses_digits_and_class() {
        let options = ColorOptions::default();
        let mut tok = ColorTokenizer::new("5keyword");
        let token = tok.next_token(&options);
        assert_eq!(token.kind, ColorTokenKind::FixedLengthSpan { class: Some("keyword".to_string()), length: 5 });
    }

    #[test]
    fn line_delimited_span_uses_zero_length() {
        let options = ColorOptions::default();
        let mut tok = ColorTokenizer::new("0plain");
        let token = tok.next_token(&options);
        assert_eq!(token.kind, ColorTokenKind::LineDelimitedSpan { class: Some("plain".to_string()) });
    }

    #[test]
    fn unknown_identifier_is_identifier_span() {
        let options = ColorOptions::default();
        let mut tok = ColorTokenizer::new("myclass");
        let token = tok.next_token(&options);
        assert_eq!(token.kind, ColorTokenKind::IdentifierSpan { class: "myclass".to_string() });
    }
}
