//! Mirror pipeline orchestration: drives the color-template tokenizer
//! against a plain [`LineExtractor`] reading the code, one color token at a
//! time.
//!
//! Grounded on `examples/original_source/src/ach/mirror/core.cpp`
//! (`process_color_token`, `is_valid_css_class`, `run_highlighter`).

use crate::error::{ErrorReason, HighlighterError, OwnedLocatedSpan};
use crate::html::HtmlBuilder;
use crate::options::MirrorOptions;
use crate::text::LineExtractor;

use super::color_token::ColorTokenKind;
use super::tokenizer::ColorTokenizer;

fn is_valid_css_class(class: &str, valid_classes: &str) -> bool {
    valid_classes.split(|c: char| !(c.is_alphanumeric() || c == '_')).any(|word| word == class)
}

fn check_class(class: &str, valid_classes: &Option<String>) -> Result<(), String> {
    match valid_classes {
        Some(valid) if !is_valid_css_class(class, valid) => Err(class.to_string()),
        _ => Ok(()),
    }
}

/// Run the mirror pipeline over `code` driven by `color`, per `options`.
pub fn highlight(code: &str, color: &str, options: &MirrorOptions) -> Result<String, HighlighterError> {
    let wrap_in_table = options.table_wrap_css_class.is_some();
    let mut builder = HtmlBuilder::new(options.table_wrap_css_class.clone(), true, options.replace_underscores_to_hyphens);
    if wrap_in_table {
        builder.open_table();
    }

    let mut color_tr = ColorTokenizer::new(color);
    let mut code_tr = LineExtractor::new(code);
    let mut final_color_location = color_tr.current_location();

    loop {
        let color_tn = color_tr.next_token(&options.color_options);
        let last_code_location = code_tr.current_location();

        let class_to_check: Option<&str> = match &color_tn.kind {
            ColorTokenKind::IdentifierSpan { class } => Some(class.as_str()),
            ColorTokenKind::FixedLengthSpan { class, .. } => class.as_deref(),
            ColorTokenKind::LineDelimitedSpan { class } => class.as_deref(),
            ColorTokenKind::Number { class } => Some(class.as_str()),
            ColorTokenKind::QuotedSpan { primary_class, escape_class, .. } => {
                if let Err(bad) = check_class(primary_class, &options.valid_css_classes) {
                    return Err(css_error(&color_tn.origin, &last_code_location, bad));
                }
                Some(escape_class.as_str())
            }
            _ => None,
        };
        if let Some(class) = class_to_check {
            if let Err(bad) = check_class(class, &options.valid_css_classes) {
                return Err(css_error(&color_tn.origin, &last_code_location, bad));
            }
        }

        match color_tn.kind {
            ColorTokenKind::IdentifierSpan { class } => {
                let extracted = code_tr.extract_identifier();
                if extracted.is_empty() {
                    return Err(mismatch(ErrorReason::ExpectedIdentifier, &color_tn.origin, &extracted));
                }
                builder.open_span(&[&class]);
                builder.append_text(extracted.str());
                builder.close_span();
            }
            ColorTokenKind::FixedLengthSpan { class, length } => {
                let extracted = code_tr.extract_n_characters(length);
                if extracted.str().len() < length {
                    return Err(mismatch(ErrorReason::InsufficientCharacters, &color_tn.origin, &extracted));
                }
                match &class {
                    Some(class) => {
                        builder.open_span(&[class]);
                        builder.append_text(extracted.str());
                        builder.close_span();
                    }
                    None => builder.append_text(extracted.str()),
                }
            }
            ColorTokenKind::LineDelimitedSpan { class } => {
                let extracted = code_tr.extract_until_end_of_line();
                match &class {
                    Some(class) => {
                        builder.open_span(&[class]);
                        builder.append_text(extracted.str());
                        builder.close_span();
                    }
                    None => builder.append_text(extracted.str()),
                }
            }
            ColorTokenKind::Symbol { expected } => {
                let extracted = code_tr.extract_n_characters(1);
                if extracted.is_empty() {
                    return Err(mismatch(ErrorReason::ExpectedSymbol, &color_tn.origin, &extracted));
                }
                if extracted.str().as_bytes()[0] != expected {
                    return Err(mismatch(ErrorReason::MismatchedSymbol, &color_tn.origin, &extracted));
                }
                builder.append_text(extracted.str());
            }
            ColorTokenKind::Number { class } => {
                let extracted = code_tr.extract_digits();
                if extracted.is_empty() {
                    return Err(mismatch(ErrorReason::ExpectedNumber, &color_tn.origin, &extracted));
                }
                builder.open_span(&[&class]);
                builder.append_text(extracted.str());
                builder.close_span();
            }
            ColorTokenKind::EmptyToken => {}
            ColorTokenKind::QuotedSpan { primary_class, escape_class, delimiter, escape } => {
                let extracted = code_tr.extract_quoted(delimiter as char, escape as char);
                if extracted.is_empty() {
                    return Err(mismatch(ErrorReason::ExpectedQuoted, &color_tn.origin, &extracted));
                }
                builder.open_span(&[&primary_class]);
                builder.append_quoted(extracted.str(), escape, &escape_class);
                builder.close_span();
            }
            ColorTokenKind::EndOfLine => {
                let extracted = code_tr.extract_n_characters(1);
                if extracted.is_empty() || extracted.str() != "\n" {
                    return Err(mismatch(ErrorReason::ExpectedLineFeed, &color_tn.origin, &extracted));
                }
                let _ = code_tr.load_next_line();
                builder.append_text(extracted.str());
            }
            ColorTokenKind::EndOfInput => {
                final_color_location = color_tn.origin;
                break;
            }
            ColorTokenKind::Invalid { reason } => {
                let kind = if reason == "invalid numeric magnitude" {
                    ErrorReason::InvalidNumericMagnitude
                } else {
                    ErrorReason::ExpectedSpanClass
                };
                return Err(HighlighterError::new(kind, OwnedLocatedSpan::from(&color_tn.origin))
                    .with_template_location(OwnedLocatedSpan::from(&last_code_location)));
            }
        }
    }

    if !code_tr.has_reached_end() {
        let loc = code_tr.current_location();
        let remainder_length = code_tr.remaining_line_text().len();
        let code_location = OwnedLocatedSpan { whole_line: loc.whole_line.to_string(), line_number: loc.line_number, column: loc.column, length: remainder_length };
        return Err(HighlighterError::new(ErrorReason::ExhaustedColor, code_location)
            .with_template_location(OwnedLocatedSpan::from(&final_color_location)));
    }

    Ok(builder.finish())
}

fn mismatch(reason: ErrorReason, template_origin: &crate::text::LocatedSpan, code_origin: &crate::text::LocatedSpan) -> HighlighterError {
    HighlighterError::new(reason, OwnedLocatedSpan::from(code_origin)).with_template_location(OwnedLocatedSpan::from(template_origin))
}

fn css_error(template_origin: &crate::text::LocatedSpan, code_origin: &crate::text::LocatedSpan, class: String) -> HighlighterError {
    HighlighterError::new(ErrorReason::InvalidCssClass(class), OwnedLocatedSpan::from(code_origin))
        .with_template_location(OwnedLocatedSpan::from(template_origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_template_wraps_each_line_in_one_span() {
        let options = MirrorOptions::default();
        let html = highlight("abc\ndef\n", "0plain\n0plain\n", &options).unwrap();
        assert_eq!(html, "<span class=\"plain\">abc</span>\n<span class=\"plain\">def</span>\n");
    }

    #[test]
    fn exhausted_color_with_remaining_code_is_an_error() {
        let options = MirrorOptions::default();
        let err = highlight("abc", "", &options).unwrap_err();
        assert_eq!(err.reason, ErrorReason::ExhaustedColor);
    }

    #[test]
    fn fixed_length_span_insufficient_characters_is_an_error() {
        let options = MirrorOptions::default();
        let err = highlight("ab", "5plain", &options).unwrap_err();
        assert_eq!(err.reason, ErrorReason::InsufficientCharacters);
    }

    #[test]
    fn mismatched_symbol_is_an_error() {
        let options = MirrorOptions::default();
        let err = highlight(";", "(", &options).unwrap_err();
        assert_eq!(err.reason, ErrorReason::MismatchedSymbol);
    }

    #[test]
    fn invalid_css_class_is_rejected_against_whitelist() {
        let mut options = MirrorOptions::default();
        options.valid_css_classes = Some("plain keyword".to_string());
        let err = highlight("x", "0notallowed", &options).unwrap_err();
        assert!(matches!(err.reason, ErrorReason::InvalidCssClass(ref c) if c == "notallowed"));
    }
}
