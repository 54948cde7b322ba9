//! Renders gcc diagnostic tokens to HTML.
//!
//! Grounded on `examples/original_source/src/ach/ce/core.cpp`'s driving loop
//! (adapted: that file's body was left wired to the mirror tokenizer by
//! mistake, so only its overall `run_highlighter` shape — optional table
//! wrap, then one span per token — is reused here) and
//! `examples/original_source/src/ach/common/html_builder.cpp` for the
//! builder primitives themselves.

use crate::error::HighlighterError;
use crate::html::HtmlBuilder;
use crate::options::{GccCssClasses, GccOptions};

use super::tokenizer::GccTokenizer;
use super::types::TokenColor;

fn class_for<'a>(color: TokenColor, css: &'a GccCssClasses) -> &'a str {
    match color {
        TokenColor::Normal => &css.normal,
        TokenColor::Highlight => &css.highlight,
        TokenColor::Note => &css.note,
        TokenColor::Warning => &css.warning,
        TokenColor::Error => &css.error,
        TokenColor::ExtraHighlight1 => &css.extra_highlight1,
        TokenColor::ExtraHighlight2 => &css.extra_highlight2,
    }
}

/// Classify and render a gcc-style compiler diagnostic as HTML.
pub fn highlight(text: &str, options: &GccOptions) -> Result<String, HighlighterError> {
    let wrap_in_table = options.table_wrap_css_class.is_some();
    let mut builder = HtmlBuilder::new(options.table_wrap_css_class.clone(), false, false);
    if wrap_in_table {
        builder.open_table();
    }

    let tokens = GccTokenizer::new(text).fill_with_tokens()?;
    for token in tokens {
        let class = class_for(token.color, &options.css);
        builder.open_span(&[class]);
        builder.append_text(token.origin.str());
        builder.close_span();
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_admonition_with_severity_span() {
        let options = GccOptions::default();
        let html = highlight("foo.cc:1:1: error: bad thing\n", &options).unwrap();
        assert!(html.contains("<span class=\"red\">error:</span>"));
        assert!(html.contains("<span class=\"white\">foo.cc:1:1: </span>"));
    }

    #[test]
    fn renders_underline_caret_with_highlight_class() {
        let options = GccOptions::default();
        let text = "foo.cc:1:1: error: bad\n    1 |   x = y;\n      |       ^\n";
        let html = highlight(text, &options).unwrap();
        assert!(html.contains("<span class=\"white\">^</span>"));
    }

    #[test]
    fn classification_failure_is_propagated() {
        let options = GccOptions::default();
        let err = highlight("    stray line with no admonition\n", &options).unwrap_err();
        assert_eq!(err.reason, crate::error::ErrorReason::GccClassificationFailure);
    }
}
