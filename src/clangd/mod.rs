//! The clangd pipeline: tokenize, reconcile, emit HTML.

pub mod actions;

use serde::Serialize;

use crate::code::{CodeToken, CodeTokenizer};
use crate::error::HighlighterError;
use crate::html::HtmlBuilder;
use crate::options::ClangdOptions;
use crate::semantic::{reconcile, SemanticToken};
use crate::text::Range;

/// Run the full clangd pipeline over `code`, fusing `semantic_tokens`
/// (already sorted by position) using `keywords` (a sorted splice-aware
/// keyword set), per `options`.
pub fn highlight(
    code: &str,
    semantic_tokens: &[SemanticToken],
    keywords: &[String],
    options: &ClangdOptions,
) -> Result<String, HighlighterError> {
    let tokens = tokenize_and_reconcile(code, semantic_tokens, keywords, options)?;

    let mut builder = HtmlBuilder::new(options.table_wrap_css_class.clone(), false, false);
    if options.table_wrap_css_class.is_some() {
        builder.open_table();
    }
    for token in &tokens {
        actions::emit_token(&mut builder, token);
    }
    Ok(builder.finish())
}

/// Diagnostic wire shape for one reconciled token (ground: teacher's
/// multi-format `OutputFormat::Json` dumps of the token stream in
/// `processing_stages.rs`).
#[derive(Debug, Serialize)]
pub struct TokenDump {
    pub syntax_element: crate::code::SyntaxElement,
    pub text: String,
    pub range: Range,
    pub has_semantic_info: bool,
}

impl From<&CodeToken<'_>> for TokenDump {
    fn from(token: &CodeToken<'_>) -> Self {
        Self {
            syntax_element: token.syntax_element,
            text: token.origin.text.to_string(),
            range: token.range(),
            has_semantic_info: token.info.is_some(),
        }
    }
}

/// Run the pipeline up through reconciliation and dump the token stream as
/// JSON, independent of the HTML path (the CLI's `--format json`).
pub fn dump_tokens_json(
    code: &str,
    semantic_tokens: &[SemanticToken],
    keywords: &[String],
    options: &ClangdOptions,
) -> Result<String, HighlighterError> {
    let tokens = tokenize_and_reconcile(code, semantic_tokens, keywords, options)?;
    let dump: Vec<TokenDump> = tokens.iter().map(TokenDump::from).collect();
    Ok(serde_json::to_string_pretty(&dump)?)
}

fn tokenize_and_reconcile<'a>(
    code: &'a str,
    semantic_tokens: &[SemanticToken],
    keywords: &[String],
    options: &ClangdOptions,
) -> Result<Vec<CodeToken<'a>>, HighlighterError> {
    let mut tokenizer = CodeTokenizer::new(code, keywords.to_vec(), options.highlight_printf_formatting);
    let mut tokens = tokenizer.fill_with_tokens()?;
    reconcile(&mut tokens, code, semantic_tokens)?;
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_keyword_and_identifier_with_no_semantic_tokens() {
        let options = ClangdOptions::default();
        let keywords = vec!["int".to_string()];
        let html = highlight("int x;", &[], &keywords, &options).unwrap();
        assert_eq!(html, "<span class=\"keyword\">int</span> <span class=\"unknown\">x</span>;");
    }
}
