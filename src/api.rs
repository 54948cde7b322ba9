//! Pure, I/O-free entry points over each pipeline.
//!
//! Ground: teacher's `src/api.rs`, which keeps all file/process handling out
//! of the library and exposes plain functions over owned/borrowed inputs.

use crate::error::HighlighterError;
use crate::options::{ClangdOptions, GccOptions, MirrorOptions};
use crate::semantic::SemanticToken;
use crate::{clangd, gcc, mirror};

/// Render `code` using the color template `color`, per mirror mode.
pub fn highlight_mirror(code: &str, color: &str, options: &MirrorOptions) -> Result<String, HighlighterError> {
    mirror::highlight(code, color, options)
}

/// Render `code` fused with `semantic_tokens` (already sorted by position),
/// using `keywords` for fallback classification.
pub fn highlight_clangd(
    code: &str,
    semantic_tokens: &[SemanticToken],
    keywords: &[String],
    options: &ClangdOptions,
) -> Result<String, HighlighterError> {
    clangd::highlight(code, semantic_tokens, keywords, options)
}

/// Classify and render a gcc-style compiler diagnostic.
pub fn highlight_gcc(text: &str, options: &GccOptions) -> Result<String, HighlighterError> {
    gcc::highlight(text, options)
}

/// Tokenize and reconcile `code` as [`highlight_clangd`] would, but dump the
/// resulting token stream as JSON instead of rendering HTML.
pub fn dump_clangd_tokens(
    code: &str,
    semantic_tokens: &[SemanticToken],
    keywords: &[String],
    options: &ClangdOptions,
) -> Result<String, HighlighterError> {
    clangd::dump_tokens_json(code, semantic_tokens, keywords, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_entry_point_delegates() {
        let options = MirrorOptions::default();
        let result = highlight_mirror("abc\n", "0plain\n", &options);
        assert!(result.is_ok());
    }

    #[test]
    fn gcc_entry_point_delegates() {
        let options = GccOptions::default();
        let result = highlight_gcc("foo.cc:1:1: error: bad\n", &options);
        assert!(result.is_ok());
    }

    #[test]
    fn clangd_entry_point_delegates() {
        let options = ClangdOptions::default();
        let keywords = vec!["int".to_string()];
        let result = highlight_clangd("int x;", &[], &keywords, &options);
        assert!(result.is_ok());
    }

    #[test]
    fn dump_clangd_tokens_produces_valid_json() {
        let options = ClangdOptions::default();
        let keywords = vec!["int".to_string()];
        let json = dump_clangd_tokens("int x;", &[], &keywords, &options).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.as_array().is_some());
    }
}
