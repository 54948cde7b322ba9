//! Per-mode option structs.
//!
//! Grounded on the teacher's `src/api.rs::ProcessArgs` (plain option
//! structs with `Default`) and the original's `color_options.hpp`.

/// Mirror mode's keyword/class mapping (ground: `ach::mirror::color_options`).
#[derive(Debug, Clone)]
pub struct ColorOptions {
    pub num_keyword: String,
    pub str_keyword: String,
    pub chr_keyword: String,
    pub num_class: String,
    pub str_class: String,
    pub str_esc_class: String,
    pub chr_class: String,
    pub chr_esc_class: String,
    pub escape_char: u8,
    pub empty_token_char: u8,
}

/// Resolved decision: the original's `lit_str`/`esc_seq`-style defaults are
/// mirror-specific template vocabulary, distinct from the clangd pipeline's
/// fixed `lit-str`/`esc-seq` CSS classes (§4.4) — a mirror *template author*
/// picks their own class names, so the keyword's own spelling is the most
/// useful unsurprising default (`chr` keyword -> `chr` class, etc).
impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            num_keyword: "num".to_string(),
            str_keyword: "str".to_string(),
            chr_keyword: "chr".to_string(),
            num_class: "num".to_string(),
            str_class: "str".to_string(),
            str_esc_class: "str_esc".to_string(),
            chr_class: "chr".to_string(),
            chr_esc_class: "str_esc".to_string(),
            escape_char: b'\\',
            empty_token_char: b'`',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MirrorOptions {
    pub replace_underscores_to_hyphens: bool,
    pub table_wrap_css_class: Option<String>,
    pub valid_css_classes: Option<String>,
    pub color_options: ColorOptions,
}

#[derive(Debug, Clone)]
pub struct ClangdOptions {
    pub table_wrap_css_class: Option<String>,
    pub color_variants: i32,
    pub highlight_printf_formatting: bool,
}

impl Default for ClangdOptions {
    fn default() -> Self {
        Self { table_wrap_css_class: None, color_variants: 6, highlight_printf_formatting: false }
    }
}

/// CSS class names for each [`crate::gcc::TokenColor`] (ground:
/// `ach::ce::css_class_names`).
#[derive(Debug, Clone)]
pub struct GccCssClasses {
    pub normal: String,
    pub highlight: String,
    pub note: String,
    pub warning: String,
    pub error: String,
    pub extra_highlight1: String,
    pub extra_highlight2: String,
}

impl Default for GccCssClasses {
    fn default() -> Self {
        Self {
            normal: "grey".to_string(),
            highlight: "white".to_string(),
            note: "cyan".to_string(),
            warning: "magenta".to_string(),
            error: "red".to_string(),
            extra_highlight1: "green".to_string(),
            extra_highlight2: "blue".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GccOptions {
    pub table_wrap_css_class: Option<String>,
    pub css: GccCssClasses,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clangd_options_default_matches_documented_defaults() {
        let opts = ClangdOptions::default();
        assert_eq!(opts.color_variants, 6);
        assert!(!opts.highlight_printf_formatting);
    }
}
