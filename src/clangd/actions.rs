//! Action translation: maps each code token to HTML builder calls.
//!
//! Grounded on the exact CSS class table in
//! `examples/original_source/src/ach/clangd/core.cpp`, reproduced here as
//! the literal class names this crate emits (see SPEC_FULL.md §4.4).

use crate::code::{CodeToken, SyntaxElement};
use crate::html::HtmlBuilder;
use crate::semantic::{IdentifierInfo, IdentifierType, ScopeModifier};

/// Contextual keywords: parsed as `Keyword` syntax tokens, but re-routed to
/// the identifier path when semantic info shows they're being used as an
/// entity name rather than as a keyword.
const CONTEXTUAL_KEYWORDS: &[&str] = &[
    "final",
    "override",
    "import",
    "module",
    "transaction_safe",
    "transaction_safe_dynamic",
    "pre",
    "post",
    "trivially_relocatable_if_eligible",
    "replaceable_if_eligible",
    // Not an entity name like the others above, but the same rerouting rule
    // applies: when clangd attaches a deduced-type semantic token to `auto`
    // (as opposed to an `auto` return type or trailing-return-type `auto`,
    // which clangd never annotates), it should render through its type
    // class rather than staying a plain keyword span.
    "auto",
];

fn is_disabled_code(info: &Option<IdentifierInfo>) -> bool {
    matches!(info, Some(i) if i.type_ == IdentifierType::DisabledCode)
}

fn class_for_identifier(info: &IdentifierInfo) -> &'static str {
    if info.modifiers.is_non_const_ref_parameter {
        return "param-out";
    }
    let promoted_global = |scope: ScopeModifier| matches!(scope, ScopeModifier::File | ScopeModifier::Global);
    match info.type_ {
        IdentifierType::Parameter => "param",
        IdentifierType::Variable => {
            if info.modifiers.static_ || promoted_global(info.modifiers.scope.0) {
                "var-global"
            } else {
                "var-local"
            }
        }
        IdentifierType::Property => {
            if info.modifiers.static_ || promoted_global(info.modifiers.scope.0) {
                "var-global"
            } else {
                "var-member"
            }
        }
        IdentifierType::EnumMember => "enum",
        IdentifierType::Function => "func-free",
        IdentifierType::Method => {
            if info.modifiers.virtual_ {
                "func-virtual"
            } else {
                "func-member"
            }
        }
        IdentifierType::Class => "type-class",
        IdentifierType::Interface => "type-interface",
        IdentifierType::Enum => "type-enum",
        IdentifierType::Type => "type",
        IdentifierType::Concept => "concept",
        IdentifierType::TemplateParameter => "param-tmpl",
        IdentifierType::Namespace => "namespace",
        IdentifierType::DisabledCode => "disabled-code",
        IdentifierType::Macro => "macro",
        IdentifierType::Modifier => "keyword",
        IdentifierType::Label => "label",
        IdentifierType::Unknown => {
            if info.modifiers.dependent_name {
                "dep-name"
            } else {
                "unknown"
            }
        }
        // Never reached via the identifier path: `operator` tokens are
        // rendered through `overloaded_operator`, and `bracket` tokens are
        // ignored by the reconciler (the tokenizer produces its own brackets).
        IdentifierType::Operator | IdentifierType::Bracket => "unknown",
    }
}

fn one_shot(builder: &mut HtmlBuilder, class: &str, secondary: Option<&str>, text: &str) {
    match secondary {
        Some(extra) => builder.open_span(&[class, extra]),
        None => builder.open_span(&[class]),
    }
    builder.append_text(text);
    builder.close_span();
}

/// Translate one code token into the corresponding builder calls.
pub fn emit_token(builder: &mut HtmlBuilder, token: &CodeToken) {
    let disabled = if is_disabled_code(&token.info) { Some("disabled-code") } else { None };

    match token.syntax_element {
        SyntaxElement::PreprocessorHash => one_shot(builder, "pp-hash", disabled, token.origin.text),
        SyntaxElement::PreprocessorDirective => one_shot(builder, "pp-directive", disabled, token.origin.text),
        SyntaxElement::PreprocessorHeaderFile => one_shot(builder, "pp-header", disabled, token.origin.text),
        SyntaxElement::PreprocessorMacro => one_shot(builder, "pp-macro", disabled, token.origin.text),
        SyntaxElement::PreprocessorMacroParam => one_shot(builder, "pp-macro-param", disabled, token.origin.text),
        SyntaxElement::PreprocessorMacroBody => one_shot(builder, "pp-macro-body", disabled, token.origin.text),
        SyntaxElement::PreprocessorOther => one_shot(builder, "pp-other", disabled, token.origin.text),

        SyntaxElement::CommentBeginSingle => builder.open_span(&["com-single"]),
        SyntaxElement::CommentBeginSingleDoc => builder.open_span(&["com-single-dox"]),
        SyntaxElement::CommentBeginMulti => builder.open_span(&["com-multi"]),
        SyntaxElement::CommentBeginMultiDoc => builder.open_span(&["com-multi-dox"]),
        SyntaxElement::CommentEnd => builder.close_span(),
        SyntaxElement::CommentTagTodo => one_shot(builder, "com-tag-todo", None, token.origin.text),
        SyntaxElement::CommentTagDoc => one_shot(builder, "com-tag-dox", None, token.origin.text),

        SyntaxElement::Keyword => {
            let reroute = token
                .info
                .map(|info| info.type_ != IdentifierType::Unknown)
                .unwrap_or(false)
                && CONTEXTUAL_KEYWORDS.contains(&token.origin.text);
            if reroute {
                emit_identifier(builder, token);
            } else {
                one_shot(builder, "keyword", None, token.origin.text);
            }
        }
        SyntaxElement::IdentifierUnknown => emit_identifier(builder, token),

        SyntaxElement::LiteralPrefix => one_shot(builder, "lit-pre", None, token.origin.text),
        SyntaxElement::LiteralSuffix => one_shot(builder, "lit-suf", None, token.origin.text),
        SyntaxElement::LiteralNumber => one_shot(builder, "lit-num", None, token.origin.text),
        SyntaxElement::LiteralCharBegin => builder.open_span(&["lit-chr"]),
        SyntaxElement::LiteralStringBegin => builder.open_span(&["lit-str"]),
        SyntaxElement::LiteralTextEnd => builder.close_span(),
        SyntaxElement::LiteralStringRawQuote => one_shot(builder, "lit-str", None, token.origin.text),
        SyntaxElement::LiteralStringRawDelimiter => one_shot(builder, "lit-str-raw-delim", None, token.origin.text),
        SyntaxElement::LiteralStringRawParen => one_shot(builder, "lit-str-raw-delim", None, token.origin.text),
        SyntaxElement::LiteralString => one_shot(builder, "lit-str", None, token.origin.text),
        SyntaxElement::EscapeSequence => one_shot(builder, "esc-seq", None, token.origin.text),
        SyntaxElement::FormatSequence => one_shot(builder, "fmt-seq", None, token.origin.text),

        SyntaxElement::Whitespace | SyntaxElement::NothingSpecial => builder.append_text(token.origin.text),

        SyntaxElement::Symbol => {
            if disabled.is_some() {
                one_shot(builder, "disabled-code", None, token.origin.text);
            } else {
                builder.append_text(token.origin.text);
            }
        }
        SyntaxElement::OverloadedOperator => one_shot(builder, "oo", None, token.origin.text),

        SyntaxElement::EndOfInput => {}
    }
}

fn emit_identifier(builder: &mut HtmlBuilder, token: &CodeToken) {
    match token.info {
        Some(info) => one_shot(builder, class_for_identifier(&info), None, token.origin.text),
        None => one_shot(builder, "unknown", None, token.origin.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{IdentifierModifiers, IdentifierType};
    use crate::text::{Fragment, Position, Range};

    fn token<'a>(text: &'a str, elem: SyntaxElement, info: Option<IdentifierInfo>) -> CodeToken<'a> {
        let mut t = CodeToken::new(Fragment::new(text, Range::new(Position::zero(), Position::new(0, text.len()))), elem);
        t.info = info;
        t
    }

    #[test]
    fn keyword_emits_plain_span() {
        let mut b = HtmlBuilder::new(None, false, false);
        emit_token(&mut b, &token("int", SyntaxElement::Keyword, None));
        assert_eq!(b.finish(), "<span class=\"keyword\">int</span>");
    }

    #[test]
    fn static_variable_promotes_to_global_class() {
        let mut modifiers = IdentifierModifiers::default();
        modifiers.static_ = true;
        let info = IdentifierInfo { type_: IdentifierType::Variable, modifiers };
        let mut b = HtmlBuilder::new(None, false, false);
        emit_token(&mut b, &token("x", SyntaxElement::IdentifierUnknown, Some(info)));
        assert_eq!(b.finish(), "<span class=\"var-global\">x</span>");
    }

    #[test]
    fn disabled_code_preprocessor_token_gets_secondary_class() {
        let info = IdentifierInfo { type_: IdentifierType::DisabledCode, modifiers: IdentifierModifiers::default() };
        let mut b = HtmlBuilder::new(None, false, false);
        emit_token(&mut b, &token("FOO", SyntaxElement::PreprocessorMacroBody, Some(info)));
        assert_eq!(b.finish(), "<span class=\"pp-macro-body disabled-code\">FOO</span>");
    }

    #[test]
    fn contextual_keyword_with_entity_info_reroutes_to_identifier() {
        let info = IdentifierInfo { type_: IdentifierType::Namespace, modifiers: IdentifierModifiers::default() };
        let mut b = HtmlBuilder::new(None, false, false);
        emit_token(&mut b, &token("module", SyntaxElement::Keyword, Some(info)));
        assert_eq!(b.finish(), "<span class=\"namespace\">module</span>");
    }

    #[test]
    fn auto_with_deduced_type_info_reroutes_to_type_class() {
        let info = IdentifierInfo { type_: IdentifierType::Class, modifiers: IdentifierModifiers::default() };
        let mut b = HtmlBuilder::new(None, false, false);
        emit_token(&mut b, &token("auto", SyntaxElement::Keyword, Some(info)));
        assert_eq!(b.finish(), "<span class=\"type-class\">auto</span>");
    }

    #[test]
    fn contextual_keyword_without_entity_info_stays_keyword() {
        let mut b = HtmlBuilder::new(None, false, false);
        emit_token(&mut b, &token("final", SyntaxElement::Keyword, None));
        assert_eq!(b.finish(), "<span class=\"keyword\">final</span>");
    }

    #[test]
    fn raw_string_quote_and_paren_use_distinct_classes() {
        let mut b = HtmlBuilder::new(None, false, false);
        emit_token(&mut b, &token("\"", SyntaxElement::LiteralStringRawQuote, None));
        emit_token(&mut b, &token("(", SyntaxElement::LiteralStringRawParen, None));
        assert_eq!(b.finish(), "<span class=\"lit-str\">\"</span><span class=\"lit-str-raw-delim\">(</span>");
    }
}
