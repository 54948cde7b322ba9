//! Reconciliation: fuse externally supplied semantic tokens into the
//! code-token stream produced by [`crate::code::CodeTokenizer`].
//!
//! Grounded on `examples/original_source/src/ach/clangd/core.cpp` (~lines
//! 440-560: `find_matching_tokens`, the splice-asymmetry compensation it
//! applies, and the grouping of splice-joined semantic-token pieces).

use crate::code::CodeToken;
use crate::error::{ErrorReason, HighlighterError, OwnedLocatedSpan};
use crate::text::{ends_with_backslash_whitespace, Position, Range};

use super::token::{IdentifierInfo, SemanticToken};

/// A run of one or more splice-joined semantic-token pieces, merged into a
/// single logical entity before matching against code tokens.
struct SemanticGroup {
    range: Range,
    info: IdentifierInfo,
    color_variance: super::token::ColorVariance,
}

fn byte_offset(code: &str, pos: Position) -> usize {
    let mut offset = 0;
    for (i, line) in code.split_inclusive('\n').enumerate() {
        if i == pos.line {
            return offset + pos.column;
        }
        offset += line.len();
    }
    offset + pos.column
}

fn raw_text<'a>(code: &'a str, token: &SemanticToken) -> &'a str {
    let start = byte_offset(code, token.position);
    let end = (start + token.length).min(code.len());
    &code[start.min(code.len())..end]
}

fn group_semantic_tokens(code: &str, tokens: &[SemanticToken]) -> Result<Vec<SemanticGroup>, HighlighterError> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let head = &tokens[i];
        let mut last = head;
        let mut j = i;
        while ends_with_backslash_whitespace(raw_text(code, last)) && j + 1 < tokens.len() {
            let next = &tokens[j + 1];
            if next.info != head.info {
                return Err(HighlighterError::internal(ErrorReason::InvalidSemanticTokenData));
            }
            j += 1;
            last = next;
        }
        groups.push(SemanticGroup {
            range: Range::new(head.pos_begin(), last.pos_end()),
            info: head.info,
            color_variance: head.color_variance,
        });
        i = j + 1;
    }
    Ok(groups)
}

/// Return the half-open index range `[lower, upper)` of `code_tokens` whose
/// origins lie within `[start, stop)`, with splice-asymmetry compensation
/// (see §4.3 of the design doc). `None` if the semantic token falls strictly
/// inside one code token.
pub fn find_matching_tokens(code_tokens: &[CodeToken], start: Position, stop: Position) -> Option<std::ops::Range<usize>> {
    let lower = code_tokens.partition_point(|t| t.range().first < start);
    let mut upper = code_tokens.partition_point(|t| t.range().last <= stop);

    // Rare case: the semantic token falls strictly inside one code token.
    if lower > upper {
        return None;
    }

    // Splice asymmetry compensation: the token sitting at the upper-bound
    // index itself (not the last token already in range) may be the tail of
    // a splice-joined run whose whole span needs to be pulled in — this can
    // fire even when `[lower, upper)` is already empty, which is exactly
    // what a 3-or-more-piece splice-joined identifier collapsing into a
    // single code token produces.
    if let Some(boundary) = code_tokens.get(upper) {
        if ends_with_backslash_whitespace(boundary.origin.text) {
            upper += 1;
        }
    }

    if lower >= upper {
        None
    } else {
        Some(lower..upper)
    }
}

/// Fuse `semantic_tokens` into `code_tokens` in place.
pub fn reconcile(code_tokens: &mut [CodeToken], code: &str, semantic_tokens: &[SemanticToken]) -> Result<(), HighlighterError> {
    let groups = group_semantic_tokens(code, semantic_tokens)?;
    for group in &groups {
        let matched = find_matching_tokens(code_tokens, group.range.first, group.range.last).ok_or_else(|| {
            HighlighterError::new(
                ErrorReason::InvalidSemanticTokenData,
                OwnedLocatedSpan { whole_line: String::new(), line_number: group.range.first.line, column: group.range.first.column, length: 0 },
            )
        })?;
        for token in &mut code_tokens[matched] {
            token.info = Some(group.info);
            token.color_variance = Some(group.color_variance);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::SyntaxElement;
    use crate::semantic::token::{IdentifierModifiers, IdentifierType};
    use crate::text::Fragment;

    fn info(t: IdentifierType) -> IdentifierInfo {
        IdentifierInfo { type_: t, modifiers: IdentifierModifiers::default() }
    }

    fn code_token(text: &str, first: Position, last: Position, elem: SyntaxElement) -> CodeToken<'_> {
        CodeToken::new(Fragment::new(text, Range::new(first, last)), elem)
    }

    #[test]
    fn find_matching_tokens_exact_single_token() {
        let tokens = vec![code_token("x", Position::new(0, 0), Position::new(0, 1), SyntaxElement::IdentifierUnknown)];
        let range = find_matching_tokens(&tokens, Position::new(0, 0), Position::new(0, 1));
        assert_eq!(range, Some(0..1));
    }

    #[test]
    fn find_matching_tokens_strictly_inside_one_token_fails() {
        let tokens = vec![code_token(">>", Position::new(0, 0), Position::new(0, 2), SyntaxElement::Symbol)];
        let range = find_matching_tokens(&tokens, Position::new(0, 0), Position::new(0, 1));
        assert!(range.is_none());
    }

    #[test]
    fn reconcile_applies_info_to_matched_token() {
        let mut tokens =
            vec![code_token("foo", Position::new(0, 0), Position::new(0, 3), SyntaxElement::IdentifierUnknown)];
        let semantic = vec![SemanticToken {
            position: Position::new(0, 0),
            length: 3,
            info: info(IdentifierType::Variable),
            color_variance: Default::default(),
        }];
        reconcile(&mut tokens, "foo", &semantic).unwrap();
        assert_eq!(tokens[0].info.unwrap().type_, IdentifierType::Variable);
    }

    #[test]
    fn find_matching_tokens_enclosing_splice_3_to_1_identifier() {
        // Ground: `examples/original_source/src/test/find_matching_tokens_tests.cpp`'s
        // `enclosing_splice_3_to_1_identifier`, over `"void \\\nfunc\\\ntion\\\n();\n"`.
        // The tokenizer merges `func`+splice+`tion` into one identifier token
        // and, while peeking ahead for more identifier characters, consumes
        // the *third* splice too — so the code token's `last` position
        // (line 3, col 0) lands a full line past the semantic tokens' own
        // combined span (line 2, col 4), which never sees that trailing
        // splice. The naive `[lower, upper)` range is therefore empty at
        // `lower == upper == 0`; compensation must still pull token 0 in by
        // checking *that* token (the one at the upper-bound index) for a
        // trailing splice, not the nonexistent "last token already in range".
        let origin = "func\\\ntion\\\n";
        let tokens = vec![code_token(origin, Position::new(0, 5), Position::new(3, 0), SyntaxElement::IdentifierUnknown)];
        let range = find_matching_tokens(&tokens, Position::new(0, 5), Position::new(2, 4));
        assert_eq!(range, Some(0..1));
    }

    #[test]
    fn reconcile_three_piece_splice_joined_identifier_merges_as_one() {
        let code = "void \\\nfunc\\\ntion\\\n();\n";
        let origin = "func\\\ntion\\\n";
        let mut tokens =
            vec![code_token(origin, Position::new(0, 5), Position::new(3, 0), SyntaxElement::IdentifierUnknown)];
        let semantic = vec![
            SemanticToken { position: Position::new(0, 5), length: 1, info: info(IdentifierType::Function), color_variance: Default::default() },
            SemanticToken { position: Position::new(1, 0), length: 5, info: info(IdentifierType::Function), color_variance: Default::default() },
            SemanticToken { position: Position::new(2, 0), length: 4, info: info(IdentifierType::Function), color_variance: Default::default() },
        ];
        reconcile(&mut tokens, code, &semantic).unwrap();
        assert_eq!(tokens[0].info.unwrap().type_, IdentifierType::Function);
    }

    #[test]
    fn reconcile_spliced_identifier_merges_pieces() {
        // "fo\\\no" is a splice-joined identifier spanning two physical lines.
        let code = "fo\\\no";
        let mut tokens =
            vec![code_token(code, Position::new(0, 0), Position::new(1, 1), SyntaxElement::IdentifierUnknown)];
        let semantic = vec![
            SemanticToken {
                position: Position::new(0, 0),
                length: 4,
                info: info(IdentifierType::Function),
                color_variance: Default::default(),
            },
            SemanticToken {
                position: Position::new(1, 0),
                length: 1,
                info: info(IdentifierType::Function),
                color_variance: Default::default(),
            },
        ];
        reconcile(&mut tokens, code, &semantic).unwrap();
        assert_eq!(tokens[0].info.unwrap().type_, IdentifierType::Function);
    }
}
