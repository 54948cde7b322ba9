//! The C-family code tokenizer: drives [`SplicedTextParser`] through the
//! [`ContextState`] / [`PreprocessorState`] machines to emit [`CodeToken`]s.
//!
//! Grounded on `examples/original_source/src/ach/clangd/code_tokenizer.cpp`.

use crate::error::{ErrorReason, HighlighterError, OwnedLocatedSpan};
use crate::text::{compare_spliced_with_raw, Fragment, SplicedTextParser};

use super::state::{preprocessor_directive_to_state, ContextState, PreprocessorState};
use super::tokens::{CodeToken, SyntaxElement};

fn is_keyword(identifier: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| compare_spliced_with_raw(identifier, kw))
}

pub struct CodeTokenizer<'a> {
    parser: SplicedTextParser<'a>,
    context_state: ContextState,
    preprocessor_state: PreprocessorState,
    keywords: Vec<String>,
    macro_params: Vec<String>,
    raw_string_delimiter: String,
    highlight_printf_formatting: bool,
}

type TokenResult<'a> = Result<CodeToken<'a>, HighlighterError>;

impl<'a> CodeTokenizer<'a> {
    pub fn new(code: &'a str, keywords: Vec<String>, highlight_printf_formatting: bool) -> Self {
        Self {
            parser: SplicedTextParser::new(code),
            context_state: ContextState::None,
            preprocessor_state: PreprocessorState::LineBegin,
            keywords,
            macro_params: Vec::new(),
            raw_string_delimiter: String::new(),
            highlight_printf_formatting,
        }
    }

    fn empty_match(&self) -> Fragment<'static> {
        self.parser.empty_match()
    }

    fn is_in_macro_params(&self, identifier: &str) -> bool {
        self.macro_params.iter().any(|p| compare_spliced_with_raw(identifier, p))
    }

    fn make_error(&self, reason: ErrorReason) -> HighlighterError {
        let loc = self.parser.empty_match();
        HighlighterError::new(
            reason,
            OwnedLocatedSpan { whole_line: String::new(), line_number: loc.range.first.line, column: loc.range.first.column, length: 0 },
        )
    }

    fn on_parsed_newline(&mut self) {
        self.preprocessor_state = PreprocessorState::LineBegin;
        self.macro_params.clear();
    }

    /// Tokenize the entire buffer, stopping at the first error or at
    /// `SyntaxElement::EndOfInput`.
    pub fn fill_with_tokens(&mut self) -> Result<Vec<CodeToken<'a>>, HighlighterError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_code_token()?;
            let done = token.syntax_element == SyntaxElement::EndOfInput;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_code_token(&mut self) -> TokenResult<'a> {
        match self.context_state {
            ContextState::LiteralEndOptionalSuffix => {
                self.context_state = ContextState::None;
                let identifier = self.parser.parse_identifier();
                if !identifier.is_empty() {
                    return Ok(CodeToken::new(identifier, SyntaxElement::LiteralSuffix));
                }
                self.next_code_token_context_none()
            }
            ContextState::None => self.next_code_token_context_none(),
            ContextState::CommentSingle => self.next_code_token_context_comment(false, false),
            ContextState::CommentSingleDoc => self.next_code_token_context_comment(false, true),
            ContextState::CommentMulti => self.next_code_token_context_comment(true, false),
            ContextState::CommentMultiDoc => self.next_code_token_context_comment(true, true),
            ContextState::CommentEnd => {
                self.context_state = ContextState::None;
                Ok(CodeToken::new(self.empty_match(), SyntaxElement::CommentEnd))
            }
            ContextState::LiteralCharacter => self.next_code_token_context_quoted_literal(b'\'', false),
            ContextState::LiteralString => self.next_code_token_context_quoted_literal(b'"', true),
            ContextState::LiteralStringRawQuoteOpen => {
                let quote = self.parser.parse_exactly_char(b'"');
                if !quote.is_empty() {
                    self.context_state = ContextState::LiteralStringRawDelimiterOpen;
                    return Ok(CodeToken::new(quote, SyntaxElement::LiteralStringRawQuote));
                }
                Err(self.make_error(ErrorReason::InternalErrorRawStringLiteralQuoteOpen))
            }
            ContextState::LiteralStringRawDelimiterOpen => {
                self.context_state = ContextState::LiteralStringRawParenOpen;
                let delimiter = self.parser.parse_raw_string_literal_delimiter_open();
                if !delimiter.is_empty() {
                    self.raw_string_delimiter = delimiter.text.to_string();
                    return Ok(CodeToken::new(delimiter, SyntaxElement::LiteralStringRawDelimiter));
                }
                self.raw_string_delimiter.clear();
                self.next_code_token_raw_paren_open()
            }
            ContextState::LiteralStringRawParenOpen => self.next_code_token_raw_paren_open(),
            ContextState::LiteralStringRawBody => {
                self.context_state = ContextState::LiteralStringRawParenClose;
                let delimiter = self.raw_string_delimiter.clone();
                let body = self.parser.parse_raw_string_literal_body(&delimiter);
                if !body.is_empty() {
                    return Ok(CodeToken::new(body, SyntaxElement::LiteralString));
                }
                self.next_code_token_raw_paren_close()
            }
            ContextState::LiteralStringRawParenClose => self.next_code_token_raw_paren_close(),
            ContextState::LiteralStringRawDelimiterClose => {
                self.context_state = ContextState::LiteralStringRawQuoteClose;
                let delimiter = std::mem::take(&mut self.raw_string_delimiter);
                let delim = self.parser.parse_raw_string_literal_delimiter_close(&delimiter);
                if !delim.is_empty() {
                    return Ok(CodeToken::new(delim, SyntaxElement::LiteralStringRawDelimiter));
                }
                self.next_code_token_raw_quote_close()
            }
            ContextState::LiteralStringRawQuoteClose => self.next_code_token_raw_quote_close(),
        }
    }

    fn next_code_token_raw_paren_open(&mut self) -> TokenResult<'a> {
        let paren = self.parser.parse_exactly_char(b'(');
        if !paren.is_empty() {
            self.context_state = ContextState::LiteralStringRawBody;
            return Ok(CodeToken::new(paren, SyntaxElement::LiteralStringRawParen));
        }
        Err(self.make_error(ErrorReason::InternalErrorRawStringLiteralParenOpen))
    }

    fn next_code_token_raw_paren_close(&mut self) -> TokenResult<'a> {
        let paren = self.parser.parse_exactly_char(b')');
        if !paren.is_empty() {
            self.context_state = ContextState::LiteralStringRawDelimiterClose;
            return Ok(CodeToken::new(paren, SyntaxElement::LiteralStringRawParen));
        }
        Err(self.make_error(ErrorReason::InternalErrorRawStringLiteralParenClose))
    }

    fn next_code_token_raw_quote_close(&mut self) -> TokenResult<'a> {
        let quote = self.parser.parse_exactly_char(b'"');
        if !quote.is_empty() {
            // A raw string can carry a user-defined-literal suffix just like a
            // plain quoted string (e.g. `R"(body)"sv`); the closing quote
            // hands off to the same optional-suffix state rather than `None`.
            self.context_state = ContextState::LiteralEndOptionalSuffix;
            return Ok(CodeToken::new(quote, SyntaxElement::LiteralStringRawQuote));
        }
        Err(self.make_error(ErrorReason::InternalErrorRawStringLiteralQuoteClose))
    }

    fn next_code_token_context_none(&mut self) -> TokenResult<'a> {
        if self.parser.has_reached_end() {
            return Ok(CodeToken::new(self.empty_match(), SyntaxElement::EndOfInput));
        }

        let comment_start = self.parser.parse_exactly("///");
        if !comment_start.is_empty() {
            self.context_state = ContextState::CommentSingleDoc;
            return Ok(CodeToken::new(comment_start, SyntaxElement::CommentBeginSingleDoc));
        }

        let comment_start = self.parser.parse_exactly("//");
        if !comment_start.is_empty() {
            self.context_state = ContextState::CommentSingle;
            return Ok(CodeToken::new(comment_start, SyntaxElement::CommentBeginSingle));
        }

        // "/**/" must be matched explicitly; it contains "/**" which would
        // otherwise open a doc comment.
        let comment_start = self.parser.parse_exactly("/**/");
        if !comment_start.is_empty() {
            self.context_state = ContextState::CommentEnd;
            return Ok(CodeToken::new(comment_start, SyntaxElement::CommentBeginMulti));
        }

        let comment_start = self.parser.parse_exactly("/**");
        if !comment_start.is_empty() {
            self.context_state = ContextState::CommentMultiDoc;
            return Ok(CodeToken::new(comment_start, SyntaxElement::CommentBeginMultiDoc));
        }

        let comment_start = self.parser.parse_exactly("/*");
        if !comment_start.is_empty() {
            self.context_state = ContextState::CommentMulti;
            return Ok(CodeToken::new(comment_start, SyntaxElement::CommentBeginMulti));
        }

        let whitespace = self.parser.parse_non_newline_whitespace();
        if !whitespace.is_empty() {
            return Ok(CodeToken::new(whitespace, SyntaxElement::Whitespace));
        }

        let newlines = self.parser.parse_newlines();
        if !newlines.is_empty() {
            self.on_parsed_newline();
            return Ok(CodeToken::new(newlines, SyntaxElement::Whitespace));
        }

        self.next_code_token_preprocessor()
    }

    fn next_code_token_preprocessor(&mut self) -> TokenResult<'a> {
        match self.preprocessor_state {
            PreprocessorState::LineBegin => {
                let hash = self.parser.parse_exactly_char(b'#');
                if !hash.is_empty() {
                    self.preprocessor_state = PreprocessorState::AfterHash;
                    return Ok(CodeToken::new(hash, SyntaxElement::PreprocessorHash));
                }
                self.preprocessor_state = PreprocessorState::NoPreprocessor;
                self.next_code_token_basic(false)
            }
            PreprocessorState::NoPreprocessor => self.next_code_token_basic(false),
            PreprocessorState::AfterHash => {
                let identifier = self.parser.parse_identifier();
                if !identifier.is_empty() {
                    self.preprocessor_state = preprocessor_directive_to_state(identifier.text);
                    return Ok(CodeToken::new(identifier, SyntaxElement::PreprocessorDirective));
                }
                Err(self.make_error(ErrorReason::SyntaxError))
            }
            PreprocessorState::AfterDefine => {
                let identifier = self.parser.parse_identifier();
                if !identifier.is_empty() {
                    self.preprocessor_state = PreprocessorState::AfterDefineIdentifier;
                    return Ok(CodeToken::new(identifier, SyntaxElement::PreprocessorMacro));
                }
                Err(self.make_error(ErrorReason::SyntaxError))
            }
            PreprocessorState::AfterDefineIdentifier => {
                let paren = self.parser.parse_exactly_char(b'(');
                if !paren.is_empty() {
                    self.preprocessor_state = PreprocessorState::AfterDefineIdentifierParenOpen;
                    return Ok(CodeToken::new(paren, SyntaxElement::NothingSpecial));
                }
                self.preprocessor_state = PreprocessorState::MacroBody;
                self.next_code_token_basic(true)
            }
            PreprocessorState::MacroBody => self.next_code_token_basic(true),
            PreprocessorState::AfterDefineIdentifierParenOpen => {
                // Accepts identifiers, ',' and "..." in any order; invalid
                // orderings are not detected, matching the original's stated
                // non-goal of validating macro parameter lists.
                let paren = self.parser.parse_exactly_char(b')');
                if !paren.is_empty() {
                    self.preprocessor_state = PreprocessorState::MacroBody;
                    return Ok(CodeToken::new(paren, SyntaxElement::NothingSpecial));
                }
                let identifier = self.parser.parse_identifier();
                if !identifier.is_empty() {
                    self.macro_params.push(identifier.text.to_string());
                    return Ok(CodeToken::new(identifier, SyntaxElement::PreprocessorMacroParam));
                }
                let comma = self.parser.parse_exactly_char(b',');
                if !comma.is_empty() {
                    return Ok(CodeToken::new(comma, SyntaxElement::NothingSpecial));
                }
                let ellipsis = self.parser.parse_exactly("...");
                if !ellipsis.is_empty() {
                    return Ok(CodeToken::new(ellipsis, SyntaxElement::NothingSpecial));
                }
                Err(self.make_error(ErrorReason::SyntaxError))
            }
            PreprocessorState::AfterIfdefIfndefElifdefElifndefUndef => {
                let identifier = self.parser.parse_identifier();
                if !identifier.is_empty() {
                    return Ok(CodeToken::new(identifier, SyntaxElement::PreprocessorMacro));
                }
                Err(self.make_error(ErrorReason::SyntaxError))
            }
            PreprocessorState::AfterInclude => {
                let quoted = self.parser.parse_quoted(b'<', b'>');
                if !quoted.is_empty() {
                    return Ok(CodeToken::new(quoted, SyntaxElement::PreprocessorHeaderFile));
                }
                let quoted = self.parser.parse_quoted(b'"', b'"');
                if !quoted.is_empty() {
                    return Ok(CodeToken::new(quoted, SyntaxElement::PreprocessorHeaderFile));
                }
                Err(self.make_error(ErrorReason::SyntaxError))
            }
            PreprocessorState::AfterErrorWarning => {
                let text = self.parser.parse_preprocessor_diagnostic_message();
                if !text.is_empty() {
                    return Ok(CodeToken::new(text, SyntaxElement::PreprocessorOther));
                }
                Err(self.make_error(ErrorReason::InternalErrorUnhandledPreprocessorDiagnosticMessage))
            }
            PreprocessorState::AfterLine | PreprocessorState::AfterOther => {
                let quoted = self.parser.parse_quoted(b'"', b'"');
                if !quoted.is_empty() {
                    return Ok(CodeToken::new(quoted, SyntaxElement::LiteralString));
                }
                let digits = self.parser.parse_digits();
                if !digits.is_empty() {
                    return Ok(CodeToken::new(digits, SyntaxElement::LiteralNumber));
                }
                let identifier = self.parser.parse_identifier();
                if !identifier.is_empty() {
                    return Ok(CodeToken::new(identifier, SyntaxElement::PreprocessorOther));
                }
                let symbols = self.parser.parse_symbols();
                if !symbols.is_empty() {
                    return Ok(CodeToken::new(symbols, SyntaxElement::PreprocessorOther));
                }
                Err(self.make_error(ErrorReason::SyntaxError))
            }
        }
    }

    fn next_code_token_context_comment(&mut self, is_multiline: bool, is_doc: bool) -> TokenResult<'a> {
        if is_doc {
            let tag = self.parser.parse_comment_tag_doc();
            if !tag.is_empty() {
                return Ok(CodeToken::new(tag, SyntaxElement::CommentTagDoc));
            }
        }

        let tag = self.parser.parse_comment_tag_todo();
        if !tag.is_empty() {
            return Ok(CodeToken::new(tag, SyntaxElement::CommentTagTodo));
        }

        if is_multiline {
            let body =
                if is_doc { self.parser.parse_comment_multi_doc_body() } else { self.parser.parse_comment_multi_body() };
            if !body.is_empty() {
                return Ok(CodeToken::new(body, SyntaxElement::NothingSpecial));
            }
            let end = self.parser.parse_exactly("*/");
            if !end.is_empty() {
                self.context_state = ContextState::None;
                return Ok(CodeToken::new(end, SyntaxElement::CommentEnd));
            }
            Err(self.make_error(ErrorReason::InternalErrorUnhandledComment))
        } else {
            let body =
                if is_doc { self.parser.parse_comment_single_doc_body() } else { self.parser.parse_comment_single_body() };
            if !body.is_empty() {
                return Ok(CodeToken::new(body, SyntaxElement::NothingSpecial));
            }
            let newlines = self.parser.parse_newlines();
            if !newlines.is_empty() {
                self.context_state = ContextState::None;
                self.on_parsed_newline();
                return Ok(CodeToken::new(newlines, SyntaxElement::CommentEnd));
            }
            // End of file also closes single-line comments, so comment_end
            // is emitted before context-none would produce end_of_input.
            if self.parser.has_reached_end() {
                self.context_state = ContextState::None;
                return Ok(CodeToken::new(self.empty_match(), SyntaxElement::CommentEnd));
            }
            Err(self.make_error(ErrorReason::InternalErrorUnhandledComment))
        }
    }

    fn next_code_token_context_quoted_literal(&mut self, delimiter: u8, allow_suffix: bool) -> TokenResult<'a> {
        let escape = self.parser.parse_escape_sequence();
        if !escape.is_empty() {
            return Ok(CodeToken::new(escape, SyntaxElement::EscapeSequence));
        }

        if self.highlight_printf_formatting {
            let formatting = self.parser.parse_format_sequence_printf();
            if !formatting.is_empty() {
                return Ok(CodeToken::new(formatting, SyntaxElement::FormatSequence));
            }
        }

        let body = self.parser.parse_text_literal_body(delimiter, self.highlight_printf_formatting);
        if !body.is_empty() {
            return Ok(CodeToken::new(body, SyntaxElement::NothingSpecial));
        }

        let delim = self.parser.parse_exactly_char(delimiter);
        if !delim.is_empty() {
            self.context_state = if allow_suffix { ContextState::LiteralEndOptionalSuffix } else { ContextState::None };
            return Ok(CodeToken::new(delim, SyntaxElement::LiteralTextEnd));
        }

        Err(self.make_error(ErrorReason::SyntaxError))
    }

    fn next_code_token_basic(&mut self, inside_macro_body: bool) -> TokenResult<'a> {
        let prefix = self.parser.parse_raw_string_literal_prefix();
        if !prefix.is_empty() {
            self.context_state = ContextState::LiteralStringRawQuoteOpen;
            return Ok(CodeToken::new(prefix, SyntaxElement::LiteralPrefix));
        }

        let prefix = self.parser.parse_text_literal_prefix(b'\'');
        if !prefix.is_empty() {
            return Ok(CodeToken::new(prefix, SyntaxElement::LiteralPrefix));
        }

        let prefix = self.parser.parse_text_literal_prefix(b'"');
        if !prefix.is_empty() {
            return Ok(CodeToken::new(prefix, SyntaxElement::LiteralPrefix));
        }

        let quote = self.parser.parse_exactly_char(b'\'');
        if !quote.is_empty() {
            self.context_state = ContextState::LiteralCharacter;
            return Ok(CodeToken::new(quote, SyntaxElement::LiteralCharBegin));
        }

        let quote = self.parser.parse_exactly_char(b'"');
        if !quote.is_empty() {
            self.context_state = ContextState::LiteralString;
            return Ok(CodeToken::new(quote, SyntaxElement::LiteralStringBegin));
        }

        let literal = self.parser.parse_numeric_literal();
        if !literal.is_empty() {
            self.context_state = ContextState::LiteralEndOptionalSuffix;
            return Ok(CodeToken::new(literal, SyntaxElement::LiteralNumber));
        }

        let identifier = self.parser.parse_identifier();
        if !identifier.is_empty() {
            if is_keyword(identifier.text, &self.keywords) {
                return Ok(CodeToken::new(identifier, SyntaxElement::Keyword));
            }
            if inside_macro_body {
                return if self.is_in_macro_params(identifier.text) {
                    Ok(CodeToken::new(identifier, SyntaxElement::PreprocessorMacroParam))
                } else {
                    Ok(CodeToken::new(identifier, SyntaxElement::PreprocessorMacroBody))
                };
            }
            return Ok(CodeToken::new(identifier, SyntaxElement::IdentifierUnknown));
        }

        let hash = self.parser.parse_exactly_char(b'#');
        if !hash.is_empty() {
            return if inside_macro_body {
                Ok(CodeToken::new(hash, SyntaxElement::PreprocessorHash))
            } else {
                Err(self.make_error(ErrorReason::SyntaxError))
            };
        }

        // One symbol at a time: adjacent operator characters may each carry
        // a different semantic type once reconciled (e.g. template `>>`).
        let symbol = self.parser.parse_symbol();
        if !symbol.is_empty() {
            return if inside_macro_body {
                Ok(CodeToken::new(symbol, SyntaxElement::PreprocessorMacroBody))
            } else {
                Ok(CodeToken::new(symbol, SyntaxElement::Symbol))
            };
        }

        Err(self.make_error(ErrorReason::SyntaxError))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        vec!["int".to_string(), "return".to_string(), "if".to_string()]
    }

    fn collect(code: &str) -> Vec<SyntaxElement> {
        let mut tok = CodeTokenizer::new(code, keywords(), false);
        tok.fill_with_tokens().unwrap().into_iter().map(|t| t.syntax_element).collect()
    }

    #[test]
    fn tokenizes_keyword_and_identifier() {
        let elems = collect("int x;");
        assert_eq!(
            elems,
            vec![
                SyntaxElement::Keyword,
                SyntaxElement::Whitespace,
                SyntaxElement::IdentifierUnknown,
                SyntaxElement::Symbol,
                SyntaxElement::EndOfInput,
            ]
        );
    }

    #[test]
    fn tokenizes_single_line_comment_closed_by_newline() {
        let elems = collect("// hi\nx");
        assert_eq!(elems[0], SyntaxElement::CommentBeginSingle);
        assert!(elems.contains(&SyntaxElement::CommentEnd));
    }

    #[test]
    fn tokenizes_single_line_comment_closed_by_eof() {
        let elems = collect("// hi");
        assert_eq!(*elems.last().unwrap(), SyntaxElement::EndOfInput);
        assert!(elems.contains(&SyntaxElement::CommentEnd));
    }

    #[test]
    fn tokenizes_string_literal_with_escape() {
        let mut tok = CodeTokenizer::new(r#""a\nb""#, keywords(), false);
        let tokens = tok.fill_with_tokens().unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.syntax_element).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxElement::LiteralStringBegin,
                SyntaxElement::NothingSpecial,
                SyntaxElement::EscapeSequence,
                SyntaxElement::NothingSpecial,
                SyntaxElement::LiteralTextEnd,
                SyntaxElement::EndOfInput,
            ]
        );
    }

    #[test]
    fn tokenizes_define_with_macro_param() {
        let elems = collect("#define ADD(x) ((x)+1)\n");
        assert!(elems.contains(&SyntaxElement::PreprocessorHash));
        assert!(elems.contains(&SyntaxElement::PreprocessorMacro));
        assert!(elems.contains(&SyntaxElement::PreprocessorMacroParam));
        assert!(elems.contains(&SyntaxElement::PreprocessorMacroBody));
    }

    #[test]
    fn tokenizes_raw_string_literal() {
        let mut tok = CodeTokenizer::new(r#"R"(body)""#, keywords(), false);
        let tokens = tok.fill_with_tokens().unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.syntax_element).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxElement::LiteralPrefix,
                SyntaxElement::LiteralStringRawQuote,
                SyntaxElement::LiteralStringRawParen,
                SyntaxElement::LiteralString,
                SyntaxElement::LiteralStringRawParen,
                SyntaxElement::LiteralStringRawQuote,
                SyntaxElement::EndOfInput,
            ]
        );
    }

    #[test]
    fn raw_string_literal_picks_up_trailing_suffix() {
        let mut tok = CodeTokenizer::new(r#"R"(body)"sv"#, keywords(), false);
        let tokens = tok.fill_with_tokens().unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.syntax_element).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxElement::LiteralPrefix,
                SyntaxElement::LiteralStringRawQuote,
                SyntaxElement::LiteralStringRawParen,
                SyntaxElement::LiteralString,
                SyntaxElement::LiteralStringRawParen,
                SyntaxElement::LiteralStringRawQuote,
                SyntaxElement::LiteralSuffix,
                SyntaxElement::EndOfInput,
            ]
        );
        assert_eq!(tokens[6].origin.text, "sv");
    }

    #[test]
    fn splice_does_not_change_token_sequence() {
        let plain = collect("int x;");
        let spliced = collect("in\\\nt x;");
        assert_eq!(plain, spliced);
    }
}
