//! C-family code tokenization: syntax tokens, context/preprocessor state,
//! and the tokenizer driving them.

pub mod state;
pub mod tokenizer;
pub mod tokens;

pub use state::{preprocessor_directive_to_state, ContextState, PreprocessorState};
pub use tokenizer::CodeTokenizer;
pub use tokens::{CodeToken, SyntaxElement};

/// Default C/C++ keyword set, used by the CLI when no semantic-token client
/// narrows the list further (ground: clangd itself resolves keywords against
/// the standard language grammar, not a per-project list).
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];
