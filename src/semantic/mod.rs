//! Semantic-token data model and the reconciler that fuses it into the
//! code-token stream.

pub mod reconcile;
pub mod token;

pub use reconcile::{find_matching_tokens, reconcile};
pub use token::{
    apply_semantic_token_modifier, parse_semantic_token_type, ColorVariance, IdentifierInfo, IdentifierModifiers,
    IdentifierType, ScopeModifier, ScopeModifierOpt, SemanticToken, SemanticTokenWire,
};
