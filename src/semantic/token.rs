//! Semantic-token data model: the external, LSP-shaped metadata fused into
//! the code-token stream by the reconciler.
//!
//! Grounded on `examples/original_source/src/ach/clangd/semantic_token.hpp`.

use serde::{Deserialize, Serialize};

use crate::text::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierType {
    Parameter,
    Variable,
    Property,
    EnumMember,
    Function,
    Method,
    Class,
    Interface,
    Enum,
    Type,
    Concept,
    TemplateParameter,
    Namespace,
    DisabledCode,
    Macro,
    Modifier,
    Operator,
    Bracket,
    Label,
    Unknown,
}

/// LSP `semanticTokenTypes` string -> [`IdentifierType`].
/// `comment` maps to `DisabledCode`; `typeParameter` maps to `TemplateParameter`.
pub fn parse_semantic_token_type(name: &str) -> IdentifierType {
    match name {
        "parameter" => IdentifierType::Parameter,
        "variable" => IdentifierType::Variable,
        "property" => IdentifierType::Property,
        "enumMember" => IdentifierType::EnumMember,
        "function" => IdentifierType::Function,
        "method" => IdentifierType::Method,
        "class" => IdentifierType::Class,
        "interface" => IdentifierType::Interface,
        "enum" => IdentifierType::Enum,
        "type" => IdentifierType::Type,
        "concept" => IdentifierType::Concept,
        "typeParameter" => IdentifierType::TemplateParameter,
        "namespace" => IdentifierType::Namespace,
        "comment" => IdentifierType::DisabledCode,
        "macro" => IdentifierType::Macro,
        "modifier" => IdentifierType::Modifier,
        "operator" => IdentifierType::Operator,
        _ => IdentifierType::Unknown,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeModifier {
    None,
    Function,
    Class,
    File,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentifierModifiers {
    pub declaration: bool,
    pub deprecated: bool,
    pub deduced: bool,
    pub readonly: bool,
    pub static_: bool,
    pub abstract_: bool,
    pub virtual_: bool,
    pub dependent_name: bool,
    pub from_std_lib: bool,
    pub is_non_const_ref_parameter: bool,
    pub scope: ScopeModifierOpt,
}

/// `ScopeModifier` wrapped so `IdentifierModifiers` can `#[derive(Default)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeModifierOpt(pub ScopeModifier);

impl Default for ScopeModifierOpt {
    fn default() -> Self {
        ScopeModifierOpt(ScopeModifier::None)
    }
}

/// Maps one LSP modifier name to the field setter it implies, returning
/// `false` for names this crate does not recognize (ignored, per spec).
pub fn apply_semantic_token_modifier(modifiers: &mut IdentifierModifiers, name: &str) -> bool {
    match name {
        "declaration" => modifiers.declaration = true,
        "deprecated" => modifiers.deprecated = true,
        "deduced" => modifiers.deduced = true,
        "readonly" => modifiers.readonly = true,
        "static" => modifiers.static_ = true,
        "abstract" => modifiers.abstract_ = true,
        "virtual" => modifiers.virtual_ = true,
        "dependentName" => modifiers.dependent_name = true,
        "defaultLibrary" => modifiers.from_std_lib = true,
        "usedAsMutableReference" => modifiers.is_non_const_ref_parameter = true,
        "functionScope" => modifiers.scope = ScopeModifierOpt(ScopeModifier::Function),
        "classScope" => modifiers.scope = ScopeModifierOpt(ScopeModifier::Class),
        "fileScope" => modifiers.scope = ScopeModifierOpt(ScopeModifier::File),
        "globalScope" => modifiers.scope = ScopeModifierOpt(ScopeModifier::Global),
        _ => return false,
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierInfo {
    pub type_: IdentifierType,
    pub modifiers: IdentifierModifiers,
}

/// Declared but deliberately unrendered (ground: original source leaves the
/// alternating-shade effect as a `// TODO`); the reconciler still copies it
/// through so a future renderer can use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorVariance {
    pub color_variant: i32,
    pub last_reference: bool,
}

/// One externally supplied semantic token, as fused into the code-token
/// stream by [`crate::semantic::reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticToken {
    pub position: Position,
    pub length: usize,
    pub info: IdentifierInfo,
    pub color_variance: ColorVariance,
}

impl SemanticToken {
    pub fn pos_begin(&self) -> Position {
        self.position
    }

    /// Matches the original's behavior: no multi-line handling, it simply
    /// adds `length` to the column.
    pub fn pos_end(&self) -> Position {
        Position::new(self.position.line, self.position.column + self.length)
    }
}

/// `serde`-deserializable wire shape for a semantic token, as read from the
/// CLI's JSON input (ground: teacher's `serde`-derived token types in
/// `ast/scanner_tokens.rs`/`cst/primitives.rs`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticTokenWire {
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub token_type: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl SemanticTokenWire {
    pub fn into_semantic_token(self) -> SemanticToken {
        let mut modifiers = IdentifierModifiers::default();
        for m in &self.modifiers {
            apply_semantic_token_modifier(&mut modifiers, m);
        }
        if let Some(scope) = &self.scope {
            match scope.as_str() {
                "function" => modifiers.scope = ScopeModifierOpt(ScopeModifier::Function),
                "class" => modifiers.scope = ScopeModifierOpt(ScopeModifier::Class),
                "file" => modifiers.scope = ScopeModifierOpt(ScopeModifier::File),
                "global" => modifiers.scope = ScopeModifierOpt(ScopeModifier::Global),
                _ => {}
            }
        }
        SemanticToken {
            position: Position::new(self.line, self.column),
            length: self.length,
            info: IdentifierInfo { type_: parse_semantic_token_type(&self.token_type), modifiers },
            color_variance: ColorVariance::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_type_maps_to_disabled_code() {
        assert_eq!(parse_semantic_token_type("comment"), IdentifierType::DisabledCode);
    }

    #[test]
    fn type_parameter_maps_to_template_parameter() {
        assert_eq!(parse_semantic_token_type("typeParameter"), IdentifierType::TemplateParameter);
    }

    #[test]
    fn unknown_type_name_maps_to_unknown() {
        assert_eq!(parse_semantic_token_type("frobnicator"), IdentifierType::Unknown);
    }

    #[test]
    fn unrecognized_modifier_is_ignored_not_an_error() {
        let mut m = IdentifierModifiers::default();
        assert!(!apply_semantic_token_modifier(&mut m, "madeUpModifier"));
    }

    #[test]
    fn wire_conversion_round_trips_type_and_modifiers() {
        let wire = SemanticTokenWire {
            line: 1,
            column: 2,
            length: 3,
            token_type: "variable".to_string(),
            modifiers: vec!["static".to_string()],
            scope: Some("file".to_string()),
        };
        let token = wire.into_semantic_token();
        assert_eq!(token.info.type_, IdentifierType::Variable);
        assert!(token.info.modifiers.static_);
        assert_eq!(token.info.modifiers.scope.0, ScopeModifier::File);
    }
}
