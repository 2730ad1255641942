//! Convenience entry points tying the parser and registry together.

use crate::ast::{Declaration, NestedName};
use crate::error::GcppError;
use crate::parser::DefinitionParser;
use crate::resolver::{CrossReferenceRegistry, RegisterOutcome};

/// The declaration categories a host can ask the parser for. Each maps to
/// one grammar entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Type,
    Member,
    Variable,
    Function,
    Class,
    Enum,
    Enumerator,
    Namespace,
    Xref,
}

impl DefinitionKind {
    /// Maps a host-side directive name to its category.
    pub fn from_directive(name: &str) -> Option<Self> {
        Some(match name {
            "type" => DefinitionKind::Type,
            "member" => DefinitionKind::Member,
            "var" | "variable" => DefinitionKind::Variable,
            "function" | "func" => DefinitionKind::Function,
            "class" => DefinitionKind::Class,
            "enum" => DefinitionKind::Enum,
            "enumerator" => DefinitionKind::Enumerator,
            "namespace" => DefinitionKind::Namespace,
            _ => return None,
        })
    }
}

/// Parses a complete signature of the given category. The whole input must
/// be consumed; trailing text is an error.
pub fn parse_definition(kind: DefinitionKind, signature: &str) -> Result<Declaration, GcppError> {
    let mut parser = DefinitionParser::new(signature);
    let decl = match kind {
        DefinitionKind::Type => parser.parse_type_object(),
        DefinitionKind::Member => parser.parse_member_object(),
        DefinitionKind::Variable => parser.parse_variable_object(),
        DefinitionKind::Function => parser.parse_function_object(),
        DefinitionKind::Class => parser.parse_class_object(),
        DefinitionKind::Enum => parser.parse_enum_object(),
        DefinitionKind::Enumerator => parser.parse_enumerator_object(),
        DefinitionKind::Namespace => parser.parse_namespace_object(),
        DefinitionKind::Xref => parser.parse_xref_object(),
    }?;
    parser.assert_end()?;
    Ok(decl)
}

/// Parses a signature and registers it in one step.
pub fn parse_and_register(
    registry: &mut CrossReferenceRegistry,
    kind: DefinitionKind,
    signature: &str,
    scope: Option<&NestedName>,
    origin: &str,
) -> Result<RegisterOutcome, GcppError> {
    let decl = parse_definition(kind, signature)?;
    registry.register(decl, scope, origin)
}
