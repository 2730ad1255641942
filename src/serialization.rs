use crate::ast::Declaration;
use serde::Serialize;

/// A flat, host-friendly view of a declaration: the category, the
/// normalized display text, and the registry-facing name and identifier
/// when the declaration has them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationSummary {
    pub kind: &'static str,
    pub display: String,
    pub qualified_name: Option<String>,
    pub identifier: Option<String>,
}

impl Declaration {
    #[must_use]
    pub fn summary(&self) -> DeclarationSummary {
        use crate::ast::DeclKind;
        let kind = match &self.kind {
            DeclKind::Type(_) => "type",
            DeclKind::Member(_) => "member",
            DeclKind::Variable(_) => "variable",
            DeclKind::Function(_) => "function",
            DeclKind::Class(_) => "class",
            DeclKind::Enum(_) => "enum",
            DeclKind::Enumerator(_) => "enumerator",
            DeclKind::Namespace(_) => "namespace",
            DeclKind::Xref(_) => "xref",
        };
        DeclarationSummary {
            kind,
            display: self.to_string(),
            qualified_name: self
                .prefixed_name()
                .map(|n| n.to_string())
                .or_else(|| self.name().map(|n| n.to_string())),
            identifier: self.encoded_id().ok(),
        }
    }

    /// Serializes the full declaration tree into a pretty-printed JSON
    /// string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the full declaration tree into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{parse_definition, DefinitionKind};

    #[test]
    fn test_summary_of_a_function() {
        let decl = parse_definition(DefinitionKind::Function, "void foo(int)").unwrap();
        let summary = decl.summary();
        assert_eq!(summary.kind, "function");
        assert_eq!(summary.display, "void foo(int)");
        assert_eq!(summary.qualified_name.as_deref(), Some("foo"));
        assert_eq!(summary.identifier.as_deref(), Some("_GCPP3fooi"));
    }

    #[test]
    fn test_json_dump_contains_the_kind_tag() {
        let decl = parse_definition(DefinitionKind::Class, "Widget").unwrap();
        let json = decl.to_json().unwrap();
        assert!(json.contains("\"Class\""));
    }

    #[test]
    fn test_yaml_dump_is_nonempty() {
        let decl = parse_definition(DefinitionKind::Enumerator, "Red = 1").unwrap();
        let yaml = decl.to_yaml().unwrap();
        assert!(yaml.contains("Red"));
    }
}
