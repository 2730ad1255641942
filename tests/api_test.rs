use gcpp_core::api::{parse_and_register, parse_definition, DefinitionKind};
use gcpp_core::resolver::{CrossReferenceRegistry, ScopeStack};

#[test]
fn test_directive_name_mapping() {
    for (directive, kind) in [
        ("type", DefinitionKind::Type),
        ("member", DefinitionKind::Member),
        ("var", DefinitionKind::Variable),
        ("function", DefinitionKind::Function),
        ("func", DefinitionKind::Function),
        ("class", DefinitionKind::Class),
        ("enum", DefinitionKind::Enum),
        ("enumerator", DefinitionKind::Enumerator),
        ("namespace", DefinitionKind::Namespace),
    ] {
        assert_eq!(DefinitionKind::from_directive(directive), Some(kind));
    }
    assert_eq!(DefinitionKind::from_directive("struct"), None);
}

#[test]
fn test_summary_round_trip() {
    let decl = parse_definition(DefinitionKind::Function, "void foo(int)").unwrap();
    let summary = decl.summary();
    assert_eq!(summary.kind, "function");
    assert_eq!(summary.display, "void foo(int)");
    assert_eq!(summary.identifier.as_deref(), Some("_GCPP3fooi"));
}

#[test]
fn test_json_and_yaml_dumps() {
    let decl = parse_definition(DefinitionKind::Member, "static const int x = 1").unwrap();
    let json = decl.to_json().unwrap();
    assert!(json.contains("\"Member\""));
    let yaml = decl.to_yaml().unwrap();
    assert!(yaml.contains("Member"));
}

#[test]
fn test_document_processing_flow() {
    // the shape of a host processing two documents with a shared registry
    let mut registry = CrossReferenceRegistry::new();
    let mut scopes = ScopeStack::new();

    scopes.set_namespace("gui").unwrap();
    parse_and_register(
        &mut registry,
        DefinitionKind::Class,
        "Widget",
        scopes.current(),
        "widgets.rst",
    )
    .unwrap();

    scopes.push(
        registry
            .resolve("Widget", scopes.current())
            .unwrap()
            .declaration
            .prefixed_name()
            .unwrap()
            .clone(),
    );
    parse_and_register(
        &mut registry,
        DefinitionKind::Function,
        "void draw() const",
        scopes.current(),
        "widgets.rst",
    )
    .unwrap();
    scopes.pop();

    parse_and_register(
        &mut registry,
        DefinitionKind::Function,
        "void repaint()",
        scopes.current(),
        "painting.rst",
    )
    .unwrap();

    assert!(registry.resolve("gui::Widget::draw", None).is_some());
    assert_eq!(
        registry
            .resolve("draw", Some(&gcpp_core::ast::NestedName::from_idents([
                "gui", "Widget"
            ])))
            .unwrap()
            .identifier,
        "_GCPPKN3gui6Widget4drawEv"
    );

    registry.purge("widgets.rst");
    assert!(registry.resolve("gui::Widget", None).is_none());
    assert!(registry.resolve("gui::repaint", None).is_some());
}

#[test]
fn test_register_requires_a_name() {
    use gcpp_core::ast::{
        DeclKind, DeclSpecs, Declaration, Declarator, TrailingTypeSpec, TypeExpr,
    };

    // the grammar always names type objects; an anonymous one can only be
    // built directly
    let anonymous = Declaration::new(DeclKind::Type(TypeExpr {
        specs: DeclSpecs {
            trailing: Some(TrailingTypeSpec::Fundamental("int".into())),
            ..DeclSpecs::default()
        },
        decl: Declarator::default(),
    }));
    let mut registry = CrossReferenceRegistry::new();
    let err = registry.register(anonymous, None, "doc").unwrap_err();
    assert!(matches!(
        err,
        gcpp_core::error::GcppError::Encoding(
            gcpp_core::error::EncodingError::UnnamedDeclaration
        )
    ));
}
