// Unhappy-path coverage for the signature grammar.

use gcpp_core::api::{parse_definition, DefinitionKind};
use gcpp_core::error::GcppError;

fn parse_err(kind: DefinitionKind, signature: &str) -> gcpp_core::error::GrammarError {
    match parse_definition(kind, signature) {
        Ok(decl) => panic!("expected {signature:?} to fail, got {decl}"),
        Err(GcppError::Grammar(err)) => err,
        Err(other) => panic!("expected a grammar error, got {other}"),
    }
}

#[test]
fn test_trailing_text_is_rejected() {
    let err = parse_err(DefinitionKind::Member, "int x;");
    assert_eq!(err.offset, 5);
    assert!(err.message.contains("expected end of definition"));
}

#[test]
fn test_error_offsets_are_relative_to_the_trimmed_input() {
    let err = parse_err(DefinitionKind::Member, "   int x;   ");
    assert_eq!(err.offset, 5);
}

#[test]
fn test_unterminated_parameter_list() {
    parse_err(DefinitionKind::Function, "void foo(");
    parse_err(DefinitionKind::Function, "void foo(int");
}

#[test]
fn test_unterminated_template_argument_list() {
    parse_err(DefinitionKind::Type, "std::vector<int");
    parse_err(DefinitionKind::Type, "Foo<1");
}

#[test]
fn test_function_requires_a_parameter_clause() {
    parse_err(DefinitionKind::Function, "void foo");
}

#[test]
fn test_type_error_reports_both_attempts() {
    let err = parse_err(DefinitionKind::Type, "std::vector<int");
    assert!(err.message.contains("First attempt"));
    assert!(err.message.contains("Second attempt"));
}

#[test]
fn test_function_error_reports_both_attempts() {
    let err = parse_err(DefinitionKind::Function, "void foo");
    assert!(err.message.contains("First attempt"));
    assert!(err.message.contains("Second attempt"));
}

#[test]
fn test_decltype_is_not_supported() {
    let err = parse_err(DefinitionKind::Member, "decltype(x) y");
    assert!(err.message.contains("decltype"));
}

#[test]
fn test_parameterized_noexcept_is_not_supported() {
    parse_err(DefinitionKind::Function, "void f() noexcept(true)");
}

#[test]
fn test_pure_specifier_must_be_well_formed() {
    parse_err(DefinitionKind::Function, "virtual void f() = 1");
}

#[test]
fn test_unterminated_array_suffix() {
    parse_err(DefinitionKind::Member, "int a[3");
}

#[test]
fn test_enum_underlying_type_must_parse() {
    parse_err(DefinitionKind::Enum, "Color :");
}

#[test]
fn test_class_base_clause_must_name_a_base() {
    parse_err(DefinitionKind::Class, "Foo :");
}

#[test]
fn test_empty_input() {
    parse_err(DefinitionKind::Xref, "");
    parse_err(DefinitionKind::Namespace, "   ");
}

#[test]
fn test_indicated_rendering_points_at_the_offset() {
    let err = parse_err(DefinitionKind::Member, "int x;");
    let rendered = err.indicated();
    assert!(rendered.contains("int x;"));
    assert!(rendered.ends_with("-----^"));
}
