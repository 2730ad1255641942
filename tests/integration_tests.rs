use gcpp_core::api::{parse_definition, DefinitionKind};
use gcpp_core::ast::Declaration;
use miette::Report;

fn parse_ok(kind: DefinitionKind, signature: &str) -> Declaration {
    match parse_definition(kind, signature) {
        Ok(decl) => decl,
        Err(err) => {
            let report = Report::from(err);
            panic!("parse of {signature:?} failed: {report:#}");
        }
    }
}

/// Parsing a rendered declaration must reproduce the same rendering and
/// the same identifier.
fn assert_stable(kind: DefinitionKind, signature: &str) {
    let first = parse_ok(kind, signature);
    let rendered = first.to_string();
    let second = parse_ok(kind, &rendered);
    assert_eq!(second.to_string(), rendered, "rendering must be a fixpoint");
    assert_eq!(
        first.encoded_id().ok(),
        second.encoded_id().ok(),
        "identifier must survive a render/reparse cycle"
    );
}

#[test]
fn test_function_rendering_is_stable() {
    assert_stable(DefinitionKind::Function, "void foo(int)");
    assert_stable(DefinitionKind::Function, "std::size_t size() const");
    assert_stable(DefinitionKind::Function, "virtual ~Widget()");
    assert_stable(DefinitionKind::Function, "explicit Widget(int x = 0)");
    assert_stable(DefinitionKind::Function, "T *data() noexcept");
    assert_stable(
        DefinitionKind::Function,
        "bool operator==(const T &a, const T &b)",
    );
    assert_stable(
        DefinitionKind::Function,
        "virtual void clear() noexcept override = 0",
    );
    assert_stable(DefinitionKind::Function, "int printf(const char*, ...)");
}

#[test]
fn test_member_rendering_is_stable() {
    assert_stable(DefinitionKind::Member, "static const int max_size = 1024");
    assert_stable(DefinitionKind::Member, "mutable std::mutex lock_");
    assert_stable(DefinitionKind::Member, "int values[16]");
}

#[test]
fn test_type_rendering_is_stable() {
    assert_stable(DefinitionKind::Type, "std::vector<int>");
    assert_stable(DefinitionKind::Type, "unsigned long size_type");
    assert_stable(DefinitionKind::Type, "std::map<std::string, int>");
}

#[test]
fn test_class_and_enum_rendering_is_stable() {
    assert_stable(DefinitionKind::Class, "Circle : public Shape");
    assert_stable(DefinitionKind::Enum, "class Color : unsigned int");
    assert_stable(DefinitionKind::Enumerator, "Red = 0xff0000");
    assert_stable(DefinitionKind::Namespace, "outer::inner");
}

#[test]
fn test_function_identifier_encoding() {
    let decl = parse_ok(DefinitionKind::Function, "void foo(int)");
    assert_eq!(decl.encoded_id().unwrap(), "_GCPP3fooi");

    let decl = parse_ok(
        DefinitionKind::Function,
        "void write(const char *data, unsigned long n)",
    );
    assert_eq!(decl.encoded_id().unwrap(), "_GCPP5writePKcm");

    let decl = parse_ok(DefinitionKind::Function, "void swap(T &a, T &b)");
    assert_eq!(decl.encoded_id().unwrap(), "_GCPP4swapR1TR1T");
}

#[test]
fn test_empty_parameter_list_encodes_as_void() {
    let decl = parse_ok(DefinitionKind::Function, "int run()");
    assert_eq!(decl.encoded_id().unwrap(), "_GCPP3runv");
}

#[test]
fn test_variadic_encodes_as_z() {
    let decl = parse_ok(DefinitionKind::Function, "int printf(const char*, ...)");
    assert_eq!(decl.encoded_id().unwrap(), "_GCPP6printfPKcz");
}

#[test]
fn test_std_types_keep_the_st_abbreviation() {
    let decl = parse_ok(DefinitionKind::Type, "std::vector<int>");
    assert_eq!(decl.encoded_id().unwrap(), "St6vectorIiE");
}

#[test]
fn test_constant_template_arguments_are_kept_verbatim() {
    let decl = parse_ok(DefinitionKind::Type, "std::array<int, 4>");
    assert_eq!(decl.to_string(), "std::array<int, 4>");
    assert_eq!(decl.encoded_id().unwrap(), "St5arrayIiX4EE");
}

#[test]
fn test_variable_uses_the_context_encoding() {
    // a long-standing quirk: variables encode as their inner type, without
    // the identifier prefix or the name
    let decl = parse_ok(DefinitionKind::Variable, "static const int x");
    assert_eq!(decl.encoded_id().unwrap(), "Ki");
}

#[test]
fn test_operator_functions() {
    let decl = parse_ok(
        DefinitionKind::Function,
        "T &operator[](std::size_t i)",
    );
    assert_eq!(decl.to_string(), "T &operator[](std::size_t i)");

    let decl = parse_ok(DefinitionKind::Function, "operator bool() const");
    assert_eq!(decl.to_string(), "operator bool() const");

    let decl = parse_ok(DefinitionKind::Function, "void *operator new(std::size_t n)");
    assert_eq!(decl.to_string(), "void *operator new(std::size_t n)");
}

#[test]
fn test_absolute_names_are_preserved() {
    let decl = parse_ok(DefinitionKind::Xref, "::std::string");
    assert_eq!(decl.to_string(), "::std::string");
}

#[test]
fn test_string_literal_default_values() {
    let decl = parse_ok(
        DefinitionKind::Function,
        r#"void greet(const char *name = "world")"#,
    );
    assert_eq!(
        decl.to_string(),
        r#"void greet(const char *name = "world")"#
    );
}
