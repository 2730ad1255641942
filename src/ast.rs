//! The declaration AST: a closed set of node kinds produced by the
//! `DefinitionParser`. Every node renders to normalized text through
//! `Display`; nodes that participate in identifiers expose `encoded_id`,
//! and declaration roots expose the logical name used as registry key.

use crate::error::EncodingError;
use serde::Serialize;
use std::fmt;

/// Prefix of every whole-declaration identifier.
pub const ID_PREFIX: &str = "_GCPP";

/// Identifier codes for the fundamental-type keyword combinations the
/// grammar recognizes. A miss here is an `EncodingError`, never user input.
fn fundamental_id(name: &str) -> Option<&'static str> {
    Some(match name {
        "void" => "v",
        "bool" => "b",
        "char" => "c",
        "signed char" => "a",
        "unsigned char" => "h",
        "wchar_t" => "w",
        "char32_t" => "Di",
        "char16_t" => "Ds",
        "short" | "short int" | "signed short" | "signed short int" => "s",
        "unsigned short" | "unsigned short int" => "t",
        "int" | "signed" | "signed int" => "i",
        "unsigned" | "unsigned int" => "j",
        "long" | "long int" | "signed long" | "signed long int" => "l",
        "unsigned long" | "unsigned long int" => "m",
        "long long" | "long long int" | "signed long long" | "signed long long int" => "x",
        "unsigned long long" | "unsigned long long int" => "y",
        "float" => "f",
        "double" => "d",
        "long double" => "e",
        "auto" => "Da",
        "decltype(auto)" => "Dc",
        "std::nullptr_t" => "Dn",
        _ => return None,
    })
}

/// Identifier codes for the built-in operator tokens. Unary/binary forms of
/// the same token are distinguished by the parameter encoding, not here.
fn operator_id(token: &str) -> Option<&'static str> {
    Some(match token {
        "new" => "nw",
        "new[]" => "na",
        "delete" => "dl",
        "delete[]" => "da",
        "~" => "co",
        "+" => "pl",
        "-" => "mi",
        "*" => "ml",
        "/" => "dv",
        "%" => "rm",
        "&" => "an",
        "|" => "or",
        "^" => "eo",
        "=" => "aS",
        "+=" => "pL",
        "-=" => "mI",
        "*=" => "mL",
        "/=" => "dV",
        "%=" => "rM",
        "&=" => "aN",
        "|=" => "oR",
        "^=" => "eO",
        "<<" => "ls",
        ">>" => "rs",
        "<<=" => "lS",
        ">>=" => "rS",
        "==" => "eq",
        "!=" => "ne",
        "<" => "lt",
        ">" => "gt",
        "<=" => "le",
        ">=" => "ge",
        "!" => "nt",
        "&&" => "aa",
        "||" => "oo",
        "++" => "pp",
        "--" => "mm",
        "," => "cm",
        "->*" => "pm",
        "->" => "pt",
        "()" => "cl",
        "[]" => "ix",
        _ => return None,
    })
}

// === Names ===

/// An operator name: either a fixed operator token, or a cast operator
/// carrying the full target type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operator {
    Builtin(String),
    Cast(Box<TypeExpr>),
}

impl Operator {
    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        match self {
            Operator::Builtin(token) => operator_id(token)
                .map(str::to_string)
                .ok_or_else(|| EncodingError::UnknownOperator(token.clone())),
            Operator::Cast(ty) => Ok(format!("cv{}", ty.encoded_in_context()?)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Builtin(token) => {
                if matches!(token.as_str(), "new" | "new[]" | "delete" | "delete[]") {
                    write!(f, "operator {token}")
                } else {
                    write!(f, "operator{token}")
                }
            }
            Operator::Cast(ty) => write!(f, "operator {ty}"),
        }
    }
}

/// A template argument: a parsed type, or a verbatim constant the grammar
/// could not interpret as a type (expressions are not evaluated).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TemplateArg {
    Type(TypeExpr),
    Constant(String),
}

impl TemplateArg {
    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        match self {
            TemplateArg::Type(ty) => ty.encoded_in_context(),
            TemplateArg::Constant(value) => Ok(format!("X{value}E")),
        }
    }
}

impl fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateArg::Type(ty) => ty.fmt(f),
            TemplateArg::Constant(value) => f.write_str(value),
        }
    }
}

/// One identifier of a nested name, with optional template arguments.
/// The identifier is empty only for the leading element of an
/// absolute (`::`-anchored) name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameElement {
    pub identifier: String,
    pub template_args: Option<Vec<TemplateArg>>,
}

impl NameElement {
    pub fn new(identifier: impl Into<String>) -> Self {
        NameElement {
            identifier: identifier.into(),
            template_args: None,
        }
    }

    pub fn global_marker() -> Self {
        NameElement::new("")
    }

    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        let mut res = String::new();
        if self.identifier == "std" {
            res.push_str("St");
        } else if self.identifier.is_empty() {
            // leading global-scope marker contributes nothing
        } else {
            res.push_str(&self.identifier.chars().count().to_string());
            res.push_str(&self.identifier);
        }
        if let Some(args) = &self.template_args {
            res.push('I');
            for arg in args {
                res.push_str(&arg.encoded_id()?);
            }
            res.push('E');
        }
        Ok(res)
    }
}

impl fmt::Display for NameElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)?;
        if let Some(args) = &self.template_args {
            write!(f, "<")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// A component of a nested name: an ordinary element or an operator leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NamePart {
    Element(NameElement),
    Operator(Operator),
}

impl NamePart {
    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        match self {
            NamePart::Element(e) => e.encoded_id(),
            NamePart::Operator(op) => op.encoded_id(),
        }
    }

    /// The component's text without trailing template arguments.
    pub fn name_no_template(&self) -> String {
        match self {
            NamePart::Element(e) => e.identifier.clone(),
            NamePart::Operator(op) => op.to_string(),
        }
    }

    fn is_std(&self) -> bool {
        matches!(self, NamePart::Element(e) if e.identifier == "std")
    }
}

impl fmt::Display for NamePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePart::Element(e) => e.fmt(f),
            NamePart::Operator(op) => op.fmt(f),
        }
    }
}

/// A possibly-qualified name. `parts[..n-1]` are scope qualifiers, the last
/// part is the leaf. An empty-identifier first element means the name is
/// anchored at the global scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedName {
    pub parts: Vec<NamePart>,
}

impl NestedName {
    pub fn new(parts: Vec<NamePart>) -> Self {
        NestedName { parts }
    }

    pub fn from_idents<I, S>(idents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NestedName {
            parts: idents
                .into_iter()
                .map(|s| NamePart::Element(NameElement::new(s)))
                .collect(),
        }
    }

    /// True when the name starts with an explicit `::`.
    pub fn is_absolute(&self) -> bool {
        matches!(self.parts.first(), Some(NamePart::Element(e)) if e.identifier.is_empty())
    }

    /// Multi-element names wrap in `N`…`E`, except names rooted in `std`,
    /// which keep the bare `St` abbreviation (`std::vector<int>` encodes as
    /// `St6vectorIiE`).
    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        let wrap = self.parts.len() > 1 && !self.parts[0].is_std();
        let mut res = String::new();
        if wrap {
            res.push('N');
        }
        for part in &self.parts {
            res.push_str(&part.encoded_id()?);
        }
        if wrap {
            res.push('E');
        }
        Ok(res)
    }

    /// Display text with the leaf's template arguments stripped; used for
    /// the uninstantiated-template registry fallback.
    pub fn name_no_last_template(&self) -> String {
        let mut res = String::new();
        for part in &self.parts[..self.parts.len().saturating_sub(1)] {
            res.push_str(&part.to_string());
            res.push_str("::");
        }
        if let Some(last) = self.parts.last() {
            res.push_str(&last.name_no_template());
        }
        res
    }

    /// Prepends `prefix`; a no-op for names already anchored at the global
    /// scope.
    pub fn prefixed_with(&self, prefix: &NestedName) -> NestedName {
        if self.is_absolute() {
            return self.clone();
        }
        let mut parts = prefix.parts.clone();
        parts.extend(self.parts.iter().cloned());
        NestedName { parts }
    }

    /// The enclosing qualified name (all but the leaf); `None` for
    /// single-part names.
    pub fn parent(&self) -> Option<NestedName> {
        if self.parts.len() < 2 {
            return None;
        }
        Some(NestedName {
            parts: self.parts[..self.parts.len() - 1].to_vec(),
        })
    }

    /// Just the leaf component.
    pub fn leaf(&self) -> NestedName {
        NestedName {
            parts: self.parts.last().cloned().into_iter().collect(),
        }
    }
}

impl fmt::Display for NestedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, "::")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

// === Type specifiers ===

/// The trailing type specifier of a declaration: a fundamental-type keyword
/// combination, or a (possibly `class`/`struct`/`union`/`typename`-prefixed)
/// nested name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TrailingTypeSpec {
    Fundamental(String),
    Named {
        prefix: Option<String>,
        name: NestedName,
    },
}

impl TrailingTypeSpec {
    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        match self {
            TrailingTypeSpec::Fundamental(name) => fundamental_id(name)
                .map(str::to_string)
                .ok_or_else(|| EncodingError::UnknownFundamentalType(name.clone())),
            TrailingTypeSpec::Named { name, .. } => name.encoded_id(),
        }
    }

    pub fn name(&self) -> Option<&NestedName> {
        match self {
            TrailingTypeSpec::Fundamental(_) => None,
            TrailingTypeSpec::Named { name, .. } => Some(name),
        }
    }
}

impl fmt::Display for TrailingTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailingTypeSpec::Fundamental(name) => f.write_str(name),
            TrailingTypeSpec::Named { prefix, name } => {
                if let Some(prefix) = prefix {
                    write!(f, "{prefix} ")?;
                }
                write!(f, "{name}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "protected" => Some(Visibility::Protected),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Storage {
    Static,
    Mutable,
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Storage::Static => "static",
            Storage::Mutable => "mutable",
        })
    }
}

/// The declaration category whose grammar rules produced a type expression;
/// controls which decl-specs are admitted and how visibility prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeclContext {
    Type,
    Member,
    Function,
}

/// Storage/visibility/function-specifier flags plus the trailing type
/// specifier. `trailing` is `None` only for declarations parsed without a
/// return type (constructors, destructors, cast operators).
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DeclSpecs {
    pub context: Option<DeclContext>,
    pub visibility: Option<Visibility>,
    pub storage: Option<Storage>,
    pub inline: bool,
    pub virtual_: bool,
    pub explicit: bool,
    pub constexpr: bool,
    pub volatile: bool,
    pub const_: bool,
    pub trailing: Option<TrailingTypeSpec>,
}

impl DeclSpecs {
    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        let mut res = String::new();
        if self.volatile {
            res.push('V');
        }
        if self.const_ {
            res.push('K');
        }
        if let Some(trailing) = &self.trailing {
            res.push_str(&trailing.encoded_id()?);
        }
        Ok(res)
    }

    pub fn name(&self) -> Option<&NestedName> {
        self.trailing.as_ref().and_then(TrailingTypeSpec::name)
    }

    /// `public` is the default in declaration contexts and is not printed.
    fn print_visibility(&self) -> bool {
        match self.visibility {
            None => false,
            Some(v) => !(self.context.is_some() && v == Visibility::Public),
        }
    }
}

impl fmt::Display for DeclSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<String> = Vec::new();
        if self.print_visibility() {
            if let Some(v) = self.visibility {
                words.push(v.to_string());
            }
        }
        if let Some(storage) = self.storage {
            words.push(storage.to_string());
        }
        if self.inline {
            words.push("inline".into());
        }
        if self.virtual_ {
            words.push("virtual".into());
        }
        if self.explicit {
            words.push("explicit".into());
        }
        if self.constexpr {
            words.push("constexpr".into());
        }
        if self.volatile {
            words.push("volatile".into());
        }
        if self.const_ {
            words.push("const".into());
        }
        if let Some(trailing) = &self.trailing {
            words.push(trailing.to_string());
        }
        f.write_str(&words.join(" "))
    }
}

// === Declarators ===

/// A pointer/reference operator preceding the declared name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PtrOp {
    Pointer { volatile: bool, const_: bool },
    Reference,
    /// A trailing `...`; terminates the pointer-op chain.
    ParamPack,
}

impl PtrOp {
    pub fn encoded_id(&self) -> String {
        match self {
            PtrOp::Pointer { volatile, const_ } => {
                let mut res = String::from("P");
                if *volatile {
                    res.push('V');
                }
                if *const_ {
                    res.push('C');
                }
                res
            }
            PtrOp::Reference => "R".into(),
            PtrOp::ParamPack => "Dp".into(),
        }
    }
}

impl fmt::Display for PtrOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PtrOp::Pointer { volatile, const_ } => {
                write!(f, "*")?;
                if *volatile {
                    write!(f, "volatile ")?;
                }
                if *const_ {
                    write!(f, "const ")?;
                }
                Ok(())
            }
            PtrOp::Reference => write!(f, "&"),
            PtrOp::ParamPack => write!(f, "..."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefQualifier {
    Lvalue,
    Rvalue,
}

impl fmt::Display for RefQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefQualifier::Lvalue => "&",
            RefQualifier::Rvalue => "&&",
        })
    }
}

/// A function parameter: a type with optional name and default, or the
/// trailing ellipsis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Parameter {
    Ellipsis,
    Arg(TypeExprWithInit),
}

impl Parameter {
    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        match self {
            Parameter::Ellipsis => Ok("z".into()),
            Parameter::Arg(arg) => arg.type_expr.encoded_in_context(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Ellipsis => write!(f, "..."),
            Parameter::Arg(arg) => arg.fmt(f),
        }
    }
}

/// The parenthesized parameter clause with its trailing qualifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ParamsQualifiers {
    pub params: Vec<Parameter>,
    pub volatile: bool,
    pub const_: bool,
    pub ref_qual: Option<RefQualifier>,
    pub exception_spec: Option<String>,
    pub override_: bool,
    pub final_: bool,
    /// `0`, `default`, or `delete`.
    pub initializer: Option<String>,
}

impl ParamsQualifiers {
    /// Function cv/ref qualifier code: `V`, `K`, then `R`/`O`.
    pub fn modifiers_id(&self) -> String {
        let mut res = String::new();
        if self.volatile {
            res.push('V');
        }
        if self.const_ {
            res.push('K');
        }
        match self.ref_qual {
            Some(RefQualifier::Rvalue) => res.push('O'),
            Some(RefQualifier::Lvalue) => res.push('R'),
            None => {}
        }
        res
    }

    /// Parameter code; an empty list encodes as `v`.
    pub fn param_id(&self) -> Result<String, EncodingError> {
        if self.params.is_empty() {
            return Ok("v".into());
        }
        let mut res = String::new();
        for param in &self.params {
            res.push_str(&param.encoded_id()?);
        }
        Ok(res)
    }
}

impl fmt::Display for ParamsQualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")?;
        if self.volatile {
            write!(f, " volatile")?;
        }
        if self.const_ {
            write!(f, " const")?;
        }
        if let Some(ref_qual) = self.ref_qual {
            write!(f, " {ref_qual}")?;
        }
        if let Some(spec) = &self.exception_spec {
            write!(f, " {spec}")?;
        }
        if self.final_ {
            write!(f, " final")?;
        }
        if self.override_ {
            write!(f, " override")?;
        }
        if let Some(init) = &self.initializer {
            write!(f, " = {init}")?;
        }
        Ok(())
    }
}

/// A declarator suffix: a verbatim array size or a parameter clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclaratorSuffix {
    Array(String),
    Params(ParamsQualifiers),
}

impl fmt::Display for DeclaratorSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaratorSuffix::Array(size) => write!(f, "[{size}]"),
            DeclaratorSuffix::Params(pq) => pq.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Declarator {
    pub ptr_ops: Vec<PtrOp>,
    pub name: Option<NestedName>,
    pub suffix_ops: Vec<DeclaratorSuffix>,
}

impl Declarator {
    pub fn params(&self) -> Option<&ParamsQualifiers> {
        self.suffix_ops.iter().find_map(|op| match op {
            DeclaratorSuffix::Params(pq) => Some(pq),
            _ => None,
        })
    }

    /// Function cv/ref qualifier code; empty when there is no parameter
    /// clause.
    pub fn modifiers_id(&self) -> String {
        self.params().map(ParamsQualifiers::modifiers_id).unwrap_or_default()
    }

    /// Parameter code; empty (not `v`) when there is no parameter clause.
    pub fn param_id(&self) -> Result<String, EncodingError> {
        match self.params() {
            Some(pq) => pq.param_id(),
            None => Ok(String::new()),
        }
    }

    /// Codes of the pointer ops and array suffixes, in source order.
    pub fn ptr_suffix_id(&self) -> String {
        let mut res = String::new();
        for op in &self.ptr_ops {
            res.push_str(&op.encoded_id());
        }
        for op in &self.suffix_ops {
            if let DeclaratorSuffix::Array(size) = op {
                res.push_str(&format!("A{size}_"));
            }
        }
        res
    }

    fn require_start_space(&self) -> bool {
        if matches!(self.ptr_ops.last(), Some(PtrOp::ParamPack)) {
            return false;
        }
        self.name.is_some()
    }
}

impl fmt::Display for Declarator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ptr_ops {
            write!(f, "{op}")?;
            if matches!(op, PtrOp::ParamPack) && self.name.is_some() {
                write!(f, " ")?;
            }
        }
        if let Some(name) = &self.name {
            write!(f, "{name}")?;
        }
        for op in &self.suffix_ops {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// A verbatim initializer (member default, enumerator value).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Initializer(pub String);

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " = {}", self.0)
    }
}

// === Type expressions ===

/// Decl-specs plus a declarator: the shape shared by type aliases, members,
/// function signatures, and parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeExpr {
    pub specs: DeclSpecs,
    pub decl: Declarator,
}

impl TypeExpr {
    /// The declared name, falling back to the trailing type specifier's name
    /// when the declarator is anonymous.
    pub fn name(&self) -> Option<NestedName> {
        self.decl
            .name
            .clone()
            .or_else(|| self.specs.name().cloned())
    }

    /// Encoding for a type appearing in context (parameter, template
    /// argument) rather than as a standalone declaration: pointer/array
    /// codes, then the base type, then any parameter codes. No name, no
    /// prefix.
    pub fn encoded_in_context(&self) -> Result<String, EncodingError> {
        let mut res = self.decl.ptr_suffix_id();
        if self.specs.trailing.is_some() {
            res.push_str(&self.specs.encoded_id()?);
        } else if let Some(name) = &self.decl.name {
            res.push_str(&name.encoded_id()?);
        }
        res.push_str(&self.decl.param_id()?);
        Ok(res)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let specs = self.specs.to_string();
        f.write_str(&specs)?;
        if self.decl.require_start_space() && !specs.is_empty() {
            write!(f, " ")?;
        }
        self.decl.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeExprWithInit {
    pub type_expr: TypeExpr,
    pub init: Option<Initializer>,
}

impl fmt::Display for TypeExprWithInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.type_expr.fmt(f)?;
        if let Some(init) = &self.init {
            init.fmt(f)?;
        }
        Ok(())
    }
}

// === Classes, enums, enumerators ===

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseClass {
    pub name: NestedName,
    pub visibility: Visibility,
}

impl fmt::Display for BaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // private is the default base visibility and is not printed
        if self.visibility != Visibility::Private {
            write!(f, "{} ", self.visibility)?;
        }
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDecl {
    pub name: NestedName,
    pub visibility: Visibility,
    pub bases: Vec<BaseClass>,
}

impl fmt::Display for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visibility != Visibility::Public {
            write!(f, "{} ", self.visibility)?;
        }
        write!(f, "{}", self.name)?;
        if !self.bases.is_empty() {
            write!(f, " : ")?;
            for (i, base) in self.bases.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{base}")?;
            }
        }
        Ok(())
    }
}

/// The `class`/`struct` key of a scoped enum. Its absence makes the enum
/// unscoped, which lets enumerators inject into the enclosing scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnumKey {
    Class,
    Struct,
}

impl fmt::Display for EnumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnumKey::Class => "class",
            EnumKey::Struct => "struct",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDecl {
    pub name: NestedName,
    pub visibility: Visibility,
    pub scoped: Option<EnumKey>,
    pub underlying: Option<TypeExpr>,
}

impl fmt::Display for EnumDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = self.scoped {
            write!(f, "{key} ")?;
        }
        if self.visibility != Visibility::Public {
            write!(f, "{} ", self.visibility)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(underlying) = &self.underlying {
            write!(f, " : {underlying}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumeratorDecl {
    pub name: NestedName,
    pub init: Option<Initializer>,
}

impl fmt::Display for EnumeratorDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(init) = &self.init {
            init.fmt(f)?;
        }
        Ok(())
    }
}

// === Declarations ===

/// The category-tagged payload of a parsed declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclKind {
    Type(TypeExpr),
    Member(TypeExprWithInit),
    Variable(TypeExprWithInit),
    Function(TypeExpr),
    Class(ClassDecl),
    Enum(EnumDecl),
    Enumerator(EnumeratorDecl),
    Namespace(NestedName),
    Xref(NestedName),
}

/// A parsed declaration. Immutable after construction except for the single
/// deferred `qualify` that stamps the scope-prefixed name once; the registry
/// key never changes after registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub kind: DeclKind,
    prefixed_name: Option<NestedName>,
}

impl Declaration {
    pub fn new(kind: DeclKind) -> Self {
        Declaration {
            kind,
            prefixed_name: None,
        }
    }

    /// The logical name used for registry keys. `None` for declarations that
    /// introduce no name (e.g. a bare fundamental type).
    pub fn name(&self) -> Option<NestedName> {
        match &self.kind {
            DeclKind::Type(ty) | DeclKind::Function(ty) => ty.name(),
            DeclKind::Member(t) | DeclKind::Variable(t) => t.type_expr.name(),
            DeclKind::Class(c) => Some(c.name.clone()),
            DeclKind::Enum(e) => Some(e.name.clone()),
            DeclKind::Enumerator(e) => Some(e.name.clone()),
            DeclKind::Namespace(n) | DeclKind::Xref(n) => Some(n.clone()),
        }
    }

    /// Stamps the scope-prefixed name. Only the first call has an effect;
    /// the registry key is immutable post-registration.
    pub fn qualify(&mut self, scope: Option<&NestedName>) {
        if self.prefixed_name.is_some() {
            return;
        }
        if let Some(name) = self.name() {
            self.prefixed_name = Some(match scope {
                Some(scope) => name.prefixed_with(scope),
                None => name,
            });
        }
    }

    pub fn prefixed_name(&self) -> Option<&NestedName> {
        self.prefixed_name.as_ref()
    }

    fn registry_name(&self) -> Result<NestedName, EncodingError> {
        self.prefixed_name
            .clone()
            .or_else(|| self.name())
            .ok_or(EncodingError::UnnamedDeclaration)
    }

    /// The compact, globally unique identifier for this declaration.
    pub fn encoded_id(&self) -> Result<String, EncodingError> {
        match &self.kind {
            DeclKind::Function(ty) => Ok(format!(
                "{ID_PREFIX}{}{}{}",
                ty.decl.modifiers_id(),
                self.registry_name()?.encoded_id()?,
                ty.decl.param_id()?
            )),
            DeclKind::Type(ty) => match &self.prefixed_name {
                Some(name) => Ok(format!("{ID_PREFIX}{}", name.encoded_id()?)),
                // not registered anywhere: encode as a type in context
                None => ty.encoded_in_context(),
            },
            DeclKind::Member(_) | DeclKind::Class(_) | DeclKind::Enum(_)
            | DeclKind::Enumerator(_) => {
                Ok(format!("{ID_PREFIX}{}", self.registry_name()?.encoded_id()?))
            }
            // variables fall through to the in-context encoding of their
            // inner type expression; downstream anchors depend on this
            DeclKind::Variable(t) => t.type_expr.encoded_in_context(),
            DeclKind::Namespace(n) | DeclKind::Xref(n) => n.encoded_id(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DeclKind::Type(ty) | DeclKind::Function(ty) => ty.fmt(f),
            DeclKind::Member(t) | DeclKind::Variable(t) => t.fmt(f),
            DeclKind::Class(c) => c.fmt(f),
            DeclKind::Enum(e) => e.fmt(f),
            DeclKind::Enumerator(e) => e.fmt(f),
            DeclKind::Namespace(n) | DeclKind::Xref(n) => n.fmt(f),
        }
    }
}
