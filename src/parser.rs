//! Recursive-descent parser for C++ declaration signatures.
//!
//! The grammar is a pragmatic subset of C++ declarations: enough to parse
//! the signature strings a documentation host hands over, not a compiler
//! front end. Each rule advances a [`Cursor`] over the trimmed input and
//! fails with a [`GrammarError`] carrying the offending offset.

use crate::ast::{
    BaseClass, ClassDecl, DeclContext, DeclKind, DeclSpecs, Declaration, Declarator,
    DeclaratorSuffix, EnumDecl, EnumKey, EnumeratorDecl, Initializer, NameElement, NamePart,
    NestedName, Operator, Parameter, ParamsQualifiers, PtrOp, RefQualifier, Storage, TemplateArg,
    TrailingTypeSpec, TypeExpr, TypeExprWithInit, Visibility,
};
use crate::cursor::Cursor;
use crate::error::GrammarError;
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~?[a-zA-Z_][a-zA-Z0-9_]*").unwrap());
static VISIBILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:public|private|protected)\b").unwrap());
static STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^[LuU8]?('[^'\\]*(?:\\.[^'\\]*)*'|"[^"\\]*(?:\\.[^"\\]*)*")"#).unwrap()
});
// order matters: longer operators must come before their prefixes
static OPERATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\[\s*\]|\(\s*\)|\+\+|--|->\*?|,|(?:<<|>>)=?|&&|\|\||[!<>=/*%+|&^~-]=?)")
        .unwrap()
});

/// Fundamental types without signedness or size modifiers.
const SIMPLE_FUNDAMENTAL_TYPES: &[&str] = &[
    "void", "bool", "char", "wchar_t", "char16_t", "char32_t", "int", "float", "double", "auto",
];

const PREFIX_KEYS: &[&str] = &["class", "struct", "union", "typename"];

/// Whether a declarator must, may, or must not carry a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Named {
    No,
    Maybe,
    Yes,
}

/// Which parameter-clause grammar applies: `Type` clauses are optional and
/// carry no trailing qualifiers, `Function` clauses are mandatory and do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamMode {
    Type,
    Function,
}

pub struct DefinitionParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> DefinitionParser<'a> {
    pub fn new(definition: &'a str) -> Self {
        DefinitionParser {
            cursor: Cursor::new(definition.trim()),
        }
    }

    fn fail<T>(&self, message: impl Into<String>) -> Result<T, GrammarError> {
        Err(GrammarError::new(
            message,
            self.cursor.text(),
            self.cursor.pos(),
        ))
    }

    /// Runs a rule speculatively: the cursor is restored on failure so the
    /// caller can try an alternative production.
    fn attempt<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, GrammarError>,
    ) -> Result<T, GrammarError> {
        let pos = self.cursor.pos();
        let res = rule(self);
        if res.is_err() {
            self.cursor.set_pos(pos);
        }
        res
    }

    pub fn assert_end(&mut self) -> Result<(), GrammarError> {
        self.cursor.skip_ws();
        if self.cursor.at_end() {
            Ok(())
        } else {
            self.fail(format!(
                "expected end of definition, got \"{}\"",
                self.cursor.remainder()
            ))
        }
    }

    fn match_visibility(&mut self) -> Option<Visibility> {
        if self.cursor.matches(&VISIBILITY_RE) {
            Visibility::from_keyword(self.cursor.matched_text())
        } else {
            None
        }
    }

    /// operator-token | "new"/"delete" ("[" "]")? | cast-operator-type
    fn parse_operator(&mut self) -> Result<Operator, GrammarError> {
        self.cursor.skip_ws();
        if self.cursor.matches(&OPERATOR_RE) {
            // normalize "[ ]" and "( )" to their compact spelling
            let token: String = self
                .cursor
                .matched_text()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            return Ok(Operator::Builtin(token));
        }

        for op in ["new", "delete"] {
            if !self.cursor.skip_word(op) {
                continue;
            }
            self.cursor.skip_ws();
            let mut token = op.to_string();
            if self.cursor.skip_string("[") {
                self.cursor.skip_ws();
                if !self.cursor.skip_string("]") {
                    return self.fail(format!("expected \"]\" after \"operator {op}[\""));
                }
                token.push_str("[]");
            }
            return Ok(Operator::Builtin(token));
        }

        // neither a token nor new/delete: a cast operator, so eat a type
        let ty = self.parse_type(None, Named::No, false)?;
        Ok(Operator::Cast(Box::new(ty)))
    }

    /// ("::")? identifier-or-operator ("<" template-args ">")? ("::" ...)*
    fn parse_nested_name(&mut self) -> Result<NestedName, GrammarError> {
        let mut parts = Vec::new();

        self.cursor.skip_ws();
        if self.cursor.skip_string("::") {
            parts.push(NamePart::Element(NameElement::global_marker()));
        }
        loop {
            self.cursor.skip_ws();
            if !self.cursor.matches(&IDENTIFIER_RE) {
                return self.fail("expected identifier");
            }
            let identifier = self.cursor.matched_text().to_string();
            if identifier == "operator" {
                let op = self.parse_operator()?;
                parts.push(NamePart::Operator(op));
            } else {
                let mut template_args = None;
                self.cursor.skip_ws();
                if self.cursor.skip_string("<") {
                    let mut args = Vec::new();
                    loop {
                        let arg = match self.attempt(|p| p.parse_type(None, Named::No, true)) {
                            Ok(ty) => TemplateArg::Type(ty),
                            Err(_) => {
                                TemplateArg::Constant(self.parse_constant_template_arg()?)
                            }
                        };
                        args.push(arg);
                        self.cursor.skip_ws();
                        if self.cursor.skip_string(">") {
                            break;
                        } else if self.cursor.skip_string(",") {
                            continue;
                        } else {
                            return self
                                .fail("expected \">\" or \",\" in template argument list");
                        }
                    }
                    template_args = Some(args);
                }
                parts.push(NamePart::Element(NameElement {
                    identifier,
                    template_args,
                }));
            }
            self.cursor.skip_ws();
            if !self.cursor.skip_string("::") {
                break;
            }
        }
        Ok(NestedName::new(parts))
    }

    /// A template argument that did not parse as a type: a string literal,
    /// or a verbatim run up to the next top-level "," or ">". The value is
    /// kept as written, never evaluated.
    fn parse_constant_template_arg(&mut self) -> Result<String, GrammarError> {
        let start = self.cursor.pos();
        self.cursor.skip_ws();
        if self.cursor.matches(&STRING_RE) {
            return Ok(self.cursor.matched_text().to_string());
        }
        while !self.cursor.at_end() {
            match self.cursor.current_char() {
                Some(',') | Some('>') => break,
                _ => self.cursor.advance(),
            }
        }
        if self.cursor.at_end() {
            self.cursor.set_pos(start);
            return self.fail("could not find end of constant template argument");
        }
        Ok(self.cursor.slice(start, self.cursor.pos()).trim().to_string())
    }

    /// fundamental-type | "decltype" (unsupported) | (prefix-key)? nested-name
    fn parse_trailing_type_spec(&mut self) -> Result<TrailingTypeSpec, GrammarError> {
        self.cursor.skip_ws();
        for t in SIMPLE_FUNDAMENTAL_TYPES {
            if self.cursor.skip_word(t) {
                return Ok(TrailingTypeSpec::Fundamental((*t).to_string()));
            }
        }

        // signedness/size modifier combinations
        let mut elements: Vec<&str> = Vec::new();
        self.cursor.skip_ws();
        if self.cursor.skip_word_and_ws("signed") {
            elements.push("signed");
        } else if self.cursor.skip_word_and_ws("unsigned") {
            elements.push("unsigned");
        }
        loop {
            if self.cursor.skip_word_and_ws("short") {
                elements.push("short");
            } else if self.cursor.skip_word_and_ws("long") {
                elements.push("long");
            } else {
                break;
            }
        }
        if self.cursor.skip_word_and_ws("int") {
            elements.push("int");
        } else if self.cursor.skip_word_and_ws("double") {
            elements.push("double");
        }
        if !elements.is_empty() {
            return Ok(TrailingTypeSpec::Fundamental(elements.join(" ")));
        }

        self.cursor.skip_ws();
        if self.cursor.skip_word_and_ws("decltype") {
            return self.fail("\"decltype(.)\" in trailing type specifier not implemented");
        }

        let mut prefix = None;
        self.cursor.skip_ws();
        for key in PREFIX_KEYS {
            if self.cursor.skip_word_and_ws(key) {
                prefix = Some((*key).to_string());
                break;
            }
        }
        let name = self.parse_nested_name()?;
        Ok(TrailingTypeSpec::Named { prefix, name })
    }

    /// "(" parameter ("," parameter)* ")" function-qualifiers?
    ///
    /// In `Type` mode the clause is optional and bare; in `Function` mode it
    /// is required and may carry cv/ref qualifiers, an exception spec,
    /// `override`/`final`, and a pure/defaulted/deleted specifier.
    fn parse_parameters_and_qualifiers(
        &mut self,
        mode: ParamMode,
    ) -> Result<Option<ParamsQualifiers>, GrammarError> {
        self.cursor.skip_ws();
        if !self.cursor.skip_string("(") {
            return match mode {
                ParamMode::Function => self.fail("expecting \"(\" in parameters-and-qualifiers"),
                ParamMode::Type => Ok(None),
            };
        }
        let mut params = Vec::new();
        self.cursor.skip_ws();
        if !self.cursor.skip_string(")") {
            loop {
                self.cursor.skip_ws();
                if self.cursor.skip_string("...") {
                    params.push(Parameter::Ellipsis);
                    self.cursor.skip_ws();
                    if !self.cursor.skip_string(")") {
                        return self
                            .fail("expected \")\" after \"...\" in parameters-and-qualifiers");
                    }
                    break;
                }
                let arg = if mode == ParamMode::Function {
                    self.parse_type_with_init(None, Named::Maybe)?
                } else {
                    TypeExprWithInit {
                        type_expr: self.parse_type(None, Named::No, false)?,
                        init: None,
                    }
                };
                params.push(Parameter::Arg(arg));

                self.cursor.skip_ws();
                if self.cursor.skip_string(",") {
                    continue;
                } else if self.cursor.skip_string(")") {
                    break;
                } else {
                    let got = self
                        .cursor
                        .current_char()
                        .map(String::from)
                        .unwrap_or_else(|| "end of definition".into());
                    return self.fail(format!(
                        "expecting \",\" or \")\" in parameters-and-qualifiers, got \"{got}\""
                    ));
                }
            }
        }

        if mode != ParamMode::Function {
            return Ok(Some(ParamsQualifiers {
                params,
                ..Default::default()
            }));
        }

        self.cursor.skip_ws();
        let mut const_ = self.cursor.skip_word_and_ws("const");
        let volatile = self.cursor.skip_word_and_ws("volatile");
        if !const_ {
            // const and volatile can be permuted
            const_ = self.cursor.skip_word_and_ws("const");
        }

        let mut ref_qual = None;
        if self.cursor.skip_string("&&") {
            ref_qual = Some(RefQualifier::Rvalue);
        }
        if ref_qual.is_none() && self.cursor.skip_string("&") {
            ref_qual = Some(RefQualifier::Lvalue);
        }

        let mut exception_spec = None;
        self.cursor.skip_ws();
        if self.cursor.skip_word("noexcept") {
            exception_spec = Some("noexcept".to_string());
            self.cursor.skip_ws();
            if self.cursor.skip_string("(") {
                return self.fail("parameterized \"noexcept\" not implemented");
            }
        }

        self.cursor.skip_ws();
        let mut override_ = self.cursor.skip_word_and_ws("override");
        let final_ = self.cursor.skip_word_and_ws("final");
        if !override_ {
            // override and final can be permuted
            override_ = self.cursor.skip_word_and_ws("override");
        }

        let mut initializer = None;
        self.cursor.skip_ws();
        if self.cursor.skip_string("=") {
            self.cursor.skip_ws();
            for word in ["0", "delete", "default"] {
                if self.cursor.skip_word_and_ws(word) {
                    initializer = Some(word.to_string());
                    break;
                }
            }
            if initializer.is_none() {
                return self
                    .fail("expected \"0\", \"delete\", or \"default\" in initializer-specifier");
            }
        }

        Ok(Some(ParamsQualifiers {
            params,
            volatile,
            const_,
            ref_qual,
            exception_spec,
            override_,
            final_,
            initializer,
        }))
    }

    /// visibility? (storage | function-specifier | "constexpr" | "volatile"
    /// | "const")* trailing-type-spec?
    ///
    /// Which specifiers are admitted depends on the declaration context;
    /// any permutation of the admitted subset is accepted.
    fn parse_decl_specs(
        &mut self,
        outer: Option<DeclContext>,
        typed: bool,
    ) -> Result<DeclSpecs, GrammarError> {
        let mut specs = DeclSpecs {
            context: outer,
            ..Default::default()
        };

        if outer.is_some() {
            self.cursor.skip_ws();
            if let Some(v) = self.match_visibility() {
                specs.visibility = Some(v);
            }
        }

        loop {
            self.cursor.skip_ws();
            if specs.storage.is_none() {
                if matches!(outer, Some(DeclContext::Member | DeclContext::Function))
                    && self.cursor.skip_word("static")
                {
                    specs.storage = Some(Storage::Static);
                    continue;
                }
                if outer == Some(DeclContext::Member) && self.cursor.skip_word("mutable") {
                    specs.storage = Some(Storage::Mutable);
                    continue;
                }
            }
            if outer == Some(DeclContext::Function) {
                if !specs.inline && self.cursor.skip_word("inline") {
                    specs.inline = true;
                    continue;
                }
                if !specs.virtual_ && self.cursor.skip_word("virtual") {
                    specs.virtual_ = true;
                    continue;
                }
                if !specs.explicit && self.cursor.skip_word("explicit") {
                    specs.explicit = true;
                    continue;
                }
            }
            if !specs.constexpr
                && matches!(outer, Some(DeclContext::Member | DeclContext::Function))
                && self.cursor.skip_word("constexpr")
            {
                specs.constexpr = true;
                continue;
            }
            if typed && !specs.volatile && self.cursor.skip_word("volatile") {
                specs.volatile = true;
                continue;
            }
            if typed && !specs.const_ && self.cursor.skip_word("const") {
                specs.const_ = true;
                continue;
            }
            break;
        }

        if typed {
            specs.trailing = Some(self.parse_trailing_type_spec()?);
        }
        Ok(specs)
    }

    /// ptr-operator* nested-name? array-suffix* parameters-and-qualifiers?
    fn parse_declarator(
        &mut self,
        named: Named,
        param_mode: Option<ParamMode>,
        typed: bool,
    ) -> Result<Declarator, GrammarError> {
        let mut ptr_ops = Vec::new();
        while typed {
            self.cursor.skip_ws();
            if self.cursor.skip_string("*") {
                self.cursor.skip_ws();
                let volatile = self.cursor.skip_word_and_ws("volatile");
                let const_ = self.cursor.skip_word_and_ws("const");
                ptr_ops.push(PtrOp::Pointer { volatile, const_ });
            } else if self.cursor.skip_string("&") {
                ptr_ops.push(PtrOp::Reference);
            } else if self.cursor.skip_string("...") {
                ptr_ops.push(PtrOp::ParamPack);
                break;
            } else {
                break;
            }
        }

        let name = match named {
            Named::Yes => Some(self.parse_nested_name()?),
            Named::Maybe => self.attempt(|p| p.parse_nested_name()).ok(),
            Named::No => None,
        };

        let mut suffix_ops = Vec::new();
        loop {
            self.cursor.skip_ws();
            if typed && self.cursor.skip_string("[") {
                let open_pos = self.cursor.pos() - 1;
                let mut depth = 1usize;
                while !self.cursor.at_end() {
                    match self.cursor.current_char() {
                        Some('[') => depth += 1,
                        Some(']') => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    self.cursor.advance();
                }
                if self.cursor.at_end() {
                    self.cursor.set_pos(open_pos);
                    return self.fail("could not find closing square bracket for array");
                }
                let size = self
                    .cursor
                    .slice(open_pos + 1, self.cursor.pos())
                    .trim()
                    .to_string();
                self.cursor.advance();
                suffix_ops.push(DeclaratorSuffix::Array(size));
                continue;
            }
            if let Some(mode) = param_mode {
                if let Some(pq) = self.parse_parameters_and_qualifiers(mode)? {
                    suffix_ops.push(DeclaratorSuffix::Params(pq));
                }
            }
            break;
        }

        Ok(Declarator {
            ptr_ops,
            name,
            suffix_ops,
        })
    }

    /// "=" followed by a verbatim value. Members take the rest of the input;
    /// function parameter defaults stop at the first top-level "," or ")".
    fn parse_initializer(
        &mut self,
        outer: Option<DeclContext>,
    ) -> Result<Option<Initializer>, GrammarError> {
        self.cursor.skip_ws();
        if !self.cursor.skip_string("=") {
            return Ok(None);
        }
        match outer {
            Some(DeclContext::Member) => {
                let value = self.cursor.read_rest().trim().to_string();
                Ok(Some(Initializer(value)))
            }
            None => {
                let start = self.cursor.pos();
                self.cursor.skip_ws();
                if self.cursor.matches(&STRING_RE) {
                    return Ok(Some(Initializer(self.cursor.matched_text().to_string())));
                }
                let mut depth = 0usize;
                while !self.cursor.at_end() {
                    match self.cursor.current_char() {
                        Some(',') | Some(')') if depth == 0 => break,
                        Some('(') => depth += 1,
                        Some(')') => depth -= 1,
                        _ => {}
                    }
                    self.cursor.advance();
                }
                if self.cursor.at_end() {
                    self.cursor.set_pos(start);
                    return self
                        .fail("could not find end of default value for function parameter");
                }
                let value = self.cursor.slice(start, self.cursor.pos()).trim().to_string();
                Ok(Some(Initializer(value)))
            }
            Some(_) => self.fail("initializer not supported in this declaration context"),
        }
    }

    /// decl-specs declarator
    ///
    /// Type and function declarations are parsed twice: first as a bare
    /// name with no trailing type (a plain typedef target, or a
    /// constructor/destructor/cast operator without a return type), then as
    /// a full typed declaration.
    fn parse_type(
        &mut self,
        outer: Option<DeclContext>,
        named: Named,
        allow_params: bool,
    ) -> Result<TypeExpr, GrammarError> {
        if matches!(outer, Some(DeclContext::Type) | Some(DeclContext::Function)) {
            let mode = if outer == Some(DeclContext::Type) {
                ParamMode::Type
            } else {
                ParamMode::Function
            };
            let untyped = self.attempt(|p| {
                let specs = p.parse_decl_specs(outer, false)?;
                let decl = p.parse_declarator(Named::Yes, Some(mode), false)?;
                p.assert_end()?;
                Ok(TypeExpr { specs, decl })
            });
            let untyped_err = match untyped {
                Ok(ty) => return Ok(ty),
                Err(e) => e,
            };
            let typed = self.attempt(|p| {
                let specs = p.parse_decl_specs(outer, true)?;
                let decl = p.parse_declarator(Named::Yes, Some(mode), true)?;
                Ok(TypeExpr { specs, decl })
            });
            match typed {
                Ok(ty) => Ok(ty),
                Err(typed_err) => {
                    let context = if outer == Some(DeclContext::Type) {
                        "type must be either just a name or a typedef-like declaration"
                    } else {
                        "function must be either a declaration without a return type or a typed declaration"
                    };
                    Err(GrammarError::combined(context, &untyped_err, &typed_err))
                }
            }
        } else {
            let (named, allow_params) = if outer.is_some() {
                (Named::Yes, true)
            } else {
                (named, allow_params)
            };
            let param_mode = allow_params.then_some(ParamMode::Type);
            let specs = self.parse_decl_specs(outer, true)?;
            let decl = self.parse_declarator(named, param_mode, true)?;
            Ok(TypeExpr { specs, decl })
        }
    }

    fn parse_type_with_init(
        &mut self,
        outer: Option<DeclContext>,
        named: Named,
    ) -> Result<TypeExprWithInit, GrammarError> {
        let type_expr = self.parse_type(outer, named, false)?;
        let init = self.parse_initializer(outer)?;
        Ok(TypeExprWithInit { type_expr, init })
    }

    /// visibility? nested-name (":" base-clause)?
    fn parse_class(&mut self) -> Result<ClassDecl, GrammarError> {
        let mut visibility = Visibility::Public;
        self.cursor.skip_ws();
        if let Some(v) = self.match_visibility() {
            visibility = v;
        }
        let name = self.parse_nested_name()?;
        let mut bases = Vec::new();
        self.cursor.skip_ws();
        if self.cursor.skip_string(":") {
            loop {
                self.cursor.skip_ws();
                let base_visibility = self.match_visibility().unwrap_or(Visibility::Private);
                let base_name = self.parse_nested_name()?;
                bases.push(BaseClass {
                    name: base_name,
                    visibility: base_visibility,
                });
                self.cursor.skip_ws();
                if !self.cursor.skip_string(",") {
                    break;
                }
            }
        }
        Ok(ClassDecl {
            name,
            visibility,
            bases,
        })
    }

    /// "enum"? ("class" | "struct")? visibility? nested-name
    /// (":" underlying-type)?
    fn parse_enum(&mut self) -> Result<EnumDecl, GrammarError> {
        self.cursor.skip_ws();
        self.cursor.skip_word_and_ws("enum");
        let mut scoped = None;
        if self.cursor.skip_word_and_ws("class") {
            scoped = Some(EnumKey::Class);
        } else if self.cursor.skip_word_and_ws("struct") {
            scoped = Some(EnumKey::Struct);
        }
        let mut visibility = Visibility::Public;
        if let Some(v) = self.match_visibility() {
            visibility = v;
        }
        self.cursor.skip_ws();
        let name = self.parse_nested_name()?;
        self.cursor.skip_ws();
        let mut underlying = None;
        if self.cursor.skip_string(":") {
            underlying = Some(self.parse_type(None, Named::No, false)?);
        }
        Ok(EnumDecl {
            name,
            visibility,
            scoped,
            underlying,
        })
    }

    /// nested-name ("=" verbatim-value)?
    fn parse_enumerator(&mut self) -> Result<EnumeratorDecl, GrammarError> {
        let name = self.parse_nested_name()?;
        self.cursor.skip_ws();
        let mut init = None;
        if self.cursor.skip_string("=") {
            self.cursor.skip_ws();
            init = Some(Initializer(self.cursor.read_rest().trim().to_string()));
        }
        Ok(EnumeratorDecl { name, init })
    }

    pub fn parse_type_object(&mut self) -> Result<Declaration, GrammarError> {
        let ty = self.parse_type(Some(DeclContext::Type), Named::No, false)?;
        Ok(Declaration::new(DeclKind::Type(ty)))
    }

    pub fn parse_member_object(&mut self) -> Result<Declaration, GrammarError> {
        let t = self.parse_type_with_init(Some(DeclContext::Member), Named::No)?;
        Ok(Declaration::new(DeclKind::Member(t)))
    }

    /// Variables share the member grammar but keep their own identifier
    /// encoding.
    pub fn parse_variable_object(&mut self) -> Result<Declaration, GrammarError> {
        let t = self.parse_type_with_init(Some(DeclContext::Member), Named::No)?;
        Ok(Declaration::new(DeclKind::Variable(t)))
    }

    pub fn parse_function_object(&mut self) -> Result<Declaration, GrammarError> {
        let ty = self.parse_type(Some(DeclContext::Function), Named::No, false)?;
        Ok(Declaration::new(DeclKind::Function(ty)))
    }

    pub fn parse_class_object(&mut self) -> Result<Declaration, GrammarError> {
        let c = self.parse_class()?;
        Ok(Declaration::new(DeclKind::Class(c)))
    }

    pub fn parse_enum_object(&mut self) -> Result<Declaration, GrammarError> {
        let e = self.parse_enum()?;
        Ok(Declaration::new(DeclKind::Enum(e)))
    }

    pub fn parse_enumerator_object(&mut self) -> Result<Declaration, GrammarError> {
        let e = self.parse_enumerator()?;
        Ok(Declaration::new(DeclKind::Enumerator(e)))
    }

    pub fn parse_namespace_object(&mut self) -> Result<Declaration, GrammarError> {
        let name = self.parse_nested_name()?;
        Ok(Declaration::new(DeclKind::Namespace(name)))
    }

    pub fn parse_xref_object(&mut self) -> Result<Declaration, GrammarError> {
        let name = self.parse_nested_name()?;
        Ok(Declaration::new(DeclKind::Xref(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok<'a>(
        input: &'a str,
        rule: impl FnOnce(&mut DefinitionParser<'a>) -> Result<Declaration, GrammarError>,
    ) -> Declaration {
        let mut parser = DefinitionParser::new(input);
        let decl = match rule(&mut parser) {
            Ok(decl) => decl,
            Err(e) => panic!("parse of {input:?} failed:\n{}", e.indicated()),
        };
        parser.assert_end().unwrap();
        decl
    }

    #[test]
    fn test_function_roundtrip() {
        let decl = parse_ok("void foo(int)", DefinitionParser::parse_function_object);
        assert_eq!(decl.to_string(), "void foo(int)");
        assert_eq!(decl.encoded_id().unwrap(), "_GCPP3fooi");
    }

    #[test]
    fn test_function_qualifiers() {
        let decl = parse_ok(
            "virtual void clear() noexcept override = 0",
            DefinitionParser::parse_function_object,
        );
        assert_eq!(
            decl.to_string(),
            "virtual void clear() noexcept override = 0"
        );
    }

    #[test]
    fn test_const_member_function() {
        let decl = parse_ok(
            "std::size_t size() const",
            DefinitionParser::parse_function_object,
        );
        assert_eq!(decl.to_string(), "std::size_t size() const");
        assert_eq!(decl.encoded_id().unwrap(), "_GCPPK4sizev");
    }

    #[test]
    fn test_constructor_without_return_type() {
        let decl = parse_ok(
            "MyClass(const MyClass&)",
            DefinitionParser::parse_function_object,
        );
        assert_eq!(decl.to_string(), "MyClass(const MyClass&)");
    }

    #[test]
    fn test_destructor() {
        let decl = parse_ok("~MyClass()", DefinitionParser::parse_function_object);
        assert_eq!(decl.to_string(), "~MyClass()");
    }

    #[test]
    fn test_cast_operator() {
        let decl = parse_ok("operator bool() const", DefinitionParser::parse_function_object);
        assert_eq!(decl.to_string(), "operator bool() const");
    }

    #[test]
    fn test_subscript_operator_normalizes_whitespace() {
        let decl = parse_ok(
            "int &operator [ ](std::size_t)",
            DefinitionParser::parse_function_object,
        );
        assert_eq!(decl.to_string(), "int &operator[](std::size_t)");
    }

    #[test]
    fn test_bare_type_name() {
        let decl = parse_ok("std::vector<int>", DefinitionParser::parse_type_object);
        assert_eq!(decl.to_string(), "std::vector<int>");
        assert_eq!(decl.encoded_id().unwrap(), "St6vectorIiE");
    }

    #[test]
    fn test_typedef_like_type() {
        let decl = parse_ok("unsigned long size_type", DefinitionParser::parse_type_object);
        assert_eq!(decl.to_string(), "unsigned long size_type");
    }

    #[test]
    fn test_member_with_initializer() {
        let decl = parse_ok(
            "static const int max_size = 1024",
            DefinitionParser::parse_member_object,
        );
        assert_eq!(decl.to_string(), "static const int max_size = 1024");
    }

    #[test]
    fn test_parameter_default_stops_at_comma() {
        let decl = parse_ok(
            "void draw(int x = f(1, 2), int y = 0)",
            DefinitionParser::parse_function_object,
        );
        assert_eq!(decl.to_string(), "void draw(int x = f(1, 2), int y = 0)");
    }

    #[test]
    fn test_variadic_parameters() {
        let decl = parse_ok("int printf(const char*, ...)", DefinitionParser::parse_function_object);
        assert_eq!(decl.to_string(), "int printf(const char*, ...)");
    }

    #[test]
    fn test_constant_template_argument() {
        let decl = parse_ok("std::array<int, 4>", DefinitionParser::parse_type_object);
        assert_eq!(decl.to_string(), "std::array<int, 4>");
        assert_eq!(decl.encoded_id().unwrap(), "St5arrayIiX4EE");
    }

    #[test]
    fn test_class_with_bases() {
        let decl = parse_ok(
            "Circle : public Shape, private Named",
            DefinitionParser::parse_class_object,
        );
        // private is the default base visibility and disappears on rendering
        assert_eq!(decl.to_string(), "Circle : public Shape, Named");
    }

    #[test]
    fn test_scoped_enum_with_underlying_type() {
        let decl = parse_ok(
            "enum class Color : unsigned int",
            DefinitionParser::parse_enum_object,
        );
        assert_eq!(decl.to_string(), "class Color : unsigned int");
    }

    #[test]
    fn test_enum_keyword_is_optional() {
        let decl = parse_ok("Color", DefinitionParser::parse_enum_object);
        assert_eq!(decl.to_string(), "Color");
    }

    #[test]
    fn test_enumerator_with_value() {
        let decl = parse_ok("Red = 0xff0000", DefinitionParser::parse_enumerator_object);
        assert_eq!(decl.to_string(), "Red = 0xff0000");
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let mut parser = DefinitionParser::new("int x;");
        parser.parse_member_object().unwrap();
        let err = parser.assert_end().unwrap_err();
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn test_decltype_is_rejected() {
        let mut parser = DefinitionParser::new("decltype(x) y");
        assert!(parser.parse_member_object().is_err());
    }

    #[test]
    fn test_array_member() {
        let decl = parse_ok("int values[16]", DefinitionParser::parse_member_object);
        assert_eq!(decl.to_string(), "int values[16]");
    }
}
