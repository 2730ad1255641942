//! Cross-document symbol registry.
//!
//! Declarations are registered under their scope-qualified display name and
//! resolved back from cross-reference targets. The first registration of a
//! name wins; later declarations with the same name still receive an
//! identifier anchor unless the same origin already anchored that identifier.

use crate::ast::{DeclKind, Declaration, NestedName};
use crate::error::{EncodingError, GcppError, GrammarError};
use crate::parser::DefinitionParser;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// The stack of enclosing scopes a host maintains while walking nested
/// declarations (namespace directives, class bodies, enum bodies).
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<NestedName>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn push(&mut self, name: NestedName) {
        self.frames.push(name);
    }

    pub fn pop(&mut self) -> Option<NestedName> {
        self.frames.pop()
    }

    /// The innermost scope, or `None` at the global scope.
    pub fn current(&self) -> Option<&NestedName> {
        self.frames.last()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Replaces the stack with the named namespace. The sentinels
    /// `nullptr`, `NULL`, and `0` reset to the global scope.
    pub fn set_namespace(&mut self, target: &str) -> Result<(), GrammarError> {
        if matches!(target.trim(), "nullptr" | "NULL" | "0") {
            self.frames.clear();
            return Ok(());
        }
        let mut parser = DefinitionParser::new(target);
        let decl = parser.parse_namespace_object()?;
        parser.assert_end()?;
        if let Some(name) = decl.name() {
            self.frames = vec![name];
        }
        Ok(())
    }
}

/// One registered declaration.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub qualified_name: String,
    pub origin: String,
    pub identifier: String,
    pub declaration: Declaration,
}

/// What a registration did: the computed identifier and qualified name,
/// whether the name was already taken, and whether the anchor was new for
/// the registering origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub identifier: String,
    pub qualified_name: String,
    pub duplicate_name: bool,
    pub new_anchor: bool,
}

/// The registry proper: qualified display name to entry, plus the set of
/// identifier anchors each origin has produced. Anchors are namespaced per
/// origin, so the same identifier may be anchored from several documents;
/// only a repeat within one origin is dropped.
#[derive(Debug, Clone, Default)]
pub struct CrossReferenceRegistry {
    entries: HashMap<String, RegistryEntry>,
    anchors: HashMap<String, HashSet<String>>,
}

impl CrossReferenceRegistry {
    pub fn new() -> Self {
        CrossReferenceRegistry::default()
    }

    /// Registers a declaration under `scope`, on behalf of `origin` (for a
    /// documentation host, the document being processed).
    ///
    /// The declaration is qualified exactly once, then entered under its
    /// qualified name unless that name is already taken. Each origin owns
    /// its own anchor space: re-registering an identifier the same origin
    /// already produced is a no-op, while a colliding identifier from a
    /// different origin still gets its display-name entry. Two extra aliases
    /// may be entered alongside: the enumerator of an unscoped enum is also
    /// visible in the enum's enclosing scope, and a templated leaf is also
    /// reachable with the template arguments stripped.
    pub fn register(
        &mut self,
        mut declaration: Declaration,
        scope: Option<&NestedName>,
        origin: &str,
    ) -> Result<RegisterOutcome, GcppError> {
        declaration.qualify(scope);
        let qualified_name = declaration
            .prefixed_name()
            .map(|n| n.to_string())
            .ok_or(EncodingError::UnnamedDeclaration)?;
        let identifier = declaration.encoded_id()?;

        let new_anchor = self
            .anchors
            .entry(origin.to_string())
            .or_default()
            .insert(identifier.clone());
        if !new_anchor {
            debug!("anchor {identifier} already exists in {origin}, skipping {qualified_name}");
            return Ok(RegisterOutcome {
                duplicate_name: self.entries.contains_key(&qualified_name),
                identifier,
                qualified_name,
                new_anchor: false,
            });
        }

        let duplicate_name = self.entries.contains_key(&qualified_name);
        if duplicate_name {
            warn!("duplicate description of {qualified_name}, keeping the first");
        } else {
            self.insert_entry(qualified_name.clone(), &identifier, &declaration, origin);

            if let Some(injected) = self.unscoped_enumerator_alias(&declaration) {
                if !self.entries.contains_key(&injected) {
                    self.insert_entry(injected, &identifier, &declaration, origin);
                }
            }

            if let Some(prefixed) = declaration.prefixed_name() {
                let stripped = prefixed.name_no_last_template();
                if stripped != qualified_name && !self.entries.contains_key(&stripped) {
                    self.insert_entry(stripped, &identifier, &declaration, origin);
                }
            }
        }

        Ok(RegisterOutcome {
            identifier,
            qualified_name,
            duplicate_name,
            new_anchor: true,
        })
    }

    fn insert_entry(
        &mut self,
        qualified_name: String,
        identifier: &str,
        declaration: &Declaration,
        origin: &str,
    ) {
        debug!("registering {qualified_name} as {identifier}");
        self.entries.insert(
            qualified_name.clone(),
            RegistryEntry {
                qualified_name,
                origin: origin.to_string(),
                identifier: identifier.to_string(),
                declaration: declaration.clone(),
            },
        );
    }

    /// The name under which an unscoped enum's enumerator is also visible:
    /// the enumerator leaf, qualified by the enum's enclosing scope.
    fn unscoped_enumerator_alias(&self, declaration: &Declaration) -> Option<String> {
        if !matches!(declaration.kind, DeclKind::Enumerator(_)) {
            return None;
        }
        let prefixed = declaration.prefixed_name()?;
        let parent = prefixed.parent()?;
        let parent_entry = self.entries.get(&parent.to_string())?;
        match &parent_entry.declaration.kind {
            DeclKind::Enum(e) if e.scoped.is_none() => {
                let enum_name = parent_entry.declaration.prefixed_name()?;
                let enum_scope = NestedName::new(
                    enum_name.parts[..enum_name.parts.len() - 1].to_vec(),
                );
                Some(prefixed.leaf().prefixed_with(&enum_scope).to_string())
            }
            _ => None,
        }
    }

    /// Resolves a cross-reference target, as written in prose, to its
    /// registry entry. Resolution never fails hard: an unparseable target
    /// or a miss is `None`.
    ///
    /// The target is tried verbatim, then with its trailing template
    /// arguments stripped; both are retried qualified by `scope`.
    pub fn resolve(&self, target: &str, scope: Option<&NestedName>) -> Option<&RegistryEntry> {
        let mut parser = DefinitionParser::new(target);
        let name = match parser
            .parse_xref_object()
            .and_then(|decl| parser.assert_end().map(|_| decl))
        {
            Ok(decl) => decl.name()?,
            Err(e) => {
                warn!("unparseable cross-reference target {target:?}: {e}");
                return None;
            }
        };

        if let Some(entry) = self.lookup(&name) {
            return Some(entry);
        }
        if let Some(scope) = scope {
            return self.lookup(&name.prefixed_with(scope));
        }
        None
    }

    fn lookup(&self, name: &NestedName) -> Option<&RegistryEntry> {
        self.entries
            .get(&name.to_string())
            .or_else(|| self.entries.get(&name.name_no_last_template()))
    }

    pub fn get(&self, qualified_name: &str) -> Option<&RegistryEntry> {
        self.entries.get(qualified_name)
    }

    /// Whether any origin has anchored `identifier`.
    pub fn has_anchor(&self, identifier: &str) -> bool {
        self.anchors.values().any(|ids| ids.contains(identifier))
    }

    /// Drops every entry and anchor contributed by `origin`; a no-op when
    /// the origin contributed nothing.
    pub fn purge(&mut self, origin: &str) {
        self.entries.retain(|_, entry| entry.origin != origin);
        self.anchors.remove(origin);
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(signature: &str) -> Declaration {
        DefinitionParser::new(signature)
            .parse_function_object()
            .unwrap()
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = CrossReferenceRegistry::new();
        let outcome = registry
            .register(function("void foo(int)"), None, "doc1")
            .unwrap();
        assert_eq!(outcome.identifier, "_GCPP3fooi");
        assert_eq!(outcome.qualified_name, "foo");
        assert!(outcome.new_anchor);
        assert!(!outcome.duplicate_name);

        let entry = registry.resolve("foo", None).unwrap();
        assert_eq!(entry.identifier, "_GCPP3fooi");
    }

    #[test]
    fn test_scope_qualifies_the_name() {
        let mut registry = CrossReferenceRegistry::new();
        let scope = NestedName::from_idents(["Foo"]);
        let outcome = registry
            .register(function("void bar() const"), Some(&scope), "doc1")
            .unwrap();
        assert_eq!(outcome.qualified_name, "Foo::bar");
        assert_eq!(outcome.identifier, "_GCPPKN3Foo3barEv");

        assert!(registry.resolve("bar", None).is_none());
        assert!(registry.resolve("Foo::bar", None).is_some());
        assert!(registry.resolve("bar", Some(&scope)).is_some());
    }

    #[test]
    fn test_namespace_sentinels_reset_the_scope() {
        let mut stack = ScopeStack::new();
        stack.set_namespace("outer::inner").unwrap();
        assert_eq!(stack.current().unwrap().to_string(), "outer::inner");
        stack.set_namespace("nullptr").unwrap();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_unparseable_target_resolves_to_none() {
        let registry = CrossReferenceRegistry::new();
        assert!(registry.resolve("not a name!", None).is_none());
    }
}
