//! Name resolution for constants and functions.
//!
//! The evaluator never touches a symbol table directly: it sees only the
//! [`AttributeResolver`] capability. The concrete implementation is a
//! [`Registry`] of named [`Namespace`]s built once at configuration time;
//! each evaluation call borrows an ordered [`Scope`] over the registry, so
//! two evaluations can search different namespace lists without any shared
//! mutable state.

use crate::value::Value;
use std::collections::HashMap;
use std::fmt;

/// A native function binding. Errors are reported as strings and surfaced
/// by the evaluator as function errors carrying the cause.
pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

/// What a name resolves to.
#[derive(Debug, Clone, Copy)]
pub enum Binding {
    Constant(Value),
    Function(NativeFn),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The name was not found in any namespace in scope.
    UnknownAttribute(String),
    /// A requested namespace is not registered.
    UnknownNamespace(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnknownAttribute(name) => {
                write!(f, "unknown function or constant: {name}")
            }
            ResolveError::UnknownNamespace(name) => write!(f, "unknown namespace: {name}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Maps a possibly-dotted name to its binding.
pub trait AttributeResolver {
    /// Resolve `name`. A single-segment name is searched across the scope's
    /// namespaces in order; a dotted name selects the namespace named by
    /// its first segment and looks up the remainder there.
    fn resolve(&self, name: &str) -> Result<&Binding, ResolveError>;
}

/// A named collection of constant and function bindings.
pub struct Namespace {
    name: String,
    bindings: HashMap<String, Binding>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Namespace {
            name: name.into(),
            bindings: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constant(mut self, name: &str, value: Value) -> Self {
        self.bindings.insert(name.into(), Binding::Constant(value));
        self
    }

    pub fn function(mut self, name: &str, body: NativeFn) -> Self {
        self.bindings.insert(name.into(), Binding::Function(body));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }
}

/// All namespaces known to the process. Built once; evaluations borrow
/// scopes from it.
#[derive(Default)]
pub struct Registry {
    namespaces: Vec<Namespace>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn register(&mut self, namespace: Namespace) {
        self.namespaces.push(namespace);
    }

    /// Borrow an ordered view over the named namespaces. Fails on the first
    /// name with no registered namespace.
    pub fn scope<'a>(&'a self, names: &[&str]) -> Result<Scope<'a>, ResolveError> {
        let mut ordered = Vec::with_capacity(names.len());
        for &name in names {
            let namespace = self
                .namespaces
                .iter()
                .find(|ns| ns.name() == name)
                .ok_or_else(|| ResolveError::UnknownNamespace(name.to_string()))?;
            ordered.push(namespace);
        }
        Ok(Scope {
            namespaces: ordered,
        })
    }
}

/// An ordered, borrowed namespace list for one evaluation call.
pub struct Scope<'a> {
    namespaces: Vec<&'a Namespace>,
}

impl AttributeResolver for Scope<'_> {
    fn resolve(&self, name: &str) -> Result<&Binding, ResolveError> {
        if let Some((head, rest)) = name.split_once('.') {
            // namespaces are flat, so a remainder with another dot in it
            // simply finds nothing
            let namespace = self
                .namespaces
                .iter()
                .find(|ns| ns.name() == head)
                .ok_or_else(|| ResolveError::UnknownAttribute(name.to_string()))?;
            return namespace
                .get(rest)
                .ok_or_else(|| ResolveError::UnknownAttribute(name.to_string()));
        }
        for namespace in &self.namespaces {
            if let Some(binding) = namespace.get(name) {
                return Ok(binding);
            }
        }
        Err(ResolveError::UnknownAttribute(name.to_string()))
    }
}
