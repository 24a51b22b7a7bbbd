//! Environment chain for lexical scoping in generated code.
//!
//! Generated programs create one node per block, function body, loop
//! iteration body and conditional branch body. Reads walk the parent
//! chain (nearest scope wins); `define` writes are strictly node-local;
//! `assign` mutates the nearest existing binding in place, however far
//! up the chain it lives.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::errors::{undefined_variable, EvalError, EvalResult};
use crate::shared::Shared;
use crate::value::Value;

/// A single scope containing variable bindings.
///
/// The parent link is a non-owning delegation target: dropping a child
/// node never disturbs its ancestors, and the chain is acyclic by
/// construction (children are only ever created from existing nodes).
#[derive(Debug, Default)]
pub struct Scope {
    /// Variable bindings in this scope.
    bindings: FxHashMap<String, Value>,
    /// Parent scope (for lexical delegation).
    parent: Option<ScopeRef>,
}

impl Scope {
    fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    fn assign(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(undefined_variable(name))
    }
}

/// Handle to one node of the environment chain.
///
/// Cloning the handle aliases the same node; generated code passes these
/// around freely when entering and leaving blocks.
#[derive(Clone)]
pub struct ScopeRef(Shared<Scope>);

impl ScopeRef {
    /// Create a root node: the outermost (global) scope.
    pub fn root() -> Self {
        ScopeRef(Shared::new(Scope::default()))
    }

    /// Create a child node whose lookups delegate to `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        ScopeRef(Shared::new(Scope::with_parent(self.clone())))
    }

    /// Create or overwrite a binding local to this node.
    ///
    /// Never reaches into an ancestor: shadowing a name in a child scope
    /// never mutates the same name in a parent scope.
    pub fn define(&self, name: &str, value: Value) {
        self.0.borrow_mut().define(name, value);
    }

    /// Read the nearest-in-chain binding for `name`.
    ///
    /// A miss at the root is a lookup failure, not a default value.
    pub fn lookup(&self, name: &str) -> EvalResult {
        self.0
            .borrow()
            .lookup(name)
            .ok_or_else(|| undefined_variable(name))
    }

    /// Reassign the nearest existing binding for `name`, walking the
    /// chain. The ancestor's binding is mutated in place; no shadowing
    /// local is created.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), EvalError> {
        self.0.borrow_mut().assign(name, value)
    }

    /// Whether two handles refer to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }

    fn borrow(&self) -> std::cell::Ref<'_, Scope> {
        self.0.borrow()
    }

    fn borrow_mut(&self) -> std::cell::RefMut<'_, Scope> {
        self.0.borrow_mut()
    }
}

impl fmt::Debug for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopeRef").field(&self.0).finish()
    }
}
