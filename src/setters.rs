//! Setter capability registry.
//!
//! Assignment through the dispatcher consults this table before falling
//! back to plain field semantics. Capabilities are declared per shape at
//! registration time — a type-level behavior, not an instance field — so
//! dispatch stays an explicit table lookup instead of reflective
//! inspection of the target.

// Rc is the implementation of stored setter closures
#![expect(
    clippy::disallowed_types,
    reason = "Rc backs registered setter closures"
)]

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::EvalError;
use crate::object::ObjectValue;
use crate::value::Value;

/// A registered setter: receives the target object and the single
/// assigned value, and performs the store itself (typically after
/// transforming or validating the input).
pub type SetterFn = Rc<dyn Fn(&ObjectValue, Value) -> Result<(), EvalError>>;

/// Registry for declared setter capabilities.
///
/// Keyed by (`shape`, `member`) pairs. Shape names are strings like
/// "Point" or "Counter"; an instance carries its shape name and inherits
/// every capability registered for it.
#[derive(Clone, Default)]
pub struct SetterRegistry {
    setters: FxHashMap<(String, String), SetterFn>,
}

impl SetterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        SetterRegistry {
            setters: FxHashMap::default(),
        }
    }

    /// Register a setter capability for a shape's member.
    pub fn register(
        &mut self,
        shape: impl Into<String>,
        member: impl Into<String>,
        setter: impl Fn(&ObjectValue, Value) -> Result<(), EvalError> + 'static,
    ) {
        self.setters
            .insert((shape.into(), member.into()), Rc::new(setter));
    }

    /// Look up the setter for a shape/member pair.
    ///
    /// Returns None if no capability is declared for this combination.
    pub fn lookup(&self, shape: &str, member: &str) -> Option<SetterFn> {
        self.setters
            .get(&(shape.to_string(), member.to_string()))
            .cloned()
    }

    /// Check if a setter capability is declared for the given shape.
    pub fn has_setter(&self, shape: &str, member: &str) -> bool {
        self.setters
            .contains_key(&(shape.to_string(), member.to_string()))
    }

    /// Merge another registry into this one.
    pub fn merge(&mut self, other: SetterRegistry) {
        self.setters.extend(other.setters);
    }
}

impl std::fmt::Debug for SetterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetterRegistry")
            .field("len", &self.setters.len())
            .finish()
    }
}
