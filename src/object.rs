//! Shaped dispatch targets.
//!
//! An object is a mutable field record carrying a shape name. The shape
//! is what links an instance to its behavioral ancestor: setter
//! capabilities are registered per shape, never per instance, so the
//! dispatcher can distinguish "declared setter" from "own field" without
//! reflection.

use std::fmt;

use indexmap::IndexMap;

use crate::shared::Shared;
use crate::value::{Heap, Value};

/// A mutable field record with a shape name.
///
/// Cloning the handle aliases the same fields, matching the reference
/// semantics of the source language's values.
#[derive(Clone, Debug)]
pub struct ObjectValue {
    shape: Heap<String>,
    fields: Shared<IndexMap<String, Value>>,
}

impl ObjectValue {
    /// Create an object of the given shape with no fields.
    pub fn new(shape: impl Into<String>) -> Self {
        ObjectValue {
            shape: Heap::new(shape.into()),
            fields: Shared::new(IndexMap::new()),
        }
    }

    /// The shape name used for setter-capability lookup.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Read a field; `None` when absent.
    pub fn get(&self, member: &str) -> Option<Value> {
        self.fields.borrow().get(member).cloned()
    }

    /// Create or overwrite a field.
    pub fn set(&self, member: &str, value: Value) {
        self.fields.borrow_mut().insert(member.to_string(), value);
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.borrow().keys().cloned().collect()
    }

    /// Field values in insertion order.
    pub fn field_values(&self) -> Vec<Value> {
        self.fields.borrow().values().cloned().collect()
    }

    /// Whether a field with this name exists.
    pub fn has_field(&self, member: &str) -> bool {
        self.fields.borrow().contains_key(member)
    }

    /// Identity comparison: two object values are equal only when they
    /// alias the same fields.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.fields.ptr_eq(&other.fields)
    }
}

impl fmt::Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.shape)?;
        for (i, (key, value)) in self.fields.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: ")?;
            crate::value::fmt_nested(value, f)?;
        }
        write!(f, "}}")
    }
}
