//! Runtime values for generated Indent programs.
//!
//! # Allocation Discipline
//!
//! Heap allocations go through factory methods on `Value`. The `Heap<T>`
//! wrapper has a crate-private constructor, so external code cannot create
//! heap values directly:
//!
//! ```text
//! let s = Value::string("hello");   // OK
//! let l = Value::list(vec![]);      // OK
//! ```
//!
//! # Reference vs. Value Semantics
//!
//! Strings and lists are immutable and Arc-backed (`Heap<T>`): cloning is
//! cheap and aliasing is unobservable. Maps, objects and cells are mutable
//! with reference semantics (`Shared<T>`): cloning a `Value` aliases the
//! same underlying state, which is what dispatch-based mutation relies on.

// Rc/Arc are the implementation details of FunctionValue and Heap<T>
#![expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of Heap<T>; Rc backs native closures"
)]

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::cell::CellValue;
use crate::errors::{type_mismatch, EvalError, EvalResult};
use crate::object::ObjectValue;
use crate::shared::Shared;

/// An immutable heap-allocated value wrapper.
///
/// The `new` constructor is crate-private; external code must use `Value`'s
/// factory methods. `#[repr(transparent)]` keeps the layout identical to
/// `Arc<T>`.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + Eq> Eq for Heap<T> {}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Native function signature: receiver plus positional arguments.
///
/// The receiver is the dispatch target the member was read from; free
/// functions ignore it.
pub type NativeFn = Rc<dyn Fn(&Value, &[Value]) -> EvalResult>;

/// A named native closure, invokable through the dispatcher.
#[derive(Clone)]
pub struct FunctionValue {
    name: Heap<String>,
    func: NativeFn,
}

impl FunctionValue {
    /// Create a function value from a name and a closure.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&Value, &[Value]) -> EvalResult + 'static,
    ) -> Self {
        FunctionValue {
            name: Heap::new(name.into()),
            func: Rc::new(func),
        }
    }

    /// The function's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with `receiver` bound as the dispatch target.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> EvalResult {
        (self.func)(receiver, args)
    }

    /// Identity comparison: two function values are the same function
    /// only if they share the same closure allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &*self.name)
            .finish_non_exhaustive()
    }
}

/// Runtime value in the Indent runtime.
#[derive(Clone, Debug)]
pub enum Value {
    /// The absence-of-value marker, distinct from every user value.
    /// Returned for never-set cells, missing members, and zip padding.
    Absent,
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// String value (immutable).
    Str(Heap<String>),
    /// Sequence of values (immutable).
    List(Heap<Vec<Value>>),
    /// Insertion-ordered string-keyed map (mutable, reference semantics).
    Map(Shared<IndexMap<String, Value>>),
    /// Shaped field record (mutable, reference semantics); the shape
    /// selects setter capabilities at dispatch time.
    Object(ObjectValue),
    /// Named native closure.
    Function(FunctionValue),
    /// Single-slot mutable reference box.
    Cell(CellValue),
}

// Factory Methods

impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a float value.
    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a map value from existing entries.
    #[inline]
    pub fn map(entries: IndexMap<String, Value>) -> Self {
        Value::Map(Shared::new(entries))
    }

    /// Create an empty map value.
    #[inline]
    pub fn empty_map() -> Self {
        Value::Map(Shared::new(IndexMap::new()))
    }

    /// Create a shaped object value with no fields.
    #[inline]
    pub fn object(shape: impl Into<String>) -> Self {
        Value::Object(ObjectValue::new(shape))
    }

    /// Create a named native function value.
    #[inline]
    pub fn function(
        name: impl Into<String>,
        func: impl Fn(&Value, &[Value]) -> EvalResult + 'static,
    ) -> Self {
        Value::Function(FunctionValue::new(name, func))
    }

    /// Create an empty mutable cell.
    #[inline]
    pub fn cell() -> Self {
        Value::Cell(CellValue::new())
    }
}

// Value Methods

impl Value {
    /// Check if this value is truthy.
    ///
    /// `absent`, `false`, `0`, `0.0`, NaN and `""` are falsy; everything
    /// else, including empty lists and maps, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => x.partial_cmp(&0.0) != Some(Ordering::Equal) && !x.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Whether the dispatcher may invoke this value.
    pub fn is_invokable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Cell(_))
    }

    /// Try to convert to an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to a float (integers widen).
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "integers beyond 2^53 round to the nearest float"
                )]
                let widened = *n as f64;
                Some(widened)
            }
            _ => None,
        }
    }

    /// Try to convert to a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Function(_) => "fn",
            Value::Cell(_) => "cell",
        }
    }

    /// Total-order comparison used by `asc`.
    ///
    /// Defined for numbers (int/float mix) and string pairs. Every other
    /// pairing is a type error, not `false`.
    pub fn compare(&self, other: &Value) -> Result<Ordering, EvalError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Ok(a.as_str().cmp(b.as_str())),
            _ => match (self.as_float(), other.as_float()) {
                (Some(a), Some(b)) => a
                    .partial_cmp(&b)
                    .ok_or_else(|| EvalError::new("cannot order nan")),
                _ => Err(type_mismatch(
                    "two numbers or two strings",
                    &format!("{} and {}", self.type_name(), other.type_name()),
                )),
            },
        }
    }
}

/// Strict equality for runtime values.
///
/// Scalars, strings, lists and maps compare structurally (with int/float
/// numeric cross-equality). Objects, functions and cells compare by
/// identity: two handles are equal only when they alias the same state.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            // Use partial_cmp for IEEE 754 compliant comparisons
            // (NaN != NaN, -0.0 == 0.0)
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b) == Some(Ordering::Equal),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                match (self.as_float(), other.as_float()) {
                    (Some(a), Some(b)) => a.partial_cmp(&b) == Some(Ordering::Equal),
                    _ => false,
                }
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Cell(a), Value::Cell(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// Rendering

/// Render a value nested inside a container: strings are quoted so that
/// `["a", "b"]` is distinguishable from `["a, b"]`.
pub(crate) fn fmt_nested(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Str(s) => write!(f, "\"{s}\""),
        other => write!(f, "{other}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "absent"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt_nested(item, f)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: ")?;
                    fmt_nested(value, f)?;
                }
                write!(f, "}}")
            }
            Value::Object(obj) => write!(f, "{obj}"),
            Value::Function(func) => write!(f, "<fn {}>", func.name()),
            Value::Cell(_) => write!(f, "<cell>"),
        }
    }
}
