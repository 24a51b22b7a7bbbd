//! Error types and constructors for the runtime.
//!
//! Every runtime failure is terminal for the task that raised it: errors
//! propagate to the caller via `?` and are never swallowed or retried.
//! Factory functions are the single place error messages are produced,
//! so callers match on `EvalErrorKind` rather than message text.

use std::fmt;

use crate::value::Value;

/// Result of a runtime operation.
pub type EvalResult = Result<Value, EvalError>;

/// Structured error category.
///
/// Enables programmatic error matching without string comparison.
/// Factory functions set the specific variant; `EvalError::new(msg)`
/// uses `Custom`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// An operation received a number of arguments inconsistent with the
    /// path it resolved to (setter, plain assignment, cell, `mod`).
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// A name was read or reassigned and not found anywhere in the
    /// environment chain up to the root.
    UndefinedVariable { name: String },
    /// Member access on a value with no named members.
    CannotAccessField { type_name: String },
    /// An operator received a value of the wrong type.
    TypeMismatch { expected: String, got: String },
    /// Checked integer arithmetic overflowed.
    IntegerOverflow { operation: String },
    /// Remainder with a zero divisor.
    ModuloByZero,
    /// Free-form error.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::ArityMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "'{name}' expects exactly {expected} argument(s), got {got}"
            ),
            EvalErrorKind::UndefinedVariable { name } => {
                write!(f, "undefined variable '{name}'")
            }
            EvalErrorKind::CannotAccessField { type_name } => {
                write!(f, "cannot access field on {type_name}")
            }
            EvalErrorKind::TypeMismatch { expected, got } => {
                write!(f, "expected {expected}, got {got}")
            }
            EvalErrorKind::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }
            EvalErrorKind::ModuloByZero => write!(f, "modulo by zero"),
            EvalErrorKind::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Runtime evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; for factory-created errors this equals
    /// `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Uses `Custom` kind. Prefer the specific factory functions when a
    /// structured kind is available.
    pub fn new(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: msg.clone(),
            },
            message: msg,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory Constructors

/// Arity violation for a named operation.
#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Lookup failure in the environment chain.
#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

/// Member access on a value with no named members.
#[cold]
pub fn cannot_access_field(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotAccessField {
        type_name: type_name.to_string(),
    })
}

/// Wrong value type for an operator.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Checked integer arithmetic overflowed.
#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

/// Remainder with a zero divisor.
#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}
