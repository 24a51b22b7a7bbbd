#![deny(clippy::arithmetic_side_effects)]
//! Indent Runtime - runtime support library for compiled Indent programs.
//!
//! The Indent compiler emits host-native blocks, loops and functions plus
//! calls into this crate for the semantic primitives generated code
//! cannot express natively.
//!
//! # Architecture
//!
//! - `dispatch`: unified read-or-call-or-assign over a value's named
//!   members, with declared setter capabilities resolved through an
//!   explicit per-shape registry
//! - `ScopeRef`: delegated environment chain realizing lexically-scoped
//!   blocks (read-through, define-local, assign-in-place)
//! - `CellValue`: escapable single-slot reference box for state that
//!   must outlive its creating scope
//! - `operators`: variadic, total aggregate operators backing the
//!   language's built-in operators
//! - `Runtime`: context bundling the global scope, setter registry and
//!   the output/input channels
//!
//! # Re-exports
//!
//! The crate root re-exports everything generated code touches, so a
//! compiled program needs a single `use indent_rt::*;`-style import.

mod cell;
mod dispatch;
mod env;
pub mod errors;
mod input;
mod object;
pub mod operators;
mod output;
mod runtime;
mod setters;
mod shared;
mod value;

pub use cell::CellValue;
pub use dispatch::dispatch;
pub use env::ScopeRef;
pub use errors::{
    cannot_access_field, integer_overflow, modulo_by_zero, type_mismatch, undefined_variable,
    wrong_arg_count, EvalError, EvalErrorKind, EvalResult,
};
pub use input::InputSource;
pub use object::ObjectValue;
pub use operators::{
    add, all, asc, concat, either, eq, exists_inside, keys, modulo, none, values, zip,
};
// `any` is the second surface name for the same truthiness fold
pub use operators::either as any;
pub use output::{
    buffer_handler, silent_handler, stdout_handler, OutputHandler, SharedOutputHandler,
};
pub use runtime::{Runtime, RuntimeBuilder};
pub use setters::{SetterFn, SetterRegistry};
pub use shared::Shared;
pub use value::{FunctionValue, Heap, NativeFn, Value};

#[cfg(test)]
mod tests;
