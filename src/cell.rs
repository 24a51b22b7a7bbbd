//! Single-slot mutable reference box.
//!
//! Cells are the only sanctioned way for state to escape the block that
//! created it: one closure mutates, another holding a clone of the same
//! cell observes. A cell starts out holding the absence marker and
//! exposes one callable surface for both read and write.

use std::fmt;

use crate::errors::{wrong_arg_count, EvalResult};
use crate::shared::Shared;
use crate::value::Value;

/// A mutable cell with reference semantics.
///
/// Cloning the handle aliases the same slot; the slot lives as long as
/// its longest-lived holder, not the scope that created it.
#[derive(Clone)]
pub struct CellValue(Shared<Value>);

impl CellValue {
    /// Create a cell holding the absence marker.
    pub fn new() -> Self {
        CellValue(Shared::new(Value::Absent))
    }

    /// Current value; `Absent` if never set.
    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    /// Replace the current value.
    pub fn set(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }

    /// The cell's callable surface.
    ///
    /// Zero arguments reads, one argument writes and returns the stored
    /// value. Any other arity is a usage error.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        match args {
            [] => Ok(self.get()),
            [value] => {
                self.set(value.clone());
                Ok(value.clone())
            }
            _ => Err(wrong_arg_count("cell", 1, args.len())),
        }
    }

    /// Identity comparison: two cell values are equal only when they
    /// share the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellValue").field(&*self.0.borrow()).finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;

    #[test]
    fn fresh_cell_reads_absent() {
        let cell = CellValue::new();
        assert_eq!(cell.call(&[]), Ok(Value::Absent));
    }

    #[test]
    fn write_returns_stored_value_and_reads_repeat() {
        let cell = CellValue::new();
        assert_eq!(cell.call(&[Value::int(5)]), Ok(Value::int(5)));
        assert_eq!(cell.call(&[]), Ok(Value::int(5)));
        // Repeated empty-argument reads are idempotent
        assert_eq!(cell.call(&[]), Ok(Value::int(5)));
    }

    #[test]
    fn two_or_more_arguments_is_an_arity_error() {
        let cell = CellValue::new();
        let err = cell.call(&[Value::int(1), Value::int(2)]).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::ArityMismatch {
                name: "cell".to_string(),
                expected: 1,
                got: 2,
            }
        );
    }

    #[test]
    fn clones_share_the_slot() {
        let writer = CellValue::new();
        let reader = writer.clone();
        writer.set(Value::string("escaped"));
        assert_eq!(reader.get(), Value::string("escaped"));
    }
}
