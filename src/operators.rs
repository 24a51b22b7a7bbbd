//! Variadic aggregate operators.
//!
//! These back the language's built-in operators. Arguments arrive
//! pre-evaluated, so every operator is total: it consumes the whole
//! argument list and never short-circuits. Dispatch is direct pattern
//! matching — the type set is fixed, so enum matching is preferred over
//! trait objects for exhaustiveness checking.

use crate::errors::{
    integer_overflow, modulo_by_zero, type_mismatch, wrong_arg_count, EvalError, EvalResult,
};
use crate::value::Value;

/// Arity guard shared by the fixed-arity operators.
#[inline]
fn require_args(name: &str, expected: usize, got: usize) -> Result<(), EvalError> {
    if got == expected {
        Ok(())
    } else {
        Err(wrong_arg_count(name, expected, got))
    }
}

/// Left fold producing a string, starting from the empty string,
/// concatenating each argument's rendering in order.
pub fn concat(args: &[Value]) -> EvalResult {
    let mut out = String::new();
    for arg in args {
        out.push_str(&arg.to_string());
    }
    Ok(Value::string(out))
}

/// True iff every argument strictly equals the first argument.
/// Vacuously true for zero or one arguments.
pub fn eq(args: &[Value]) -> EvalResult {
    let equal = match args.first() {
        Some(first) => args.iter().all(|v| v == first),
        None => true,
    };
    Ok(Value::Bool(equal))
}

/// True iff at least one argument is truthy.
pub fn either(args: &[Value]) -> EvalResult {
    let any = args.iter().fold(false, |acc, v| acc | v.is_truthy());
    Ok(Value::Bool(any))
}

/// True iff every argument is truthy.
pub fn all(args: &[Value]) -> EvalResult {
    let every = args.iter().fold(true, |acc, v| acc & v.is_truthy());
    Ok(Value::Bool(every))
}

/// True iff the sequence is non-decreasing under the total order
/// comparison defined by `Value::compare`.
pub fn asc(args: &[Value]) -> EvalResult {
    for pair in args.windows(2) {
        if pair[0].compare(&pair[1])? == std::cmp::Ordering::Greater {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// Running sum used by `add`: integer until the first float appears.
enum Sum {
    Int(i64),
    Float(f64),
}

/// Sum of all arguments, treating an absent argument as zero.
///
/// Integer addition is overflow-checked; any float in the argument list
/// promotes the whole fold to float.
#[expect(
    clippy::cast_precision_loss,
    reason = "sums beyond 2^53 round to the nearest float"
)]
pub fn add(args: &[Value]) -> EvalResult {
    let mut sum = Sum::Int(0);
    for arg in args {
        sum = match (sum, arg) {
            (acc, Value::Absent) => acc,
            (Sum::Int(acc), Value::Int(n)) => {
                Sum::Int(acc.checked_add(*n).ok_or_else(|| integer_overflow("add"))?)
            }
            (Sum::Int(acc), Value::Float(x)) => Sum::Float(acc as f64 + x),
            (Sum::Float(acc), Value::Int(n)) => Sum::Float(acc + *n as f64),
            (Sum::Float(acc), Value::Float(x)) => Sum::Float(acc + x),
            (_, other) => return Err(type_mismatch("number or absent", other.type_name())),
        };
    }
    Ok(match sum {
        Sum::Int(n) => Value::int(n),
        Sum::Float(x) => Value::float(x),
    })
}

/// Binary remainder of exactly two numbers.
///
/// Extra arguments are rejected with an arity violation rather than
/// silently ignored.
pub fn modulo(args: &[Value]) -> EvalResult {
    require_args("mod", 2, args.len())?;
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => {
            if *b == 0 {
                Err(modulo_by_zero())
            } else {
                a.checked_rem(*b)
                    .map(Value::int)
                    .ok_or_else(|| integer_overflow("mod"))
            }
        }
        (a, b) => match (a.as_float(), b.as_float()) {
            // A zero float divisor is the same usage error as a zero
            // integer divisor, not a NaN result
            (Some(_), Some(y)) if y.partial_cmp(&0.0) == Some(std::cmp::Ordering::Equal) => {
                Err(modulo_by_zero())
            }
            (Some(x), Some(y)) => Ok(Value::float(x % y)),
            _ => Err(type_mismatch(
                "two numbers",
                &format!("{} and {}", a.type_name(), b.type_name()),
            )),
        },
    }
}

/// True iff every argument is falsy.
pub fn none(args: &[Value]) -> EvalResult {
    let none = args.iter().fold(true, |acc, v| acc & !v.is_truthy());
    Ok(Value::Bool(none))
}

/// Membership test against a container.
///
/// For a list container, true iff every value is an element of it; for a
/// map or object container, true iff every value is a key of it.
/// Vacuously true with no values.
pub fn exists_inside(args: &[Value]) -> EvalResult {
    let Some((container, values)) = args.split_first() else {
        return Err(wrong_arg_count("exists_inside", 1, 0));
    };
    match container {
        Value::List(items) => Ok(Value::Bool(values.iter().all(|v| items.contains(v)))),
        Value::Map(entries) => {
            let entries = entries.borrow();
            let mut every = true;
            for value in values {
                let Some(key) = value.as_str() else {
                    return Err(type_mismatch("str key", value.type_name()));
                };
                every &= entries.contains_key(key);
            }
            Ok(Value::Bool(every))
        }
        Value::Object(obj) => {
            let mut every = true;
            for value in values {
                let Some(key) = value.as_str() else {
                    return Err(type_mismatch("str key", value.type_name()));
                };
                every &= obj.has_field(key);
            }
            Ok(Value::Bool(every))
        }
        other => Err(type_mismatch("list or map", other.type_name())),
    }
}

/// Transpose the input sequences into a sequence of tuples of length
/// equal to the longest input; positions beyond a shorter input's length
/// are filled with the absence marker.
pub fn zip(args: &[Value]) -> EvalResult {
    let mut inputs = Vec::with_capacity(args.len());
    for arg in args {
        let Some(items) = arg.as_list() else {
            return Err(type_mismatch("list", arg.type_name()));
        };
        inputs.push(items);
    }

    let max_len = inputs.iter().map(|items| items.len()).max().unwrap_or(0);
    let mut rows = Vec::with_capacity(max_len);
    for i in 0..max_len {
        let row = inputs
            .iter()
            .map(|items| items.get(i).cloned().unwrap_or(Value::Absent))
            .collect();
        rows.push(Value::list(row));
    }
    Ok(Value::list(rows))
}

/// A map's key set as a list, insertion order preserved.
pub fn keys(args: &[Value]) -> EvalResult {
    require_args("keys", 1, args.len())?;
    match &args[0] {
        Value::Map(entries) => Ok(Value::list(
            entries.borrow().keys().cloned().map(Value::string).collect(),
        )),
        Value::Object(obj) => Ok(Value::list(
            obj.field_names().into_iter().map(Value::string).collect(),
        )),
        other => Err(type_mismatch("map", other.type_name())),
    }
}

/// A map's value set as a list, insertion order preserved.
pub fn values(args: &[Value]) -> EvalResult {
    require_args("values", 1, args.len())?;
    match &args[0] {
        Value::Map(entries) => Ok(Value::list(entries.borrow().values().cloned().collect())),
        Value::Object(obj) => Ok(Value::list(obj.field_values())),
        other => Err(type_mismatch("map", other.type_name())),
    }
}
