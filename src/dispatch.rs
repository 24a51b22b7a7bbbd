//! Dynamic member dispatch.
//!
//! Generated code cannot tell, at a call site, whether a member is data,
//! a zero-argument method, or an assignment target. `dispatch` resolves
//! that at run time from the member's shape:
//!
//! - no arguments: read the member; invoke it if invokable, else return
//!   it unchanged;
//! - arguments and a declared setter capability on the target's shape:
//!   run the setter with exactly one argument;
//! - arguments and an invokable member: invoke with the target bound as
//!   receiver;
//! - arguments and a plain (or absent) member: plain field assignment of
//!   exactly one argument.
//!
//! Arity violations are raised, never silently truncated.

use crate::errors::{cannot_access_field, wrong_arg_count, EvalError, EvalResult};
use crate::setters::SetterRegistry;
use crate::value::Value;

/// Read `target[member]`, yielding `Absent` for a missing member.
///
/// Values without named members (scalars, strings, lists, cells) cannot
/// be dispatch targets.
fn read_member(target: &Value, member: &str) -> EvalResult {
    match target {
        Value::Map(entries) => Ok(entries
            .borrow()
            .get(member)
            .cloned()
            .unwrap_or(Value::Absent)),
        Value::Object(obj) => Ok(obj.get(member).unwrap_or(Value::Absent)),
        other => Err(cannot_access_field(other.type_name())),
    }
}

/// Plain field write, used when no setter capability is declared.
fn write_member(target: &Value, member: &str, value: Value) -> Result<(), EvalError> {
    match target {
        Value::Map(entries) => {
            entries.borrow_mut().insert(member.to_string(), value);
            Ok(())
        }
        Value::Object(obj) => {
            obj.set(member, value);
            Ok(())
        }
        other => Err(cannot_access_field(other.type_name())),
    }
}

/// Invoke an invokable member value with `target` bound as receiver.
fn invoke(value: &Value, target: &Value, args: &[Value]) -> EvalResult {
    match value {
        Value::Function(func) => func.call(target, args),
        Value::Cell(cell) => cell.call(args),
        // Callers check is_invokable first
        other => Err(cannot_access_field(other.type_name())),
    }
}

/// Unified read-or-call-or-assign over a target's named member.
///
/// May mutate `target`. Returns the member value (read path), the
/// invocation result (call path), or the assigned argument (setter and
/// assignment paths).
pub fn dispatch(
    setters: &SetterRegistry,
    target: &Value,
    member: &str,
    args: &[Value],
) -> EvalResult {
    if args.is_empty() {
        let value = read_member(target, member)?;
        if value.is_invokable() {
            return invoke(&value, target, &[]);
        }
        return Ok(value);
    }

    // Declared setter capability on the target's shape wins over both
    // invocation and plain assignment.
    if let Value::Object(obj) = target {
        if let Some(setter) = setters.lookup(obj.shape(), member) {
            let [value] = args else {
                return Err(wrong_arg_count(member, 1, args.len()));
            };
            setter(obj, value.clone())?;
            return Ok(value.clone());
        }
    }

    let current = read_member(target, member)?;
    if current.is_invokable() {
        return invoke(&current, target, args);
    }

    let [value] = args else {
        return Err(wrong_arg_count(member, 1, args.len()));
    };
    write_member(target, member, value.clone())?;
    Ok(value.clone())
}
