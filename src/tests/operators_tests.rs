//! Tests for the variadic aggregate operators.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use crate::errors::EvalErrorKind;
use crate::operators::{
    add, all, asc, concat, either, eq, exists_inside, keys, modulo, none, values, zip,
};
use crate::value::Value;

fn ints(ns: &[i64]) -> Vec<Value> {
    ns.iter().copied().map(Value::int).collect()
}

#[test]
fn concat_folds_left_from_empty_string() {
    let result = concat(&[
        Value::string("a"),
        Value::string("b"),
        Value::string("c"),
    ])
    .unwrap();
    assert_eq!(result, Value::string("abc"));

    assert_eq!(concat(&[]).unwrap(), Value::string(""));
}

#[test]
fn concat_renders_non_strings() {
    let result = concat(&[Value::string("n="), Value::int(3), Value::Absent]).unwrap();
    assert_eq!(result, Value::string("n=3absent"));
}

#[test]
fn eq_compares_every_argument_to_the_first() {
    assert_eq!(eq(&ints(&[1, 1, 1])).unwrap(), Value::Bool(true));
    assert_eq!(eq(&ints(&[1, 1, 2])).unwrap(), Value::Bool(false));
    // Vacuously true
    assert_eq!(eq(&[]).unwrap(), Value::Bool(true));
    assert_eq!(eq(&ints(&[9])).unwrap(), Value::Bool(true));
}

#[test]
fn eq_is_strict_across_types() {
    assert_eq!(
        eq(&[Value::int(1), Value::string("1")]).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        eq(&[Value::int(1), Value::float(1.0)]).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn either_and_all_and_none_fold_truthiness() {
    assert_eq!(
        either(&[Value::Bool(false), Value::int(0), Value::int(3)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        either(&[Value::Bool(false), Value::string("")]).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(either(&[]).unwrap(), Value::Bool(false));

    assert_eq!(
        all(&[Value::int(1), Value::string("x")]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        all(&[Value::int(1), Value::Absent]).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(all(&[]).unwrap(), Value::Bool(true));

    assert_eq!(
        none(&[Value::Bool(false), Value::int(0)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(none(&[Value::int(1)]).unwrap(), Value::Bool(false));
}

#[test]
fn asc_detects_non_decreasing_sequences() {
    assert_eq!(asc(&ints(&[0, 1, 2])).unwrap(), Value::Bool(true));
    assert_eq!(asc(&ints(&[2, 1, 0])).unwrap(), Value::Bool(false));
    assert_eq!(asc(&ints(&[1, 1, 2])).unwrap(), Value::Bool(true));
    assert_eq!(asc(&[]).unwrap(), Value::Bool(true));
    assert_eq!(asc(&ints(&[7])).unwrap(), Value::Bool(true));
}

#[test]
fn asc_orders_strings_and_mixed_numbers() {
    assert_eq!(
        asc(&[Value::string("a"), Value::string("b")]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        asc(&[Value::int(1), Value::float(1.5), Value::int(2)]).unwrap(),
        Value::Bool(true)
    );
    assert!(asc(&[Value::int(1), Value::string("a")]).is_err());
}

#[test]
fn add_sums_and_treats_absent_as_zero() {
    assert_eq!(add(&ints(&[2, 0, 2])).unwrap(), Value::int(4));
    assert_eq!(add(&[Value::Absent]).unwrap(), Value::int(0));
    assert_eq!(
        add(&[Value::int(1), Value::Absent, Value::int(2)]).unwrap(),
        Value::int(3)
    );
    assert_eq!(add(&[]).unwrap(), Value::int(0));
}

#[test]
fn add_promotes_to_float() {
    assert_eq!(
        add(&[Value::int(1), Value::float(0.5)]).unwrap(),
        Value::float(1.5)
    );
}

#[test]
fn add_checks_overflow_and_types() {
    let err = add(&[Value::int(i64::MAX), Value::int(1)]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::IntegerOverflow {
            operation: "add".to_string()
        }
    );
    assert!(add(&[Value::string("x")]).is_err());
}

#[test]
fn modulo_is_strictly_binary() {
    assert_eq!(modulo(&ints(&[7, 3])).unwrap(), Value::int(1));

    // Extra arguments are an arity violation, not silently ignored
    let err = modulo(&ints(&[7, 3, 5])).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "mod".to_string(),
            expected: 2,
            got: 3,
        }
    );
    assert!(modulo(&ints(&[7])).is_err());
}

#[test]
fn modulo_by_zero_is_an_error() {
    let err = modulo(&ints(&[7, 0])).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
}

#[test]
fn float_modulo_by_zero_is_an_error_not_nan() {
    let err = modulo(&[Value::float(7.0), Value::float(0.0)]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);

    // Mixed int/float pairs take the float path and still hit the guard
    let err = modulo(&[Value::int(7), Value::float(0.0)]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);

    assert_eq!(
        modulo(&[Value::float(7.5), Value::float(2.0)]).unwrap(),
        Value::float(1.5)
    );
}

#[test]
fn exists_inside_list_requires_every_value() {
    let list = Value::list(ints(&[1, 2, 3]));
    assert_eq!(
        exists_inside(&[list.clone(), Value::int(1), Value::int(2)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        exists_inside(&[list, Value::int(1), Value::int(9)]).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn exists_inside_map_tests_keys() {
    let map = Value::empty_map();
    if let Value::Map(entries) = &map {
        entries.borrow_mut().insert("a".to_string(), Value::int(1));
    }
    assert_eq!(
        exists_inside(&[map.clone(), Value::string("a")]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        exists_inside(&[map, Value::string("b")]).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn exists_inside_is_vacuously_true_without_values() {
    assert_eq!(
        exists_inside(&[Value::list(vec![])]).unwrap(),
        Value::Bool(true)
    );
    assert!(exists_inside(&[]).is_err());
    assert!(exists_inside(&[Value::int(1), Value::int(1)]).is_err());
}

#[test]
fn zip_pads_to_the_longest_input() {
    let result = zip(&[
        Value::list(ints(&[1, 2])),
        Value::list(ints(&[3])),
    ])
    .unwrap();
    assert_eq!(
        result,
        Value::list(vec![
            Value::list(vec![Value::int(1), Value::int(3)]),
            Value::list(vec![Value::int(2), Value::Absent]),
        ])
    );
}

#[test]
fn zip_of_nothing_is_empty() {
    assert_eq!(zip(&[]).unwrap(), Value::list(vec![]));
    assert!(zip(&[Value::int(1)]).is_err());
}

#[test]
fn keys_and_values_preserve_insertion_order() {
    let map = Value::empty_map();
    if let Value::Map(entries) = &map {
        let mut entries = entries.borrow_mut();
        entries.insert("b".to_string(), Value::int(1));
        entries.insert("a".to_string(), Value::int(2));
    }

    assert_eq!(
        keys(&[map.clone()]).unwrap(),
        Value::list(vec![Value::string("b"), Value::string("a")])
    );
    assert_eq!(
        values(&[map.clone()]).unwrap(),
        Value::list(vec![Value::int(1), Value::int(2)])
    );

    assert!(keys(&[map.clone(), map.clone()]).is_err());
    assert!(values(&[Value::int(1)]).is_err());
}

#[test]
fn keys_and_values_work_on_objects() {
    let obj = Value::object("Rec");
    if let Value::Object(o) = &obj {
        o.set("x", Value::int(1));
        o.set("y", Value::int(2));
    }
    assert_eq!(
        keys(&[obj.clone()]).unwrap(),
        Value::list(vec![Value::string("x"), Value::string("y")])
    );
    assert_eq!(
        values(&[obj]).unwrap(),
        Value::list(vec![Value::int(1), Value::int(2)])
    );
}
