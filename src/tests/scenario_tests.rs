//! End-to-end scenarios driving the runtime the way generated code does.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use crate::input::InputSource;
use crate::operators::add;
use crate::output::buffer_handler;
use crate::runtime::Runtime;
use crate::value::Value;

/// The word-count program: read all input, split on newline, fold each
/// word into a count map through dispatch, log the map.
#[test]
fn word_count_over_dispatch_and_add() {
    let rt = Runtime::builder()
        .output(buffer_handler())
        .input(InputSource::scripted("a\nb\na"))
        .build();

    let scope = rt.create_child(None);
    let input = rt.stdin_all();
    scope.define("input", Value::string(input));

    let words: Vec<Value> = scope
        .lookup("input")
        .unwrap()
        .as_str()
        .unwrap()
        .split('\n')
        .map(Value::string)
        .collect();
    scope.define("count", Value::empty_map());

    for word in &words {
        // Each loop body runs in its own child scope
        let body = rt.create_child(Some(&scope));
        let count = body.lookup("count").unwrap();
        let key = word.as_str().unwrap();

        let seen = rt.dispatch(&count, key, &[]).unwrap();
        let bumped = add(&[Value::int(1), seen]).unwrap();
        let returned = rt.dispatch(&count, key, &[bumped.clone()]).unwrap();
        assert_eq!(returned, bumped);
    }

    let count = scope.lookup("count").unwrap();
    assert_eq!(rt.dispatch(&count, "a", &[]).unwrap(), Value::int(2));
    assert_eq!(rt.dispatch(&count, "b", &[]).unwrap(), Value::int(1));

    rt.log(&[count]);
    assert_eq!(rt.output().get_output(), "{a: 2, b: 1}\n");
}

/// A cell created in an inner block outlives that block and is observed
/// through a second handle that never shared the inner scope.
#[test]
fn cell_escapes_its_creating_scope() {
    let rt = Runtime::new();
    let outer = rt.create_child(None);
    outer.define("shared", rt.make_cell());

    {
        let inner = rt.create_child(Some(&outer));
        let cell = inner.lookup("shared").unwrap();
        if let Value::Cell(c) = &cell {
            assert_eq!(c.call(&[Value::int(5)]).unwrap(), Value::int(5));
        }
        // Inner scope is discarded here
    }

    let cell = outer.lookup("shared").unwrap();
    if let Value::Cell(c) = &cell {
        assert_eq!(c.call(&[]).unwrap(), Value::int(5));
        assert_eq!(c.call(&[]).unwrap(), Value::int(5));
    } else {
        panic!("expected cell");
    }
}

/// Reassignment through a nested chain mutates the ancestor binding,
/// while `define` in the same chain shadows without leaking.
#[test]
fn block_nesting_shadow_and_reassign() {
    let rt = Runtime::new();
    let outer = rt.create_child(None);
    outer.define("total", Value::int(0));
    outer.define("label", Value::string("outer"));

    for n in 1..=3 {
        let body = rt.create_child(Some(&outer));
        // Shadowing local: never reaches the outer binding
        body.define("label", Value::string("inner"));

        let total = body.lookup("total").unwrap();
        let next = add(&[total, Value::int(n)]).unwrap();
        body.assign("total", next).unwrap();
    }

    assert_eq!(outer.lookup("total"), Ok(Value::int(6)));
    assert_eq!(outer.lookup("label"), Ok(Value::string("outer")));
}

/// The whole-input buffer is populated at most once per input source.
#[test]
fn stdin_all_is_memoized_per_runtime() {
    let rt = Runtime::builder()
        .input(InputSource::scripted("payload"))
        .build();

    let first = rt.stdin_all();
    let second = rt.stdin_all();
    assert_eq!(first, "payload");
    assert_eq!(first, second);
    assert!(!rt.is_tty());
}

/// Interactive prompting: messages go to the output channel, lines come
/// back trimmed, and exhausted input degrades to empty strings.
#[test]
fn prompt_loop_until_empty() {
    let rt = Runtime::builder()
        .output(buffer_handler())
        .input(InputSource::scripted("one\ntwo\n"))
        .build();

    let mut lines = Vec::new();
    loop {
        let line = rt.prompt("> ");
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }

    assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    assert_eq!(rt.output().get_output(), "> > > ");
}
