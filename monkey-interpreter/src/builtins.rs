use std::rc::Rc;

use crate::object::{Builtin, EvaluationError, Object, ObjectKind};

/// The fixed registry; `Environment::get` falls back to it after the scope
/// chain misses.
pub(crate) fn lookup(name: &str) -> Option<Rc<Object>> {
    let builtin = match name {
        "len" => Builtin { name: "len", func: len },
        "first" => Builtin {
            name: "first",
            func: first,
        },
        "last" => Builtin {
            name: "last",
            func: last,
        },
        "rest" => Builtin {
            name: "rest",
            func: rest,
        },
        "push" => Builtin {
            name: "push",
            func: push,
        },
        "puts" => Builtin {
            name: "puts",
            func: puts,
        },
        _ => return None,
    };
    Some(Rc::new(Object::Builtin(builtin)))
}

fn check_arity(
    name: &'static str,
    expected: usize,
    args: &[Rc<Object>],
) -> Result<(), EvaluationError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvaluationError::WrongArgumentCount {
            name: name.to_owned(),
            expected,
            actual: args.len(),
        })
    }
}

fn expect_array<'a>(
    name: &'static str,
    argument: &'a Rc<Object>,
) -> Result<&'a Vec<Rc<Object>>, EvaluationError> {
    match argument.as_ref() {
        Object::Array(elements) => Ok(elements),
        other => Err(EvaluationError::WrongArgumentType {
            name,
            expected: ObjectKind::Array,
            actual: other.kind(),
        }),
    }
}

// `len` on strings counts UTF-8 bytes, like the array form counts elements.
fn len(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_arity("len", 1, &args)?;
    match args[0].as_ref() {
        Object::String(value) => Ok(Object::integer(value.len() as i64)),
        Object::Array(elements) => Ok(Object::integer(elements.len() as i64)),
        other => Err(EvaluationError::WrongArgumentType {
            name: "len",
            expected: ObjectKind::String,
            actual: other.kind(),
        }),
    }
}

fn first(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_arity("first", 1, &args)?;
    let elements = expect_array("first", &args[0])?;
    Ok(elements.first().cloned().unwrap_or_else(Object::null))
}

fn last(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_arity("last", 1, &args)?;
    let elements = expect_array("last", &args[0])?;
    Ok(elements.last().cloned().unwrap_or_else(Object::null))
}

fn rest(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_arity("rest", 1, &args)?;
    let elements = expect_array("rest", &args[0])?;
    if elements.is_empty() {
        return Ok(Object::null());
    }
    Ok(Object::array(elements[1..].to_vec()))
}

fn push(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_arity("push", 2, &args)?;
    let elements = expect_array("push", &args[0])?;
    let mut extended = elements.clone();
    extended.push(args[1].clone());
    Ok(Object::array(extended))
}

fn puts(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    for argument in &args {
        println!("{}", argument);
    }
    Ok(Object::null())
}
