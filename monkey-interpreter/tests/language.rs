use monkey_core::lexer::Lexer;
use monkey_core::parser::Parser;
use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator::eval_program;

/// Runs a source snippet through the whole pipeline and renders the result
/// the way a driver would: the value's display form, or `ERROR: <message>`.
fn run(input: &str) -> String {
    let program = Parser::new(Lexer::new(input))
        .parse_program()
        .unwrap_or_else(|error| panic!("parse failure for {input:?}: {error}"));
    match eval_program(&program, &mut Environment::new()) {
        Ok(object) => object.to_string(),
        Err(error) => format!("ERROR: {error}"),
    }
}

#[test]
fn end_to_end_scenarios() {
    let tests = vec![
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", "50"),
        (
            "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(2);",
            "4",
        ),
        (
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            "10",
        ),
        ("len(\"hello world\")", "11"),
        (
            "{\"name\": \"Monkey\"}[fn(x){x}]",
            "ERROR: wrong index types for []: HASH[FUNCTION]",
        ),
        (
            "\"Hello\" - \"World\"",
            "ERROR: wrong operand types for -: STRING - STRING",
        ),
        (
            "let f = if (1 < 2) { let y = 1; } else { 2 }; y;",
            "ERROR: identifier not found: y",
        ),
    ];

    for (input, expected) in tests {
        assert_eq!(run(input), expected, "input: {input}");
    }
}

#[test]
fn values_render_like_source() {
    let tests = vec![
        ("5 == 5", "true"),
        ("\"Hello\" + \" \" + \"World\"", "Hello World"),
        ("[1, 2 + 3, \"x\"]", "[1, 5, x]"),
        ("fn(x) { x + 1 }", "fn(x) {(x + 1)}"),
        ("if (false) { 1 }", "null"),
        ("len", "builtin function"),
    ];

    for (input, expected) in tests {
        assert_eq!(run(input), expected, "input: {input}");
    }
}

#[test]
fn a_program_survives_a_print_and_reparse_round_trip() {
    let source =
        "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(2);";
    let program = Parser::new(Lexer::new(source)).parse_program().unwrap();
    let reparsed = Parser::new(Lexer::new(&program.to_string()))
        .parse_program()
        .unwrap();

    let first = eval_program(&program, &mut Environment::new());
    let second = eval_program(&reparsed, &mut Environment::new());
    assert_eq!(first, second);
    assert_eq!(first.unwrap().to_string(), "4");
}

#[test]
fn errors_never_reach_containers_or_environments() {
    // The first failing sub-expression aborts the whole evaluation, so the
    // enclosing program result is the error itself.
    let tests = vec![
        ("[1, 2 / 0]", "ERROR: division by zero"),
        ("{\"k\": 1 / 0}", "ERROR: division by zero"),
        ("let x = 1 / 0; x", "ERROR: division by zero"),
        ("push([1], -true)", "ERROR: wrong operand type for -: -BOOLEAN"),
    ];

    for (input, expected) in tests {
        assert_eq!(run(input), expected, "input: {input}");
    }
}
