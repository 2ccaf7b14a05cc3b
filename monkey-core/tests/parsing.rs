use monkey_core::ast::{Expression, InfixOperator, Statement};
use monkey_core::lexer::Lexer;
use monkey_core::parser::{ParseError, Parser};

fn parse(input: &str) -> Result<monkey_core::ast::Program, ParseError> {
    Parser::new(Lexer::new(input)).parse_program()
}

#[test]
fn programs_print_in_canonical_form() {
    let tests = vec![
        ("1 + 2 * 3", "(1 + (2 * 3))"),
        ("let x = 1 < 2 == true;", "let x = ((1 < 2) == true);"),
        ("return fn(x) { x }(1);", "return fn(x) {x}(1);"),
        (
            "if (a == b) { let c = 1; c } else { 0 }",
            "if ((a == b)) {let c = 1;\nc} else {0}",
        ),
        (
            "let person = {\"name\": \"ook\", \"age\": 3};",
            "let person = {\"name\": \"ook\", \"age\": 3};",
        ),
        ("[1, 2][0] + [3][0]", "(([1, 2][0]) + ([3][0]))"),
        (
            "macro(a, b) { if (a) { b } }",
            "macro(a, b) {if (a) {b}}",
        ),
    ];

    for (input, expected) in tests {
        let program = parse(input).unwrap_or_else(|error| panic!("{input:?}: {error}"));
        assert_eq!(program.to_string(), expected, "input: {input}");
    }
}

#[test]
fn canonical_form_is_a_fixed_point() {
    let inputs = vec![
        "let add = fn(x, y) { x + y }; add(1, 2 * 3)",
        "if ((x < y)) {x} else {y}",
        "((a + add((b * c))) + d)",
        "let arr = [1, \"two\", true]; (arr[2])",
        "{1: \"one\", true: 2}",
    ];

    for input in inputs {
        let once = parse(input).unwrap().to_string();
        let twice = parse(&once).unwrap().to_string();
        assert_eq!(once, twice, "input: {input}");
    }
}

#[test]
fn a_parse_failure_yields_no_partial_program() {
    // A later violation discards the statements that parsed before it.
    let result = parse("let a = 1; let b = ;");
    assert!(result.is_err());
}

#[test]
fn structural_equality_is_independent_of_layout() {
    let compact = parse("let add=fn(x,y){x+y};").unwrap();
    let spread = parse("let add = fn( x , y ) {\n  x + y\n} ;").unwrap();
    assert_eq!(compact, spread);
}

#[test]
fn expression_statements_keep_their_shape() {
    let program = parse("5 + 5;").unwrap();
    let Some(Statement::Expression(Expression::Infix(operator, left, right))) =
        program.statements.first()
    else {
        panic!("expected a single infix expression statement");
    };

    assert_eq!(*operator, InfixOperator::Plus);
    assert_eq!(**left, Expression::IntegerLiteral(5));
    assert_eq!(**right, Expression::IntegerLiteral(5));
}

#[test]
fn deeply_nested_expressions_parse() {
    let input = "fn(f) { fn(x) { f(f(x)) } }(fn(n) { n + 1 })(0)";
    let program = parse(input).unwrap();
    assert_eq!(
        program.to_string(),
        "fn(f) {fn(x) {f(f(x))}}(fn(n) {(n + 1)})(0)"
    );
}
