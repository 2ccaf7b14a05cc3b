use monkey_core::lexer::Lexer;
use monkey_core::parser::Parser;
use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator;

pub fn execute(source: &str) {
    let program = match Parser::new(Lexer::new(source)).parse_program() {
        Ok(program) => program,
        Err(error) => {
            println!("Woops! We ran into some monkey business here!");
            println!("{error}");
            return;
        }
    };

    let mut environment = Environment::new();
    match evaluator::eval_program(&program, &mut environment) {
        Ok(object) => println!("{object}"),
        Err(error) => println!("RuntimeError: {error}"),
    }
}
