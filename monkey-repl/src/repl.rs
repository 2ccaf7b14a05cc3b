use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use monkey_core::lexer::Lexer;
use monkey_core::parser::Parser;
use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator;

const PROMPT: &str = ">> ";

pub fn start() -> Result<(), ReadlineError> {
    let mut environment = Environment::new();
    let mut rl = DefaultEditor::new()?;

    loop {
        let line = match rl.readline(PROMPT) {
            Err(ReadlineError::Interrupted) => continue, // Clear line
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
            Ok(line) => line,
        };

        if line.trim() == "exit" {
            break;
        }
        rl.add_history_entry(&line)?;

        let program = match Parser::new(Lexer::new(&line)).parse_program() {
            Ok(program) => program,
            Err(error) => {
                println!("Woops! We ran into some monkey business here!");
                println!("{error}");
                continue;
            }
        };

        match evaluator::eval_program(&program, &mut environment) {
            Ok(object) => println!("{object}"),
            Err(error) => println!("RuntimeError: {error}"),
        }
    }

    Ok(())
}
