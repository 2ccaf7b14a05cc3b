mod repl;
mod runner;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Script to execute; starts the interactive session when omitted.
    path: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.path {
        None => repl::start().unwrap(),
        Some(path) => {
            let source = std::fs::read_to_string(path).unwrap();
            runner::execute(&source);
        }
    }
}
