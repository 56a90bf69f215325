use std::{fs, path::PathBuf, process::exit, time::Instant};

use clap::{Parser as _, ValueEnum};
use log::info;
use minic::{
    analyser::analyser::analyse,
    ast::printer::render_declarations,
    display_error,
    lexer::lexer::{tokenize, Scanner},
    parser::parser::parse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    Tokens,
    Ast,
    Ir,
}

/// Front end for the minimal `fn`/`int`/`void` language
#[derive(clap::Parser)]
#[command(version)]
struct Args {
    /// Source file to compile
    input: PathBuf,

    /// What to print once the input has been processed
    #[arg(long, value_enum, default_value = "ir")]
    emit: Emit,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let file_name = args.input.display().to_string();
    let bytes = match fs::read(&args.input) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_name, err);
            exit(1);
        }
    };
    let source = String::from_utf8_lossy(&bytes).into_owned();

    if args.emit == Emit::Tokens {
        for token in tokenize(bytes, Some(file_name)) {
            println!("{}", token);
        }
        return;
    }

    let start = Instant::now();
    let declarations = match parse(Scanner::new(bytes, Some(file_name))) {
        Ok(declarations) => declarations,
        Err(err) => {
            display_error(&err, &source);
            exit(1);
        }
    };
    info!("Parsed in {:?}", start.elapsed());

    if args.emit == Emit::Ast {
        print!("{}", render_declarations(&declarations));
        return;
    }

    let analyse_start = Instant::now();
    let program = match analyse(&declarations) {
        Ok(program) => program,
        Err(err) => {
            display_error(&err, &source);
            exit(1);
        }
    };
    info!("Analysed in {:?}", analyse_start.elapsed());
    info!("Total time: {:?}", start.elapsed());

    print!("{}", program.render());
}
