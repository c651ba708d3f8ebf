//! MiniLang interpreter CLI entry point

use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use minilang::{
    errors::errors::{Error, ErrorKind, ErrorTip},
    pipeline::{self, Outcome},
    render_error,
};
use tracing_subscriber::EnvFilter;

/// Runs a MiniLang program
#[derive(Parser, Debug)]
#[command(name = "minilang")]
#[command(version)]
#[command(about = "Interpreter for the MiniLang language", long_about = None)]
struct Cli {
    /// Program to run
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Take the input of `read` statements from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with program output
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            return ExitCode::from(2);
        }
    };

    let stdout = io::stdout();
    let result = match &cli.input {
        Some(path) => match File::open(path) {
            Ok(file) => pipeline::run(&source, BufReader::new(file), stdout.lock()),
            Err(error) => {
                eprintln!("Failed to open {}: {}", path.display(), error);
                return ExitCode::from(2);
            }
        },
        None => pipeline::run(&source, io::stdin().lock(), stdout.lock()),
    };

    match result {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected { kind, errors }) => {
            display_errors(kind, &errors, &source);
            ExitCode::from(1)
        }
        Err(fatal) => {
            tracing::error!(error = %fatal, file = %cli.file.display(), "fatal error");
            eprintln!("Fatal error: {}", fatal);
            ExitCode::from(2)
        }
    }
}

fn display_errors(kind: ErrorKind, errors: &[Error], source: &str) {
    /*
        Your program contained some syntax errors and could not be interpreted:
        Error near "print" on line 2 column 1: Expecting ";", but found "print"
          2 | print x;
            | ^
        help: Did you miss a semicolon?
    */
    println!("Your program contained some {} errors and could not be interpreted:", kind);

    for error in errors {
        println!("{}", render_error(error, source));
        if let ErrorTip::Suggestion(tip) = error.get_tip() {
            println!("help: {}", tip);
        }
    }
}
