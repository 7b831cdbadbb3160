use std::path::Path;
use std::process::ExitCode;

use fla::loader::{DefinitionLoader, FileKind};
use fla::types::FlaError;

fn print_usage() {
    eprint!("Usage:\tfla [-h|--help]\n");
    eprint!("      \tfla [-v|--verbose] <pda> <input>\n");
    eprint!("      \tfla [-v|--verbose] <tm> <input>\n");
}

fn main() -> ExitCode {
    let mut help = false;
    let mut verbose = false;
    let mut args = Vec::new();

    for arg in std::env::args().skip(1) {
        if arg.starts_with('-') {
            match arg.as_str() {
                "-h" | "--help" => help = true,
                "-v" | "--verbose" => verbose = true,
                _ => {
                    eprintln!("Unknown option: {arg}");
                    print_usage();
                    return ExitCode::FAILURE;
                }
            }
        } else {
            args.push(arg);
        }
    }

    if help {
        print_usage();
        return ExitCode::SUCCESS;
    }

    if args.len() != 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let path = Path::new(&args[0]);
    let input = &args[1];

    let Some(kind) = FileKind::from_path(path) else {
        eprintln!("Unknown file type: {}", path.display());
        eprintln!("The file format must be '*.pda' or '*.tm'");
        return ExitCode::FAILURE;
    };

    let automaton = match DefinitionLoader::load_as(path, kind) {
        Ok(automaton) => automaton,
        Err(error) => return report(&error, verbose),
    };

    match automaton.run(input) {
        Ok(result) => {
            if verbose {
                println!("Input: {input}");
                println!("==================== RUN ====================");
                println!("Result: {result}");
                println!("==================== END ====================");
            } else {
                println!("{result}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => report(&error, verbose),
    }
}

/// Renders a fault the way the interpreter reports it: terse one-liners by
/// default, the underlying detail in verbose mode.
fn report(error: &FlaError, verbose: bool) -> ExitCode {
    if verbose {
        eprintln!("{error}");
        eprintln!("==================== END ====================");
    } else {
        match error {
            FlaError::IllegalInput { .. } => eprintln!("illegal input"),
            FlaError::Syntax(_) | FlaError::Malformed(_) => eprintln!("syntax error"),
            FlaError::Diverged(_) | FlaError::File(_) => eprintln!("unknown error"),
        }
    }
    ExitCode::FAILURE
}
