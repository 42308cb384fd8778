//! The `bf` command-line front end: thin plumbing around
//! [`bf::compiler`] and [`bf::interpreter`] for reading the program,
//! parsing the single `-c` option, and routing stdin/stdout.

mod clap_cli;

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize as _;

use bf::error::CliError;
use bf::{compile, Instruction, Interpreter, InterpreterError, Tape};
use clap_cli::Cli;

fn main() -> ExitCode {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| "bf".to_string());

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            eprintln!("{}", CliError::UsageError { argv0 });
            return ExitCode::FAILURE;
        }
    };

    let source = match read_source(cli.program_file.as_deref()) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let instructions = compile(&source);

    if cli.dump {
        return match dump(&instructions) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{} {err}", "Error:".red().bold());
                ExitCode::FAILURE
            }
        };
    }

    match interpret(&instructions) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_runtime_error(&err));
            ExitCode::FAILURE
        }
    }
}

/// Reads the program bytes from `path`, or from standard input if `path`
/// is `None`.
fn read_source(path: Option<&std::path::Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => fs::read(path).map_err(|_| CliError::UnableToOpenFile {
            path: path.to_path_buf(),
        }),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|_| CliError::UnableToOpenFile {
                    path: std::path::PathBuf::from("<stdin>"),
                })?;
            Ok(buf)
        }
    }
}

/// Writes the compiled program's opcode tag bytes to standard output.
fn dump(instructions: &[Instruction]) -> io::Result<()> {
    dump_to(instructions, &mut io::stdout())
}

/// Writes the compiled program's opcode tag bytes to `out`. Split out from
/// [`dump`] so the byte format can be exercised against an in-memory buffer.
fn dump_to<W: Write>(instructions: &[Instruction], out: &mut W) -> io::Result<()> {
    let tags: Vec<u8> = instructions.iter().map(Instruction::tag).collect();
    out.write_all(&tags)
}

/// Interprets the compiled program against a fresh tape, wired to real
/// standard input/output.
fn interpret(instructions: &[Instruction]) -> Result<(), InterpreterError> {
    let mut tape = Tape::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    Interpreter::new(instructions).run(&mut tape, &mut input, &mut output)
}

/// Renders a runtime fault the way the teacher renders diagnostics: a
/// bold, colored `Error:` prefix ahead of the fault's own message. Unlike
/// the startup diagnostics in [`CliError`], this wording is not spec
/// mandated, so it is free to carry the teacher's styling.
fn format_runtime_error(err: &InterpreterError) -> String {
    format!("{} {err}", "Error:".red().bold())
}
