//! The command-line surface, defined via the `clap` derive API.

use std::path::PathBuf;

use clap::Parser;

/// A Brainfuck compiler and interpreter.
///
/// Without `-c`, the program at `program_file` (or, if omitted, standard
/// input) is compiled and interpreted. With `-c`, the compiled
/// instruction sequence is written to standard output as raw opcode tag
/// bytes, and the program is not executed.
#[derive(Parser, Debug, PartialEq, Clone)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Emit the compiled instruction sequence instead of running it.
    #[arg(short = 'c')]
    pub dump: bool,

    /// Path to the Brainfuck source file. Reads standard input if absent.
    pub program_file: Option<PathBuf>,
}
