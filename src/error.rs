//! Startup-time errors: the two failures that can happen before a single
//! instruction has been compiled.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the command-line front end before compilation
/// begins. Both print a single line to stderr and exit with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// An option was not recognized, or the arguments didn't parse.
    #[error("Usage: {argv0} [-c] program_file")]
    UsageError {
        /// `argv[0]`, as invoked.
        argv0: String,
    },
    /// The program file could not be opened.
    #[error("Error: Unable to open file {}", path.display())]
    UnableToOpenFile {
        /// The path that failed to open.
        path: PathBuf,
    },
}
