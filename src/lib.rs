//! A pattern-recognizing compiler and threaded-dispatch interpreter for
//! Brainfuck.
//!
//! The pipeline is linear: raw source bytes go into
//! [`compiler::compile`], producing a dense [`instruction::Instruction`]
//! sequence, which [`interpreter::Interpreter`] then executes against a
//! fresh [`tape::Tape`]. Each piece is usable on its own; only the
//! interpreter depends on the tape.

pub mod compiler;
pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod tape;

pub use compiler::compile;
pub use error::CliError;
pub use instruction::Instruction;
pub use interpreter::{Interpreter, InterpreterError};
pub use tape::{Tape, TapeError};
