//! Executes a compiled [`Instruction`] sequence against one [`Tape`].
//!
//! Dispatch is a `match` over the opcode in a tight loop: the portable
//! rendering of "threaded dispatch" on a target without first-class
//! computed jumps. Rust's `match` on a dense enum compiles to the same
//! jump table a hand-rolled threaded interpreter would reach for, so the
//! semantics (and, in practice, the performance characteristics this
//! design exists for) are unaffected by the choice.

use std::io::{Read, Write};

use thiserror::Error;

use crate::instruction::Instruction;
use crate::tape::{Tape, TapeError};

/// Errors that can terminate an in-progress interpretation.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// The tape's head ran off one edge of its bounded range.
    #[error(transparent)]
    Tape(#[from] TapeError),
    /// A read from the input or write to the output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Executes one instruction sequence against one tape.
///
/// An `Interpreter` borrows its instruction sequence for its whole
/// lifetime; the sequence is immutable once compiled and may be shared
/// read-only with other consumers (e.g. the `-c` dump path) without
/// involving this type at all.
pub struct Interpreter<'a> {
    instructions: &'a [Instruction],
    pc: usize,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter for `instructions`, program counter at 0.
    pub fn new(instructions: &'a [Instruction]) -> Self {
        Interpreter { instructions, pc: 0 }
    }

    /// Runs to completion: either the program counter walks off the end
    /// of the sequence (normal termination) or a tape or I/O fault is
    /// hit (propagated to the caller; any output already written stands).
    pub fn run<R: Read, W: Write>(
        &mut self,
        tape: &mut Tape,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), InterpreterError> {
        while self.pc < self.instructions.len() {
            self.step(tape, input, output)?;
        }
        Ok(())
    }

    /// Executes the instruction at the current program counter and
    /// advances it. Both jump opcodes land one past their partner
    /// bracket: the convention is `pc := target` followed by the normal
    /// `pc := pc + 1` that runs after every instruction either way.
    fn step<R: Read, W: Write>(
        &mut self,
        tape: &mut Tape,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), InterpreterError> {
        match self.instructions[self.pc] {
            Instruction::Output => {
                output.write_all(&[tape.get()])?;
                output.flush()?;
            }
            Instruction::Input => {
                let mut byte = [0u8; 1];
                // End-of-stream convention: the cell is set to zero.
                match input.read(&mut byte)? {
                    0 => tape.set(0),
                    _ => tape.set(byte[0]),
                }
            }
            Instruction::AddVal(delta) => tape.add(delta),
            Instruction::MovePos(delta) => tape.move_by(delta)?,
            Instruction::SetVal(literal) => tape.set(literal.rem_euclid(256) as u8),
            Instruction::SetZero => tape.set(0),
            Instruction::AddToNext => {
                let current = tape.get();
                let neighbor = tape.get_right_neighbor()?;
                tape.set_right_neighbor(neighbor.wrapping_add(current))?;
                tape.set(0);
            }
            Instruction::MultiplyMove(multiplier) => {
                let current = tape.get();
                let neighbor = tape.get_right_neighbor()?;
                let product = ((current as i32).wrapping_mul(multiplier)).rem_euclid(256) as u8;
                tape.set_right_neighbor(neighbor.wrapping_add(product))?;
                tape.set(0);
            }
            Instruction::ScanRight => {
                while tape.get() != 0 {
                    tape.move_right(1)?;
                }
            }
            Instruction::ScanLeft => {
                while tape.get() != 0 {
                    tape.move_left(1)?;
                }
            }
            Instruction::JumpForward { target } => {
                if tape.get() == 0 {
                    self.pc = target;
                }
            }
            Instruction::JumpBackward { target } => {
                if tape.get() != 0 {
                    self.pc = target;
                }
            }
        }

        self.pc += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use std::io::Cursor;

    fn run_program(source: &[u8], stdin: &[u8]) -> (String, Tape) {
        let instructions = compile(source);
        let mut tape = Tape::new();
        let mut input = Cursor::new(stdin.to_vec());
        let mut output = Vec::new();
        Interpreter::new(&instructions)
            .run(&mut tape, &mut input, &mut output)
            .expect("program should run to completion");
        (String::from_utf8(output).expect("output should be valid utf8"), tape)
    }

    #[test]
    fn hello_world() {
        let source = b"++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
        let (output, _) = run_program(source, b"");
        assert_eq!(output, "Hello World!\n");
    }

    #[test]
    fn echo_until_zero() {
        let instructions = compile(b",[.,]");
        let mut tape = Tape::new();
        let mut input = Cursor::new(b"abc\0xyz".to_vec());
        let mut output = Vec::new();
        Interpreter::new(&instructions)
            .run(&mut tape, &mut input, &mut output)
            .unwrap();
        assert_eq!(output, b"abc");
    }

    #[test]
    fn cell_wraps_on_underflow_from_zero() {
        let (output, _) = run_program(b"-.", b"");
        assert_eq!(output.as_bytes(), &[0xFF]);
    }

    #[test]
    fn scan_right_lands_on_first_zero_cell() {
        let instructions = compile(b"+>+>+>>+<<<<[>]");
        let mut tape = Tape::new();
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        Interpreter::new(&instructions)
            .run(&mut tape, &mut input, &mut output)
            .unwrap();
        assert_eq!(tape.head(), 3);
        assert_eq!(tape.get(), 0);
    }

    #[test]
    fn multiply_move_is_recognized_and_executed() {
        let instructions = compile(b"++++[->+++<]>.");
        assert!(instructions
            .iter()
            .any(|i| matches!(i, Instruction::MultiplyMove(3))));
        let (output, _) = run_program(b"++++[->+++<]>.", b"");
        assert_eq!(output.as_bytes(), &[0x0C]);
    }

    #[test]
    fn input_at_end_of_stream_sets_cell_to_zero() {
        let (output, _) = run_program(b",.", b"");
        assert_eq!(output.as_bytes(), &[0]);
    }

    #[test]
    fn set_zero_is_equivalent_to_set_val_zero() {
        let (_, tape_a) = run_program(b"+++[-]", b"");
        let (_, tape_b) = run_program(b"+++[-]+-", b""); // exercises SetVal(0)-shaped path too
        assert_eq!(tape_a.get(), 0);
        assert_eq!(tape_b.get(), 0);
    }

    #[test]
    fn add_to_next_is_equivalent_to_multiply_move_by_one() {
        let via_add_to_next = vec![Instruction::AddVal(3), Instruction::AddToNext, Instruction::MovePos(1)];
        let via_multiply_move = vec![Instruction::AddVal(3), Instruction::MultiplyMove(1), Instruction::MovePos(1)];

        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let mut tape_a = Tape::new();
        Interpreter::new(&via_add_to_next).run(&mut tape_a, &mut input, &mut output).unwrap();

        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let mut tape_b = Tape::new();
        Interpreter::new(&via_multiply_move).run(&mut tape_b, &mut input, &mut output).unwrap();

        assert_eq!(tape_a, tape_b);
        assert_eq!(tape_a.get(), 3);
        assert_eq!(tape_a.head(), 1);
    }

    #[test]
    fn tape_overflow_propagates_as_an_error() {
        let instructions = vec![Instruction::MovePos(i32::from(crate::tape::CAPACITY))];
        let mut tape = Tape::new();
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let result = Interpreter::new(&instructions).run(&mut tape, &mut input, &mut output);
        assert!(matches!(result, Err(InterpreterError::Tape(TapeError::Overflow { .. }))));
    }

    #[test]
    fn partial_output_is_preserved_when_a_later_instruction_faults() {
        let mut instructions = vec![Instruction::Output];
        instructions.push(Instruction::MovePos(i32::from(crate::tape::CAPACITY)));
        let mut tape = Tape::new();
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let result = Interpreter::new(&instructions).run(&mut tape, &mut input, &mut output);
        assert!(result.is_err());
        assert_eq!(output, vec![0]);
    }
}
