//! Lowers raw Brainfuck source bytes into a compiled [`Instruction`]
//! sequence.
//!
//! The compiler is a single left-to-right pass. Non-command bytes are
//! Brainfuck's comment convention and are dropped before anything else
//! happens, so a comment byte can never split a recognized run or loop
//! idiom. What remains is run-length folded (`><+-`) and, at each `[`,
//! checked against five loop-pattern predicates before falling back to
//! generic bracket tracking. The compiler never fails: malformed input
//! (a stray `]`, an unclosed `[`) is handled silently, per spec.

use crate::instruction::Instruction;

/// Compiles `source` into an instruction sequence.
///
/// Deterministic: equal inputs produce equal outputs. Bytes other than
/// `> < + - . , [ ]` are ignored wherever they appear, including inside
/// what would otherwise be a recognized loop idiom.
pub fn compile(source: &[u8]) -> Vec<Instruction> {
    let filtered: Vec<u8> = source.iter().copied().filter(|&b| is_meaningful(b)).collect();

    let mut out = Vec::new();
    let mut open_stack: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < filtered.len() {
        match filtered[i] {
            b'>' => {
                let n = run_length(&filtered, i, b'>');
                out.push(Instruction::MovePos(n as i32));
                i += n;
            }
            b'<' => {
                let n = run_length(&filtered, i, b'<');
                out.push(Instruction::MovePos(-(n as i32)));
                i += n;
            }
            b'+' => {
                let n = run_length(&filtered, i, b'+');
                out.push(Instruction::AddVal(n as i32));
                i += n;
            }
            b'-' => {
                let n = run_length(&filtered, i, b'-');
                out.push(Instruction::AddVal(-(n as i32)));
                i += n;
            }
            b'.' => {
                out.push(Instruction::Output);
                i += 1;
            }
            b',' => {
                out.push(Instruction::Input);
                i += 1;
            }
            b'[' => {
                if let Some((instr, consumed)) = recognize_loop_pattern(&filtered, i) {
                    out.push(instr);
                    i += consumed;
                } else {
                    open_stack.push(out.len());
                    out.push(Instruction::JumpForward { target: 0 });
                    i += 1;
                }
            }
            b']' => {
                if let Some(open_idx) = open_stack.pop() {
                    let close_idx = out.len();
                    out[open_idx] = Instruction::JumpForward { target: close_idx };
                    out.push(Instruction::JumpBackward { target: open_idx });
                }
                // an unmatched `]` is a deliberate no-op
                i += 1;
            }
            other => unreachable!("filtered stream should only contain bf commands, got {other}"),
        }
    }

    // Unclosed `[`: define the placeholder as "jump past end of program".
    // Any pc >= out.len() terminates the interpreter loop normally, so
    // landing one past this target still terminates cleanly.
    let final_len = out.len();
    for idx in open_stack {
        if let Instruction::JumpForward { target } = &mut out[idx] {
            *target = final_len;
        }
    }

    out
}

/// True for the eight Brainfuck command bytes; false for comment bytes.
fn is_meaningful(byte: u8) -> bool {
    matches!(byte, b'>' | b'<' | b'+' | b'-' | b'.' | b',' | b'[' | b']')
}

/// Length of the maximal run of `ch` starting at `i` (always >= 1, since
/// `source[i] == ch` is a precondition of every call site).
fn run_length(source: &[u8], i: usize, ch: u8) -> usize {
    source[i..].iter().take_while(|&&b| b == ch).count()
}

/// Consumes a maximal run of `+`/`-` starting at `i`, returning the
/// signed sum (each `+` is +1, each `-` is -1) and the number of bytes
/// consumed. The run may be empty (sum 0, consumed 0) if `source[i]` is
/// not `+` or `-`.
fn mixed_sign_run(source: &[u8], i: usize) -> (i32, usize) {
    let mut sum = 0i32;
    let mut consumed = 0usize;
    while let Some(&b) = source.get(i + consumed) {
        match b {
            b'+' => sum += 1,
            b'-' => sum -= 1,
            _ => break,
        }
        consumed += 1;
    }
    (sum, consumed)
}

/// Tries each loop-pattern predicate in spec order, returning the first
/// match's instruction and the number of bytes (starting at the `[`) it
/// consumes.
fn recognize_loop_pattern(source: &[u8], i: usize) -> Option<(Instruction, usize)> {
    try_set_value(source, i)
        .or_else(|| try_set_zero(source, i))
        .or_else(|| try_scan(source, i))
        .or_else(|| try_add_to_next(source, i))
        .or_else(|| try_multiply_move(source, i))
}

/// `[-]` immediately followed by a nonempty `+`/`-` run with nonzero sum.
fn try_set_value(source: &[u8], i: usize) -> Option<(Instruction, usize)> {
    if source.get(i..i + 3)? != b"[-]" {
        return None;
    }
    let (sum, run_len) = mixed_sign_run(source, i + 3);
    if run_len > 0 && sum != 0 {
        Some((Instruction::SetVal(sum), 3 + run_len))
    } else {
        None
    }
}

/// Bare `[-]` or `[+]`.
fn try_set_zero(source: &[u8], i: usize) -> Option<(Instruction, usize)> {
    let span = source.get(i..i + 3)?;
    if span == b"[-]" || span == b"[+]" {
        Some((Instruction::SetZero, 3))
    } else {
        None
    }
}

/// `[>]` or `[<]`.
fn try_scan(source: &[u8], i: usize) -> Option<(Instruction, usize)> {
    let span = source.get(i..i + 3)?;
    match span {
        b"[>]" => Some((Instruction::ScanRight, 3)),
        b"[<]" => Some((Instruction::ScanLeft, 3)),
        _ => None,
    }
}

/// `[->+<]` literally.
fn try_add_to_next(source: &[u8], i: usize) -> Option<(Instruction, usize)> {
    if source.get(i..i + 6)? == b"[->+<]" {
        Some((Instruction::AddToNext, 6))
    } else {
        None
    }
}

/// `[->` followed by a nonempty `+`/`-` run, followed by `<]`.
fn try_multiply_move(source: &[u8], i: usize) -> Option<(Instruction, usize)> {
    if source.get(i..i + 3)? != b"[->" {
        return None;
    }
    let (k, run_len) = mixed_sign_run(source, i + 3);
    if run_len == 0 {
        return None;
    }
    if source.get(i + 3 + run_len..i + 3 + run_len + 2)? == b"<]" {
        Some((Instruction::MultiplyMove(k), 5 + run_len))
    } else {
        None
    }
}
