//! The interpreter's tape: a bounded, bidirectionally-extensible array of
//! byte cells addressed by a movable head.

use thiserror::Error;

/// Number of addressable cells on either side of the origin.
///
/// The tape covers offsets `-CAPACITY..=CAPACITY-1`: `CAPACITY` cells to
/// the right of (and including) the origin, and `CAPACITY` cells to its
/// left. This matches classic Brainfuck implementations' 30,000-ish cell
/// tapes while staying symmetric, since Brainfuck programs may legally
/// move left of their starting position.
pub const CAPACITY: i32 = 20_000;

/// Errors produced by tape head motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TapeError {
    /// Moving right would push the head past the last legal cell.
    #[error("tape overflow: head would move past cell {attempted} (capacity is {capacity})")]
    Overflow {
        /// The offset the motion would have landed on.
        attempted: i32,
        /// The tape's one-sided capacity.
        capacity: i32,
    },
    /// Moving left would push the head past the first legal cell.
    #[error("tape underflow: head would move past cell {attempted} (capacity is {capacity})")]
    Underflow {
        /// The offset the motion would have landed on.
        attempted: i32,
        /// The tape's one-sided capacity.
        capacity: i32,
    },
}

/// A fixed-capacity, two-sided byte tape with a movable head.
///
/// Two arrays are joined at the origin rather than using a single array
/// with the origin pinned at one end: a single array either wastes half
/// its capacity reserving space for leftward motion that may never
/// happen, or fails outright the first time a program moves left of its
/// start. The two-sided layout gives symmetric range with the same O(1)
/// addressing either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    /// `left[k]` holds the cell at offset `-(k + 1)`.
    left: Vec<u8>,
    /// `right[k]` holds the cell at offset `k`.
    right: Vec<u8>,
    /// Current head offset, always within `-CAPACITY..=CAPACITY - 1`.
    head: i32,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates a fresh tape, all cells zeroed, head at offset 0.
    pub fn new() -> Self {
        Tape {
            left: vec![0; CAPACITY as usize],
            right: vec![0; CAPACITY as usize],
            head: 0,
        }
    }

    /// The head's current offset.
    pub fn head(&self) -> i32 {
        self.head
    }

    fn index(&self, offset: i32) -> (&Vec<u8>, usize) {
        if offset >= 0 {
            (&self.right, offset as usize)
        } else {
            (&self.left, (-offset - 1) as usize)
        }
    }

    /// Moves the head right by `n` cells (`n >= 1`).
    ///
    /// Fails with [`TapeError::Overflow`] if the new offset would exceed
    /// `CAPACITY - 1`.
    pub fn move_right(&mut self, n: u32) -> Result<(), TapeError> {
        let attempted = self.head.saturating_add(n as i32);
        if attempted > CAPACITY - 1 {
            return Err(TapeError::Overflow {
                attempted,
                capacity: CAPACITY,
            });
        }
        self.head = attempted;
        Ok(())
    }

    /// Moves the head left by `n` cells (`n >= 1`).
    ///
    /// Fails with [`TapeError::Underflow`] if the new offset would fall
    /// below `-CAPACITY`.
    pub fn move_left(&mut self, n: u32) -> Result<(), TapeError> {
        let attempted = self.head.saturating_sub(n as i32);
        if attempted < -CAPACITY {
            return Err(TapeError::Underflow {
                attempted,
                capacity: CAPACITY,
            });
        }
        self.head = attempted;
        Ok(())
    }

    /// Moves the head by a signed delta: right if positive, left if
    /// negative, a no-op at zero.
    pub fn move_by(&mut self, delta: i32) -> Result<(), TapeError> {
        match delta.cmp(&0) {
            std::cmp::Ordering::Greater => self.move_right(delta as u32),
            std::cmp::Ordering::Less => self.move_left((-delta) as u32),
            std::cmp::Ordering::Equal => Ok(()),
        }
    }

    /// Reads the current cell's value.
    pub fn get(&self) -> u8 {
        let (arr, idx) = self.index(self.head);
        arr[idx]
    }

    /// Reads the cell one to the right of the head, without moving it.
    ///
    /// Used by `AddToNext`/`MultiplyMove`, which touch their right
    /// neighbor while leaving the head in place. Brainfuck programs that
    /// rely on patterns ending in `>` at the tape's right edge are already
    /// ill-formed; this mirrors that same overflow as an error.
    pub fn get_right_neighbor(&self) -> Result<u8, TapeError> {
        let neighbor_offset = self.head.saturating_add(1);
        if neighbor_offset > CAPACITY - 1 {
            return Err(TapeError::Overflow {
                attempted: neighbor_offset,
                capacity: CAPACITY,
            });
        }
        let (arr, idx) = self.index(neighbor_offset);
        Ok(arr[idx])
    }

    /// Overwrites the cell one to the right of the head, without moving it.
    pub fn set_right_neighbor(&mut self, value: u8) -> Result<(), TapeError> {
        let neighbor_offset = self.head.saturating_add(1);
        if neighbor_offset > CAPACITY - 1 {
            return Err(TapeError::Overflow {
                attempted: neighbor_offset,
                capacity: CAPACITY,
            });
        }
        let (arr, idx) = if neighbor_offset >= 0 {
            (&mut self.right, neighbor_offset as usize)
        } else {
            (&mut self.left, (-neighbor_offset - 1) as usize)
        };
        arr[idx] = value;
        Ok(())
    }

    /// Overwrites the current cell with `value`.
    pub fn set(&mut self, value: u8) {
        let head = self.head;
        let (arr, idx) = if head >= 0 {
            (&mut self.right, head as usize)
        } else {
            (&mut self.left, (-head - 1) as usize)
        };
        arr[idx] = value;
    }

    /// Adds `delta` to the current cell, wrapping modulo 256.
    pub fn add(&mut self, delta: i32) {
        let current = self.get();
        let wrapped = current.wrapping_add((delta.rem_euclid(256)) as u8);
        self.set(wrapped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_at_origin() {
        let tape = Tape::new();
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.get(), 0);
    }

    #[test]
    fn add_wraps_modulo_256() {
        let mut tape = Tape::new();
        tape.add(-1);
        assert_eq!(tape.get(), 255);
        tape.add(256);
        assert_eq!(tape.get(), 255);
        tape.add(1);
        assert_eq!(tape.get(), 0);
    }

    #[test]
    fn move_right_then_left_round_trips() {
        let mut tape = Tape::new();
        tape.add(42);
        tape.move_right(5).unwrap();
        tape.add(7);
        tape.move_left(5).unwrap();
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.get(), 42);
    }

    #[test]
    fn move_left_of_origin_is_legal() {
        let mut tape = Tape::new();
        tape.move_left(3).unwrap();
        assert_eq!(tape.head(), -3);
        tape.add(9);
        assert_eq!(tape.get(), 9);
        tape.move_right(3).unwrap();
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.get(), 0);
    }

    #[test]
    fn move_right_at_last_legal_cell_succeeds() {
        let mut tape = Tape::new();
        tape.move_right((CAPACITY - 1) as u32).unwrap();
        assert_eq!(tape.head(), CAPACITY - 1);
    }

    #[test]
    fn move_right_past_last_cell_overflows() {
        let mut tape = Tape::new();
        tape.move_right((CAPACITY - 1) as u32).unwrap();
        let err = tape.move_right(1).unwrap_err();
        assert_eq!(
            err,
            TapeError::Overflow {
                attempted: CAPACITY,
                capacity: CAPACITY,
            }
        );
    }

    #[test]
    fn move_left_at_first_legal_cell_succeeds() {
        let mut tape = Tape::new();
        tape.move_left(CAPACITY as u32).unwrap();
        assert_eq!(tape.head(), -CAPACITY);
    }

    #[test]
    fn move_left_past_first_cell_underflows() {
        let mut tape = Tape::new();
        tape.move_left(CAPACITY as u32).unwrap();
        let err = tape.move_left(1).unwrap_err();
        assert_eq!(
            err,
            TapeError::Underflow {
                attempted: -CAPACITY - 1,
                capacity: CAPACITY,
            }
        );
    }

    #[test]
    fn right_neighbor_read_write_does_not_move_head() {
        let mut tape = Tape::new();
        tape.set_right_neighbor(100).unwrap();
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.get(), 0);
        assert_eq!(tape.get_right_neighbor().unwrap(), 100);
    }
}
