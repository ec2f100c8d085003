//! A lazily extended, conceptually bi-infinite tape.
//!
//! Cells are stored in a `VecDeque` so extension at either end is amortized
//! O(1). Moving left at cell 0 pushes a blank at the front and leaves the head
//! at 0, which keeps reads and writes in bounds at all times.

use std::collections::VecDeque;

use crate::types::Direction;

/// A single machine tape together with its head position and blank symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: usize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `word` followed by one blank sentinel, with the
    /// head at position 0. An empty word yields a single blank cell.
    pub fn new(word: &str, blank: char) -> Self {
        let mut cells: VecDeque<char> = word.chars().collect();
        cells.push_back(blank);
        Self {
            cells,
            head: 0,
            blank,
        }
    }

    /// Creates a tape holding exactly `content`, with the head at position 0.
    /// An empty content is seeded with a single blank cell so the head always
    /// has a cell under it.
    pub fn from_cells(content: &str, blank: char) -> Self {
        let mut cells: VecDeque<char> = content.chars().collect();
        if cells.is_empty() {
            cells.push_back(blank);
        }
        Self {
            cells,
            head: 0,
            blank,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Writes `symbol` at the head position.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell in `direction`, extending the tape with a blank
    /// when the move crosses the materialized boundary.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.cells.push_front(self.blank);
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                self.head += 1;
                if self.head == self.cells.len() {
                    self.cells.push_back(self.blank);
                }
            }
            Direction::Stay => {}
        }
    }

    /// Returns the current head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell has been materialized. Cannot happen for tapes
    /// built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the blank symbol of this tape.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Renders the materialized cells as a string.
    pub fn render(&self) -> String {
        self.cells.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_appends_sentinel_blank() {
        let tape = Tape::new("ab", '_');
        assert_eq!(tape.render(), "ab_");
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.read(), 'a');
    }

    #[test]
    fn test_empty_word_yields_single_blank() {
        let tape = Tape::new("", '_');
        assert_eq!(tape.render(), "_");
        assert_eq!(tape.read(), '_');
    }

    #[test]
    fn test_write_and_move_right_extends() {
        let mut tape = Tape::new("a", '_');
        tape.write('b');
        tape.shift(Direction::Right);
        assert_eq!(tape.read(), '_');
        // Head now sits on the sentinel; one more right move grows the tape.
        tape.shift(Direction::Right);
        assert_eq!(tape.render(), "b__");
        assert_eq!(tape.head(), 2);
    }

    #[test]
    fn test_move_left_at_origin_extends_front() {
        let mut tape = Tape::new("a", '-');
        tape.shift(Direction::Left);
        assert_eq!(tape.render(), "-a-");
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.read(), '-');
    }

    #[test]
    fn test_stay_keeps_position() {
        let mut tape = Tape::new("ab", '_');
        tape.shift(Direction::Right);
        tape.shift(Direction::Stay);
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), 'b');
    }

    #[test]
    fn test_cloned_tapes_evolve_independently() {
        let original = Tape::new("ab", '_');
        let mut fork = original.clone();
        fork.write('x');
        fork.shift(Direction::Right);

        assert_eq!(original.render(), "ab_");
        assert_eq!(original.head(), 0);
        assert_eq!(fork.render(), "xb_");
        assert_eq!(fork.head(), 1);
    }
}
