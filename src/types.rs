//! Core data structures shared by every simulation engine: directions, wire-format
//! machine definitions, trace snapshots, and the crate-wide error type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The blank symbol used when a definition does not specify one.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The default step budget for deterministic and multi-tape runs.
pub const DEFAULT_MAX_STEPS: usize = 1000;
/// The default exploration budget for nondeterministic runs.
pub const DEFAULT_PATH_BUDGET: usize = 1000;

/// Represents the possible directions a tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

/// A single transition rule in wire format.
///
/// `read`, `write`, and `directions` all have the machine's tape arity:
/// length 1 for single-tape machines, k for k-tape machines. Nondeterministic
/// machines may list several rules with the same `(state, read)` pair; their
/// order in the definition fixes the order in which alternatives are explored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The state this rule fires in.
    pub state: String,
    /// The symbols that must be under each head for this rule to apply.
    pub read: Vec<char>,
    /// The symbols written to each tape.
    pub write: Vec<char>,
    /// The head movement for each tape.
    pub directions: Vec<Direction>,
    /// The state the machine transitions to.
    pub next_state: String,
}

/// A complete machine definition: the transition-table literal format that any
/// external tool producing tables must honor.
///
/// Definitions are plain data; they are validated eagerly when an engine is
/// constructed from them, so engines never re-check these invariants mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// Human-readable name of the machine.
    pub name: String,
    /// The finite state set.
    pub states: Vec<String>,
    /// Symbols an input word may contain. Never includes the blank.
    pub input_alphabet: Vec<char>,
    /// The working alphabet: input symbols plus marks plus the blank.
    pub work_alphabet: Vec<char>,
    /// The blank symbol written onto cells beyond the supplied input.
    #[serde(default = "default_blank")]
    pub blank: char,
    /// The distinguished start state.
    pub initial_state: String,
    /// The accepting states.
    pub accept_states: Vec<String>,
    /// The transition rules.
    pub rules: Vec<Rule>,
}

fn default_blank() -> char {
    DEFAULT_BLANK_SYMBOL
}

impl MachineDefinition {
    /// Returns the tape arity of this definition (1 for single-tape machines).
    /// A definition without rules defaults to arity 1.
    pub fn arity(&self) -> usize {
        self.rules.first().map_or(1, |rule| rule.read.len())
    }

    /// Checks that `word` only uses symbols from the input alphabet.
    pub fn check_word(&self, word: &str) -> Result<(), MachineError> {
        let mut offending: Vec<char> = word
            .chars()
            .filter(|c| !self.input_alphabet.contains(c))
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            offending.sort_unstable();
            offending.dedup();
            Err(MachineError::InvalidWord(offending))
        }
    }
}

/// The single-tape outcome of one transition lookup: what to write, where to
/// move, and which state to adopt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The symbol written at the head position.
    pub write: char,
    /// The head movement.
    pub direction: Direction,
    /// The state adopted after the step.
    pub next_state: String,
}

/// One recorded configuration of a single-tape machine: a write-once snapshot
/// taken before each transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Zero-based step index at which the snapshot was taken.
    pub step: usize,
    /// The machine state.
    pub state: String,
    /// The symbol under the head.
    pub symbol: char,
    /// The head position.
    pub head: usize,
    /// The full tape contents.
    pub tape: String,
}

impl fmt::Display for Snapshot {
    /// Renders the configuration as `state|left[symbol]right`, e.g. `q0|01[0]1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left: String = self.tape.chars().take(self.head).collect();
        let right: String = self.tape.chars().skip(self.head + 1).collect();
        write!(f, "{}|{}[{}]{}", self.state, left, self.symbol, right)
    }
}

/// Represents the errors that can occur while building or running a machine.
///
/// Undefined transitions and exhausted step budgets are *not* errors; they are
/// ordinary halting outcomes reported through [`crate::machine::HaltReason`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A definition violates a construction-time invariant (unknown state,
    /// symbol outside the declared alphabet, inconsistent tape arity, ...).
    #[error("invalid machine definition: {0}")]
    InvalidDefinition(String),
    /// An input word uses symbols outside the declared input alphabet.
    #[error("input word contains symbols outside the input alphabet: {0:?}")]
    InvalidWord(Vec<char>),
    /// A universal-machine bitstring is structurally broken.
    #[error("malformed encoding in segment `{segment}`: {reason}")]
    MalformedEncoding {
        /// The offending record or field.
        segment: String,
        /// Why it could not be decoded.
        reason: String,
    },
    /// A definition could not be parsed from JSON.
    #[error("definition parse error: {0}")]
    Parse(String),
    /// A definition file could not be read.
    #[error("file error: {0}")]
    File(String),
}
