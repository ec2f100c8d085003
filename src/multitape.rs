//! The k-tape deterministic engine.
//!
//! One shared state drives k independently-headed tapes; lookup is keyed on
//! the k-tuple of symbols under the heads. The table lookup happens before
//! any tape is touched, so a step either applies all k writes and moves or,
//! on an undefined transition, none of them.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::machine::HaltReason;
use crate::tape::Tape;
use crate::types::{Direction, MachineDefinition, MachineError};
use crate::validator;

/// The outcome of one multi-tape transition lookup: one write and one head
/// movement per tape, plus the successor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiAction {
    /// The symbol written on each tape.
    pub write: Vec<char>,
    /// The head movement on each tape.
    pub directions: Vec<Direction>,
    /// The state adopted after the step.
    pub next_state: String,
}

/// One recorded configuration of a k-tape machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSnapshot {
    /// Zero-based step index at which the snapshot was taken.
    pub step: usize,
    /// The machine state.
    pub state: String,
    /// The symbols under each head.
    pub symbols: Vec<char>,
    /// The head position on each tape.
    pub heads: Vec<usize>,
    /// The materialized contents of each tape.
    pub tapes: Vec<String>,
}

impl fmt::Display for MultiSnapshot {
    /// Renders the configuration as `state | tape (H0) || tape (H2)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tapes = self
            .tapes
            .iter()
            .zip(&self.heads)
            .map(|(tape, head)| format!("{} (H{})", tape, head))
            .collect::<Vec<_>>()
            .join(" || ");
        write!(f, "{} | {}", self.state, tapes)
    }
}

/// The result of one multi-tape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiRunOutcome {
    /// Whether an accepting state was reached.
    pub accepted: bool,
    /// The state the machine stopped in.
    pub final_state: String,
    /// The materialized contents of each tape at the end of the run.
    pub final_tapes: Vec<String>,
    /// The number of transitions applied.
    pub steps: usize,
    /// One snapshot per step, recorded before each transition.
    pub trace: Vec<MultiSnapshot>,
    /// Why the run stopped, when it did not accept.
    pub reason: Option<HaltReason>,
}

/// A deterministic k-tape Turing machine with a table keyed on
/// `(state, k symbols)`.
pub struct MultiTapeMachine {
    k: usize,
    table: HashMap<(String, Vec<char>), MultiAction>,
    initial_state: String,
    accept_states: HashSet<String>,
    work_alphabet: HashSet<char>,
    blank: char,
}

impl MultiTapeMachine {
    /// Builds a machine from a wire definition, validating it eagerly. The
    /// tape count is the definition's arity.
    pub fn from_definition(def: &MachineDefinition) -> Result<Self, MachineError> {
        validator::validate(def)?;

        let k = def.arity();
        let mut table = HashMap::new();
        for rule in &def.rules {
            let key = (rule.state.clone(), rule.read.clone());
            let action = MultiAction {
                write: rule.write.clone(),
                directions: rule.directions.clone(),
                next_state: rule.next_state.clone(),
            };
            if table.insert(key.clone(), action).is_some() {
                return Err(MachineError::InvalidDefinition(format!(
                    "duplicate transition for state `{}` and symbols {:?}",
                    key.0, key.1
                )));
            }
        }

        Ok(Self {
            k,
            table,
            initial_state: def.initial_state.clone(),
            accept_states: def.accept_states.iter().cloned().collect(),
            work_alphabet: def.work_alphabet.iter().copied().collect(),
            blank: def.blank,
        })
    }

    /// Returns the number of tapes this machine drives.
    pub fn tape_count(&self) -> usize {
        self.k
    }

    /// Runs the machine on `initial_tapes` (one content string per tape,
    /// empty strings are seeded with a blank) for at most `max_steps` steps.
    pub fn run(
        &self,
        initial_tapes: &[String],
        max_steps: usize,
    ) -> Result<MultiRunOutcome, MachineError> {
        if initial_tapes.len() != self.k {
            return Err(MachineError::InvalidDefinition(format!(
                "machine drives {} tapes but {} initial contents were supplied",
                self.k,
                initial_tapes.len()
            )));
        }
        self.check_tapes(initial_tapes)?;

        let mut tapes: Vec<Tape> = initial_tapes
            .iter()
            .map(|content| Tape::from_cells(content, self.blank))
            .collect();
        let mut state = self.initial_state.clone();
        let mut trace: Vec<MultiSnapshot> = Vec::new();

        for step in 0..max_steps {
            let symbols: Vec<char> = tapes.iter().map(Tape::read).collect();
            trace.push(MultiSnapshot {
                step,
                state: state.clone(),
                symbols: symbols.clone(),
                heads: tapes.iter().map(Tape::head).collect(),
                tapes: tapes.iter().map(Tape::render).collect(),
            });

            if self.accept_states.contains(&state) {
                return Ok(MultiRunOutcome {
                    accepted: true,
                    final_state: state,
                    final_tapes: tapes.iter().map(Tape::render).collect(),
                    steps: step,
                    trace,
                    reason: None,
                });
            }

            // Lookup before mutation: an undefined transition leaves every
            // tape untouched.
            let Some(action) = self.table.get(&(state.clone(), symbols.clone())) else {
                let reason = HaltReason::UndefinedTransition {
                    state: state.clone(),
                    symbols,
                };
                return Ok(MultiRunOutcome {
                    accepted: false,
                    final_state: state,
                    final_tapes: tapes.iter().map(Tape::render).collect(),
                    steps: step,
                    trace,
                    reason: Some(reason),
                });
            };

            for (i, tape) in tapes.iter_mut().enumerate() {
                tape.write(action.write[i]);
                tape.shift(action.directions[i]);
            }
            state = action.next_state.clone();
        }

        Ok(MultiRunOutcome {
            accepted: false,
            final_state: state,
            final_tapes: tapes.iter().map(Tape::render).collect(),
            steps: max_steps,
            trace,
            reason: Some(HaltReason::StepBudgetExceeded),
        })
    }

    fn check_tapes(&self, initial_tapes: &[String]) -> Result<(), MachineError> {
        let mut offending: Vec<char> = initial_tapes
            .iter()
            .flat_map(|content| content.chars())
            .filter(|c| !self.work_alphabet.contains(c))
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
